use axum::{debug_handler, extract::State, http::StatusCode, response::IntoResponse, Json};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    db,
    model::{validate_content, PostTweetBody, Tweet},
    users, AppError, AppResult,
};

#[debug_handler]
pub(crate) async fn post_tweet(
    State(db_pool): State<SqlitePool>,
    Json(PostTweetBody { user_id, content }): Json<PostTweetBody>,
) -> AppResult<impl IntoResponse> {
    validate_content(&content)?;

    let author = users::fetch_user(&db_pool, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let tweet_id = Uuid::now_v7();
    let created_at = OffsetDateTime::now_utc();

    sqlx::query(
        "INSERT INTO tweets (tweet_id,user_id,content,created_at,updated_at) VALUES (?,?,?,?,NULL)",
    )
    .bind(tweet_id.to_string())
    .bind(user_id.to_string())
    .bind(&content)
    .bind(db::format_timestamp(created_at)?)
    .execute(&db_pool)
    .await?;

    tracing::info!(%tweet_id, %user_id, "posted tweet");

    let tweet = Tweet {
        tweet_id,
        content,
        created_at,
        updated_at: None,
        by: author,
    };

    Ok((StatusCode::CREATED, Json(tweet)))
}
