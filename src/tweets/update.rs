use axum::{
    debug_handler,
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    db,
    model::{validate_content, Tweet, UpdateTweetBody},
    AppError, AppResult,
};

#[debug_handler]
pub(crate) async fn update_tweet(
    State(db_pool): State<SqlitePool>,
    Path(tweet_id): Path<Uuid>,
    Json(UpdateTweetBody { content }): Json<UpdateTweetBody>,
) -> AppResult<Json<Tweet>> {
    validate_content(&content)?;

    let mut tweet = super::fetch_tweet(&db_pool, tweet_id)
        .await?
        .ok_or(AppError::NotFound("tweet"))?;

    let updated_at = OffsetDateTime::now_utc();

    sqlx::query("UPDATE tweets SET content=?, updated_at=? WHERE tweet_id=?")
        .bind(&content)
        .bind(db::format_timestamp(updated_at)?)
        .bind(tweet_id.to_string())
        .execute(&db_pool)
        .await?;

    tracing::info!(%tweet_id, "updated tweet");

    tweet.content = content;
    tweet.updated_at = Some(updated_at);

    Ok(Json(tweet))
}
