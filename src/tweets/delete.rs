use axum::{
    debug_handler,
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{model::Tweet, AppError, AppResult};

#[debug_handler]
pub(crate) async fn delete_tweet(
    State(db_pool): State<SqlitePool>,
    Path(tweet_id): Path<Uuid>,
) -> AppResult<Json<Tweet>> {
    let tweet = super::fetch_tweet(&db_pool, tweet_id)
        .await?
        .ok_or(AppError::NotFound("tweet"))?;

    sqlx::query("DELETE FROM tweets WHERE tweet_id=?")
        .bind(tweet_id.to_string())
        .execute(&db_pool)
        .await?;

    tracing::info!(%tweet_id, "deleted tweet");

    Ok(Json(tweet))
}
