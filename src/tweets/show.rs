use axum::{
    debug_handler,
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db, model::Tweet, AppError, AppResult};

#[debug_handler]
pub(crate) async fn list_tweets(
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<Tweet>>> {
    let rows: Vec<db::TweetRow> =
        sqlx::query_as(&format!("{} ORDER BY t.created_at", db::SELECT_TWEET))
            .fetch_all(&db_pool)
            .await?;

    let tweets = rows
        .into_iter()
        .map(db::tweet_from_row)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(tweets))
}

#[debug_handler]
pub(crate) async fn show_tweet(
    State(db_pool): State<SqlitePool>,
    Path(tweet_id): Path<Uuid>,
) -> AppResult<Json<Tweet>> {
    let tweet = super::fetch_tweet(&db_pool, tweet_id)
        .await?
        .ok_or(AppError::NotFound("tweet"))?;

    Ok(Json(tweet))
}
