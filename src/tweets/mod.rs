mod delete;
mod post;
pub(crate) mod show;
mod update;

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db, model::Tweet, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show::list_tweets).post(post::post_tweet))
        .route(
            "/{tweet_id}",
            get(show::show_tweet)
                .put(update::update_tweet)
                .delete(delete::delete_tweet),
        )
}

pub(crate) async fn fetch_tweet(db_pool: &SqlitePool, tweet_id: Uuid) -> AppResult<Option<Tweet>> {
    let row: Option<db::TweetRow> =
        sqlx::query_as(&format!("{} WHERE t.tweet_id=?", db::SELECT_TWEET))
            .bind(tweet_id.to_string())
            .fetch_optional(db_pool)
            .await?;

    row.map(db::tweet_from_row).transpose()
}
