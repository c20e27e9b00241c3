pub mod db;
pub mod error;
pub mod model;
pub mod session;
pub mod tweets;
pub mod users;

use axum::{
    extract::FromRef,
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use error::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

pub fn app(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(30)));

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        // the original app served the tweet timeline at the root
        .route("/", get(tweets::show::list_tweets))
        .merge(users::router())
        .nest("/tweets", tweets::router())
        .with_state(state)
        .layer(session_layer)
        .layer(cors)
}
