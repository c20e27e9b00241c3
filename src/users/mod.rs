mod delete;
mod login;
mod show;
mod signup;
mod update;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db, model::User, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup::signup))
        .route("/login", post(login::login))
        .route("/logout", post(login::logout))
        .route("/users", get(show::list_users))
        .route(
            "/users/{user_id}",
            get(show::show_user)
                .put(update::update_user)
                .delete(delete::delete_user),
        )
}

pub(crate) async fn fetch_user(db_pool: &SqlitePool, user_id: Uuid) -> AppResult<Option<User>> {
    let row: Option<db::UserRow> =
        sqlx::query_as(&format!("{} WHERE user_id=?", db::SELECT_USER))
            .bind(user_id.to_string())
            .fetch_optional(db_pool)
            .await?;

    row.map(db::user_from_row).transpose()
}

pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e))?
        .to_string())
}

pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!(e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
