use axum::{debug_handler, extract::State, response::IntoResponse, Json};
use serde_json::json;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    model::{LoginBody, LoginOut},
    session::USER_ID,
    AppError, AppResult,
};

#[debug_handler]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(LoginBody { email, password }): Json<LoginBody>,
) -> AppResult<Json<LoginOut>> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT user_id,password_hash FROM users WHERE email=?")
            .bind(&email)
            .fetch_optional(&db_pool)
            .await?;

    // same error for unknown email and wrong password
    let Some((user_id, password_hash)) = row else {
        return Err(AppError::InvalidCredentials);
    };

    if !super::verify_password(&password, &password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    session.insert(USER_ID, &user_id).await?;
    tracing::info!(user_id, "logged in");

    Ok(Json(LoginOut::new(email)))
}

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<impl IntoResponse> {
    session.clear().await;
    Ok(Json(json!({ "message": "Logged out" })))
}
