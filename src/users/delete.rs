use axum::{
    debug_handler,
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{model::User, AppError, AppResult};

#[debug_handler]
pub(crate) async fn delete_user(
    State(db_pool): State<SqlitePool>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let user = super::fetch_user(&db_pool, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    // a user's tweets go with them
    sqlx::query("DELETE FROM tweets WHERE user_id=?")
        .bind(user_id.to_string())
        .execute(&db_pool)
        .await?;

    sqlx::query("DELETE FROM users WHERE user_id=?")
        .bind(user_id.to_string())
        .execute(&db_pool)
        .await?;

    tracing::info!(%user_id, "deleted user");

    Ok(Json(user))
}
