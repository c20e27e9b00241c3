use axum::{
    debug_handler,
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db, model::User, AppError, AppResult};

#[debug_handler]
pub(crate) async fn list_users(
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<User>>> {
    let rows: Vec<db::UserRow> = sqlx::query_as(db::SELECT_USER)
        .fetch_all(&db_pool)
        .await?;

    let users = rows
        .into_iter()
        .map(db::user_from_row)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(users))
}

#[debug_handler]
pub(crate) async fn show_user(
    State(db_pool): State<SqlitePool>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let user = super::fetch_user(&db_pool, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(user))
}
