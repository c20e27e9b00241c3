use axum::{
    debug_handler,
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    db,
    model::{UpdateUserBody, User},
    AppError, AppResult,
};

#[debug_handler]
pub(crate) async fn update_user(
    State(db_pool): State<SqlitePool>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserBody>,
) -> AppResult<Json<User>> {
    body.validate()?;

    if super::fetch_user(&db_pool, user_id).await?.is_none() {
        return Err(AppError::NotFound("user"));
    }

    if sqlx::query_as::<_, ()>("SELECT 1 FROM users WHERE email=? AND user_id<>?")
        .bind(&body.email)
        .bind(user_id.to_string())
        .fetch_optional(&db_pool)
        .await?
        .is_some()
    {
        return Err(AppError::EmailTaken);
    }

    let birth_date = body.birth_date.map(db::format_date).transpose()?;

    sqlx::query(
        "UPDATE users SET email=?, first_name=?, last_name=?, birth_date=? WHERE user_id=?",
    )
    .bind(&body.email)
    .bind(&body.first_name)
    .bind(&body.last_name)
    .bind(birth_date)
    .bind(user_id.to_string())
    .execute(&db_pool)
    .await?;

    tracing::info!(%user_id, "updated user");

    Ok(Json(User {
        user_id,
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
        birth_date: body.birth_date,
    }))
}
