use axum::{debug_handler, extract::State, http::StatusCode, response::IntoResponse, Json};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    db,
    model::{SignupBody, User},
    AppError, AppResult,
};

#[debug_handler]
pub(crate) async fn signup(
    State(db_pool): State<SqlitePool>,
    Json(body): Json<SignupBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;

    if sqlx::query_as::<_, ()>("SELECT 1 FROM users WHERE email=?")
        .bind(&body.email)
        .fetch_optional(&db_pool)
        .await?
        .is_some()
    {
        return Err(AppError::EmailTaken);
    }

    let user_id = Uuid::now_v7();
    let password_hash = super::hash_password(&body.password)?;
    let birth_date = body.birth_date.map(db::format_date).transpose()?;

    sqlx::query(
        "INSERT INTO users (user_id,email,first_name,last_name,birth_date,password_hash) \
         VALUES (?,?,?,?,?,?)",
    )
    .bind(user_id.to_string())
    .bind(&body.email)
    .bind(&body.first_name)
    .bind(&body.last_name)
    .bind(birth_date)
    .bind(password_hash)
    .execute(&db_pool)
    .await?;

    tracing::info!(%user_id, email = %body.email, "registered user");

    let user = User {
        user_id,
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
        birth_date: body.birth_date,
    };

    Ok((StatusCode::CREATED, Json(user)))
}
