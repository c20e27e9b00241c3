use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<Date>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub tweet_id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    pub by: User,
}

#[derive(Debug, Deserialize)]
pub struct SignupBody {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<Date>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct PostTweetBody {
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTweetBody {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct LoginOut {
    pub email: String,
    pub message: String,
}

impl LoginOut {
    pub fn new(email: String) -> Self {
        Self {
            email,
            message: "Login successful!".to_owned(),
        }
    }
}

fn check_len(field: &'static str, value: &str, min: usize, max: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    let invalid = || AppError::Validation("invalid email address".to_owned());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_name(field: &'static str, value: &str) -> AppResult<()> {
    check_len(field, value, 1, 50)
}

pub fn validate_password(password: &str) -> AppResult<()> {
    check_len("password", password, 8, 64)
}

pub fn validate_content(content: &str) -> AppResult<()> {
    check_len("content", content, 1, 256)
}

impl SignupBody {
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_name("first_name", &self.first_name)?;
        validate_name("last_name", &self.last_name)?;
        validate_password(&self.password)
    }
}

impl UpdateUserBody {
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_name("first_name", &self.first_name)?;
        validate_name("last_name", &self.last_name)
    }
}
