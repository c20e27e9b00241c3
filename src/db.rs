use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime};
use uuid::Uuid;

use crate::{
    model::{Tweet, User},
    AppResult,
};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(url)
        .await?;
    init_schema(&pool).await?;
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            user_id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birth_date TEXT,
            password_hash TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS tweets (
            tweet_id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(user_id),
            content TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub const SELECT_USER: &str =
    "SELECT user_id,email,first_name,last_name,birth_date FROM users";

pub const SELECT_TWEET: &str =
    "SELECT t.tweet_id,t.content,t.created_at,t.updated_at,\
     u.user_id,u.email,u.first_name,u.last_name,u.birth_date \
     FROM tweets t JOIN users u ON u.user_id=t.user_id";

pub type UserRow = (String, String, String, String, Option<String>);

pub type TweetRow = (
    String,
    String,
    String,
    Option<String>,
    String,
    String,
    String,
    String,
    Option<String>,
);

pub fn user_from_row((user_id, email, first_name, last_name, birth_date): UserRow) -> AppResult<User> {
    Ok(User {
        user_id: Uuid::parse_str(&user_id)?,
        email,
        first_name,
        last_name,
        birth_date: match birth_date {
            Some(d) => Some(Date::parse(&d, DATE_FORMAT)?),
            None => None,
        },
    })
}

pub fn tweet_from_row(row: TweetRow) -> AppResult<Tweet> {
    let (tweet_id, content, created_at, updated_at, user_id, email, first_name, last_name, birth_date) = row;
    Ok(Tweet {
        tweet_id: Uuid::parse_str(&tweet_id)?,
        content,
        created_at: OffsetDateTime::parse(&created_at, &time::format_description::well_known::Rfc3339)?,
        updated_at: match updated_at {
            Some(t) => Some(OffsetDateTime::parse(&t, &time::format_description::well_known::Rfc3339)?),
            None => None,
        },
        by: user_from_row((user_id, email, first_name, last_name, birth_date))?,
    })
}

pub fn format_timestamp(ts: OffsetDateTime) -> AppResult<String> {
    Ok(ts.format(&time::format_description::well_known::Rfc3339)?)
}

pub fn format_date(date: Date) -> AppResult<String> {
    Ok(date.format(DATE_FORMAT)?)
}
