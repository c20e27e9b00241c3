use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chirp::{app, db, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn test_app() -> Router {
    // a single long-lived connection so the in-memory database survives
    // across requests
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_schema(&db_pool).await.unwrap();
    app(AppState { db_pool })
}

fn req(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn signup_body(email: &str) -> Value {
    json!({
        "email": email,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "birth_date": "1990-07-14",
        "password": "correct horse",
    })
}

async fn signup(app: &Router, email: &str) -> Value {
    let response = app
        .clone()
        .oneshot(req(Method::POST, "/signup", &signup_body(email)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn signup_returns_created_user() {
    let app = test_app().await;

    let user = signup(&app, "ada@example.com").await;
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["first_name"], "Ada");
    assert_eq!(user["birth_date"], "1990-07-14");
    assert!(user["user_id"].is_string());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let response = app.clone().oneshot(get("/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users = body_json(response).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["user_id"], user["user_id"]);
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let app = test_app().await;
    signup(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(req(Method::POST, "/signup", &signup_body("ada@example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "email already registered");
}

#[tokio::test]
async fn signup_validates_fields() {
    let app = test_app().await;

    let mut body = signup_body("ada@example.com");
    body["password"] = json!("short");
    let response = app
        .clone()
        .oneshot(req(Method::POST, "/signup", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let mut body = signup_body("ada@example.com");
    body["email"] = json!("not-an-email");
    let response = app
        .clone()
        .oneshot(req(Method::POST, "/signup", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_round_trip() {
    let app = test_app().await;
    signup(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(req(
            Method::POST,
            "/login",
            &json!({ "email": "ada@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["message"], "Login successful!");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = test_app().await;
    signup(&app, "ada@example.com").await;

    // wrong password
    let response = app
        .clone()
        .oneshot(req(
            Method::POST,
            "/login",
            &json!({ "email": "ada@example.com", "password": "wrong password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // unknown email, indistinguishable from wrong password
    let response = app
        .clone()
        .oneshot(req(
            Method::POST,
            "/login",
            &json!({ "email": "nobody@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid email or password");
}

#[tokio::test]
async fn missing_user_is_a_structured_404() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(get("/users/0196b2a0-0000-7000-8000-000000000000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "user not found");
}

#[tokio::test]
async fn update_user_replaces_fields() {
    let app = test_app().await;
    let user = signup(&app, "ada@example.com").await;
    let user_id = user["user_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(req(
            Method::PUT,
            &format!("/users/{user_id}"),
            &json!({
                "email": "countess@example.com",
                "first_name": "Augusta",
                "last_name": "King",
                "birth_date": null,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["email"], "countess@example.com");
    assert_eq!(updated["first_name"], "Augusta");
    assert_eq!(updated["birth_date"], Value::Null);

    let response = app
        .clone()
        .oneshot(get(&format!("/users/{user_id}")))
        .await
        .unwrap();
    let fetched = body_json(response).await;
    assert_eq!(fetched["email"], "countess@example.com");
}

#[tokio::test]
async fn update_user_refuses_taken_email() {
    let app = test_app().await;
    let ada = signup(&app, "ada@example.com").await;
    signup(&app, "grace@example.com").await;

    let response = app
        .clone()
        .oneshot(req(
            Method::PUT,
            &format!("/users/{}", ada["user_id"].as_str().unwrap()),
            &json!({
                "email": "grace@example.com",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "birth_date": null,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn tweet_crud_round_trip() {
    let app = test_app().await;
    let user = signup(&app, "ada@example.com").await;
    let user_id = user["user_id"].as_str().unwrap();

    // post
    let response = app
        .clone()
        .oneshot(req(
            Method::POST,
            "/tweets",
            &json!({ "user_id": user_id, "content": "hello world" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let tweet = body_json(response).await;
    assert_eq!(tweet["content"], "hello world");
    assert_eq!(tweet["by"]["email"], "ada@example.com");
    assert_eq!(tweet["updated_at"], Value::Null);
    let tweet_id = tweet["tweet_id"].as_str().unwrap().to_owned();

    // show
    let response = app
        .clone()
        .oneshot(get(&format!("/tweets/{tweet_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["tweet_id"], tweet["tweet_id"]);
    assert_eq!(fetched["created_at"], tweet["created_at"]);

    // update sets updated_at
    let response = app
        .clone()
        .oneshot(req(
            Method::PUT,
            &format!("/tweets/{tweet_id}"),
            &json!({ "content": "hello again" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["content"], "hello again");
    assert!(updated["updated_at"].is_string());

    // delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/tweets/{tweet_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/tweets/{tweet_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tweet_requires_existing_author() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(req(
            Method::POST,
            "/tweets",
            &json!({
                "user_id": "0196b2a0-0000-7000-8000-000000000000",
                "content": "ghost tweet",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tweet_content_bounds() {
    let app = test_app().await;
    let user = signup(&app, "ada@example.com").await;
    let user_id = user["user_id"].as_str().unwrap();

    let too_long = "x".repeat(257);
    for content in ["", too_long.as_str()] {
        let response = app
            .clone()
            .oneshot(req(
                Method::POST,
                "/tweets",
                &json!({ "user_id": user_id, "content": content }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    let response = app
        .clone()
        .oneshot(req(
            Method::POST,
            "/tweets",
            &json!({ "user_id": user_id, "content": "x".repeat(256) }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn deleting_a_user_removes_their_tweets() {
    let app = test_app().await;
    let user = signup(&app, "ada@example.com").await;
    let user_id = user["user_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(req(
            Method::POST,
            "/tweets",
            &json!({ "user_id": user_id, "content": "soon gone" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/users/{user_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/tweets")).await.unwrap();
    let tweets = body_json(response).await;
    assert_eq!(tweets.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn root_serves_the_timeline() {
    let app = test_app().await;
    let user = signup(&app, "ada@example.com").await;
    let user_id = user["user_id"].as_str().unwrap();

    app.clone()
        .oneshot(req(
            Method::POST,
            "/tweets",
            &json!({ "user_id": user_id, "content": "first!" }),
        ))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tweets = body_json(response).await;
    assert_eq!(tweets.as_array().unwrap().len(), 1);
    assert_eq!(tweets[0]["content"], "first!");
    assert_eq!(tweets[0]["by"]["user_id"], user["user_id"]);
}
