//! Integration tests — in-memory SQLite, real router, real middleware.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use doable_api::{AppState, config::ApiConfig};

async fn test_app() -> Router {
    let pool = doable_core::db::connect_in_memory()
        .await
        .expect("in-memory pool");
    doable_api::migrate(&pool).await.expect("migrate");

    let state = AppState {
        pool,
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url: "sqlite::memory:".into(),
            jwt_secret: "test-secret".into(),
        },
    };
    doable_api::router(state)
}

/// Send a request, returning (status, x-auth header if any, parsed JSON body).
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-auth", token);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let auth = response
        .headers()
        .get("x-auth")
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON body")
    };
    (status, auth, json)
}

async fn register(app: &Router, email: &str, password: &str) -> String {
    let (status, auth, _) = send(
        app,
        Method::POST,
        "/users",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    auth.expect("x-auth header on registration")
}

#[tokio::test]
async fn register_me_logout_lifecycle() {
    let app = test_app().await;

    let (status, auth, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({"email": "a@b.com", "password": "pass1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = auth.expect("x-auth header");
    assert_eq!(body["email"], "a@b.com");
    assert!(body["id"].is_string());
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
    assert!(body.get("tokens").is_none());

    let (status, _, me) = send(&app, Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "a@b.com");
    assert_eq!(me["id"], body["id"]);

    let (status, _, _) =
        send(&app, Method::DELETE, "/users/me/token", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // The same header must now be rejected, even though the JWT itself is
    // still within its validity window.
    let (status, _, _) = send(&app, Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = test_app().await;
    register(&app, "a@b.com", "pass1").await;

    let (status, auth, _) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({"email": "a@b.com", "password": "other1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(auth.is_none());
}

#[tokio::test]
async fn registration_validates_input() {
    let app = test_app().await;

    for body in [
        json!({"email": "not-an-email", "password": "pass1"}),
        json!({"email": "a@b.com", "password": "abc"}),
    ] {
        let (status, _, _) = send(&app, Method::POST, "/users", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn login_issues_token_and_never_leaks_the_cause() {
    let app = test_app().await;
    register(&app, "a@b.com", "pass1").await;

    let (status, auth, body) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({"email": "a@b.com", "password": "pass1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@b.com");
    let token = auth.expect("x-auth header on login");

    let (status, _, _) = send(&app, Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (wrong_pw, _, wrong_pw_body) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({"email": "a@b.com", "password": "nope1"})),
    )
    .await;
    let (unknown, _, unknown_body) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({"email": "nobody@b.com", "password": "pass1"})),
    )
    .await;
    assert_eq!(wrong_pw, StatusCode::BAD_REQUEST);
    assert_eq!(unknown, StatusCode::BAD_REQUEST);
    // Identical bodies: nothing distinguishes wrong-password from no-account.
    assert_eq!(wrong_pw_body, unknown_body);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = test_app().await;

    let (status, _, _) = send(&app, Method::GET, "/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(&app, Method::GET, "/todos", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/todos",
        None,
        Some(json!({"text": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn todo_crud_and_merge_policy() {
    let app = test_app().await;
    let token = register(&app, "a@b.com", "pass1").await;

    let (status, _, todo) = send(
        &app,
        Method::POST,
        "/todos",
        Some(&token),
        Some(json!({"text": "buy milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(todo["text"], "buy milk");
    assert_eq!(todo["completed"], false);
    assert_eq!(todo["completedAt"], Value::Null);
    let id = todo["id"].as_str().expect("id").to_string();

    let (status, _, list) = send(&app, Method::GET, "/todos", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["todos"].as_array().expect("todos array").len(), 1);

    // completed: true stamps a numeric completedAt.
    let (status, _, patched) = send(
        &app,
        Method::PATCH,
        &format!("/todos/{id}"),
        Some(&token),
        Some(json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["todo"]["completed"], true);
    assert!(patched["todo"]["completedAt"].is_number());

    // completed: false clears it again.
    let (status, _, patched) = send(
        &app,
        Method::PATCH,
        &format!("/todos/{id}"),
        Some(&token),
        Some(json!({"completed": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["todo"]["completed"], false);
    assert_eq!(patched["todo"]["completedAt"], Value::Null);

    let (status, _, fetched) =
        send(&app, Method::GET, &format!("/todos/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["todo"]["id"], id.as_str());

    let (status, _, removed) = send(
        &app,
        Method::DELETE,
        &format!("/todos/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["remove"]["id"], id.as_str());

    let (status, _, _) =
        send(&app, Method::GET, &format!("/todos/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_without_completed_clears_completion() {
    let app = test_app().await;
    let token = register(&app, "a@b.com", "pass1").await;

    let (_, _, todo) = send(
        &app,
        Method::POST,
        "/todos",
        Some(&token),
        Some(json!({"text": "task"})),
    )
    .await;
    let id = todo["id"].as_str().expect("id").to_string();

    send(
        &app,
        Method::PATCH,
        &format!("/todos/{id}"),
        Some(&token),
        Some(json!({"completed": true})),
    )
    .await;

    // Renaming the todo without mentioning `completed` resets completion.
    let (status, _, patched) = send(
        &app,
        Method::PATCH,
        &format!("/todos/{id}"),
        Some(&token),
        Some(json!({"text": "renamed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["todo"]["text"], "renamed");
    assert_eq!(patched["todo"]["completed"], false);
    assert_eq!(patched["todo"]["completedAt"], Value::Null);
}

#[tokio::test]
async fn empty_todo_text_is_a_validation_error() {
    let app = test_app().await;
    let token = register(&app, "a@b.com", "pass1").await;

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/todos",
        Some(&token),
        Some(json!({"text": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_ids_never_500() {
    let app = test_app().await;
    let token = register(&app, "a@b.com", "pass1").await;

    let (status, _, _) = send(&app, Method::GET, "/todos/123", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, "/todos/123", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // PATCH maps a malformed id to 400 rather than 404.
    let (status, _, _) = send(
        &app,
        Method::PATCH,
        "/todos/123",
        Some(&token),
        Some(json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn todos_are_scoped_to_their_owner() {
    let app = test_app().await;
    let one = register(&app, "one@test.com", "pass1").await;
    let two = register(&app, "two@test.com", "pass2").await;

    let (_, _, todo) = send(
        &app,
        Method::POST,
        "/todos",
        Some(&one),
        Some(json!({"text": "mine"})),
    )
    .await;
    let id = todo["id"].as_str().expect("id").to_string();

    let (status, _, list) = send(&app, Method::GET, "/todos", Some(&two), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list["todos"].as_array().expect("array").is_empty());

    let (status, _, _) =
        send(&app, Method::GET, &format!("/todos/{id}"), Some(&two), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(
        &app,
        Method::DELETE,
        &format!("/todos/{id}"),
        Some(&two),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(
        &app,
        Method::PATCH,
        &format!("/todos/{id}"),
        Some(&two),
        Some(json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still there, untouched, for its owner.
    let (status, _, fetched) =
        send(&app, Method::GET, &format!("/todos/{id}"), Some(&one), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["todo"]["completed"], false);
}

#[tokio::test]
async fn revoked_token_cannot_touch_todos() {
    let app = test_app().await;
    let token = register(&app, "a@b.com", "pass1").await;

    send(&app, Method::DELETE, "/users/me/token", Some(&token), None).await;

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/todos",
        Some(&token),
        Some(json!({"text": "too late"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
