mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "pw1").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("alice", "pw1").await;
    let response = app.register("alice", "pw2").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "username already taken" }));
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "invalid request data" }));
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app.register("al ice", "pw1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.register("", "pw1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    app.register("alice", "pw1").await;
    let response = app.login("alice", "pw1").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("token should be a string");
    assert_eq!(token.split('.').count(), 3);

    let claims = app
        .authenticator
        .validate_token(token, Utc::now())
        .expect("issued token should verify");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.exp - claims.iat, 72 * 3600);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.register("alice", "pw1").await;

    let wrong_password = app.login("alice", "wrong").await;
    let unknown_user = app.login("bob", "pw1").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(
        wrong_password,
        json!({ "error": "invalid username or password" })
    );
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.login("", "pw1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_alice_scenario() {
    let app = TestApp::spawn().await;

    assert_eq!(app.register("alice", "pw1").await.status(), StatusCode::CREATED);
    assert_eq!(app.register("alice", "pw2").await.status(), StatusCode::CONFLICT);
    assert_eq!(app.login("alice", "wrong").await.status(), StatusCode::UNAUTHORIZED);

    let response = app.login("alice", "pw1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .get_authenticated("/movies", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // flip one character of the signature
    let mut tampered = token.into_bytes();
    let last = tampered.len() - 1;
    tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = app
        .get_authenticated("/movies", &tampered)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_without_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/movies")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "authorization required" }));
}

#[tokio::test]
async fn test_protected_route_without_bearer_scheme() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "pw1").await;

    let response = app
        .get("/movies")
        .header("authorization", format!("Token {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "invalid authorization header" }));
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let app = TestApp::spawn().await;

    let token = app
        .authenticator
        .issue_token(1, "alice", Utc::now() - Duration::hours(72))
        .unwrap();

    let response = app
        .get_authenticated("/movies", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "invalid or expired token" }));
}

#[tokio::test]
async fn test_me_returns_caller_identity() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice", "pw1").await;

    let response = app
        .get_authenticated("/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_me_for_unknown_user() {
    let app = TestApp::spawn().await;

    // signed by the server's own secret but for a user that was never stored
    let token = app.authenticator.issue_token(99, "ghost", Utc::now()).unwrap();

    let response = app
        .get_authenticated("/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
