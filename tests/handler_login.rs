mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_login_returns_token() {
    let server = common::create_test_server();
    common::register_user(&server, "mluukkai", "salainen").await;

    let response = server
        .post("/api/login")
        .json(&json!({ "username": "mluukkai", "password": "salainen" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["username"], "mluukkai");
    assert_eq!(body["name"], "mluukkai name");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let server = common::create_test_server();
    common::register_user(&server, "mluukkai", "salainen").await;

    let response = server
        .post("/api/login")
        .json(&json!({ "username": "mluukkai", "password": "wrong" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["message"], "invalid username or password");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_with_unknown_user_is_unauthorized() {
    let server = common::create_test_server();

    let response = server
        .post("/api/login")
        .json(&json!({ "username": "nobody", "password": "salainen" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_works_with_any_scheme_case() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;

    for scheme in ["Bearer", "bearer", "BEARER"] {
        let response = server
            .post("/api/posts")
            .add_header(
                axum::http::header::AUTHORIZATION,
                axum::http::HeaderValue::from_str(&format!("{scheme} {token}")).unwrap(),
            )
            .json(&json!({
                "title": scheme,
                "author": "Michael Chan",
                "url": "https://example.com",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
    }
}
