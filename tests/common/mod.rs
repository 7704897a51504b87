#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use bloglist::routes::unlimited_router;
use bloglist::state::{AppState, AuthSettings};
use serde_json::{Value, json};

pub const TEST_SECRET: &str = "test-signing-secret";

pub fn create_test_state() -> AppState {
    AppState::in_memory(AuthSettings {
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_seconds: 3600,
    })
}

pub fn create_test_server() -> TestServer {
    TestServer::new(unlimited_router(create_test_state())).unwrap()
}

/// `Authorization` header pair for a token.
pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("bearer {token}")).unwrap(),
    )
}

pub async fn register_user(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/api/users")
        .json(&json!({
            "username": username,
            "name": format!("{username} name"),
            "password": password,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/login")
        .json(&json!({ "username": username, "password": password }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Registers `username` and returns a token for it.
pub async fn user_token(server: &TestServer, username: &str) -> String {
    register_user(server, username, "salainen").await;
    login(server, username, "salainen").await
}

/// Creates a post as the token's user and returns the response body.
pub async fn create_post(
    server: &TestServer,
    token: &str,
    title: &str,
    author: &str,
    likes: i64,
) -> Value {
    let (name, value) = bearer(token);
    let response = server
        .post("/api/posts")
        .add_header(name, value)
        .json(&json!({
            "title": title,
            "author": author,
            "url": format!("https://example.com/{}", title.replace(' ', "-")),
            "likes": likes,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// The classic six-post list, created in order by one user.
pub async fn seed_fixture_posts(server: &TestServer, token: &str) {
    let posts = [
        ("React patterns", "Michael Chan", 7),
        ("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
        ("Canonical string reduction", "Edsger W. Dijkstra", 12),
        ("First class tests", "Robert C. Martin", 10),
        ("TDD harms architecture", "Robert C. Martin", 0),
        ("Type wars", "Robert C. Martin", 2),
    ];

    for (title, author, likes) in posts {
        create_post(server, token, title, author, likes).await;
    }
}
