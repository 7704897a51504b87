mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_posts_are_returned_as_json() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    common::seed_fixture_posts(&server, &token).await;

    let response = server.get("/api/posts").await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );

    let posts = response.json::<Vec<Value>>();
    assert_eq!(posts.len(), 6);
    assert_eq!(posts[0]["title"], "React patterns");
    assert_eq!(posts[0]["user"]["username"], "root");
    assert!(posts[0]["id"].is_i64());
}

#[tokio::test]
async fn test_empty_list() {
    let server = common::create_test_server();

    let response = server.get("/api/posts").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 0);
}

#[tokio::test]
async fn test_create_post() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let (name, value) = common::bearer(&token);

    let response = server
        .post("/api/posts")
        .add_header(name, value)
        .json(&json!({
            "title": "async/await simplifies making async calls",
            "author": "Edsger W. Dijkstra",
            "url": "https://example.com/async",
            "likes": 3,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let post = response.json::<Value>();
    assert_eq!(post["likes"], 3);
    assert_eq!(post["user"]["username"], "root");

    let titles: Vec<String> = server
        .get("/api/posts")
        .await
        .json::<Vec<Value>>()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["async/await simplifies making async calls"]);
}

#[tokio::test]
async fn test_missing_likes_defaults_to_zero() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let (name, value) = common::bearer(&token);

    let response = server
        .post("/api/posts")
        .add_header(name, value)
        .json(&json!({
            "title": "No likes yet",
            "author": "Michael Chan",
            "url": "https://example.com/none",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["likes"], 0);
}

#[tokio::test]
async fn test_missing_title_or_url_is_rejected() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;

    for body in [
        json!({ "author": "Michael Chan", "url": "https://example.com" }),
        json!({ "title": "No url", "author": "Michael Chan" }),
        json!({ "title": "", "author": "Michael Chan", "url": "https://example.com" }),
        json!({ "title": "Bad url", "author": "Michael Chan", "url": "example" }),
    ] {
        let (name, value) = common::bearer(&token);
        let response = server
            .post("/api/posts")
            .add_header(name, value)
            .json(&body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    assert_eq!(server.get("/api/posts").await.json::<Vec<Value>>().len(), 0);
}

#[tokio::test]
async fn test_negative_likes_rejected() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let (name, value) = common::bearer(&token);

    let response = server
        .post("/api/posts")
        .add_header(name, value)
        .json(&json!({
            "title": "Negative",
            "author": "Michael Chan",
            "url": "https://example.com",
            "likes": -5,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_without_token_is_unauthorized() {
    let server = common::create_test_server();

    let response = server
        .post("/api/posts")
        .json(&json!({
            "title": "Anonymous",
            "author": "Michael Chan",
            "url": "https://example.com",
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_create_with_invalid_token_is_unauthorized() {
    let server = common::create_test_server();
    let (name, value) = common::bearer("not.a.token");

    let response = server
        .post("/api/posts")
        .add_header(name, value)
        .json(&json!({
            "title": "Forged",
            "author": "Michael Chan",
            "url": "https://example.com",
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_post_by_id() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let created = common::create_post(&server, &token, "React patterns", "Michael Chan", 7).await;
    let id = created["id"].as_i64().unwrap();

    let response = server.get(&format!("/api/posts/{id}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["title"], "React patterns");

    server
        .get(&format!("/api/posts/{}", id + 100))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_update_changes_likes() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let created = common::create_post(&server, &token, "React patterns", "Michael Chan", 7).await;
    let id = created["id"].as_i64().unwrap();
    let (name, value) = common::bearer(&token);

    let response = server
        .put(&format!("/api/posts/{id}"))
        .add_header(name, value)
        .json(&json!({ "likes": 8 }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["likes"], 8);
    assert_eq!(updated["title"], "React patterns");
}

#[tokio::test]
async fn test_update_by_another_user_is_allowed() {
    let server = common::create_test_server();
    let owner = common::user_token(&server, "owner").await;
    let other = common::user_token(&server, "other").await;
    let created = common::create_post(&server, &owner, "React patterns", "Michael Chan", 7).await;
    let id = created["id"].as_i64().unwrap();
    let (name, value) = common::bearer(&other);

    let response = server
        .put(&format!("/api/posts/{id}"))
        .add_header(name, value)
        .json(&json!({ "likes": 8 }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let (name, value) = common::bearer(&token);

    let response = server
        .put("/api/posts/999")
        .add_header(name, value)
        .json(&json!({ "likes": 1 }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_without_token_is_unauthorized() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let created = common::create_post(&server, &token, "React patterns", "Michael Chan", 7).await;
    let id = created["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/posts/{id}"))
        .json(&json!({ "likes": 100 }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_post() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let created = common::create_post(&server, &token, "React patterns", "Michael Chan", 7).await;
    let id = created["id"].as_i64().unwrap();
    let (name, value) = common::bearer(&token);

    let response = server
        .delete(&format!("/api/posts/{id}"))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(server.get("/api/posts").await.json::<Vec<Value>>().len(), 0);
}

#[tokio::test]
async fn test_delete_by_another_user_is_forbidden() {
    let server = common::create_test_server();
    let owner = common::user_token(&server, "owner").await;
    let other = common::user_token(&server, "other").await;
    let created = common::create_post(&server, &owner, "React patterns", "Michael Chan", 7).await;
    let id = created["id"].as_i64().unwrap();
    let (name, value) = common::bearer(&other);

    let response = server
        .delete(&format!("/api/posts/{id}"))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["error"]["code"], "forbidden");
    assert_eq!(server.get("/api/posts").await.json::<Vec<Value>>().len(), 1);
}

#[tokio::test]
async fn test_delete_without_token_is_unauthorized() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let created = common::create_post(&server, &token, "React patterns", "Michael Chan", 7).await;
    let id = created["id"].as_i64().unwrap();

    server
        .delete(&format!("/api/posts/{id}"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(server.get("/api/posts").await.json::<Vec<Value>>().len(), 1);
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let (name, value) = common::bearer(&token);

    server
        .delete("/api/posts/42")
        .add_header(name, value)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let server = common::create_test_server();
    let token = common::user_token(&server, "root").await;
    let (name, value) = common::bearer(&token);

    let response = server
        .post("/api/posts")
        .add_header(name, value)
        .content_type("application/json")
        .text("{not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
