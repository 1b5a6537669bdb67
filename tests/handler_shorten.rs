mod common;

use axum::http::StatusCode;
use common::{TOKEN_U1, bearer, spawn_app};
use serde_json::{Value, json};
use shortlink::utils::code_generator::is_valid_code;

#[tokio::test]
async fn test_shorten_anonymous() {
    let app = spawn_app().await;

    let body = app.shorten("https://example.com/some/path", None).await;

    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(is_valid_code(code));
    assert_eq!(body["short_url"], format!("http://localhost:3000/{code}"));
    assert_eq!(body["original"], "https://example.com/some/path");
    assert!(body["owner_id"].is_null());
    assert_eq!(body["click_count"], 0);
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
    assert!(body.get("deleted_at").is_none());
}

#[tokio::test]
async fn test_shorten_with_owner() {
    let app = spawn_app().await;

    let body = app.shorten("https://example.com", Some(TOKEN_U1)).await;

    assert_eq!(body["owner_id"], "u1");
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_distinct_links() {
    let app = spawn_app().await;

    let first = app.shorten("https://example.com", None).await;
    let second = app.shorten("https://example.com", None).await;

    assert_ne!(first["code"], second["code"]);
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_shorten_rejects_invalid_url() {
    let app = spawn_app().await;

    for url in ["not a url", "ftp://example.com/file", "javascript:alert(1)", ""] {
        let response = app
            .server
            .post("/shorten")
            .json(&json!({ "original_url": url }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    assert!(app.links.is_empty().await);
}

#[tokio::test]
async fn test_shorten_rejects_missing_field() {
    let app = spawn_app().await;

    let response = app.server.post("/shorten").json(&json!({ "url": "https://example.com" })).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_with_invalid_token_is_unauthorized() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/shorten")
        .add_header("Authorization", bearer("not-a-real-token"))
        .json(&json!({ "original_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    assert!(app.links.is_empty().await);
}
