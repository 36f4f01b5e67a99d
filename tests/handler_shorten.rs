mod common;

use axum::http::StatusCode;
use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use shortlink::api::handlers::shorten_handler;
use sqlx::PgPool;

fn app(pool: PgPool) -> Router {
    let state = common::create_test_state(pool);
    Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_shorten_success(pool: PgPool) {
    let server = TestServer::new(app(pool.clone())).unwrap();

    let response = server
        .post("/api/shorten")
        .add_header("x-request-id", "0b8a5f5e-2f7c-4a4b-9d2e-7d3a1c9e4f10")
        .json(&json!({ "url": "https://www.rust-lang.org" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["alias"], "y8C_QJd_O7G");
    assert_eq!(json["short_url"], "http://sho.rt/r/y8C_QJd_O7G");
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_same_url_returns_same_alias(pool: PgPool) {
    let server = TestServer::new(app(pool.clone())).unwrap();

    let first = server
        .post("/api/shorten")
        .add_header("x-request-id", "one")
        .json(&json!({ "url": "https://example.com/article" }))
        .await;
    let second = server
        .post("/api/shorten")
        .add_header("x-request-id", "two")
        .json(&json!({ "url": "https://example.com/article" }))
        .await;

    first.assert_status(StatusCode::CREATED);
    second.assert_status(StatusCode::CREATED);

    let first = first.json::<serde_json::Value>();
    let second = second.json::<serde_json::Value>();
    assert_eq!(first["alias"], second["alias"]);
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_distinct_urls(pool: PgPool) {
    let server = TestServer::new(app(pool.clone())).unwrap();

    for url in ["https://a.example", "https://b.example", "http://c.example/x"] {
        server
            .post("/api/shorten")
            .json(&json!({ "url": url }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    assert_eq!(common::count_links(&pool).await, 3);
}

#[sqlx::test]
async fn test_shorten_invalid_url_is_not_stored(pool: PgPool) {
    let server = TestServer::new(app(pool.clone())).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "ftp://example.com/file" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "'url' must be a valid HTTP(S) URL"
    );
    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_alias_collision_is_internal_error(pool: PgPool) {
    // Another URL already owns the alias this request would generate.
    common::create_test_link(&pool, "https://squatter.example", "FxzdxutmzRA").await;
    let server = TestServer::new(app(pool.clone())).unwrap();

    let response = server
        .post("/api/shorten")
        .add_header("x-request-id", "req-1")
        .json(&json!({ "url": "http://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "internal server error"
    );
    assert_eq!(common::count_links(&pool).await, 1);
}
