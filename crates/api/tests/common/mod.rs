#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use entrepaginas_api::config::{LogFormat, ServerConfig};
use entrepaginas_api::router::build_app_router;
use entrepaginas_api::state::AppState;
use entrepaginas_core::api_keys::hash_api_key;

/// Key used by tests that turn authentication on.
pub const TEST_API_KEY: &str = "entre-linhas-teste";

/// Build a test `ServerConfig` with safe defaults and no API key.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        api_key_hash: None,
        seed_sample_entries: false,
        log_format: LogFormat::Pretty,
    }
}

fn build_with_config(pool: SqlitePool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the full application router (same middleware stack as `main.rs`)
/// with the API open.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_with_config(pool, test_config())
}

/// Build the full application router requiring [`TEST_API_KEY`].
pub fn build_test_app_with_key(pool: SqlitePool) -> Router {
    build_test_app_with_api_key(pool, TEST_API_KEY)
}

/// Build the full application router requiring `key`.
pub fn build_test_app_with_api_key(pool: SqlitePool, key: &str) -> Router {
    let config = ServerConfig {
        api_key_hash: Some(hash_api_key(key)),
        ..test_config()
    };
    build_with_config(pool, config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

async fn send_empty(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send_empty(app, Method::GET, uri).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send_empty(app, Method::DELETE, uri).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send_empty(app, Method::PATCH, uri).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create an entry through the API and return its JSON representation.
pub async fn create_entry(app: Router, body: Value) -> Value {
    let response = post_json(app, "/api/diary-entries", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
