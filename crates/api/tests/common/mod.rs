#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Local, TimeZone, Utc};
use forum_api::config::ServerConfig;
use forum_api::router::build_app_router;
use forum_api::state::AppState;
use forum_db::DbPool;
use http_body_util::BodyExt;
use mockable::Clock;
use tower::ServiceExt;

/// Clock pinned to one instant.
struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// The instant every test app runs at unless told otherwise: 2020-06-01.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:4200".to_string()],
        request_timeout_secs: 30,
    }
}

/// A fresh, migrated database private to the calling test.
pub async fn test_pool() -> DbPool {
    forum_db::create_isolated_pool().await.unwrap()
}

/// Build the full application router, clock fixed at [`fixture_now`].
pub fn build_test_app(pool: DbPool) -> Router {
    build_test_app_at(pool, fixture_now())
}

/// Build the full application router with the clock fixed at `now`.
pub fn build_test_app_at(pool: DbPool, now: DateTime<Utc>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock: Arc::new(FixtureClock { utc_now: now }),
    };
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// POST `body` to `uri`, assert 201 and return the new row's id.
pub async fn create(pool: &DbPool, uri: &str, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "POST {uri}: {json}");
    json["id"].as_i64().unwrap()
}

/// Create a user and return its id.
pub async fn create_user(pool: &DbPool, name: &str) -> i64 {
    create(
        pool,
        "/api/v1/users",
        serde_json::json!({ "display_name": name }),
    )
    .await
}
