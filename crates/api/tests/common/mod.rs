//! Shared harness for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use hours_api::auth::MockResolver;
use hours_api::config::{AuthConfig, ServerConfig};
use hours_api::routes;
use hours_api::state::AppState;
use hours_core::invariants::InvariantMode;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Build a test `ServerConfig` with safe defaults and the mock resolver.
pub fn test_config(invariant_mode: InvariantMode) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        app_env: "test".to_string(),
        auth: AuthConfig::Mock,
        invariant_mode,
    }
}

/// Build the full application router in lenient mode.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, InvariantMode::Lenient)
}

/// Same as [`build_test_app`] with soft invariants enforced.
pub fn build_strict_test_app(pool: PgPool) -> Router {
    build_app(pool, InvariantMode::Strict)
}

fn build_app(pool: PgPool, invariant_mode: InvariantMode) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config(invariant_mode)),
        identity: Arc::new(MockResolver),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

/// GET with extra headers, e.g. the `X-Dev-User-*` identity headers.
pub async fn get_with_headers(app: Router, uri: &str, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::get(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PUT, uri, body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Ids of a client, one project under it, and one employee, created through
/// the API.
pub struct Fixture {
    pub client_primary_id: String,
    pub client_id: String,
    pub project_id: i64,
    pub employee_id: i64,
}

pub async fn create_employee(pool: &PgPool, name: &str, email: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/employees",
        serde_json::json!({ "name": name, "email": email }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn create_project(pool: &PgPool, client_id: &str, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects",
        serde_json::json!({ "client_id": client_id, "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn seed(pool: &PgPool) -> Fixture {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/clients",
        serde_json::json!({ "name": "Contoso" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let client = body_json(response).await;
    let client_primary_id = client["primary_id"].as_str().unwrap().to_string();
    let client_id = client["secondary_id"].as_str().unwrap().to_string();

    let project_id = create_project(pool, &client_id, "Migration").await;
    let employee_id = create_employee(pool, "Ana", "ana@contoso.com").await;

    Fixture {
        client_primary_id,
        client_id,
        project_id,
        employee_id,
    }
}
