use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use coursekit_api::config::{ServerConfig, StorageConfig};
use coursekit_api::router::build_app_router;
use coursekit_api::state::AppState;
use coursekit_storage::{LocalStore, ObjectStore};
use coursekit_vimeo::VimeoApi;

/// Build a test `ServerConfig` with safe defaults and blobs under a fresh
/// temp directory.
pub fn test_config() -> ServerConfig {
    let root = tempfile::tempdir().unwrap().into_path();
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        storage: StorageConfig::Local {
            root: root.to_string_lossy().to_string(),
            base_url: "http://localhost:3000/objects".to_string(),
        },
        vimeo_access_token: String::new(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The video host client points at an
/// unroutable address; relay endpoints are not exercised here.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let StorageConfig::Local { root, base_url } = &config.storage else {
        unreachable!("test_config always selects local storage");
    };
    let storage: Arc<dyn ObjectStore> = Arc::new(LocalStore::new(root.clone(), base_url.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        vimeo: Arc::new(VimeoApi::with_api_url("http://127.0.0.1:9", "")),
    };

    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, json).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, json).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, json: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
