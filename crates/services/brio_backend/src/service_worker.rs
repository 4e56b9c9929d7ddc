//! `GET /service-worker.js`
//!
//! The script is read from disk on every request so it can be replaced
//! without restarting. Browsers must never cache it, and it may control the
//! whole origin even though the file lives under `static/`.

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

pub const SERVICE_WORKER_ALLOWED: &str = "service-worker-allowed";

/// Where the service worker script lives
#[derive(Debug, Clone)]
pub struct ServiceWorkerState {
    pub path: PathBuf,
}

pub async fn service_worker_handler(State(state): State<Arc<ServiceWorkerState>>) -> Response {
    match tokio::fs::read(&state.path).await {
        Ok(script) => (
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/javascript; charset=utf-8"),
                ),
                (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
                (
                    HeaderName::from_static(SERVICE_WORKER_ALLOWED),
                    HeaderValue::from_static("/"),
                ),
            ],
            script,
        )
            .into_response(),
        Err(e) => {
            warn!(
                "Service worker script {} not readable: {}",
                state.path.display(),
                e
            );
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
