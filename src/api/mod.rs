//! API route mount point
//!
//! The server reserves a URL prefix for API routes defined outside this
//! crate. Everything under the prefix is dispatched here and is never
//! matched against static files or the fallback document, whether or not
//! a handler is mounted.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Boxed response future returned by mounted handlers
pub type ApiFuture = Pin<Box<dyn Future<Output = Response<Full<Bytes>>> + Send>>;

/// Externally-defined request handler mounted under the API prefix
pub trait ApiHandler: Send + Sync {
    fn handle(&self, req: Request<hyper::body::Incoming>) -> ApiFuture;
}

/// Dispatch an API-prefixed request
///
/// The whole request, prefix included, is forwarded to the mounted
/// handler. With nothing mounted the request is answered explicitly with
/// a JSON 404 rather than falling through to static serving.
pub async fn dispatch(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let path = req.uri().path().to_string();
    let prefix = state.config.assets.api_prefix.trim_end_matches('/');

    if req.method() == Method::GET && path == format!("{prefix}/health") {
        return health_response();
    }

    match &state.api_handler {
        Some(handler) => handler.handle(req).await,
        None => {
            logger::log_api_request(req.method().as_str(), &path, 404);
            not_found_response(&path)
        }
    }
}

/// Liveness endpoint served by the dispatcher itself
pub fn health_response() -> Response<Full<Bytes>> {
    http::build_json_response(200, &serde_json::json!({ "status": "ok" }))
}

/// Explicit JSON 404 for API paths with no mounted handler
pub fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    http::build_json_response(
        404,
        &serde_json::json!({
            "error": "not_found",
            "message": format!("no API handler mounted for {path}"),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::PathBuf;

    struct HealthOnly;

    impl ApiHandler for HealthOnly {
        fn handle(&self, _req: Request<hyper::body::Incoming>) -> ApiFuture {
            Box::pin(async { health_response() })
        }
    }

    #[test]
    fn handler_mounts_into_state() {
        let cfg = Config::load_from("nonexistent-config").unwrap();
        let state = AppState::new(cfg, PathBuf::from("/tmp")).with_api_handler(Arc::new(HealthOnly));
        assert!(state.api_handler.is_some());
    }

    #[test]
    fn unmounted_api_answers_json_404() {
        let resp = not_found_response("/api/users");
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
    }

    #[test]
    fn health_is_ok_json() {
        let resp = health_response();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
    }
}
