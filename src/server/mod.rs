//! Server module
//!
//! Listener construction, the accept loop, and per-connection handling.

pub mod connection;
pub mod listener;

pub use listener::create_reusable_listener;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

/// Accept connections forever, one spawned task per connection
///
/// Accept errors are logged and the loop continues; requests are
/// stateless so a failed accept affects nobody else.
pub async fn run(listener: TcpListener, state: Arc<AppState>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::handle_connection(stream, peer_addr, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    const SHELL: &str = "<!DOCTYPE html><html>shell</html>";
    const BUNDLE: &str = "console.log('bundle');";

    async fn start_test_server() -> (SocketAddr, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("index.html"), SHELL).unwrap();
        fs::create_dir(tmp.path().join("assets")).unwrap();
        fs::write(tmp.path().join("assets/app.js"), BUNDLE).unwrap();

        let mut cfg = Config::load_from("nonexistent-config").unwrap();
        cfg.assets.dir = tmp.path().to_string_lossy().into_owned();
        cfg.logging.access_log = false;
        let root = cfg.resolve_asset_root().unwrap();

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new(cfg, root));
        tokio::spawn(run(listener, state));
        (addr, tmp)
    }

    async fn raw_request(addr: SocketAddr, method: &str, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let req = format!("{method} {path} HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n");
        stream.write_all(req.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn serves_asset_over_the_wire() {
        let (addr, _tmp) = start_test_server().await;
        let resp = raw_request(addr, "GET", "/assets/app.js").await;
        assert!(resp.starts_with("HTTP/1.1 200"));
        assert!(resp.contains("application/javascript"));
        assert!(resp.ends_with(BUNDLE));
    }

    #[tokio::test]
    async fn client_route_gets_app_shell() {
        let (addr, _tmp) = start_test_server().await;
        let resp = raw_request(addr, "GET", "/settings/profile").await;
        assert!(resp.starts_with("HTTP/1.1 200"));
        assert!(resp.ends_with(SHELL));
    }

    #[tokio::test]
    async fn api_path_is_never_static_matched() {
        let (addr, _tmp) = start_test_server().await;
        let resp = raw_request(addr, "GET", "/api/users").await;
        assert!(resp.starts_with("HTTP/1.1 404"));
        assert!(resp.contains("application/json"));
        assert!(!resp.contains("shell"));
    }

    #[tokio::test]
    async fn api_health_answers_ok() {
        let (addr, _tmp) = start_test_server().await;
        let resp = raw_request(addr, "GET", "/api/health").await;
        assert!(resp.starts_with("HTTP/1.1 200"));
        assert!(resp.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn post_to_static_path_is_405() {
        let (addr, _tmp) = start_test_server().await;
        let resp = raw_request(addr, "POST", "/index.html").await;
        assert!(resp.starts_with("HTTP/1.1 405"));
    }

    #[tokio::test]
    async fn concurrent_clients_get_independent_responses() {
        let (addr, _tmp) = start_test_server().await;
        let mut handles = Vec::new();
        for i in 0..16 {
            handles.push(tokio::spawn(async move {
                let (path, expected) = if i % 2 == 0 {
                    ("/assets/app.js", BUNDLE)
                } else {
                    ("/deep/client/route", SHELL)
                };
                let resp = raw_request(addr, "GET", path).await;
                assert!(resp.starts_with("HTTP/1.1 200"));
                assert!(resp.ends_with(expected));
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
    }
}
