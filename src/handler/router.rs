//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: exact-path dispatch plus access logging.

use crate::config::Config;
use crate::handler::greeting;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::{Request, Response, Uri, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Every method is accepted; only the path decides the handler.
pub async fn handle_request<B>(
    req: Request<B>,
    remote_addr: SocketAddr,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let response = route(req.uri());

    if config.logging.access_log {
        let entry = build_access_entry(&req, &response, remote_addr, started);
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch by exact path match
pub fn route(uri: &Uri) -> Response<Full<Bytes>> {
    match uri.path() {
        "/health" => greeting::health(),
        "/hello" => greeting::hello(uri),
        other => {
            logger::log_debug(&format!("No handler for path: {other}"));
            http::build_404_response()
        }
    }
}

fn build_access_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    remote_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::{Method, StatusCode};

    async fn body_of(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn get(path: &str) -> (StatusCode, String) {
        let resp = route(&path.parse().unwrap());
        (resp.status(), body_of(resp).await)
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(get("/health").await, (StatusCode::OK, "ok".to_string()));
        assert_eq!(get("/health?name=x&y").await, (StatusCode::OK, "ok".to_string()));
    }

    #[tokio::test]
    async fn test_hello_default_name() {
        assert_eq!(get("/hello").await, (StatusCode::OK, "hola mundo".to_string()));
        assert_eq!(get("/hello?name=").await, (StatusCode::OK, "hola mundo".to_string()));
        assert_eq!(get("/hello?name=+").await, (StatusCode::OK, "hola mundo".to_string()));
        assert_eq!(get("/hello?other=Ana").await, (StatusCode::OK, "hola mundo".to_string()));
    }

    #[tokio::test]
    async fn test_hello_with_name() {
        assert_eq!(get("/hello?name=Ana").await, (StatusCode::OK, "hola Ana".to_string()));
        assert_eq!(get("/hello?name=Jo+Ann").await, (StatusCode::OK, "hola Jo Ann".to_string()));
        assert_eq!(
            get("/hello?lang=es&name=Bo&name=Cy").await,
            (StatusCode::OK, "hola Bo".to_string())
        );
    }

    #[tokio::test]
    async fn test_paths_match_exactly() {
        assert_eq!(get("/").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get("/hello/").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get("/healthz").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get("/HELLO").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_any_method_is_served() {
        let config = Arc::new(Config::load_from("does-not-exist").unwrap());
        let remote: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        for method in [Method::GET, Method::POST, Method::DELETE] {
            let req = Request::builder()
                .method(method)
                .uri("/hello?name=Ana")
                .body(())
                .unwrap();
            let resp = handle_request(req, remote, Arc::clone(&config)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(body_of(resp).await, "hola Ana");
        }
    }

    #[test]
    fn test_access_entry_fields() {
        let req = Request::builder()
            .uri("/hello?name=Ana")
            .header("user-agent", "curl/8.0")
            .body(())
            .unwrap();
        let resp = route(req.uri());
        let entry = build_access_entry(&req, &resp, "10.0.0.7:5555".parse().unwrap(), Instant::now());

        assert_eq!(entry.remote_addr, "10.0.0.7");
        assert_eq!(entry.method, "GET");
        assert_eq!(entry.path, "/hello");
        assert_eq!(entry.query.as_deref(), Some("name=Ana"));
        assert_eq!(entry.status, 200);
        assert_eq!(entry.body_bytes, "hola Ana".len());
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.0"));
        assert!(entry.referer.is_none());
    }
}
