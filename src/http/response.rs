//! HTTP response building module
//!
//! Builders for the plain-text responses the server sends.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Content type of every response body
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Build a UTF-8 text response
///
/// `Content-Length` is the byte length of `body`, not its char count.
pub fn build_text_response(status: StatusCode, body: impl Into<String>) -> Response<Full<Bytes>> {
    let bytes = Bytes::from(body.into());

    Response::builder()
        .status(status)
        .header("Content-Type", TEXT_CONTENT_TYPE)
        .header("Content-Length", bytes.len())
        .body(Full::new(bytes.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(bytes))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
