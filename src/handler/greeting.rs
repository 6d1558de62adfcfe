//! Health and greeting handlers

use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode, Uri};

/// Name used when the request does not carry a usable one
pub const DEFAULT_NAME: &str = "mundo";

/// `/health`: always 200 `ok`
pub fn health() -> Response<Full<Bytes>> {
    http::build_text_response(StatusCode::OK, "ok")
}

/// `/hello`: greets the `name` query parameter
pub fn hello(uri: &Uri) -> Response<Full<Bytes>> {
    let name = resolve_name(http::query_param(uri, "name"));
    http::build_text_response(StatusCode::OK, greeting(&name))
}

/// Blank names are replaced by [`DEFAULT_NAME`]; others are kept untrimmed.
fn resolve_name(name: Option<String>) -> String {
    name.filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string())
}

fn greeting(name: &str) -> String {
    format!("hola {name}")
}
