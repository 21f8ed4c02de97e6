//! Public origin of the service as seen by the visitor.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;
use url::Url;

const FORWARDED_HOST: &str = "x-forwarded-host";
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Builds `scheme://host[:port]` from the request headers.
///
/// `X-Forwarded-Host` and `X-Forwarded-Proto` are only honored when
/// `trust_forwarded` is set; otherwise the `Host` header and `http` are used.
/// Only the first value of a comma-separated forwarded header counts.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no usable host header is present or the
/// resulting origin is not a valid URL.
pub fn request_origin(headers: &HeaderMap, trust_forwarded: bool) -> Result<String, AppError> {
    let host = match forwarded(headers, FORWARDED_HOST, trust_forwarded) {
        Some(host) => host,
        None => headers
            .get(header::HOST)
            .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?,
    };

    let scheme = match forwarded(headers, FORWARDED_PROTO, trust_forwarded) {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    };

    normalize_origin(&format!("{scheme}://{host}"))
        .ok_or_else(|| AppError::bad_request("Invalid Host header", json!({ "host": host })))
}

fn forwarded<'a>(headers: &'a HeaderMap, name: &str, trusted: bool) -> Option<&'a str> {
    if !trusted {
        return None;
    }
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Reduces a configured base URL to its origin, e.g. `https://vid.example`.
///
/// Returns `None` for anything that is not an absolute http(s) URL.
pub fn normalize_origin(base: &str) -> Option<String> {
    let url = Url::parse(base.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(url.origin().ascii_serialization())
}
