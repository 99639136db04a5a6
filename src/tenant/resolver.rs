//! Host header resolver
//!
//! Reduces a raw `Host` header value to the tenant domain by stripping a
//! trailing `:<port>` suffix. Registry lookup performs its own `www.`
//! stripping and case folding, so this is the only normalization done here.

use axum::http::{header, HeaderMap};

/// Strip a trailing `:<port>` suffix from a raw host value.
///
/// Only a numeric suffix after the last `:` is removed; any other input,
/// including the empty string, is returned unchanged.
pub fn resolve_host(raw_host: &str) -> String {
    if let Some(idx) = raw_host.rfind(':') {
        let suffix = &raw_host[idx + 1..];
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            return raw_host[..idx].to_string();
        }
    }
    raw_host.to_string()
}

/// Best-effort tenant domain from a request's headers.
///
/// Missing or non-UTF-8 `Host` headers resolve to the empty domain, which the
/// registry maps to its default tenant.
pub fn request_domain(headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(resolve_host)
        .unwrap_or_default()
}
