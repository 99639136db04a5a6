//! Tenant detection and annotation middleware
//!
//! Every request is either passed through untouched or annotated with the
//! resolved tenant's context headers. No state survives across requests and
//! no network I/O happens here; decisions are made over the in-memory
//! registry only.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::tenant::{request_domain, TenantRegistry};

/// State handed to the tenant middleware
#[derive(Clone)]
pub struct TenantLayerState {
    pub config: Arc<Config>,
    pub registry: Arc<TenantRegistry>,
}

/// Returns `true` for paths the middleware must not annotate: API routes,
/// framework internals, and anything that looks like a static asset.
fn is_passthrough_path(path: &str) -> bool {
    path.starts_with("/api") || path.starts_with("/_next") || path.contains('.')
}

/// Middleware that attaches tenant context headers to page responses.
///
/// Excluded path classes skip tenant resolution entirely. Domains outside
/// the configured allow-list pass through unannotated with a warning; the
/// registry's default fallback is a separate mechanism and stays silent.
pub async fn tenant_headers_middleware(
    State(state): State<TenantLayerState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_passthrough_path(request.uri().path()) {
        return next.run(request).await;
    }

    let domain = request_domain(request.headers());
    let tenant = state.registry.lookup(&domain);
    let locale = (!tenant.locale.is_empty()).then(|| tenant.locale.clone());

    if !state.config.is_allowed_domain(&domain) {
        warn!("Domain not configured: {}", domain);
        return next.run(request).await;
    }

    let site_id = state.config.site_id_for(&domain);
    debug!("Detected domain {}, WordPress site ID {}", domain, site_id);

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    if let Ok(value) = domain.parse() {
        headers.insert("x-domain", value);
    }
    if let Ok(value) = site_id.to_string().parse() {
        headers.insert("x-wordpress-site-id", value);
    }
    if let Some(locale) = locale {
        if let Ok(value) = locale.parse() {
            headers.insert("x-locale", value);
        }
    }

    response
}
