//! HTTP middleware for the gateway
//!
//! This module provides the tenant-annotation middleware that runs in front
//! of every non-excluded request.

pub mod tenant_headers;

pub use tenant_headers::{tenant_headers_middleware, TenantLayerState};
