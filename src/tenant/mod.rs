//! Tenant resolution for the multisite setup
//!
//! This module provides:
//! - The immutable domain-to-tenant registry consulted on every request
//! - The host header resolver that reduces a raw `Host` value to a domain

pub mod registry;
pub mod resolver;

pub use registry::{TenantConfig, TenantRegistry, ThemeConfig};
pub use resolver::{request_domain, resolve_host};
