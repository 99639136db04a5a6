//! WordPress backend client
//!
//! This module provides the HTTP client used for all outbound calls to the
//! tenant WordPress sites: forwarding GraphQL requests and resolving the
//! caller's identity against the REST users/me endpoint.

pub mod client;
pub mod types;

pub use client::WordPressClient;
pub use types::{GraphqlRequest, IdentityPayload};
