//! WordPress wire types
//!
//! Shared type definitions for the GraphQL forwarding body and the REST
//! identity payload returned by `/wp-json/wp/v2/users/me`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// GraphQL request body accepted by the proxy and forwarded upstream
///
/// Absent `variables`/`operationName` are omitted from the forwarded body
/// rather than serialized as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    /// Whether the request carries a usable query string
    pub fn has_query(&self) -> bool {
        self.query.as_deref().is_some_and(|q| !q.trim().is_empty())
    }
}

/// User payload returned by the WordPress identity endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityPayload {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub avatar_urls: HashMap<String, String>,
    #[serde(default)]
    pub meta: serde_json::Map<String, Value>,
}

impl IdentityPayload {
    /// The 96px avatar URL WordPress exposes, when present
    pub fn avatar(&self) -> Option<String> {
        self.avatar_urls.get("96").cloned()
    }
}
