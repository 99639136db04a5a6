//! WordPress HTTP client
//!
//! One outbound call per invocation, no retries: a failed upstream call
//! resolves immediately to an error the caller absorbs at its own boundary.

use crate::error::{AppError, Result};
use reqwest::header::{self, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::types::{GraphqlRequest, IdentityPayload};

/// Identity-info path appended to a tenant's site root
const IDENTITY_PATH: &str = "/wp-json/wp/v2/users/me";

/// HTTP client for tenant WordPress backends
#[derive(Clone)]
pub struct WordPressClient {
    http_client: Client,
}

impl Default for WordPressClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WordPressClient {
    /// Create a new WordPress client
    pub fn new() -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { http_client }
    }

    /// Forward a GraphQL request to a tenant endpoint.
    ///
    /// The upstream status and JSON body are returned untouched, including
    /// GraphQL-level error payloads at any status. `authorization` is passed
    /// through byte-for-byte when present.
    pub async fn forward_graphql(
        &self,
        api_endpoint: &str,
        request: &GraphqlRequest,
        authorization: Option<&HeaderValue>,
    ) -> Result<(StatusCode, Value)> {
        let mut outbound = self.http_client.post(api_endpoint).json(request);
        if let Some(auth) = authorization {
            outbound = outbound.header(header::AUTHORIZATION, auth.clone());
        }

        let response = outbound
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GraphQL forward failed: {}", e)))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid GraphQL response body: {}", e)))?;

        Ok((status, body))
    }

    /// Resolve the caller's identity against a tenant's users/me endpoint.
    ///
    /// `Ok(None)` means the backend rejected the cookie (non-success status);
    /// transport or parse failures surface as `Err` for the verifier to
    /// absorb.
    pub async fn fetch_identity(
        &self,
        api_endpoint: &str,
        cookie_header: &str,
    ) -> Result<Option<IdentityPayload>> {
        let url = identity_endpoint(api_endpoint);

        let response = self
            .http_client
            .get(&url)
            .header(header::COOKIE, cookie_header)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Identity call failed: {}", e)))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let payload: IdentityPayload = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid identity response: {}", e)))?;

        Ok(Some(payload))
    }
}

/// Derive a tenant's identity endpoint from its GraphQL endpoint.
///
/// The trailing `/graphql` segment is removed and the fixed identity path
/// appended, yielding the site's REST users/me URL.
pub fn identity_endpoint(api_endpoint: &str) -> String {
    let root = api_endpoint
        .strip_suffix("/graphql")
        .unwrap_or(api_endpoint);
    format!("{}{}", root, IDENTITY_PATH)
}
