//! GraphQL proxy endpoint
//!
//! Forwards API-shaped requests to the resolved tenant's GraphQL backend and
//! relays the upstream status and body verbatim. Tenant resolution happens
//! here independently of the annotation middleware; the proxy never reads the
//! headers that middleware sets.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::tenant::request_domain;
use crate::wordpress::GraphqlRequest;

/// GraphQL proxy handler
///
/// Registered for every method so that the 405 contract carries the fixed
/// JSON body instead of axum's bare method-not-allowed response.
pub async fn proxy(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    // An empty or unparseable body is treated the same as a missing query.
    let request: GraphqlRequest = serde_json::from_slice(&body).unwrap_or(GraphqlRequest {
        query: None,
        variables: None,
        operation_name: None,
    });

    if !request.has_query() {
        return Err(AppError::BadRequest("GraphQL query is required".to_string()));
    }

    let domain = request_domain(&headers);
    let tenant = state.registry.lookup(&domain);
    debug!(
        "GraphQL request for domain {} forwarded to {}",
        domain, tenant.api_endpoint
    );

    let authorization = headers.get(header::AUTHORIZATION);
    let (status, upstream_body) = state
        .wordpress
        .forward_graphql(&tenant.api_endpoint, &request, authorization)
        .await?;

    Ok((status, Json(upstream_body)).into_response())
}
