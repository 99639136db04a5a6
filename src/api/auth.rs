//! Authentication endpoints
//!
//! The gateway never mints credentials; it only reports the verified session
//! and invalidates the login cookie on logout.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::server::AppState;
use crate::session::Session;
use crate::tenant::request_domain;

/// Current session for the caller
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Json<Session> {
    Json(state.verifier.get_session(&headers).await)
}

/// Log the caller out by expiring the auth cookie in-browser
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let domain = request_domain(&headers);
    let cookie = state.verifier.clear_auth_cookie(&domain);

    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Ok(value) = cookie.parse() {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
