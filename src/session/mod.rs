//! Session verification against tenant WordPress backends
//!
//! A session is a per-request value: the verifier reads the login cookie,
//! asks the tenant's identity endpoint who the caller is, and returns either
//! an authenticated session or an empty one. Nothing is persisted server-side
//! and no failure escapes this module.

use axum::http::{header, HeaderMap};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::tenant::{request_domain, TenantRegistry};
use crate::wordpress::{IdentityPayload, WordPressClient};

/// Role granted full administrative access on a tenant site
pub const ADMIN_ROLE: &str = "administrator";

/// A scalar user-meta value
///
/// WordPress user meta is open-ended; it is narrowed here to a closed set of
/// scalars so serialization stays well-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl MetaValue {
    /// Convert a JSON value, returning `None` for nested structures
    fn from_scalar(value: &Value) -> Option<MetaValue> {
        match value {
            Value::Null => Some(MetaValue::Null),
            Value::Bool(b) => Some(MetaValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(MetaValue::Number),
            Value::String(s) => Some(MetaValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// An authenticated WordPress user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub meta: BTreeMap<String, MetaValue>,
}

impl From<IdentityPayload> for User {
    fn from(payload: IdentityPayload) -> Self {
        let avatar = payload.avatar();
        let mut meta = BTreeMap::new();
        for (key, value) in &payload.meta {
            match MetaValue::from_scalar(value) {
                Some(scalar) => {
                    meta.insert(key.clone(), scalar);
                }
                None => debug!("Dropping non-scalar meta entry '{}'", key),
            }
        }

        Self {
            id: payload.id,
            name: payload.name,
            email: payload.email,
            roles: payload.roles,
            avatar,
            meta,
        }
    }
}

/// The per-request authentication result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: Option<User>,
    pub is_logged_in: bool,
    /// Epoch seconds after which the session is stale; 0 when logged out
    pub expires_at: i64,
    /// Tenant domain the session was created for
    pub domain: String,
}

impl Session {
    /// The logged-out session for a domain
    pub fn empty(domain: String) -> Self {
        Self {
            user: None,
            is_logged_in: false,
            expires_at: 0,
            domain,
        }
    }
}

/// Outcome of one verification attempt.
///
/// Both empty variants collapse to the same external `Session`, but the
/// reason stays distinguishable for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionResult {
    Empty(EmptyReason),
    Authenticated { user: User, expires_at: i64 },
}

/// Why a verification attempt produced no authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// No auth cookie on the request; no network call was made
    NoCookie,
    /// The identity endpoint answered with a non-success status
    Rejected,
    /// The identity call failed in transport or parsing
    UpstreamFailure,
}

/// Verifies request cookies against tenant identity endpoints
#[derive(Clone)]
pub struct SessionVerifier {
    config: Arc<Config>,
    registry: Arc<TenantRegistry>,
    client: WordPressClient,
}

impl SessionVerifier {
    /// Create a new verifier
    pub fn new(config: Arc<Config>, registry: Arc<TenantRegistry>, client: WordPressClient) -> Self {
        Self {
            config,
            registry,
            client,
        }
    }

    /// Resolve the caller's session from request headers.
    ///
    /// Never fails: authentication problems of any kind yield the empty
    /// session for the best-effort domain.
    pub async fn get_session(&self, headers: &HeaderMap) -> Session {
        let domain = request_domain(headers);

        match self.verify(&domain, headers).await {
            SessionResult::Authenticated { user, expires_at } => Session {
                user: Some(user),
                is_logged_in: true,
                expires_at,
                domain,
            },
            SessionResult::Empty(reason) => {
                match reason {
                    EmptyReason::NoCookie => debug!("No auth cookie for {}", domain),
                    EmptyReason::Rejected => debug!("Identity endpoint rejected cookie for {}", domain),
                    EmptyReason::UpstreamFailure => {
                        warn!("Identity verification failed for {}", domain)
                    }
                }
                Session::empty(domain)
            }
        }
    }

    /// One verification attempt, with the failure reason kept explicit
    pub async fn verify(&self, domain: &str, headers: &HeaderMap) -> SessionResult {
        let Some(cookie_value) = self.auth_cookie(headers) else {
            return SessionResult::Empty(EmptyReason::NoCookie);
        };

        let tenant = self.registry.lookup(domain);
        let cookie_header = format!("{}={}", self.config.auth.cookie_name, cookie_value);

        match self
            .client
            .fetch_identity(&tenant.api_endpoint, &cookie_header)
            .await
        {
            Ok(Some(payload)) => SessionResult::Authenticated {
                user: User::from(payload),
                expires_at: Utc::now().timestamp() + self.config.auth.session_ttl_secs,
            },
            Ok(None) => SessionResult::Empty(EmptyReason::Rejected),
            Err(e) => {
                debug!("Identity call error: {}", e);
                SessionResult::Empty(EmptyReason::UpstreamFailure)
            }
        }
    }

    /// Value of the configured auth cookie, if the request carries one
    fn auth_cookie(&self, headers: &HeaderMap) -> Option<String> {
        let raw = headers.get(header::COOKIE)?.to_str().ok()?;
        parse_cookies(raw)
            .remove(self.config.auth.cookie_name.as_str())
    }

    /// Build the `Set-Cookie` value that logs a caller in on `domain`.
    ///
    /// Scoped to `.<domain>` for subdomain sharing; `Secure` only outside
    /// development mode.
    pub fn set_auth_cookie(&self, token: &str, domain: &str) -> String {
        let secure = if self.config.mode.is_production() {
            "Secure; "
        } else {
            ""
        };
        format!(
            "{}={}; Path=/; HttpOnly; {}SameSite=Lax; Domain=.{}; Max-Age={}",
            self.config.auth.cookie_name, token, secure, domain, self.config.auth.session_ttl_secs
        )
    }

    /// Build the `Set-Cookie` value that invalidates the auth cookie in-browser
    pub fn clear_auth_cookie(&self, domain: &str) -> String {
        format!(
            "{}=; Path=/; HttpOnly; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Domain=.{}",
            self.config.auth.cookie_name, domain
        )
    }
}

/// Parse a raw `Cookie` header into name/value pairs.
///
/// Pairs are split on `;`, then on the first `=`; segments without a `=` are
/// ignored.
pub fn parse_cookies(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|part| {
            let (name, value) = part.trim().split_once('=')?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Whether `user` holds `role`; false for an anonymous caller
pub fn has_role(user: Option<&User>, role: &str) -> bool {
    user.map(|u| u.roles.iter().any(|r| r == role))
        .unwrap_or(false)
}

/// Whether `user` is a site administrator
pub fn is_admin(user: Option<&User>) -> bool {
    has_role(user, ADMIN_ROLE)
}
