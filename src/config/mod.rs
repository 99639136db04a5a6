//! Configuration management for the gateway

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Deployment mode (affects the cookie `Secure` attribute)
    pub mode: DeployMode,
    /// Authentication cookie configuration
    pub auth: AuthConfig,
    /// Tenant routing configuration
    pub tenants: TenantSettings,
}

/// Deployment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    Development,
    Production,
}

impl DeployMode {
    pub fn is_production(self) -> bool {
        matches!(self, DeployMode::Production)
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Name of the WordPress login cookie
    pub cookie_name: String,
    /// Session validity window in seconds
    pub session_ttl_secs: i64,
}

/// Environment-driven tenant routing inputs
#[derive(Debug, Clone)]
pub struct TenantSettings {
    /// Domains the middleware is allowed to annotate
    pub allowed_domains: Vec<String>,
    /// Domain to WordPress multisite blog ID mapping
    pub site_ids: HashMap<String, u32>,
    /// GraphQL endpoint used by the default tenant
    pub default_api_endpoint: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            mode: match env::var("GATEWAY_MODE")
                .unwrap_or_else(|_| "production".to_string())
                .to_lowercase()
                .as_str()
            {
                "development" | "dev" => DeployMode::Development,
                _ => DeployMode::Production,
            },
            auth: AuthConfig {
                cookie_name: env::var("WP_AUTH_COOKIE_NAME")
                    .unwrap_or_else(|_| "wordpress_logged_in".to_string()),
                session_ttl_secs: 24 * 60 * 60,
            },
            tenants: TenantSettings {
                allowed_domains: env::var("GATEWAY_DOMAINS")
                    .map(|s| {
                        s.split(',')
                            .map(|d| d.trim().to_string())
                            .filter(|d| !d.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
                site_ids: env::var("DOMAIN_MAPPING")
                    .ok()
                    .and_then(|s| serde_json::from_str(&s).ok())
                    .unwrap_or_default(),
                default_api_endpoint: env::var("WORDPRESS_API_URL")
                    .unwrap_or_else(|_| "https://testopsfactory.com/graphql".to_string()),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Look up the multisite blog ID for a domain, defaulting to 1
    pub fn site_id_for(&self, domain: &str) -> u32 {
        self.tenants.site_ids.get(domain).copied().unwrap_or(1)
    }

    /// Whether the middleware is allowed to annotate requests for this domain
    pub fn is_allowed_domain(&self, domain: &str) -> bool {
        self.tenants.allowed_domains.iter().any(|d| d == domain)
    }
}
