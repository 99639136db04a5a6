//! Immutable domain-to-tenant registry
//!
//! Built once at process start and shared read-only across all requests. A
//! lookup never fails: domains without an entry resolve to the designated
//! default tenant.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for one tenant site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    /// WordPress multisite blog ID
    pub site_id: u32,
    /// BCP-47 locale tag served by this tenant
    pub locale: String,
    /// Absolute URL of the tenant's GraphQL endpoint
    pub api_endpoint: String,
    /// Presentation metadata, when the tenant declares any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeConfig>,
}

/// Presentation metadata for a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub logo: String,
}

/// Domain-keyed tenant lookup table
#[derive(Debug, Clone)]
pub struct TenantRegistry {
    tenants: HashMap<String, TenantConfig>,
    default: TenantConfig,
}

/// Reduce a domain to its registry key: strip a leading `www.`, case-fold.
fn normalize(domain: &str) -> String {
    let lowered = domain.to_ascii_lowercase();
    lowered
        .strip_prefix("www.")
        .map(str::to_string)
        .unwrap_or(lowered)
}

impl TenantRegistry {
    /// Create a registry from an explicit tenant table and default
    pub fn new(tenants: HashMap<String, TenantConfig>, default: TenantConfig) -> Self {
        let tenants = tenants
            .into_iter()
            .map(|(domain, config)| (normalize(&domain), config))
            .collect();
        Self { tenants, default }
    }

    /// Build the registry for the deployed multisite setup.
    ///
    /// `default_api_endpoint` backs the fallback tenant used for domains with
    /// no entry of their own.
    pub fn builtin(default_api_endpoint: &str) -> Self {
        let tenants = HashMap::from([
            (
                "testopsfactory.com".to_string(),
                TenantConfig {
                    site_id: 1,
                    locale: "en-US".to_string(),
                    api_endpoint: "https://testopsfactory.com/graphql".to_string(),
                    theme: Some(ThemeConfig {
                        primary_color: "#0070f3".to_string(),
                        secondary_color: "#ff4081".to_string(),
                        logo: "/images/logo-testopsfactory-com.svg".to_string(),
                    }),
                },
            ),
            (
                "testopsfactory.fr".to_string(),
                TenantConfig {
                    site_id: 2,
                    locale: "fr-FR".to_string(),
                    api_endpoint: "https://testopsfactory.fr/graphql".to_string(),
                    theme: Some(ThemeConfig {
                        primary_color: "#3f51b5".to_string(),
                        secondary_color: "#ff9800".to_string(),
                        logo: "/images/logo-testopsfactory-fr.svg".to_string(),
                    }),
                },
            ),
            (
                "pierrepellegrini.fr".to_string(),
                TenantConfig {
                    site_id: 3,
                    locale: "fr-FR".to_string(),
                    api_endpoint: "https://pierrepellegrini.fr/graphql".to_string(),
                    theme: Some(ThemeConfig {
                        primary_color: "#4caf50".to_string(),
                        secondary_color: "#ff5722".to_string(),
                        logo: "/images/logo-pierrepellegrini-fr.svg".to_string(),
                    }),
                },
            ),
        ]);

        let default = TenantConfig {
            site_id: 1,
            locale: "en-US".to_string(),
            api_endpoint: default_api_endpoint.to_string(),
            theme: Some(ThemeConfig {
                primary_color: "#0070f3".to_string(),
                secondary_color: "#ff4081".to_string(),
                logo: "/images/logo-default.svg".to_string(),
            }),
        };

        Self::new(tenants, default)
    }

    /// Look up the tenant for a domain.
    ///
    /// Normalizes the input (`www.` prefix stripped, case-folded) and falls
    /// back to the default tenant on a miss. Never fails.
    pub fn lookup(&self, domain: &str) -> &TenantConfig {
        self.tenants
            .get(&normalize(domain))
            .unwrap_or(&self.default)
    }

    /// All configured domains, sorted, for diagnostics and allow-listing
    pub fn list_domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self.tenants.keys().cloned().collect();
        domains.sort();
        domains
    }

    /// The fallback tenant returned for unknown domains
    pub fn default_tenant(&self) -> &TenantConfig {
        &self.default
    }
}
