//! Common test utilities

use axum::Router;
use sitegate::config::{AuthConfig, Config, DeployMode, TenantSettings};
use sitegate::server::{build_router, AppState};
use sitegate::tenant::{TenantConfig, TenantRegistry};
use std::collections::HashMap;
use std::sync::Arc;

/// Gateway configuration matching the deployed multisite setup
pub fn test_config() -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 3000,
        mode: DeployMode::Development,
        auth: AuthConfig {
            cookie_name: "wordpress_logged_in".to_string(),
            session_ttl_secs: 86400,
        },
        tenants: TenantSettings {
            allowed_domains: vec![
                "testopsfactory.com".to_string(),
                "testopsfactory.fr".to_string(),
                "pierrepellegrini.fr".to_string(),
            ],
            site_ids: HashMap::from([
                ("testopsfactory.com".to_string(), 1),
                ("testopsfactory.fr".to_string(), 2),
                ("pierrepellegrini.fr".to_string(), 3),
            ]),
            default_api_endpoint: "https://testopsfactory.com/graphql".to_string(),
        },
    }
}

/// Registry whose `testopsfactory.com` tenant points at `api_endpoint`.
///
/// Tests hand in a wiremock URI so outbound calls land on the mock backend.
pub fn registry_to(api_endpoint: &str) -> TenantRegistry {
    let tenants = HashMap::from([(
        "testopsfactory.com".to_string(),
        TenantConfig {
            site_id: 1,
            locale: "en-US".to_string(),
            api_endpoint: api_endpoint.to_string(),
            theme: None,
        },
    )]);
    let default = TenantConfig {
        site_id: 1,
        locale: "en-US".to_string(),
        api_endpoint: api_endpoint.to_string(),
        theme: None,
    };
    TenantRegistry::new(tenants, default)
}

/// Build the full gateway router over the given configuration
pub fn app(config: Config, registry: TenantRegistry) -> Router {
    build_router(AppState::new(Arc::new(config), Arc::new(registry)))
}
