//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::middleware::{tenant_headers_middleware, TenantLayerState};
use crate::session::SessionVerifier;
use crate::tenant::TenantRegistry;
use crate::wordpress::WordPressClient;
use anyhow::Result;
use axum::{
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<TenantRegistry>,
    pub wordpress: WordPressClient,
    pub verifier: SessionVerifier,
    started_at: Instant,
}

impl AppState {
    /// Create the application state from its injected configuration
    pub fn new(config: Arc<Config>, registry: Arc<TenantRegistry>) -> Self {
        let wordpress = WordPressClient::new();
        let verifier = SessionVerifier::new(config.clone(), registry.clone(), wordpress.clone());

        Self {
            config,
            registry,
            wordpress,
            verifier,
            started_at: Instant::now(),
        }
    }

    /// Time since this state was constructed
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// The slice of state the tenant middleware needs
    pub fn tenant_layer_state(&self) -> TenantLayerState {
        TenantLayerState {
            config: self.config.clone(),
            registry: self.registry.clone(),
        }
    }
}

/// Build the HTTP router
///
/// Page rendering lives downstream of this gateway; unmatched paths fall
/// through to the default handler but still receive tenant annotation.
pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let tenant_layer = axum::middleware::from_fn_with_state(
        state.tenant_layer_state(),
        tenant_headers_middleware,
    );

    Router::new()
        // Health endpoint
        .route("/api/health", get(api::health::health))
        // GraphQL proxy: any method, the handler owns the 405 contract
        .route("/api/graphql", any(api::graphql::proxy))
        // Session endpoints
        .route("/api/auth/me", get(api::auth::me))
        .route("/api/auth/logout", post(api::auth::logout))
        .layer(tenant_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    let config = Arc::new(config);

    // The registry is immutable for the life of the process.
    let registry = Arc::new(TenantRegistry::builtin(
        &config.tenants.default_api_endpoint,
    ));
    info!("Tenant registry loaded: {:?}", registry.list_domains());

    let state = AppState::new(config.clone(), registry);
    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
