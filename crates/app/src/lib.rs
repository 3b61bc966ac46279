//! Tenantgate application composition root
//!
//! Composes the domain routers, CORS policy and listener into a single application.

pub mod cors;
pub mod tls;

use axum::{routing::get, Router};
use sqlx::PgPool;
use tenantgate_auth::{AuthBackend, AuthConfig};
use tenantgate_common::Config;
use tenantgate_organizations::{OrganizationsRepositories, OrganizationsState};

pub use cors::build_cors_layer;
pub use tls::{load_tls_acceptor, serve, TlsListener};

/// Build the domain state from configuration and a connection pool
pub fn build_state(config: &Config, pool: PgPool) -> OrganizationsState {
    let auth = AuthBackend::from_config(&AuthConfig::from(config));
    OrganizationsState::new(OrganizationsRepositories::new(pool), auth)
}

/// Routes without cross-cutting layers
pub fn router(state: OrganizationsState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(tenantgate_organizations::routes().with_state(state))
}

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config, pool: PgPool) -> Router {
    router(build_state(config, pool)).layer(build_cors_layer(&config.cors_allowed_origins))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
