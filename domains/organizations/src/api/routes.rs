//! Route definitions for the organizations domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{organizations, token_exchange};
use super::middleware::OrganizationsState;

/// Session token routes
fn token_routes() -> Router<OrganizationsState> {
    Router::new().route("/token-exchange", post(token_exchange::exchange_token))
}

/// Onboarding routes
fn organization_routes() -> Router<OrganizationsState> {
    Router::new()
        .route(
            "/check-user-organization",
            get(organizations::check_user_organization),
        )
        .route(
            "/create-organization",
            post(organizations::create_organization),
        )
}

/// Create all organizations domain API routes
pub fn routes() -> Router<OrganizationsState> {
    Router::new()
        .merge(token_routes())
        .merge(organization_routes())
}
