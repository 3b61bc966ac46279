//! API layer for the organizations domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::OrganizationsState;
pub use routes::routes;
