//! Organizations domain: user/organization directory, owner provisioning, token exchange

pub mod api;
pub mod domain;
pub mod provisioning;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{
    ProvisioningEvent, ProvisioningGuardContext, ProvisioningState, ProvisioningStateMachine,
    StateError,
};
pub use domain::validation::{CreateOrganizationRequest, NewOrganization};
// Re-export repository types
pub use repository::{
    insert_app_user_tx, insert_organization_tx, set_current_organization_tx, DirectoryRepository,
    OrganizationsRepositories,
};
pub use provisioning::{OrganizationCreated, ProvisioningService};

// Re-export API types
pub use api::routes;
pub use api::OrganizationsState;
