//! Organizations domain state and auth backend integration

use crate::provisioning::ProvisioningService;
use crate::OrganizationsRepositories;
use axum::extract::FromRef;
use tenantgate_auth::AuthBackend;

/// Application state for the organizations domain
#[derive(Clone)]
pub struct OrganizationsState {
    pub repos: OrganizationsRepositories,
    pub auth: AuthBackend,
}

impl OrganizationsState {
    pub fn new(repos: OrganizationsRepositories, auth: AuthBackend) -> Self {
        Self { repos, auth }
    }

    pub fn provisioning(&self) -> ProvisioningService<'_> {
        ProvisioningService::new(&self.repos)
    }
}

impl FromRef<OrganizationsState> for AuthBackend {
    fn from_ref(state: &OrganizationsState) -> Self {
        state.auth.clone()
    }
}
