//! Organization provisioning
//!
//! Lookup-or-create of an organization and its owning user. The two inserts
//! share one transaction; the unique email constraint is the only guard
//! against concurrent duplicates.

use serde::Serialize;
use tenantgate_auth::IdentityClaims;
use tenantgate_common::{Error, RepositoryError, Result};

use crate::domain::entities::{AppUser, AppUserRole, Organization, UserOrganization};
use crate::domain::state::{
    ProvisioningEvent, ProvisioningGuardContext, ProvisioningState, ProvisioningStateMachine,
};
use crate::domain::validation::{CreateOrganizationRequest, NewOrganization};
use crate::repository::{
    insert_app_user_tx, insert_organization_tx, set_current_organization_tx,
    OrganizationsRepositories,
};

/// Rows written by a successful provisioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationCreated {
    pub organization: Organization,
    pub user: AppUser,
}

pub struct ProvisioningService<'a> {
    repos: &'a OrganizationsRepositories,
}

fn advance(
    current: ProvisioningState,
    event: ProvisioningEvent,
    context: Option<&ProvisioningGuardContext>,
) -> Result<ProvisioningState> {
    ProvisioningStateMachine::transition(current, event, context)
        .map_err(|e| Error::Internal(format!("Provisioning state error: {}", e)))
}

impl<'a> ProvisioningService<'a> {
    pub fn new(repos: &'a OrganizationsRepositories) -> Self {
        Self { repos }
    }

    /// Ids of the user and organization registered for `email`, if any
    pub async fn check(&self, email: &str) -> Result<UserOrganization> {
        self.repos.directory.find_user_by_email(email).await
    }

    /// Create an organization owned by the verified identity.
    ///
    /// Fails with `Error::AlreadyExists` if the identity already has a user,
    /// and with `Error::Validation` before any write if the request is invalid.
    pub async fn create_organization(
        &self,
        identity: &IdentityClaims,
        request: CreateOrganizationRequest,
    ) -> Result<OrganizationCreated> {
        let state = ProvisioningState::Checked;

        let existing = self.check(&identity.email).await?;
        if let (Some(app_user_id), Some(organization_id)) =
            (existing.app_user_id, existing.organization_id)
        {
            let state = advance(state, ProvisioningEvent::UserFound, None)?;
            tracing::info!(
                email = %identity.email,
                app_user_id,
                organization_id,
                state = %state,
                "User already provisioned"
            );
            return Err(Error::AlreadyExists {
                app_user_id,
                organization_id,
            });
        }
        let state = advance(state, ProvisioningEvent::UserMissing, None)?;

        let new_organization = match request.validate_for(&identity.email) {
            Ok(new_organization) => new_organization,
            Err(err) => {
                let state = advance(state, ProvisioningEvent::Reject, None)?;
                tracing::debug!(email = %identity.email, state = %state, error = %err, "Provisioning request rejected");
                return Err(err);
            }
        };

        let state = advance(
            state,
            ProvisioningEvent::BeginCreate,
            Some(&ProvisioningGuardContext {
                request_valid: true,
            }),
        )?;

        match self.create_with_owner(&new_organization).await {
            Ok(created) => {
                let state = advance(state, ProvisioningEvent::Commit, None)?;
                tracing::info!(
                    organization_id = created.organization.id,
                    app_user_id = created.user.id,
                    state = %state,
                    "Organization provisioned"
                );
                Ok(created)
            }
            Err(err) => {
                let state = advance(state, ProvisioningEvent::Abort, None)?;
                tracing::warn!(email = %identity.email, state = %state, error = %err, "Provisioning rolled back");
                self.resolve_failure(err, &identity.email).await
            }
        }
    }

    /// Insert the organization and its owner in one transaction.
    ///
    /// Any error drops the transaction, rolling back both inserts.
    pub async fn create_with_owner(
        &self,
        new_organization: &NewOrganization,
    ) -> std::result::Result<OrganizationCreated, RepositoryError> {
        let mut tx = self.repos.begin().await?;

        let organization = insert_organization_tx(
            &mut tx,
            &new_organization.name,
            new_organization.description.as_deref(),
        )
        .await?;

        set_current_organization_tx(&mut tx, organization.id).await?;

        let user = insert_app_user_tx(
            &mut tx,
            &new_organization.owner_email,
            organization.id,
            AppUserRole::Owner,
        )
        .await?;

        tx.commit().await?;

        Ok(OrganizationCreated { organization, user })
    }

    /// A concurrent request won the unique email: answer with its ids
    async fn resolve_failure(
        &self,
        err: RepositoryError,
        email: &str,
    ) -> Result<OrganizationCreated> {
        if !matches!(err, RepositoryError::AlreadyExists) {
            return Err(err.into());
        }

        let existing = self.check(email).await?;
        match (existing.app_user_id, existing.organization_id) {
            (Some(app_user_id), Some(organization_id)) => Err(Error::AlreadyExists {
                app_user_id,
                organization_id,
            }),
            _ => Err(err.into()),
        }
    }
}
