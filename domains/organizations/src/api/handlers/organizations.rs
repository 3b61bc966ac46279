//! Onboarding handlers: lookup and first-time provisioning

use axum::{extract::State, http::StatusCode, Json};
use tenantgate_auth::IdentityUser;
use tenantgate_common::{JsonBody, Result};

use crate::api::middleware::OrganizationsState;
use crate::domain::entities::UserOrganization;
use crate::domain::validation::CreateOrganizationRequest;
use crate::provisioning::OrganizationCreated;

/// Look up the caller's user and organization
///
/// **GET /check-user-organization**
///
/// Both ids are `null` when the caller has not been provisioned.
pub async fn check_user_organization(
    IdentityUser(identity): IdentityUser,
    State(state): State<OrganizationsState>,
) -> Result<Json<UserOrganization>> {
    let found = state.provisioning().check(&identity.email).await?;
    Ok(Json(found))
}

/// Create an organization owned by the caller
///
/// **POST /create-organization**
pub async fn create_organization(
    IdentityUser(identity): IdentityUser,
    State(state): State<OrganizationsState>,
    JsonBody(request): JsonBody<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<OrganizationCreated>)> {
    let created = state
        .provisioning()
        .create_organization(&identity, request)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}
