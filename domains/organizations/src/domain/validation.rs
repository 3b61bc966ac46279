//! Create-organization request validation
//!
//! Pure functions: everything here runs before any database write.

use serde::Deserialize;
use tenantgate_common::{Error, Result};
use validator::Validate;

/// Body of `POST /create-organization`
///
/// Fields are optional at the wire level so that a missing field is reported
/// after the existence check rather than as a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub organization: Option<OrganizationInput>,
    pub app_user: Option<AppUserInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppUserInput {
    pub email: Option<String>,
}

/// Validated organization plus the email of its owner
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewOrganization {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(email)]
    pub owner_email: String,
}

impl CreateOrganizationRequest {
    /// Check the request against the verified identity email and normalize it.
    ///
    /// A body email differing from the verified one, even by whitespace or
    /// case, is rejected first; then required fields; then lengths and email
    /// format.
    pub fn validate_for(self, verified_email: &str) -> Result<NewOrganization> {
        let organization = self.organization.unwrap_or_default();
        let email = self.app_user.and_then(|user| user.email);

        if let Some(email) = &email {
            if email != verified_email {
                return Err(Error::Validation(
                    "Email mismatch between token and request".to_string(),
                ));
            }
        }

        let name = organization
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let (Some(name), Some(owner_email)) = (name, email) else {
            return Err(Error::Validation(
                "Organization name and user email are required".to_string(),
            ));
        };

        let new_organization = NewOrganization {
            name,
            description: organization
                .description
                .map(|description| description.trim().to_string())
                .filter(|description| !description.is_empty()),
            owner_email,
        };

        new_organization
            .validate()
            .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

        Ok(new_organization)
    }
}
