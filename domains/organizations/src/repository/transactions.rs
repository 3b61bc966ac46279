//! Transactional free functions for the organizations domain
//!
//! Each takes the caller's open transaction; dropping it without commit
//! rolls every write back.

use crate::domain::entities::{AppUser, AppUserRole, Organization};
use serde_json::json;
use sqlx::{Postgres, Transaction};
use tenantgate_common::RepositoryError;

/// Insert an organization within an existing transaction.
pub async fn insert_organization_tx(
    transaction: &mut Transaction<'_, Postgres>,
    name: &str,
    description: Option<&str>,
) -> std::result::Result<Organization, RepositoryError> {
    let organization = sqlx::query_as::<_, Organization>(
        r#"
        INSERT INTO organization (name, description)
        VALUES ($1, $2)
        RETURNING id, name, description
        "#,
    )
    .bind(name)
    .bind(description)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(organization)
}

/// Scope the rest of the transaction to `organization_id`.
///
/// Sets `request.jwt.claims` transaction-locally, which row-level security
/// policies read as the current organization.
pub async fn set_current_organization_tx(
    transaction: &mut Transaction<'_, Postgres>,
    organization_id: i64,
) -> std::result::Result<(), RepositoryError> {
    let claims = json!({ "current_organization_id": organization_id }).to_string();
    sqlx::query("SELECT set_config('request.jwt.claims', $1, true)")
        .bind(claims)
        .execute(&mut **transaction)
        .await?;
    Ok(())
}

/// Insert a user within an existing transaction.
///
/// Returns `RepositoryError::AlreadyExists` if the email is taken.
pub async fn insert_app_user_tx(
    transaction: &mut Transaction<'_, Postgres>,
    email: &str,
    organization_id: i64,
    role: AppUserRole,
) -> std::result::Result<AppUser, RepositoryError> {
    let user = sqlx::query_as::<_, AppUser>(
        r#"
        INSERT INTO app_user (email, organization_id, role)
        VALUES ($1, $2, $3)
        RETURNING id, email, organization_id, role
        "#,
    )
    .bind(email)
    .bind(organization_id)
    .bind(role)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(user)
}
