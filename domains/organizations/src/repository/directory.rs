//! Read access to users and their organizations, keyed by email

use crate::domain::entities::{AppUser, UserOrganization};
use sqlx::PgPool;
use tenantgate_common::Result;

#[derive(Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the user and organization ids for an email; both `None` if absent
    pub async fn find_user_by_email(&self, email: &str) -> Result<UserOrganization> {
        let found = sqlx::query_as::<_, UserOrganization>(
            r#"
            SELECT id AS app_user_id, organization_id
            FROM app_user
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.unwrap_or_default())
    }

    /// Find the full user row for an email
    pub async fn find_app_user_by_email(&self, email: &str) -> Result<Option<AppUser>> {
        let user = sqlx::query_as::<_, AppUser>(
            r#"
            SELECT id, email, organization_id, role
            FROM app_user
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
