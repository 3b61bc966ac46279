//! Domain entities for the organizations domain
//!
//! Rows of the `organization` and `app_user` tables plus the lookup result
//! returned by the directory.

use serde::{Deserialize, Serialize};

/// Role of a user within its organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "app_user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppUserRole {
    Owner,
    Admin,
    #[default]
    Member,
}

impl std::fmt::Display for AppUserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppUserRole::Owner => write!(f, "owner"),
            AppUserRole::Admin => write!(f, "admin"),
            AppUserRole::Member => write!(f, "member"),
        }
    }
}

/// Organization entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// App user entity; `email` is unique across all organizations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub id: i64,
    pub email: String,
    pub organization_id: i64,
    pub role: AppUserRole,
}

/// Directory lookup result: both fields are `None` when no user matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserOrganization {
    pub app_user_id: Option<i64>,
    pub organization_id: Option<i64>,
}
