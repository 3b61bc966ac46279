//! Token claims types

use serde::{Deserialize, Serialize};

/// Normalized identity produced by an `IdentityVerifier`.
///
/// Lives for one request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Identity-provider subject
    pub subject: String,
    /// Verified email, never empty
    pub email: String,
    /// Display name, empty when the provider sent none
    pub name: String,
}

impl IdentityClaims {
    pub fn new(
        subject: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
            name: name.into(),
        }
    }
}

/// ID token claims issued by Google
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleIdTokenClaims {
    /// Issuer (accounts.google.com)
    pub iss: String,
    /// Subject (Google account ID)
    pub sub: String,
    /// Audience (OAuth client ID)
    pub aud: String,
    /// Expires at
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub name: Option<String>,
}

/// Claims carried by a locally-signed session token.
///
/// Field names are what the GraphQL layer reads into its request settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Internal app user ID
    pub current_user: i64,
    pub email: String,
    /// Identity-provider subject
    pub sub: String,
    pub name: String,
    /// Audience (the GraphQL layer)
    pub aud: String,
    /// Issued at
    pub iat: i64,
    /// Expires at
    pub exp: i64,
}
