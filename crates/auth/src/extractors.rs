//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::claims::IdentityClaims;
use crate::error::AuthError;

/// Caller authenticated with an external identity token
#[derive(Debug)]
pub struct IdentityUser(pub IdentityClaims);

impl<S> FromRequestParts<S> for IdentityUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);
        let claims = backend
            .authenticate(parts.headers.get(AUTHORIZATION))
            .await?;

        Ok(IdentityUser(claims))
    }
}
