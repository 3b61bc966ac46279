//! Concrete authentication backend
//!
//! Bundles the external identity verifier with the session token issuer.

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::claims::IdentityClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::google::GoogleIdentityVerifier;
use crate::jwt::extract_bearer_token;
use crate::session::SessionIssuer;
use crate::verifier::IdentityVerifier;

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    verifier: Arc<dyn IdentityVerifier>,
    sessions: SessionIssuer,
}

impl AuthBackend {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, sessions: SessionIssuer) -> Self {
        Self { verifier, sessions }
    }

    /// Production backend: Google ID tokens, session tokens signed with `jwt_secret`
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            Arc::new(GoogleIdentityVerifier::new(config.google_client_id.clone())),
            SessionIssuer::new(&config.jwt_secret),
        )
    }

    pub fn sessions(&self) -> &SessionIssuer {
        &self.sessions
    }

    /// Verify an external identity token
    pub async fn verify_identity(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let claims = self.verifier.verify(token).await?;
        tracing::debug!(email = %claims.email, subject = %claims.subject, "Identity verified");
        Ok(claims)
    }

    /// Authenticate from an optional `Authorization` header value
    pub async fn authenticate(
        &self,
        header: Option<&HeaderValue>,
    ) -> Result<IdentityClaims, AuthError> {
        let header = header.ok_or(AuthError::MissingAuthorization)?;
        let token = extract_bearer_token(header)?;
        self.verify_identity(&token).await
    }
}
