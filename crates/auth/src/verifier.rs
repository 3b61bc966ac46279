//! External identity verification seam

use crate::claims::IdentityClaims;
use crate::error::AuthError;

/// Validates an opaque identity-provider token.
///
/// Implementations must check signature, expiry, and audience, and only
/// return claims with a non-empty email.
#[async_trait::async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError>;
}
