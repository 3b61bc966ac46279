//! Authentication for the Tenantgate API
//!
//! Verifies external identity-provider tokens, issues locally-signed session
//! tokens, and provides axum extractors that work with any domain state
//! implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod google;
mod jwt;
pub mod mock;
mod session;
mod verifier;

pub use backend::AuthBackend;
pub use claims::{GoogleIdTokenClaims, IdentityClaims, SessionClaims};
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::IdentityUser;
pub use google::GoogleIdentityVerifier;
pub use jwt::extract_bearer_token;
pub use session::{SessionIssuer, SESSION_AUDIENCE, SESSION_TTL_SECS};
pub use verifier::IdentityVerifier;
