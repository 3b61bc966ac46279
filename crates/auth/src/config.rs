//! Authentication configuration

use tenantgate_common::Config;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign and verify session tokens
    pub jwt_secret: String,
    /// Expected `aud` of external identity tokens
    pub google_client_id: String,
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            google_client_id: config.google_client_id.clone(),
        }
    }
}
