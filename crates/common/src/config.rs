//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_HOST: &str = "postgres";
const DEFAULT_DB_PORT: &str = "5432";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CERT_PATH: &str = "./local/certs/fullchain.pem";
const DEFAULT_KEY_PATH: &str = "./local/certs/privkey.pem";

/// Log output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Certificate and private key locations for TLS termination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsPaths {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl TlsPaths {
    /// Both files exist on disk
    pub fn exist(&self) -> bool {
        self.cert_path.exists() && self.key_path.exists()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Postgres connection URL
    pub database_url: String,
    pub database_max_connections: u32,
    /// Apply bundled migrations on startup
    pub run_migrations: bool,

    /// Secret used to sign session tokens
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Expected audience of external identity tokens
    pub google_client_id: String,

    /// Comma-separated list, parsed by the app crate
    pub cors_allowed_origins: String,

    pub tls: TlsPaths,

    /// Runtime configuration
    pub port: u16,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} is required", key))
        };

        let database_url = match lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                required("DATABASE_MIGRATE_USER")?,
                required("DATABASE_MIGRATE_PASSWORD")?,
                lookup("DATABASE_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
                lookup("DATABASE_PORT").unwrap_or_else(|| DEFAULT_DB_PORT.to_string()),
                required("APPLICATION_DB")?,
            ),
        };

        let config = Self {
            database_url,
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            run_migrations: lookup("RUN_MIGRATIONS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),

            jwt_secret: required("JWT_SECRET")?,
            google_client_id: required("GOOGLE_CLIENT_ID")?,

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default(),

            tls: TlsPaths {
                cert_path: lookup("CERT_PATH")
                    .unwrap_or_else(|| DEFAULT_CERT_PATH.to_string())
                    .into(),
                key_path: lookup("KEY_PATH")
                    .unwrap_or_else(|| DEFAULT_KEY_PATH.to_string())
                    .into(),
            },

            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(config)
    }
}
