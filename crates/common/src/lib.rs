//! Shared utilities, configuration, and error handling for Tenantgate
//!
//! This crate provides common functionality used across the Tenantgate service:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Repository error types
//! - JSON body extractor with 400 rejections

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::{Config, LogFormat, TlsPaths};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::JsonBody;
