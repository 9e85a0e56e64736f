//! Configuration system error types.
//!
//! Domain-specific errors for loading, merging, and validating fleet
//! configuration.

use thiserror::Error;

/// Configuration system errors.
///
/// These errors occur when loading fleet manifests from disk, parsing TOML,
/// or validating the relationship between project subscription overrides and
/// the build configurations the build-setup strategy actually produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to access configuration file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    #[error("Failed to parse configuration: {reason}")]
    ParseError { reason: String },

    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Project '{project}' overrides subscriptions for build type '{build_type}', but the build setup produced no such build type")]
    UnknownBuildType { project: String, build_type: String },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
