//! Error types for the fallible plumbing around the game.
//!
//! The round itself never fails: ignored input is reported through
//! [`IgnoreReason`](crate::rules::IgnoreReason), not as an error. Only the
//! store backends and configuration loading can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure loading or validating a [`GameConfig`](crate::core::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
