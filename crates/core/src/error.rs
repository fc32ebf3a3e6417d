//! Error types for the loading surfaces of the core.
//!
//! Gameplay lookups never fail with these: unknown models, exhausted hidden
//! content and out-of-range cells are soft misses returned as `Option` or
//! clamped. Only reading configuration and level files can error.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config root must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Failure while reading or writing a level description
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
