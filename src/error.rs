//! src/error.rs
//! ============================================================================
//! # AppError: Unified Error Type for the Ingestion Core
//!
//! This module defines the error enum (`AppError`) used across the crate. Each
//! variant carries context for diagnostics, and all fallible operations return
//! `Result<T, AppError>` for consistency.
//!
//! Note that most anomalies in the ingestion core are *not* errors: malformed
//! records, unrecognized entry kinds, absent removal targets and dangling
//! active folders all degrade to "fewer or no results". `AppError` covers the
//! genuinely fallible edges: I/O against the platform, config parsing, and
//! task plumbing.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all ingestion-core operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure resolving a single entry's bytes or metadata. Callers isolate
    /// this per leaf so one bad file does not lose a whole dropped folder.
    #[error("Failed to resolve entry {name:?}: {source}")]
    Entry {
        name: String,
        #[source]
        source: io::Error,
    },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serialization or deserialization error (e.g., JSON).
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Async task failure or join error.
    #[error("Async task failed: {0}")]
    Task(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Attach extra context to an error.
    pub fn with_context<S: Into<String>>(self, ctx: S) -> AppError {
        AppError::Other(format!("{}: {}", ctx.into(), self))
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Other(e.to_string())
    }
}
