//! Error types for atomic I/O operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during inbox/config file operations
#[derive(Error, Debug)]
pub enum InboxError {
    /// Failed to acquire file lock after multiple retries
    #[error("Failed to acquire lock on {path} after {retries} retries")]
    LockTimeout { path: PathBuf, retries: u32 },

    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse JSON
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Invalid inbox path (e.g., missing team or agent name)
    #[error("Invalid inbox path: {path}")]
    InvalidPath { path: PathBuf },
}
