//! The shared error taxonomy for team store, mailbox, task graph, and
//! orchestrator operations.
//!
//! Every fallible operation in this crate returns [`CrewError`] so the
//! tool surface can map any failure to one of seven kinds without a
//! per-component translation table.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrewError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("failed to spawn {name}: {message}")]
    SpawnFailed { name: String, message: String },

    #[error("backend {0} is unavailable")]
    ExternalUnavailable(String),

    #[error("io failure: {0}")]
    IoFailure(String),
}

impl CrewError {
    /// The error kind name, stable across variants, for tool-surface
    /// responses and the structured event log.
    pub fn kind(&self) -> &'static str {
        match self {
            CrewError::NotFound(_) => "not-found",
            CrewError::InvalidArgument(_) => "invalid-argument",
            CrewError::Conflict(_) => "conflict",
            CrewError::InvariantViolation(_) => "invariant-violation",
            CrewError::SpawnFailed { .. } => "spawn-failed",
            CrewError::ExternalUnavailable(_) => "external-unavailable",
            CrewError::IoFailure(_) => "io-failure",
        }
    }
}

impl From<crew_core::io::InboxError> for CrewError {
    fn from(err: crew_core::io::InboxError) -> Self {
        CrewError::IoFailure(err.to_string())
    }
}

impl From<crew_backend::BackendError> for CrewError {
    fn from(err: crew_backend::BackendError) -> Self {
        match &err {
            crew_backend::BackendError::BinaryNotFound { binary, .. } => {
                CrewError::ExternalUnavailable(binary.clone())
            }
            crew_backend::BackendError::UnsupportedModel { .. } => {
                CrewError::InvalidArgument(err.to_string())
            }
            _ => CrewError::SpawnFailed {
                name: "backend".to_string(),
                message: err.to_string(),
            },
        }
    }
}
