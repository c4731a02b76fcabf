//! Error types for backend and pane-controller operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("binary '{binary}' not found on PATH; install {vendor} or add it to PATH")]
    BinaryNotFound { vendor: String, binary: String },

    #[error("unsupported model '{model}' for backend '{backend}'; supported: {supported}")]
    UnsupportedModel {
        backend: String,
        model: String,
        supported: String,
    },

    #[error("invalid environment variable name: {0:?}")]
    InvalidEnvKey(String),

    #[error("pane error: {0}")]
    Pane(#[from] PaneError),

    #[error("spawn failed for agent '{agent_id}': {message}")]
    SpawnFailed { agent_id: String, message: String },
}

#[derive(Error, Debug)]
pub enum PaneError {
    #[error("tmux command failed: {command}: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("failed to launch tmux: {0}")]
    Launch(#[from] std::io::Error),

    #[error("pane '{0}' not found")]
    PaneNotFound(String),

    #[error("timed out waiting for pane '{pane_id}' to go idle")]
    IdleTimeout { pane_id: String },
}
