//! Backend-agnostic spawn parameters and lifecycle results

use std::collections::HashMap;

/// Parameters needed to spawn a teammate process, independent of which
/// vendor CLI ends up running it.
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub agent_id: String,
    pub name: String,
    pub team_name: String,
    pub prompt: String,
    pub model: String,
    pub agent_type: String,
    pub color: String,
    pub cwd: String,
    pub lead_session_id: String,
    pub plan_mode_required: bool,
    pub extra: HashMap<String, String>,
}

/// What a backend returns after a successful spawn.
#[derive(Debug, Clone)]
pub struct SpawnResult {
    /// Backend-specific process handle (tmux pane ID for every current backend).
    pub process_handle: String,
    pub backend_name: String,
}

/// Liveness check result for a previously spawned process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub alive: bool,
    pub detail: String,
}

impl HealthStatus {
    pub fn alive(detail: impl Into<String>) -> Self {
        Self { alive: true, detail: detail.into() }
    }

    pub fn dead(detail: impl Into<String>) -> Self {
        Self { alive: false, detail: detail.into() }
    }
}

/// Result of running a one-off shell command inside a spawned pane.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    pub output: String,
    /// -1 means the command timed out before finishing.
    pub exit_code: i32,
}
