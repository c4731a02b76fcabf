//! The `Backend` trait: one uniform lifecycle for every vendor CLI
//!
//! A `Backend` knows how to name itself, pick a binary, resolve models,
//! and build a command line; it never touches a terminal directly.
//! Every lifecycle and interactivity method takes a [`PaneController`]
//! so the same backend logic runs against the real tmux controller in
//! production and an in-memory fake in tests.

use crate::error::{BackendError, PaneError};
use crate::pane::PaneController;
use crate::spawn::{CaptureResult, HealthStatus, SpawnRequest, SpawnResult};
use std::collections::HashMap;
use std::time::Duration;

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Unique backend identifier, e.g. `"claude-code"`, `"codex"`.
    fn name(&self) -> &str;

    /// Name of the CLI binary to look up on PATH, e.g. `"claude"`, `"codex"`.
    fn binary_name(&self) -> &str;

    /// Whether this backend runs long-lived and speaks the mailbox
    /// protocol natively, as opposed to a one-shot process whose
    /// output must be relayed after it exits.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Curated, non-exhaustive list of well-known model identifiers.
    fn supported_models(&self) -> &[&str];

    /// Default model short-name for this backend.
    fn default_model(&self) -> &str;

    /// Map a generic tier (`fast`/`balanced`/`powerful`) or a direct
    /// model name to a backend-specific model identifier. Unrecognised
    /// names pass through unchanged.
    fn resolve_model(&self, generic_name: &str) -> String;

    /// Whether this backend can write its final reply to a file named
    /// via `request.extra["output_last_message_path"]`, rather than
    /// only ever being captured from the pane's scrollback. A relay
    /// task prefers that file the moment it appears, even while the
    /// pane is still alive, since a still-open pane is how one-shot
    /// CLIs leave their shell prompt running after they print a result.
    fn supports_output_file(&self) -> bool {
        false
    }

    /// Build the full command line (binary + args) to spawn the agent.
    fn build_command(&self, request: &SpawnRequest) -> Result<Vec<String>, BackendError>;

    /// Extra environment variables to merge with the current environment.
    fn build_env(&self, _request: &SpawnRequest) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Whether the backend binary is found on PATH.
    fn is_available(&self) -> bool {
        which(self.binary_name()).is_some()
    }

    /// Full path to the backend binary.
    fn discover_binary(&self) -> Result<String, BackendError> {
        which(self.binary_name()).ok_or_else(|| BackendError::BinaryNotFound {
            vendor: self.name().to_string(),
            binary: self.binary_name().to_string(),
        })
    }

    /// Spawn the agent process in a new pane.
    async fn spawn(
        &self,
        pane: &dyn PaneController,
        request: &SpawnRequest,
    ) -> Result<SpawnResult, BackendError> {
        let binary = self.discover_binary()?;
        let mut parts = self.build_command(request)?;
        parts[0] = binary;

        let env_vars = self.build_env(request);
        for key in env_vars.keys() {
            if !is_safe_env_key(key) {
                return Err(BackendError::InvalidEnvKey(key.clone()));
            }
        }

        let env_prefix: String = env_vars
            .iter()
            .map(|(k, v)| format!("{k}={}", shell_quote(v)))
            .collect::<Vec<_>>()
            .join(" ");
        let cmd_str: String = parts.iter().map(|p| shell_quote(p)).collect::<Vec<_>>().join(" ");
        let full_cmd = if env_prefix.is_empty() {
            format!("cd {} && {cmd_str}", shell_quote(&request.cwd))
        } else {
            format!("cd {} && {env_prefix} {cmd_str}", shell_quote(&request.cwd))
        };

        let process_handle = pane.spawn(&full_cmd).await.map_err(BackendError::Pane)?;
        Ok(SpawnResult { process_handle, backend_name: self.name().to_string() })
    }

    async fn health_check(
        &self,
        pane: &dyn PaneController,
        handle: &str,
    ) -> Result<HealthStatus, BackendError> {
        match pane.is_dead(handle).await {
            Ok(true) => Ok(HealthStatus::dead("process exited (pane retained)")),
            Ok(false) => Ok(HealthStatus::alive("pane check")),
            Err(PaneError::PaneNotFound(_)) => Ok(HealthStatus::dead("pane not found")),
            Err(e) => Err(BackendError::Pane(e)),
        }
    }

    async fn kill(&self, pane: &dyn PaneController, handle: &str) -> Result<(), BackendError> {
        pane.kill(handle).await.map_err(BackendError::Pane)
    }

    async fn graceful_shutdown(
        &self,
        pane: &dyn PaneController,
        handle: &str,
        timeout: Duration,
    ) -> Result<bool, BackendError> {
        pane.send_interrupt(handle).await.map_err(BackendError::Pane)?;
        pane.wait_idle(handle, Duration::from_secs(1), Some(timeout))
            .await
            .map_err(BackendError::Pane)
    }

    async fn capture(
        &self,
        pane: &dyn PaneController,
        handle: &str,
        lines: Option<usize>,
    ) -> Result<String, BackendError> {
        pane.capture(handle, lines).await.map_err(BackendError::Pane)
    }

    async fn send(
        &self,
        pane: &dyn PaneController,
        handle: &str,
        text: &str,
        enter: bool,
    ) -> Result<(), BackendError> {
        pane.send_keys(handle, text, enter).await.map_err(BackendError::Pane)
    }

    async fn wait_idle(
        &self,
        pane: &dyn PaneController,
        handle: &str,
        idle_time: Duration,
        timeout: Option<Duration>,
    ) -> Result<bool, BackendError> {
        pane.wait_idle(handle, idle_time, timeout).await.map_err(BackendError::Pane)
    }

    async fn retain_pane_after_exit(
        &self,
        pane: &dyn PaneController,
        handle: &str,
    ) -> Result<(), BackendError> {
        pane.retain_after_exit(handle).await.map_err(BackendError::Pane)
    }

    /// Run a shell command inside an idle pane and collect its output.
    ///
    /// Best suited for diagnostics between agent turns, not for
    /// interacting with a running agent's own conversation.
    async fn execute_in_pane(
        &self,
        pane: &dyn PaneController,
        handle: &str,
        command: &str,
        timeout: Duration,
    ) -> Result<CaptureResult, BackendError> {
        let marker = "__crew_exec_done__";
        self.send(pane, handle, &format!("{command}; echo {marker} $?"), true).await?;
        let became_idle = self
            .wait_idle(pane, handle, Duration::from_millis(500), Some(timeout))
            .await?;
        let output = self.capture(pane, handle, None).await?;
        if !became_idle {
            return Ok(CaptureResult { output, exit_code: -1 });
        }
        let exit_code = output
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix(marker).and_then(|rest| rest.trim().parse().ok()))
            .unwrap_or(-1);
        Ok(CaptureResult { output, exit_code })
    }
}

fn is_safe_env_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn which(binary: &str) -> Option<String> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var).find_map(|dir| {
        let candidate = dir.join(binary);
        candidate.is_file().then(|| candidate.to_string_lossy().into_owned())
    })
}
