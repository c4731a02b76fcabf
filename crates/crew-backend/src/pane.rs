//! Pane controller: the thin external contract every backend spawns into
//!
//! A pane is a long-lived terminal surface a vendor CLI runs inside. The
//! orchestrator never talks to tmux directly; it only ever goes through
//! this trait, so the spawn/relay machinery in `crew-lead` is testable
//! against an in-memory fake without a real tmux server.

use crate::error::PaneError;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

#[async_trait::async_trait]
pub trait PaneController: Send + Sync {
    /// Start `command` (already fully assembled, including `cd` and env
    /// prefix) in a brand new pane and return its opaque handle.
    async fn spawn(&self, command: &str) -> Result<String, PaneError>;

    /// Capture the pane's visible buffer, or the last `lines` lines of it.
    async fn capture(&self, pane_id: &str, lines: Option<usize>) -> Result<String, PaneError>;

    /// Type `text` into the pane, optionally followed by Enter.
    async fn send_keys(&self, pane_id: &str, text: &str, enter: bool) -> Result<(), PaneError>;

    /// Whether the process running in the pane has exited.
    async fn is_dead(&self, pane_id: &str) -> Result<bool, PaneError>;

    /// Forcibly destroy the pane.
    async fn kill(&self, pane_id: &str) -> Result<(), PaneError>;

    /// Keep the pane alive after its command exits, so output can still
    /// be captured for relay.
    async fn retain_after_exit(&self, pane_id: &str) -> Result<(), PaneError>;

    /// Send Ctrl-C to the pane.
    async fn send_interrupt(&self, pane_id: &str) -> Result<(), PaneError>;

    /// Poll the pane until its content hash stops changing for
    /// `idle_time`, or until `timeout` elapses.
    async fn wait_idle(
        &self,
        pane_id: &str,
        idle_time: Duration,
        timeout: Option<Duration>,
    ) -> Result<bool, PaneError> {
        let start = Instant::now();
        let mut last_content = self.capture(pane_id, None).await?;
        let mut stable_since = Instant::now();

        loop {
            if let Some(limit) = timeout {
                if start.elapsed() >= limit {
                    return Ok(false);
                }
            }
            tokio::time::sleep(Duration::from_millis(300)).await;
            let content = self.capture(pane_id, None).await?;
            if content == last_content {
                if stable_since.elapsed() >= idle_time {
                    return Ok(true);
                }
            } else {
                last_content = content;
                stable_since = Instant::now();
            }
        }
    }
}

/// Real tmux-backed pane controller. Every method shells out to the
/// `tmux` binary; callers run under a single-writer lock per team so
/// concurrent pane mutations never interleave.
pub struct TmuxPaneController;

impl TmuxPaneController {
    pub fn new() -> Self {
        Self
    }

    async fn run_tmux(&self, args: &[&str]) -> Result<String, PaneError> {
        let output = Command::new("tmux")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;
        if !output.status.success() {
            return Err(PaneError::CommandFailed {
                command: format!("tmux {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for TmuxPaneController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PaneController for TmuxPaneController {
    async fn spawn(&self, command: &str) -> Result<String, PaneError> {
        let out = self
            .run_tmux(&["split-window", "-d", "-P", "-F", "#{pane_id}", command])
            .await?;
        let pane_id = out.trim().to_string();
        if pane_id.is_empty() {
            return Err(PaneError::CommandFailed {
                command: format!("tmux split-window {command}"),
                stderr: "empty pane id returned".to_string(),
            });
        }
        Ok(pane_id)
    }

    async fn capture(&self, pane_id: &str, lines: Option<usize>) -> Result<String, PaneError> {
        match lines {
            Some(n) => {
                let start = format!("-{n}");
                self.run_tmux(&["capture-pane", "-p", "-t", pane_id, "-S", &start]).await
            }
            None => self.run_tmux(&["capture-pane", "-p", "-t", pane_id]).await,
        }
    }

    async fn send_keys(&self, pane_id: &str, text: &str, enter: bool) -> Result<(), PaneError> {
        self.run_tmux(&["send-keys", "-t", pane_id, text]).await?;
        if enter {
            self.run_tmux(&["send-keys", "-t", pane_id, "Enter"]).await?;
        }
        Ok(())
    }

    async fn is_dead(&self, pane_id: &str) -> Result<bool, PaneError> {
        let out = self
            .run_tmux(&["display-message", "-t", pane_id, "-p", "#{pane_dead}"])
            .await
            .map_err(|_| PaneError::PaneNotFound(pane_id.to_string()))?;
        Ok(out.trim() == "1")
    }

    async fn kill(&self, pane_id: &str) -> Result<(), PaneError> {
        self.run_tmux(&["kill-pane", "-t", pane_id]).await?;
        Ok(())
    }

    async fn retain_after_exit(&self, pane_id: &str) -> Result<(), PaneError> {
        self.run_tmux(&["set-option", "-p", "-t", pane_id, "remain-on-exit", "on"])
            .await?;
        Ok(())
    }

    async fn send_interrupt(&self, pane_id: &str) -> Result<(), PaneError> {
        self.run_tmux(&["send-keys", "-t", pane_id, "C-c"]).await?;
        Ok(())
    }
}
