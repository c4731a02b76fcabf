//! In-memory pane controller for testing backends and the orchestrator
//! without a real tmux server.
//!
//! Records every call and lets tests inject fake pane content and
//! errors, so spawn/relay logic in `crew-lead` can be exercised on
//! every platform including CI runners with no tmux binary.

use crate::error::PaneError;
use crate::pane::PaneController;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockCall {
    Spawn { command: String },
    Capture { pane_id: String },
    SendKeys { pane_id: String, text: String, enter: bool },
    Kill { pane_id: String },
    RetainAfterExit { pane_id: String },
    Interrupt { pane_id: String },
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    next_pane_id: u32,
    panes: HashMap<String, PaneState>,
    spawn_error: Option<String>,
}

#[derive(Debug, Default, Clone)]
struct PaneState {
    content: String,
    dead: bool,
    retained: bool,
}

/// Fake [`PaneController`] backed by in-memory state.
#[derive(Clone, Default)]
pub struct MockPaneController {
    state: Arc<Mutex<MockState>>,
}

impl MockPaneController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn set_spawn_error(&self, error: Option<String>) {
        self.state.lock().unwrap().spawn_error = error;
    }

    /// Overwrite a pane's captured content, as if the process printed it.
    pub fn set_pane_content(&self, pane_id: &str, content: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state.panes.entry(pane_id.to_string()).or_default().content = content.into();
    }

    /// Mark a pane's process as exited, as `is_dead` would then report.
    pub fn mark_dead(&self, pane_id: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(pane) = state.panes.get_mut(pane_id) {
            pane.dead = true;
        }
    }

    pub fn pane_count(&self) -> usize {
        self.state.lock().unwrap().panes.len()
    }

    pub fn is_retained(&self, pane_id: &str) -> bool {
        self.state.lock().unwrap().panes.get(pane_id).map(|p| p.retained).unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl PaneController for MockPaneController {
    async fn spawn(&self, command: &str) -> Result<String, PaneError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.spawn_error.take() {
            return Err(PaneError::CommandFailed { command: command.to_string(), stderr: message });
        }
        state.next_pane_id += 1;
        let pane_id = format!("%{}", state.next_pane_id);
        state.panes.insert(pane_id.clone(), PaneState::default());
        state.calls.push(MockCall::Spawn { command: command.to_string() });
        Ok(pane_id)
    }

    async fn capture(&self, pane_id: &str, lines: Option<usize>) -> Result<String, PaneError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::Capture { pane_id: pane_id.to_string() });
        let pane = state.panes.get(pane_id).ok_or_else(|| PaneError::PaneNotFound(pane_id.to_string()))?;
        match lines {
            Some(n) => Ok(pane.content.lines().rev().take(n).collect::<Vec<_>>().into_iter().rev().collect::<Vec<_>>().join("\n")),
            None => Ok(pane.content.clone()),
        }
    }

    async fn send_keys(&self, pane_id: &str, text: &str, enter: bool) -> Result<(), PaneError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::SendKeys {
            pane_id: pane_id.to_string(),
            text: text.to_string(),
            enter,
        });
        state.panes.get(pane_id).ok_or_else(|| PaneError::PaneNotFound(pane_id.to_string()))?;
        Ok(())
    }

    async fn is_dead(&self, pane_id: &str) -> Result<bool, PaneError> {
        let state = self.state.lock().unwrap();
        let pane = state.panes.get(pane_id).ok_or_else(|| PaneError::PaneNotFound(pane_id.to_string()))?;
        Ok(pane.dead)
    }

    async fn kill(&self, pane_id: &str) -> Result<(), PaneError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::Kill { pane_id: pane_id.to_string() });
        state.panes.remove(pane_id);
        Ok(())
    }

    async fn retain_after_exit(&self, pane_id: &str) -> Result<(), PaneError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::RetainAfterExit { pane_id: pane_id.to_string() });
        let pane =
            state.panes.get_mut(pane_id).ok_or_else(|| PaneError::PaneNotFound(pane_id.to_string()))?;
        pane.retained = true;
        Ok(())
    }

    async fn send_interrupt(&self, pane_id: &str) -> Result<(), PaneError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::Interrupt { pane_id: pane_id.to_string() });
        state.panes.get(pane_id).ok_or_else(|| PaneError::PaneNotFound(pane_id.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend_trait::Backend;
    use crate::vendor_backend::ClaudeCodeBackend;
    use std::collections::HashMap as Map;

    fn request() -> crate::spawn::SpawnRequest {
        crate::spawn::SpawnRequest {
            agent_id: "fixer-1@demo".into(),
            name: "fixer-1".into(),
            team_name: "demo".into(),
            prompt: "fix the bug".into(),
            model: "sonnet".into(),
            agent_type: "general-purpose".into(),
            color: "blue".into(),
            cwd: "/work".into(),
            lead_session_id: "sess-1".into(),
            plan_mode_required: false,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_mock_spawn_then_capture_roundtrip() {
        let pane = MockPaneController::new();
        pane.set_pane_content("%1", "hello from agent");
        let handle = pane.spawn("echo hi").await.unwrap();
        assert_eq!(handle, "%1");
        assert_eq!(pane.capture(&handle, None).await.unwrap(), "hello from agent");
    }

    #[tokio::test]
    async fn test_spawn_error_injection_is_one_shot() {
        let pane = MockPaneController::new();
        pane.set_spawn_error(Some("boom".to_string()));
        assert!(pane.spawn("echo hi").await.is_err());
        assert!(pane.spawn("echo hi").await.is_ok());
    }

    #[tokio::test]
    async fn test_is_dead_reflects_mark_dead() {
        let pane = MockPaneController::new();
        let handle = pane.spawn("echo hi").await.unwrap();
        assert!(!pane.is_dead(&handle).await.unwrap());
        pane.mark_dead(&handle);
        assert!(pane.is_dead(&handle).await.unwrap());
    }

    #[tokio::test]
    async fn test_claude_code_backend_drives_mock_pane_end_to_end() {
        let pane = MockPaneController::new();
        let backend = ClaudeCodeBackend;
        let result = backend.spawn(&pane, &request()).await.unwrap();
        assert_eq!(result.process_handle, "%1");
        assert!(pane.calls().iter().any(|c| matches!(c, MockCall::Spawn { .. })));
    }
}
