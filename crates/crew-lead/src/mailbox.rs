//! Mailbox wiring: path layout plus message construction helpers over
//! `crew_core::io::{append_message, read_inbox}`.
//!
//! Structured payloads (`task_assignment`, `shutdown_request`,
//! `shutdown_approved`, `idle_notification`, `plan_approval`) are
//! ordinary messages whose `text` is itself a JSON object carrying a
//! `type` discriminator — the inbox file format never changes shape to
//! carry them.

use crate::error::CrewError;
use chrono::Utc;
use crew_core::io::{append_message, ensure_inbox, read_inbox};
use crew_core::schema::InboxMessage;
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct Mailbox {
    root: PathBuf,
}

impl Mailbox {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn inbox_path(&self, team: &str, agent: &str) -> PathBuf {
        self.root.join("teams").join(team).join("inboxes").join(format!("{agent}.json"))
    }

    fn ensure(&self, team: &str, agent: &str) -> Result<PathBuf, CrewError> {
        let path = self.inbox_path(team, agent);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        }
        ensure_inbox(&path)?;
        Ok(path)
    }

    pub fn send(
        &self,
        team: &str,
        agent: &str,
        from: &str,
        text: impl Into<String>,
        summary: Option<String>,
        color: Option<String>,
    ) -> Result<(), CrewError> {
        let path = self.ensure(team, agent)?;
        let message = InboxMessage {
            from: from.to_string(),
            text: text.into(),
            timestamp: now_iso8601_ms(),
            read: false,
            summary,
            color,
            message_id: None,
            unknown_fields: HashMap::new(),
        };
        append_message(&path, &message)?;
        Ok(())
    }

    pub fn read(&self, team: &str, agent: &str, unread_only: bool) -> Result<Vec<InboxMessage>, CrewError> {
        let path = self.inbox_path(team, agent);
        if !path.exists() {
            return Ok(Vec::new());
        }
        Ok(read_inbox(&path, unread_only, false)?)
    }

    /// Returns unread messages and marks them read, atomically.
    pub fn drain_unread(&self, team: &str, agent: &str) -> Result<Vec<InboxMessage>, CrewError> {
        let path = self.ensure(team, agent)?;
        Ok(read_inbox(&path, true, true)?)
    }
}

fn now_iso8601_ms() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// A structured `task_assignment` notice, serialized as message text.
pub fn task_assignment_text(task_id: &str, subject: &str) -> String {
    json!({"type": "task_assignment", "taskId": task_id, "subject": subject}).to_string()
}

/// A structured `shutdown_request`, with a generated request id of the
/// form `shutdown-<unix-ms>@<recipient>`.
pub fn shutdown_request_text(recipient: &str, now_ms: u64) -> (String, String) {
    let request_id = format!("shutdown-{now_ms}@{recipient}");
    let text = json!({"type": "shutdown_request", "requestId": request_id}).to_string();
    (request_id, text)
}

pub fn shutdown_approved_text(request_id: &str, pane_id: &str, backend_type: &str) -> String {
    json!({
        "type": "shutdown_approved",
        "requestId": request_id,
        "paneId": pane_id,
        "backendType": backend_type,
    })
    .to_string()
}

pub fn idle_notification_text() -> String {
    json!({"type": "idle_notification"}).to_string()
}

pub fn plan_approval_text(approved: bool) -> String {
    json!({"type": "plan_approval", "approved": approved}).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_send_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mailbox = Mailbox::new(dir.path());
        mailbox
            .send("demo", "fixer-1", "team-lead", "hello", Some("greeting".into()), Some("blue".into()))
            .unwrap();
        let messages = mailbox.read("demo", "fixer-1", false).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "hello");
        assert!(!messages[0].read);
    }

    #[test]
    fn test_drain_unread_marks_read() {
        let dir = TempDir::new().unwrap();
        let mailbox = Mailbox::new(dir.path());
        mailbox.send("demo", "fixer-1", "team-lead", "hello", None, None).unwrap();
        let drained = mailbox.drain_unread("demo", "fixer-1").unwrap();
        assert_eq!(drained.len(), 1);
        let remaining_unread = mailbox.read("demo", "fixer-1", true).unwrap();
        assert!(remaining_unread.is_empty());
    }

    #[test]
    fn test_read_on_nonexistent_inbox_is_empty() {
        let dir = TempDir::new().unwrap();
        let mailbox = Mailbox::new(dir.path());
        assert!(mailbox.read("demo", "ghost", false).unwrap().is_empty());
    }

    #[test]
    fn test_shutdown_request_id_format() {
        let (id, text) = shutdown_request_text("fixer-1", 1_700_000_000_000);
        assert_eq!(id, "shutdown-1700000000000@fixer-1");
        assert!(text.contains("shutdown_request"));
    }
}
