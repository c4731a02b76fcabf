//! Tool surface & gating: which tools a session may call depends on
//! whether it has an active team and whether that team has spawned any
//! workers yet. Definitions here are pure data — wiring them into an
//! RPC transport is left to the caller.

use crate::mailbox::Mailbox;
use crew_core::schema::InboxMessage;
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolTier {
    Bootstrap,
    Team,
    Teammate,
}

#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub tier: ToolTier,
    pub input_schema: Value,
}

/// Per-session gating state. One team per session: a session that has
/// already created a team cannot create a second one.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: String,
    pub active_team: Option<String>,
    pub has_teammates: bool,
}

impl SessionState {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self { session_id: session_id.into(), active_team: None, has_teammates: false }
    }

    pub fn on_team_created(&mut self, team: impl Into<String>) {
        self.active_team = Some(team.into());
    }

    /// `team_delete` clears both flags, hiding the team and teammate tiers.
    pub fn on_team_deleted(&mut self) {
        self.active_team = None;
        self.has_teammates = false;
    }

    pub fn on_teammate_spawned(&mut self) {
        self.has_teammates = true;
    }
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "team_create",
            description: "Create a new team with this session as its lead.",
            tier: ToolTier::Bootstrap,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "description": {"type": "string"}
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: "team_delete",
            description: "Delete the active team. Fails while any worker is still a member.",
            tier: ToolTier::Bootstrap,
            input_schema: json!({"type": "object", "properties": {}}),
        },
        ToolDefinition {
            name: "read_config",
            description: "Read the active team's configuration.",
            tier: ToolTier::Bootstrap,
            input_schema: json!({"type": "object", "properties": {}}),
        },
        ToolDefinition {
            name: "list_backends",
            description: "List registered backends and their availability.",
            tier: ToolTier::Bootstrap,
            input_schema: json!({"type": "object", "properties": {}}),
        },
        ToolDefinition {
            name: "spawn_teammate",
            description: "Spawn a new worker under the active team.",
            tier: ToolTier::Team,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "prompt": {"type": "string"},
                    "model": {"type": "string"},
                    "backend": {"type": "string"},
                    "agent_type": {"type": "string"}
                },
                "required": ["name", "prompt"]
            }),
        },
        ToolDefinition {
            name: "send_message",
            description: "Send a message, broadcast, or shutdown/plan negotiation to team members.",
            tier: ToolTier::Team,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type": {"type": "string"},
                    "recipient": {"type": "string"},
                    "content": {"type": "string"},
                    "summary": {"type": "string"}
                },
                "required": ["type"]
            }),
        },
        ToolDefinition {
            name: "task_create",
            description: "Create a task in the active team's task graph.",
            tier: ToolTier::Team,
            input_schema: json!({
                "type": "object",
                "properties": {"subject": {"type": "string"}, "description": {"type": "string"}},
                "required": ["subject"]
            }),
        },
        ToolDefinition {
            name: "task_update",
            description: "Update a task's status, owner, or dependencies.",
            tier: ToolTier::Team,
            input_schema: json!({"type": "object", "properties": {"id": {"type": "string"}}, "required": ["id"]}),
        },
        ToolDefinition {
            name: "task_list",
            description: "List every task in the active team.",
            tier: ToolTier::Team,
            input_schema: json!({"type": "object", "properties": {}}),
        },
        ToolDefinition {
            name: "task_get",
            description: "Fetch one task by id.",
            tier: ToolTier::Team,
            input_schema: json!({"type": "object", "properties": {"id": {"type": "string"}}, "required": ["id"]}),
        },
        ToolDefinition {
            name: "read_inbox",
            description: "Read the lead's own inbox.",
            tier: ToolTier::Team,
            input_schema: json!({"type": "object", "properties": {"unread_only": {"type": "boolean"}}}),
        },
        ToolDefinition {
            name: "force_kill_teammate",
            description: "Kill a worker's process without waiting for a graceful shutdown.",
            tier: ToolTier::Teammate,
            input_schema: json!({"type": "object", "properties": {"name": {"type": "string"}}, "required": ["name"]}),
        },
        ToolDefinition {
            name: "poll_inbox",
            description: "Wait until a worker's inbox has an unread message, or the timeout elapses.",
            tier: ToolTier::Teammate,
            input_schema: json!({
                "type": "object",
                "properties": {"agentName": {"type": "string"}, "timeout_ms": {"type": "integer"}},
                "required": ["agentName"]
            }),
        },
        ToolDefinition {
            name: "process_shutdown_approved",
            description: "Acknowledge a worker's approved shutdown and release its pane.",
            tier: ToolTier::Teammate,
            input_schema: json!({"type": "object", "properties": {"name": {"type": "string"}}, "required": ["name"]}),
        },
        ToolDefinition {
            name: "health_check",
            description: "Check whether a worker's process is still alive.",
            tier: ToolTier::Teammate,
            input_schema: json!({"type": "object", "properties": {"name": {"type": "string"}}, "required": ["name"]}),
        },
    ]
}

pub fn visible_tools(session: &SessionState) -> Vec<ToolDefinition> {
    tool_definitions()
        .into_iter()
        .filter(|tool| match tool.tier {
            ToolTier::Bootstrap => true,
            ToolTier::Team => session.active_team.is_some(),
            ToolTier::Teammate => session.active_team.is_some() && session.has_teammates,
        })
        .collect()
}

const POLL_INCREMENT: Duration = Duration::from_millis(500);

/// Blocks (cooperatively) until `agent`'s inbox has an unread message or
/// `timeout` elapses, whichever comes first. Never marks messages read.
pub async fn poll_inbox(mailbox: &Mailbox, team: &str, agent: &str, timeout: Duration) -> Vec<InboxMessage> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Ok(messages) = mailbox.read(team, agent, true) {
            if !messages.is_empty() {
                return messages;
            }
        }
        if tokio::time::Instant::now() >= deadline {
            return Vec::new();
        }
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        tokio::time::sleep(POLL_INCREMENT.min(remaining.max(Duration::from_millis(1)))).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_tools_always_visible() {
        let session = SessionState::new("sess-1");
        let names: Vec<_> = visible_tools(&session).into_iter().map(|t| t.name).collect();
        assert!(names.contains(&"team_create"));
        assert!(!names.contains(&"spawn_teammate"));
    }

    #[test]
    fn test_team_tools_visible_once_team_created() {
        let mut session = SessionState::new("sess-1");
        session.on_team_created("demo");
        let names: Vec<_> = visible_tools(&session).into_iter().map(|t| t.name).collect();
        assert!(names.contains(&"spawn_teammate"));
        assert!(!names.contains(&"poll_inbox"));
    }

    #[test]
    fn test_teammate_tools_visible_once_teammate_spawned() {
        let mut session = SessionState::new("sess-1");
        session.on_team_created("demo");
        session.on_teammate_spawned();
        let names: Vec<_> = visible_tools(&session).into_iter().map(|t| t.name).collect();
        assert!(names.contains(&"poll_inbox"));
    }

    #[test]
    fn test_team_deleted_clears_both_tiers() {
        let mut session = SessionState::new("sess-1");
        session.on_team_created("demo");
        session.on_teammate_spawned();
        session.on_team_deleted();
        let names: Vec<_> = visible_tools(&session).into_iter().map(|t| t.name).collect();
        assert!(!names.contains(&"spawn_teammate"));
        assert!(!names.contains(&"poll_inbox"));
    }

    #[tokio::test]
    async fn test_poll_inbox_returns_immediately_when_unread_present() {
        let dir = tempfile::TempDir::new().unwrap();
        let mailbox = Mailbox::new(dir.path());
        mailbox.send("demo", "fixer-1", "team-lead", "go", None, None).unwrap();
        let messages = poll_inbox(&mailbox, "demo", "fixer-1", Duration::from_secs(5)).await;
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_inbox_times_out_with_no_messages() {
        let dir = tempfile::TempDir::new().unwrap();
        let mailbox = Mailbox::new(dir.path());
        let messages = poll_inbox(&mailbox, "demo", "fixer-1", Duration::from_millis(10)).await;
        assert!(messages.is_empty());
    }
}
