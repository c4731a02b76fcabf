//! Agent member schema for team configuration

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Backend type for an agent member.
///
/// Identifies which vendor CLI a worker was spawned with. The one
/// interactive backend (`claude-code`) speaks the mailbox protocol
/// natively; every other variant names a one-shot backend whose output
/// is relayed into the mailbox after it exits (see the spawn/relay
/// orchestrator). `External` is an escape hatch for a backend added via
/// the plugin registry that this crate does not name explicitly.
///
/// # Serialisation
///
/// All variants serialise/deserialise via their display string so they
/// can be stored in `config.json` without schema-breaking changes.
///
/// # Examples
///
/// ```rust
/// use crew_core::schema::BackendType;
/// use std::str::FromStr;
///
/// assert_eq!(BackendType::from_str("codex").unwrap(), BackendType::Codex);
/// assert_eq!(
///     BackendType::from_str("my-custom-cli").unwrap(),
///     BackendType::External("my-custom-cli".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendType {
    /// The interactive backend; speaks the mailbox protocol natively.
    ClaudeCode,
    /// OpenAI Codex CLI (one-shot, file-capable).
    Codex,
    /// Google Gemini CLI (one-shot, capture-only).
    Gemini,
    /// OpenCode CLI (one-shot, capture-only).
    OpenCode,
    /// Aider CLI (one-shot, capture-only).
    Aider,
    /// GitHub Copilot CLI (one-shot, capture-only).
    Copilot,
    /// Auggie CLI (one-shot, capture-only).
    Auggie,
    /// Goose CLI (one-shot, capture-only).
    Goose,
    /// Qwen Code CLI (one-shot, capture-only).
    Qwen,
    /// Vibe CLI (one-shot, capture-only).
    Vibe,
    /// Kimi CLI (one-shot, capture-only).
    Kimi,
    /// Amp CLI (one-shot, capture-only).
    Amp,
    /// Rovo Dev CLI (one-shot, capture-only).
    RovoDev,
    /// LLXPRT CLI (one-shot, capture-only).
    Llxprt,
    /// Coder CLI (one-shot, capture-only).
    Coder,
    /// Claudish CLI (one-shot, capture-only).
    Claudish,
    /// Happy CLI (one-shot, capture-only).
    Happy,
    /// A plugin-registered backend not named above.
    External(String),
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendType::ClaudeCode => write!(f, "claude-code"),
            BackendType::Codex => write!(f, "codex"),
            BackendType::Gemini => write!(f, "gemini"),
            BackendType::OpenCode => write!(f, "opencode"),
            BackendType::Aider => write!(f, "aider"),
            BackendType::Copilot => write!(f, "copilot"),
            BackendType::Auggie => write!(f, "auggie"),
            BackendType::Goose => write!(f, "goose"),
            BackendType::Qwen => write!(f, "qwen"),
            BackendType::Vibe => write!(f, "vibe"),
            BackendType::Kimi => write!(f, "kimi"),
            BackendType::Amp => write!(f, "amp"),
            BackendType::RovoDev => write!(f, "rovodev"),
            BackendType::Llxprt => write!(f, "llxprt"),
            BackendType::Coder => write!(f, "coder"),
            BackendType::Claudish => write!(f, "claudish"),
            BackendType::Happy => write!(f, "happy"),
            BackendType::External(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for BackendType {
    type Err = std::convert::Infallible;

    /// Parses a backend name. Unrecognised names are preserved verbatim
    /// as `External` rather than rejected, since third-party backends
    /// register themselves by name at runtime (see the backend registry).
    ///
    /// The legacy Claude Code session value `"tmux"` is treated as an
    /// alias for `claude-code` for backward compatibility with
    /// config.json files written before this field existed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "claude-code" | "tmux" => BackendType::ClaudeCode,
            "codex" => BackendType::Codex,
            "gemini" => BackendType::Gemini,
            "opencode" => BackendType::OpenCode,
            "aider" => BackendType::Aider,
            "copilot" => BackendType::Copilot,
            "auggie" => BackendType::Auggie,
            "goose" => BackendType::Goose,
            "qwen" => BackendType::Qwen,
            "vibe" => BackendType::Vibe,
            "kimi" => BackendType::Kimi,
            "amp" => BackendType::Amp,
            "rovodev" => BackendType::RovoDev,
            "llxprt" => BackendType::Llxprt,
            "coder" => BackendType::Coder,
            "claudish" => BackendType::Claudish,
            "happy" => BackendType::Happy,
            other => BackendType::External(other.to_string()),
        })
    }
}

impl BackendType {
    /// Whether this backend manages its own mailbox writes and runs
    /// long-lived, as opposed to one-shot backends whose output must be
    /// relayed after they exit.
    pub fn is_interactive(&self) -> bool {
        matches!(self, BackendType::ClaudeCode)
    }

    /// Every built-in named variant, in catalog order. Excludes `External`,
    /// which has no fixed identity.
    pub fn all() -> Vec<BackendType> {
        vec![
            BackendType::ClaudeCode,
            BackendType::Codex,
            BackendType::Gemini,
            BackendType::OpenCode,
            BackendType::Aider,
            BackendType::Copilot,
            BackendType::Auggie,
            BackendType::Goose,
            BackendType::Qwen,
            BackendType::Vibe,
            BackendType::Kimi,
            BackendType::Amp,
            BackendType::RovoDev,
            BackendType::Llxprt,
            BackendType::Coder,
            BackendType::Claudish,
            BackendType::Happy,
        ]
    }
}

impl Serialize for BackendType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BackendType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(BackendType::from_str(&s).expect("BackendType::from_str is infallible"))
    }
}

/// Agent member in a team
///
/// Represents a single agent in the team's member list within the team
/// config file. The lead member is distinguished from a worker member
/// by the absence of `prompt` (see Design Notes — discriminate by field
/// presence, not by a separate tag).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMember {
    /// Unique agent identifier (format: "{name}@{team_name}")
    pub agent_id: String,

    /// Agent instance name (unique within team)
    pub name: String,

    /// Agent capability type (e.g., "general-purpose", "explore", "plan")
    pub agent_type: String,

    /// Resolved model identifier passed to the backend
    pub model: String,

    /// Initial prompt given to a spawned worker (absent for team-lead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// UI color code assigned round-robin from the palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Whether plan mode is required before this worker may act
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_mode_required: Option<bool>,

    /// Unix timestamp in milliseconds when agent joined
    pub joined_at: u64,

    /// Opaque process/pane handle returned by the backend's `spawn` call
    /// (empty string for the lead, which has no child process)
    #[serde(rename = "tmuxPaneId", default, skip_serializing_if = "Option::is_none")]
    pub process_handle: Option<String>,

    /// Current working directory of agent
    pub cwd: String,

    /// Notification subscriptions (usually empty array)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscriptions: Vec<serde_json::Value>,

    /// Which backend spawned this member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_type: Option<BackendType>,

    /// Whether agent is currently running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Unix timestamp in milliseconds of last activity (message sent, message read)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<u64>,

    /// Session ID for members whose backend reports one back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Unknown fields for forward compatibility
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl AgentMember {
    /// Whether this member is a spawned worker (has a prompt) rather
    /// than the team lead.
    pub fn is_worker(&self) -> bool {
        self.prompt.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_member_roundtrip_team_lead() {
        let json = r#"{
            "agentId": "team-lead@test-team",
            "name": "team-lead",
            "agentType": "general-purpose",
            "model": "claude-haiku-4-5-20251001",
            "joinedAt": 1770765919076,
            "tmuxPaneId": "",
            "cwd": "/Users/dev/test",
            "subscriptions": []
        }"#;

        let member: AgentMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.agent_id, "team-lead@test-team");
        assert_eq!(member.name, "team-lead");
        assert_eq!(member.agent_type, "general-purpose");
        assert_eq!(member.model, "claude-haiku-4-5-20251001");
        assert_eq!(member.joined_at, 1770765919076);
        assert_eq!(member.cwd, "/Users/dev/test");
        assert!(member.prompt.is_none());
        assert!(!member.is_worker());
        assert!(member.color.is_none());
        assert!(member.subscriptions.is_empty());

        let serialized = serde_json::to_string(&member).unwrap();
        let reparsed: AgentMember = serde_json::from_str(&serialized).unwrap();
        assert_eq!(member.agent_id, reparsed.agent_id);
    }

    #[test]
    fn test_agent_member_roundtrip_spawned_worker() {
        let json = r#"{
            "agentId": "fixer-1@test-team",
            "name": "fixer-1",
            "agentType": "general-purpose",
            "model": "gpt-5.3-codex",
            "prompt": "Fix the failing CI job.",
            "color": "blue",
            "planModeRequired": false,
            "joinedAt": 1770772206905,
            "tmuxPaneId": "%14",
            "cwd": "/Users/dev/test",
            "subscriptions": [],
            "backendType": "codex",
            "isActive": false
        }"#;

        let member: AgentMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.agent_id, "fixer-1@test-team");
        assert!(member.is_worker());
        assert_eq!(member.prompt, Some("Fix the failing CI job.".to_string()));
        assert_eq!(member.color, Some("blue".to_string()));
        assert_eq!(member.plan_mode_required, Some(false));
        assert_eq!(member.process_handle, Some("%14".to_string()));
        assert_eq!(member.backend_type, Some(BackendType::Codex));
        assert_eq!(member.is_active, Some(false));

        let serialized = serde_json::to_string(&member).unwrap();
        let reparsed: AgentMember = serde_json::from_str(&serialized).unwrap();
        assert_eq!(member.prompt, reparsed.prompt);
        assert_eq!(member.color, reparsed.color);
    }

    #[test]
    fn test_agent_member_roundtrip_with_unknown_fields() {
        let json = r#"{
            "agentId": "test-agent@test-team",
            "name": "test-agent",
            "agentType": "general-purpose",
            "model": "claude-sonnet-4-5-20250929",
            "joinedAt": 1770765919076,
            "cwd": "/test",
            "unknownField": "value",
            "futureFeature": {"nested": "data"}
        }"#;

        let member: AgentMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.agent_id, "test-agent@test-team");
        assert_eq!(member.unknown_fields.len(), 2);
        assert!(member.unknown_fields.contains_key("unknownField"));
        assert!(member.unknown_fields.contains_key("futureFeature"));

        let serialized = serde_json::to_string(&member).unwrap();
        let reparsed: AgentMember = serde_json::from_str(&serialized).unwrap();
        assert_eq!(member.unknown_fields.len(), reparsed.unknown_fields.len());
    }

    #[test]
    fn test_agent_member_missing_optional_fields() {
        let json = r#"{
            "agentId": "test@team",
            "name": "test",
            "agentType": "general-purpose",
            "model": "claude-opus-4-6",
            "joinedAt": 1770765919076,
            "cwd": "/test"
        }"#;

        let member: AgentMember = serde_json::from_str(json).unwrap();
        assert!(member.prompt.is_none());
        assert!(member.color.is_none());
        assert!(member.plan_mode_required.is_none());
        assert!(member.process_handle.is_none());
        assert!(member.backend_type.is_none());
        assert!(member.is_active.is_none());
        assert!(member.subscriptions.is_empty());
        assert!(member.session_id.is_none());
    }

    // ── BackendType tests ─────────────────────────────────────────────────

    #[test]
    fn backend_type_known_variants_roundtrip() {
        let cases = [
            (BackendType::ClaudeCode, "claude-code"),
            (BackendType::Codex, "codex"),
            (BackendType::Gemini, "gemini"),
            (BackendType::OpenCode, "opencode"),
            (BackendType::Happy, "happy"),
        ];
        for (variant, s) in &cases {
            assert_eq!(variant.to_string(), *s);
            assert_eq!(BackendType::from_str(s).unwrap(), *variant);
        }
    }

    #[test]
    fn backend_type_legacy_tmux_alias() {
        assert_eq!(BackendType::from_str("tmux").unwrap(), BackendType::ClaudeCode);
    }

    #[test]
    fn backend_type_unknown_preserved_as_external() {
        let bt = BackendType::from_str("alien-ai").unwrap();
        assert_eq!(bt, BackendType::External("alien-ai".to_string()));
        assert_eq!(bt.to_string(), "alien-ai");
    }

    #[test]
    fn backend_type_serde_roundtrip() {
        let bt = BackendType::External("my-custom-cli".to_string());
        let json = serde_json::to_string(&bt).unwrap();
        assert_eq!(json, r#""my-custom-cli""#);
        let parsed: BackendType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bt);
    }

    #[test]
    fn backend_type_is_interactive() {
        assert!(BackendType::ClaudeCode.is_interactive());
        assert!(!BackendType::Codex.is_interactive());
        assert!(!BackendType::External("x".to_string()).is_interactive());
    }
}
