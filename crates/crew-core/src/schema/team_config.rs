//! Team configuration schema

use super::AgentMember;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Team configuration
///
/// Stored at `~/.claude/teams/{team_name}/config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamConfig {
    /// Team name (matches directory name)
    pub name: String,

    /// Human-readable team purpose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unix timestamp in milliseconds when team was created
    pub created_at: u64,

    /// Lead agent ID (format: "team-lead@{team_name}")
    pub lead_agent_id: String,

    /// UUID of session that created the team
    pub lead_session_id: String,

    /// Array of team members (includes team lead as first member)
    pub members: Vec<AgentMember>,

    /// Unknown fields for forward compatibility
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_config_roundtrip_minimal() {
        let json = r#"{
            "name": "test-team",
            "createdAt": 1770765919076,
            "leadAgentId": "team-lead@test-team",
            "leadSessionId": "6075f866-f103-4be1-b2e9-8dbf66009eb9",
            "members": []
        }"#;

        let config: TeamConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "test-team");
        assert_eq!(config.created_at, 1770765919076);
        assert_eq!(config.lead_agent_id, "team-lead@test-team");
        assert_eq!(config.lead_session_id, "6075f866-f103-4be1-b2e9-8dbf66009eb9");
        assert!(config.description.is_none());
        assert!(config.members.is_empty());

        let serialized = serde_json::to_string(&config).unwrap();
        let reparsed: TeamConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config.name, reparsed.name);
    }

    #[test]
    fn test_team_config_roundtrip_complete() {
        let json = r#"{
            "name": "bugfix-sprint",
            "description": "Triage and patch the failing integration tests",
            "createdAt": 1770765919076,
            "leadAgentId": "team-lead@bugfix-sprint",
            "leadSessionId": "6075f866-f103-4be1-b2e9-8dbf66009eb9",
            "members": [
                {
                    "agentId": "team-lead@bugfix-sprint",
                    "name": "team-lead",
                    "agentType": "general-purpose",
                    "model": "haiku",
                    "joinedAt": 1770765919076,
                    "tmuxPaneId": "",
                    "cwd": "/Users/dev/test",
                    "subscriptions": []
                },
                {
                    "agentId": "fixer-1@bugfix-sprint",
                    "name": "fixer-1",
                    "agentType": "general-purpose",
                    "model": "gpt-5.3-codex",
                    "prompt": "Find and fix the flaky retry test in the queue worker module.",
                    "color": "blue",
                    "planModeRequired": false,
                    "joinedAt": 1770772206905,
                    "tmuxPaneId": "%14",
                    "cwd": "/Users/dev/test",
                    "subscriptions": [],
                    "backendType": "codex",
                    "isActive": false
                }
            ]
        }"#;

        let config: TeamConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "bugfix-sprint");
        assert_eq!(
            config.description,
            Some("Triage and patch the failing integration tests".to_string())
        );
        assert_eq!(config.members.len(), 2);
        assert_eq!(config.members[0].name, "team-lead");
        assert_eq!(config.members[1].name, "fixer-1");
        assert_eq!(config.members[1].color, Some("blue".to_string()));

        let serialized = serde_json::to_string(&config).unwrap();
        let reparsed: TeamConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config.members.len(), reparsed.members.len());
        assert_eq!(config.members[1].name, reparsed.members[1].name);
    }

    #[test]
    fn test_team_config_roundtrip_with_unknown_fields() {
        let json = r#"{
            "name": "test-team",
            "createdAt": 1770765919076,
            "leadAgentId": "team-lead@test-team",
            "leadSessionId": "6075f866-f103-4be1-b2e9-8dbf66009eb9",
            "members": [],
            "unknownField": "value",
            "futureFeature": {"nested": "data"}
        }"#;

        let config: TeamConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "test-team");
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknownField"));
        assert!(config.unknown_fields.contains_key("futureFeature"));

        let serialized = serde_json::to_string(&config).unwrap();
        let reparsed: TeamConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config.unknown_fields.len(), reparsed.unknown_fields.len());
        assert_eq!(
            config.unknown_fields.get("unknownField"),
            reparsed.unknown_fields.get("unknownField")
        );
    }

    #[test]
    fn test_team_config_with_multiple_one_shot_workers() {
        let json = r#"{
            "name": "bugfix-sprint",
            "description": "Fan out three one-shot fixers across the failing suite",
            "createdAt": 1770765919076,
            "leadAgentId": "team-lead@bugfix-sprint",
            "leadSessionId": "6075f866-f103-4be1-b2e9-8dbf66009eb9",
            "members": [
                {
                    "agentId": "team-lead@bugfix-sprint",
                    "name": "team-lead",
                    "agentType": "general-purpose",
                    "model": "haiku",
                    "joinedAt": 1770765919076,
                    "tmuxPaneId": "",
                    "cwd": "/Users/dev/test",
                    "subscriptions": []
                },
                {
                    "agentId": "fixer-1@bugfix-sprint",
                    "name": "fixer-1",
                    "agentType": "general-purpose",
                    "model": "gpt-5.3-codex",
                    "prompt": "Fix the off-by-one error in the pagination helper.",
                    "color": "blue",
                    "planModeRequired": false,
                    "joinedAt": 1770772206905,
                    "tmuxPaneId": "%14",
                    "cwd": "/Users/dev/test",
                    "subscriptions": [],
                    "backendType": "codex",
                    "isActive": false
                },
                {
                    "agentId": "fixer-2@bugfix-sprint",
                    "name": "fixer-2",
                    "agentType": "general-purpose",
                    "model": "gemini-2.5-pro",
                    "prompt": "Reproduce and patch the race in the connection pool shutdown path.",
                    "color": "green",
                    "planModeRequired": false,
                    "joinedAt": 1770772207583,
                    "tmuxPaneId": "%15",
                    "cwd": "/Users/dev/test",
                    "subscriptions": [],
                    "backendType": "gemini",
                    "isActive": true
                },
                {
                    "agentId": "fixer-3@bugfix-sprint",
                    "name": "fixer-3",
                    "agentType": "general-purpose",
                    "model": "claude-sonnet-4.5",
                    "prompt": "Fix the flaky retry test in the queue worker module.",
                    "color": "yellow",
                    "planModeRequired": false,
                    "joinedAt": 1770772208362,
                    "tmuxPaneId": "%16",
                    "cwd": "/Users/dev/test",
                    "subscriptions": [],
                    "backendType": "copilot",
                    "isActive": true
                }
            ]
        }"#;

        let config: TeamConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name, "bugfix-sprint");
        assert_eq!(config.members.len(), 4);
        assert_eq!(config.members[0].name, "team-lead");
        assert_eq!(config.members[1].name, "fixer-1");
        assert_eq!(config.members[2].name, "fixer-2");
        assert_eq!(config.members[3].name, "fixer-3");

        let serialized = serde_json::to_string_pretty(&config).unwrap();
        let reparsed: TeamConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config.name, reparsed.name);
        assert_eq!(config.members.len(), reparsed.members.len());
    }
}
