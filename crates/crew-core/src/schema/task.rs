//! Task schema types for agent team coordination

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Task status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task created but not started
    Pending,
    /// Task currently being worked on
    InProgress,
    /// Task finished successfully
    Completed,
    /// Task cancelled or removed
    Deleted,
}

impl TaskStatus {
    /// Ordinal position in the forward-only status order
    /// (`pending < in_progress < completed`). `Deleted` has no ordinal;
    /// it is a terminal side-exit rather than a forward step.
    pub fn order(self) -> Option<u8> {
        match self {
            TaskStatus::Pending => Some(0),
            TaskStatus::InProgress => Some(1),
            TaskStatus::Completed => Some(2),
            TaskStatus::Deleted => None,
        }
    }
}

/// Task item for team coordination
///
/// Tasks represent units of work that can be assigned to agents,
/// tracked for completion, and organized with dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    /// Unique task identifier (sequential string: "1", "2", "3")
    pub id: String,

    /// Brief imperative title (e.g., "Fix CI failure in backend")
    pub subject: String,

    /// Detailed requirements and acceptance criteria
    pub description: String,

    /// Present continuous form shown while in_progress (e.g., "Fixing CI failure")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_form: Option<String>,

    /// Current task status
    pub status: TaskStatus,

    /// Agent name assigned to this task (null if unassigned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Task IDs that must complete before this task can start
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_by: Vec<String>,

    /// Task IDs that depend on this task completing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<String>,

    /// Custom key-value pairs for tracking
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,

    /// Unknown fields for forward compatibility
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}
