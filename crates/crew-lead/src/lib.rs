//! Team lead orchestration: team store, mailbox, task graph,
//! spawn/relay orchestrator, messaging dispatch, and the gated tool
//! surface a session exposes to an RPC front end.

pub mod error;
pub mod mailbox;
pub mod messaging;
pub mod orchestrator;
pub mod task_graph;
pub mod team_store;
pub mod tools;

pub use error::CrewError;
pub use mailbox::Mailbox;
pub use messaging::{Messenger, SendMessage, SendMessageOutcome};
pub use orchestrator::{Orchestrator, SpawnTeammateRequest, COLOR_PALETTE};
pub use task_graph::{TaskGraph, TaskUpdate};
pub use team_store::TeamStore;
pub use tools::{poll_inbox, tool_definitions, visible_tools, SessionState, ToolDefinition, ToolTier};
