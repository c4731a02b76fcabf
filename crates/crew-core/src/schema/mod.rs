//! Schema types for the crew file-based API
//!
//! This module contains all data structures that map to the on-disk
//! team/task/mailbox API. All types preserve unknown fields for forward
//! compatibility.

pub mod agent_member;
mod inbox_message;
mod task;
mod team_config;

pub use agent_member::{AgentMember, BackendType};
pub use inbox_message::InboxMessage;
pub use task::{TaskItem, TaskStatus};
pub use team_config::TeamConfig;
