//! Core types and schemas for crew
//!
//! This crate provides the fundamental data structures for interacting with
//! an orchestrated agent team via the file-based API at `~/.claude/teams/`.
//!
//! All schema types are designed to:
//! - Preserve unknown fields for forward compatibility
//! - Use proper serde configuration for camelCase ↔ snake_case
//! - Support round-trip serialization without data loss

pub mod config;
pub mod event_log;
pub mod home;
pub mod io;
pub mod logging;
pub mod schema;
pub mod text;

pub use schema::{AgentMember, BackendType, InboxMessage, TaskItem, TaskStatus, TeamConfig};

// Re-export toml for plugin config access
pub use toml;
