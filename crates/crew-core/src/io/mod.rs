//! File I/O for team mailboxes and task files under the crew home directory
//!
//! - **File locking**: advisory locks with exponential backoff retry
//! - **Atomic writes**: write-to-temp + rename, so readers never see a
//!   half-written file
//! - **Round-trip preservation**: unknown JSON fields are preserved on
//!   read-modify-write
//!
//! # Example
//!
//! ```rust,no_run
//! use crew_core::io::{append_message, read_inbox};
//! use crew_core::InboxMessage;
//! use std::path::Path;
//! use std::collections::HashMap;
//!
//! let inbox_path = Path::new("/home/user/.claude/teams/my-team/inboxes/agent.json");
//! let message = InboxMessage {
//!     from: "team-lead".to_string(),
//!     text: "CI failure detected".to_string(),
//!     timestamp: "2026-02-11T14:30:00Z".to_string(),
//!     read: false,
//!     summary: Some("CI failure detected".to_string()),
//!     color: None,
//!     message_id: Some("msg-12345".to_string()),
//!     unknown_fields: HashMap::new(),
//! };
//!
//! append_message(inbox_path, &message).unwrap();
//! let unread = read_inbox(inbox_path, true, true).unwrap();
//! println!("delivered {} unread messages", unread.len());
//! ```

pub mod error;
pub mod inbox;
pub mod lock;

pub use error::InboxError;
pub use inbox::{append_message, ensure_inbox, read_inbox};
pub use lock::{acquire_lock, FileLock};
