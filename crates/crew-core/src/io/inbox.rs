//! Mailbox file operations: atomic append and atomic read-and-mark-read
//!
//! Every mutator acquires the inbox's exclusive lock for its entire
//! read-validate-write cycle and writes back via write-to-temp +
//! rename, so a crash or a second writer can never produce a
//! half-written inbox file.

use crate::io::{error::InboxError, lock::acquire_lock};
use crate::schema::InboxMessage;
use std::fs;
use std::path::Path;

/// Ensure an inbox file exists, creating it as an empty array if absent.
pub fn ensure_inbox(inbox_path: &Path) -> Result<(), InboxError> {
    if inbox_path.exists() {
        return Ok(());
    }
    if let Some(parent) = inbox_path.parent() {
        fs::create_dir_all(parent).map_err(|e| InboxError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    write_messages(inbox_path, &[])
}

/// Append a single message to an inbox under the inbox lock.
pub fn append_message(inbox_path: &Path, message: &InboxMessage) -> Result<(), InboxError> {
    let lock_path = lock_path_for(inbox_path);
    let _lock = acquire_lock(&lock_path, 5)?;

    let mut messages = read_messages_unlocked(inbox_path)?;
    messages.push(message.clone());
    write_messages(inbox_path, &messages)
}

/// Read an inbox, optionally filtering to unread messages and optionally
/// marking the returned messages as read in the same locked operation.
///
/// When `mark_as_read` is true, the whole file is rewritten under the
/// lock with the returned messages' `read` flag set; a reader that asks
/// for unread messages and marks them read never races a concurrent
/// reader into double-delivering the same message.
pub fn read_inbox(
    inbox_path: &Path,
    unread_only: bool,
    mark_as_read: bool,
) -> Result<Vec<InboxMessage>, InboxError> {
    if !mark_as_read {
        let messages = read_messages_unlocked(inbox_path)?;
        return Ok(filter_unread(messages, unread_only));
    }

    let lock_path = lock_path_for(inbox_path);
    let _lock = acquire_lock(&lock_path, 5)?;

    let mut messages = read_messages_unlocked(inbox_path)?;
    let mut returned = Vec::new();
    for msg in messages.iter_mut() {
        if unread_only && msg.read {
            continue;
        }
        msg.read = true;
        returned.push(msg.clone());
    }
    write_messages(inbox_path, &messages)?;
    Ok(returned)
}

fn filter_unread(messages: Vec<InboxMessage>, unread_only: bool) -> Vec<InboxMessage> {
    if unread_only {
        messages.into_iter().filter(|m| !m.read).collect()
    } else {
        messages
    }
}

fn lock_path_for(inbox_path: &Path) -> std::path::PathBuf {
    inbox_path.with_extension("lock")
}

fn read_messages_unlocked(inbox_path: &Path) -> Result<Vec<InboxMessage>, InboxError> {
    if !inbox_path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read(inbox_path).map_err(|e| InboxError::Io {
        path: inbox_path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_slice(&content).map_err(|e| InboxError::Json {
        path: inbox_path.to_path_buf(),
        source: e,
    })
}

fn write_messages(inbox_path: &Path, messages: &[InboxMessage]) -> Result<(), InboxError> {
    let tmp_path = inbox_path.with_extension("tmp");
    let content = serde_json::to_vec_pretty(messages).map_err(|e| InboxError::Json {
        path: tmp_path.clone(),
        source: e,
    })?;
    fs::write(&tmp_path, &content).map_err(|e| InboxError::Io {
        path: tmp_path.clone(),
        source: e,
    })?;
    fs::rename(&tmp_path, inbox_path).map_err(|e| InboxError::Io {
        path: inbox_path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
