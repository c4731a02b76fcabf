//! `send_message`: the single dispatch point the messaging tool exposes
//! to a session, covering direct messages, broadcasts, shutdown
//! negotiation, and plan approval.

use crate::error::CrewError;
use crate::mailbox::{self, Mailbox};
use crate::team_store::TeamStore;

pub enum SendMessage {
    Message { recipient: String, content: String, summary: String },
    Broadcast { content: String, summary: String },
    ShutdownRequest { recipient: String },
    ShutdownResponse { sender: String, request_id: String, approve: bool },
    PlanApprovalResponse { sender: Option<String>, recipient: String, approve: bool, content: Option<String> },
}

#[derive(Debug)]
pub struct SendMessageOutcome {
    pub request_id: Option<String>,
}

fn no_request_id() -> SendMessageOutcome {
    SendMessageOutcome { request_id: None }
}

pub struct Messenger {
    store: TeamStore,
    mailbox: Mailbox,
}

impl Messenger {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        let root = root.into();
        Self { store: TeamStore::new(root.clone()), mailbox: Mailbox::new(root) }
    }

    pub fn dispatch(&self, team: &str, now_ms: u64, msg: SendMessage) -> Result<SendMessageOutcome, CrewError> {
        match msg {
            SendMessage::Message { recipient, content, summary } => self.send_message(team, &recipient, &content, &summary),
            SendMessage::Broadcast { content, summary } => self.broadcast(team, &content, &summary),
            SendMessage::ShutdownRequest { recipient } => self.shutdown_request(team, &recipient, now_ms),
            SendMessage::ShutdownResponse { sender, request_id, approve } => {
                self.shutdown_response(team, &sender, &request_id, approve)
            }
            SendMessage::PlanApprovalResponse { sender, recipient, approve, content } => {
                self.plan_approval_response(team, sender.as_deref(), &recipient, approve, content.as_deref())
            }
        }
    }

    fn member_color(&self, team: &str, name: &str) -> Result<Option<String>, CrewError> {
        let config = self.store.read_config(team)?;
        Ok(config.members.into_iter().find(|m| m.name == name).and_then(|m| m.color))
    }

    fn require_member(&self, team: &str, name: &str) -> Result<(), CrewError> {
        let config = self.store.read_config(team)?;
        if !config.members.iter().any(|m| m.name == name) {
            return Err(CrewError::NotFound(format!("member '{name}' in team '{team}'")));
        }
        Ok(())
    }

    fn send_message(&self, team: &str, recipient: &str, content: &str, summary: &str) -> Result<SendMessageOutcome, CrewError> {
        if recipient.trim().is_empty() || content.trim().is_empty() || summary.trim().is_empty() {
            return Err(CrewError::InvalidArgument("recipient, content, and summary are required".to_string()));
        }
        self.require_member(team, recipient)?;
        let color = self.member_color(team, recipient)?;
        self.mailbox.send(team, recipient, "team-lead", content.to_string(), Some(summary.to_string()), color)?;
        Ok(no_request_id())
    }

    fn broadcast(&self, team: &str, content: &str, summary: &str) -> Result<SendMessageOutcome, CrewError> {
        if summary.trim().is_empty() {
            return Err(CrewError::InvalidArgument("summary is required".to_string()));
        }
        let config = self.store.read_config(team)?;
        for member in config.members.iter().filter(|m| m.is_worker()) {
            self.mailbox.send(
                team,
                &member.name,
                "team-lead",
                content.to_string(),
                Some(summary.to_string()),
                member.color.clone(),
            )?;
        }
        Ok(no_request_id())
    }

    fn shutdown_request(&self, team: &str, recipient: &str, now_ms: u64) -> Result<SendMessageOutcome, CrewError> {
        if recipient == "team-lead" {
            return Err(CrewError::InvalidArgument("cannot request team-lead's own shutdown".to_string()));
        }
        self.require_member(team, recipient)?;
        let (request_id, text) = mailbox::shutdown_request_text(recipient, now_ms);
        self.mailbox.send(team, recipient, "team-lead", text, Some("shutdown_request".to_string()), None)?;
        Ok(SendMessageOutcome { request_id: Some(request_id) })
    }

    fn shutdown_response(
        &self,
        team: &str,
        sender: &str,
        request_id: &str,
        approve: bool,
    ) -> Result<SendMessageOutcome, CrewError> {
        let config = self.store.read_config(team)?;
        let member = config
            .members
            .into_iter()
            .find(|m| m.name == sender)
            .ok_or_else(|| CrewError::NotFound(format!("member '{sender}' in team '{team}'")))?;
        if approve {
            let pane_id = member.process_handle.clone().unwrap_or_default();
            let backend_type = member.backend_type.map(|b| b.to_string()).unwrap_or_default();
            let text = mailbox::shutdown_approved_text(request_id, &pane_id, &backend_type);
            self.mailbox.send(team, "team-lead", sender, text, Some("shutdown_approved".to_string()), member.color)?;
        } else {
            self.mailbox.send(
                team,
                "team-lead",
                sender,
                format!("`{sender}` declined shutdown request {request_id}."),
                Some("shutdown_rejected".to_string()),
                member.color,
            )?;
        }
        Ok(no_request_id())
    }

    fn plan_approval_response(
        &self,
        team: &str,
        sender: Option<&str>,
        recipient: &str,
        approve: bool,
        content: Option<&str>,
    ) -> Result<SendMessageOutcome, CrewError> {
        self.require_member(team, recipient)?;
        let from = sender.unwrap_or("team-lead");
        let color = self.member_color(team, recipient)?;
        if approve {
            let text = mailbox::plan_approval_text(true);
            self.mailbox.send(team, recipient, from, text, Some("plan_approved".to_string()), color)?;
        } else {
            let text = content.unwrap_or("Plan rejected.").to_string();
            self.mailbox.send(team, recipient, from, text, Some("plan_rejected".to_string()), color)?;
        }
        Ok(no_request_id())
    }
}
