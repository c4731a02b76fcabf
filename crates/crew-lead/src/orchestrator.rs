//! Spawn/relay orchestrator: turns `spawn_teammate` into a registered
//! member plus a running backend process, then (for one-shot backends)
//! relays the result back into the lead's mailbox once the process
//! exits.

use crate::error::CrewError;
use crate::mailbox::Mailbox;
use crate::team_store::{validate_name, TeamStore};
use crew_backend::{Backend, BackendRegistry, PaneController, SpawnRequest};
use crew_core::schema::AgentMember;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const COLOR_PALETTE: &[&str] =
    &["blue", "green", "yellow", "purple", "orange", "pink", "cyan", "red"];

const RELAY_TIMEOUT_SECS: u64 = 900;
const RELAY_POLL_INTERVAL_MS: u64 = 500;
const RELAY_MAX_OUTPUT_CHARS: usize = 12_000;

pub struct SpawnTeammateRequest {
    pub team: String,
    pub name: String,
    pub prompt: String,
    pub model: String,
    pub backend: Option<String>,
    pub agent_type: String,
    pub plan_mode_required: bool,
    pub cwd: String,
    pub lead_session_id: String,
}

pub struct Orchestrator {
    root: std::path::PathBuf,
    store: TeamStore,
    mailbox: Mailbox,
    registry: Arc<BackendRegistry>,
    pane: Arc<dyn PaneController>,
}

impl Orchestrator {
    pub fn new(
        root: impl Into<std::path::PathBuf>,
        registry: Arc<BackendRegistry>,
        pane: Arc<dyn PaneController>,
    ) -> Self {
        let root = root.into();
        Self { store: TeamStore::new(root.clone()), mailbox: Mailbox::new(root.clone()), root, registry, pane }
    }

    /// `spawn_teammate`: resolve the backend, register a member, spawn
    /// its process, and (for one-shot backends) hand off a relay task.
    pub async fn spawn_teammate(&self, req: SpawnTeammateRequest) -> Result<AgentMember, CrewError> {
        if req.name == "team-lead" {
            return Err(CrewError::Conflict("'team-lead' is reserved".to_string()));
        }
        validate_name(&req.name)?;

        let backend = match &req.backend {
            Some(name) => self
                .registry
                .get(name)
                .ok_or_else(|| CrewError::ExternalUnavailable(name.clone()))?,
            None => self.registry.default_backend(),
        };
        let model = backend.resolve_model(&req.model);

        let config = self.store.read_config(&req.team)?;
        let worker_count = config.members.iter().filter(|m| m.is_worker()).count();
        let color = COLOR_PALETTE[worker_count % COLOR_PALETTE.len()].to_string();

        let member = AgentMember {
            agent_id: format!("{}@{}", req.name, req.team),
            name: req.name.clone(),
            agent_type: req.agent_type.clone(),
            model: model.clone(),
            prompt: Some(req.prompt.clone()),
            color: Some(color.clone()),
            plan_mode_required: Some(req.plan_mode_required),
            joined_at: now_ms(),
            process_handle: None,
            cwd: req.cwd.clone(),
            subscriptions: Vec::new(),
            backend_type: None,
            is_active: Some(true),
            last_active: None,
            session_id: None,
            unknown_fields: HashMap::new(),
        };
        self.store.add_member(&req.team, member.clone())?;

        self.mailbox.send(&req.team, &req.name, "team-lead", req.prompt.clone(), None, Some(color.clone()))?;

        let output_file = if backend.supports_output_file() {
            Some(self.allocate_output_file(&req.team, &req.name)?)
        } else {
            None
        };
        let mut extra = HashMap::new();
        if let Some(path) = &output_file {
            extra.insert("output_last_message_path".to_string(), path.to_string_lossy().into_owned());
        }

        let spawn_request = SpawnRequest {
            agent_id: member.agent_id.clone(),
            name: req.name.clone(),
            team_name: req.team.clone(),
            prompt: req.prompt.clone(),
            model,
            agent_type: req.agent_type.clone(),
            color,
            cwd: req.cwd.clone(),
            lead_session_id: req.lead_session_id.clone(),
            plan_mode_required: req.plan_mode_required,
            extra,
        };

        let spawn_result = match backend.spawn(self.pane.as_ref(), &spawn_request).await {
            Ok(result) => result,
            Err(e) => {
                let _ = self.store.remove_member(&req.team, &req.name);
                return Err(CrewError::SpawnFailed { name: req.name.clone(), message: e.to_string() });
            }
        };

        let backend_type = backend.name().parse::<crew_core::schema::BackendType>().unwrap_or_else(|e| match e {});
        let final_config = self.store.update_config(&req.team, |config| {
            if let Some(m) = config.members.iter_mut().find(|m| m.name == req.name) {
                m.process_handle = Some(spawn_result.process_handle.clone());
                m.backend_type = Some(backend_type.clone());
            }
            Ok(true)
        })?;
        let member = final_config
            .members
            .into_iter()
            .find(|m| m.name == req.name)
            .expect("member was just written");

        if !backend.is_interactive() {
            let _ = backend.retain_pane_after_exit(self.pane.as_ref(), &spawn_result.process_handle).await;
            info!(team = %req.team, agent = %req.name, "spawned one-shot backend, starting relay task");
            self.spawn_relay(
                req.team.clone(),
                req.name.clone(),
                spawn_result.process_handle,
                Arc::clone(&backend),
                output_file,
            );
        }

        Ok(member)
    }

    /// Where a file-capable one-shot backend should write its final reply,
    /// so the relay can prefer that file over pane scrollback. Lives
    /// alongside a team's tasks and config rather than inside either,
    /// since it's transient per-run output, not durable team state.
    fn allocate_output_file(&self, team: &str, name: &str) -> Result<std::path::PathBuf, CrewError> {
        let dir = self.root.join("teams").join(team).join("runs");
        std::fs::create_dir_all(&dir)
            .map_err(|e| CrewError::IoFailure(format!("creating runs dir for {team}: {e}")))?;
        Ok(dir.join(format!("{name}-{}.last-message.txt", now_ms())))
    }

    fn spawn_relay(
        &self,
        team: String,
        name: String,
        handle: String,
        backend: Arc<dyn Backend>,
        output_file: Option<std::path::PathBuf>,
    ) {
        let store = TeamStore::new(self.root.clone());
        let mailbox = Mailbox::new(self.root.clone());
        let pane = Arc::clone(&self.pane);
        tokio::spawn(async move {
            relay_one_shot(store, mailbox, pane, backend, team, name, handle, output_file).await;
        });
    }
}

/// The one-shot relay task (§4.7.1): waits for the backend to finish,
/// collects its output, and delivers it to the lead's mailbox.
/// Failures here are logged and swallowed — never propagated.
async fn relay_one_shot(
    store: TeamStore,
    mailbox: Mailbox,
    pane: Arc<dyn PaneController>,
    backend: Arc<dyn Backend>,
    team: String,
    name: String,
    handle: String,
    output_file: Option<std::path::PathBuf>,
) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(RELAY_TIMEOUT_SECS);
    let mut timed_out = true;
    let mut file_output: Option<String> = None;
    loop {
        if let Some(path) = &output_file {
            if let Ok(text) = std::fs::read_to_string(path) {
                timed_out = false;
                file_output = Some(text);
                break;
            }
        }
        if tokio::time::Instant::now() >= deadline {
            break;
        }
        match backend.health_check(pane.as_ref(), &handle).await {
            Ok(status) if !status.alive => {
                timed_out = false;
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(team = %team, agent = %name, error = %e, "relay health check failed");
            }
        }
        tokio::time::sleep(Duration::from_millis(RELAY_POLL_INTERVAL_MS)).await;
    }

    let output = if let Some(text) = file_output {
        strip_ansi(&text)
    } else {
        match backend.capture(pane.as_ref(), &handle, None).await {
            Ok(text) => strip_ansi(&text),
            Err(e) => {
                warn!(team = %team, agent = %name, error = %e, "relay capture failed");
                String::new()
            }
        }
    };

    // Removed-member guard: drop the delivery if the worker was force-removed mid-flight.
    let still_a_member = store.read_config(&team).map(|c| c.members.iter().any(|m| m.name == name)).unwrap_or(false);
    if still_a_member {
        if output.trim().is_empty() && timed_out {
            let _ = mailbox.send(
                &team,
                "team-lead",
                &name,
                format!("`{name}` timed out before producing output."),
                Some("teammate_timeout".to_string()),
                None,
            );
        } else if output.trim().is_empty() {
            let _ = mailbox.send(
                &team,
                "team-lead",
                &name,
                format!("`{name}` finished, but no output was captured."),
                Some("teammate_result".to_string()),
                None,
            );
        } else {
            let (_was_truncated, delivered) = truncate_output(&output);
            let color = store
                .read_config(&team)
                .ok()
                .and_then(|c| c.members.into_iter().find(|m| m.name == name).and_then(|m| m.color));
            let _ = mailbox.send(&team, "team-lead", &name, delivered, Some("teammate_result".to_string()), color);
        }
    }

    let _ = backend.kill(pane.as_ref(), &handle).await;
}

fn truncate_output(text: &str) -> (bool, String) {
    if text.chars().count() > RELAY_MAX_OUTPUT_CHARS {
        (true, crew_core::text::truncate_chars(text, RELAY_MAX_OUTPUT_CHARS, "[truncated]"))
    } else {
        (false, text.to_string())
    }
}

fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            continue;
        }
        if c == '\u{1b}' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if c.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\u{7}' {
                            break;
                        }
                        if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }
        out.push(c);
    }
    out
}

fn now_ms() -> u64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}
