//! Team store: create/delete a team and read/write its roster.
//!
//! Every mutation goes through [`TeamStore::update_config`], which holds
//! the team's config lock for the entire read-validate-write cycle —
//! the same lock-read-modify-write-temp-rename shape the inbox and task
//! graph use (see `crew_core::io::inbox` and [`crate::task_graph`]).

use crate::error::CrewError;
use crew_core::io::{acquire_lock, InboxError};
use crew_core::schema::{AgentMember, TeamConfig};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct TeamStore {
    root: PathBuf,
}

impl TeamStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn team_dir(&self, team: &str) -> PathBuf {
        self.root.join("teams").join(team)
    }

    pub fn tasks_dir(&self, team: &str) -> PathBuf {
        self.root.join("tasks").join(team)
    }

    fn config_path(&self, team: &str) -> PathBuf {
        self.team_dir(team).join("config.json")
    }

    fn lock_path(&self, team: &str) -> PathBuf {
        self.config_path(team).with_extension("lock")
    }

    pub fn team_exists(&self, team: &str) -> bool {
        self.config_path(team).exists()
    }

    /// Create `teams/<name>/` and `tasks/<name>/` with a fresh config
    /// carrying only the team lead. Fails if the team directory exists.
    pub fn create_team(
        &self,
        name: &str,
        lead_session_id: &str,
        description: &str,
        cwd: &str,
        now_ms: u64,
    ) -> Result<TeamConfig, CrewError> {
        validate_name(name)?;
        if self.team_dir(name).exists() {
            return Err(CrewError::Conflict(format!("team '{name}' already exists")));
        }

        let inboxes_dir = self.team_dir(name).join("inboxes");
        fs::create_dir_all(&inboxes_dir)
            .map_err(|e| CrewError::IoFailure(format!("creating {}: {e}", inboxes_dir.display())))?;
        let tasks_dir = self.tasks_dir(name);
        fs::create_dir_all(&tasks_dir)
            .map_err(|e| CrewError::IoFailure(format!("creating {}: {e}", tasks_dir.display())))?;
        // Pre-create the per-team task lock file so the first task-graph
        // mutation doesn't race the directory's own creation.
        let _ = fs::File::create(tasks_dir.join(".lock"));

        let lead = AgentMember {
            agent_id: format!("team-lead@{name}"),
            name: "team-lead".to_string(),
            agent_type: "general-purpose".to_string(),
            model: String::new(),
            prompt: None,
            color: None,
            plan_mode_required: None,
            joined_at: now_ms,
            process_handle: Some(String::new()),
            cwd: cwd.to_string(),
            subscriptions: Vec::new(),
            backend_type: None,
            is_active: None,
            last_active: None,
            session_id: Some(lead_session_id.to_string()),
            unknown_fields: HashMap::new(),
        };

        let config = TeamConfig {
            name: name.to_string(),
            description: if description.is_empty() { None } else { Some(description.to_string()) },
            created_at: now_ms,
            lead_agent_id: lead.agent_id.clone(),
            lead_session_id: lead_session_id.to_string(),
            members: vec![lead],
            unknown_fields: HashMap::new(),
        };

        self.write_config(name, &config)?;
        Ok(config)
    }

    /// Remove `teams/<name>/` and `tasks/<name>/`. Fails if any
    /// non-lead member is still present.
    pub fn delete_team(&self, name: &str) -> Result<(), CrewError> {
        let config = self.read_config(name)?;
        if config.members.iter().any(|m| m.is_worker()) {
            return Err(CrewError::Conflict(format!(
                "team '{name}' still has active members; remove them before deleting"
            )));
        }
        fs::remove_dir_all(self.team_dir(name))
            .map_err(|e| CrewError::IoFailure(format!("removing team dir: {e}")))?;
        let tasks_dir = self.tasks_dir(name);
        if tasks_dir.exists() {
            fs::remove_dir_all(&tasks_dir)
                .map_err(|e| CrewError::IoFailure(format!("removing tasks dir: {e}")))?;
        }
        Ok(())
    }

    pub fn read_config(&self, team: &str) -> Result<TeamConfig, CrewError> {
        let path = self.config_path(team);
        if !path.exists() {
            return Err(CrewError::NotFound(format!("team '{team}'")));
        }
        let bytes = fs::read(&path).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| CrewError::IoFailure(e.to_string()))
    }

    fn write_config(&self, team: &str, config: &TeamConfig) -> Result<(), CrewError> {
        let path = self.config_path(team);
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_vec_pretty(config).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        fs::write(&tmp, &json).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(CrewError::IoFailure(e.to_string()));
        }
        Ok(())
    }

    /// Read-modify-write a team's config under its lock. `modify`
    /// returns `Ok(true)` when it changed anything (triggers a write)
    /// or `Ok(false)` to skip the write; it may also return `Err` to
    /// abort without writing.
    pub fn update_config<F>(&self, team: &str, modify: F) -> Result<TeamConfig, CrewError>
    where
        F: FnOnce(&mut TeamConfig) -> Result<bool, CrewError>,
    {
        let lock_path = self.lock_path(team);
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        }
        let _lock = acquire_lock(&lock_path, 5).map_err(lock_to_crew_error)?;

        let mut config = self.read_config(team)?;
        if modify(&mut config)? {
            self.write_config(team, &config)?;
        }
        Ok(config)
    }

    pub fn add_member(&self, team: &str, member: AgentMember) -> Result<TeamConfig, CrewError> {
        self.update_config(team, |config| {
            if config.members.iter().any(|m| m.name == member.name) {
                return Err(CrewError::Conflict(format!(
                    "member '{}' already exists in team '{team}'",
                    member.name
                )));
            }
            config.members.push(member);
            Ok(true)
        })
    }

    /// Idempotent: removing an unknown name is a silent no-op.
    /// Removing `team-lead` is rejected.
    pub fn remove_member(&self, team: &str, agent_name: &str) -> Result<TeamConfig, CrewError> {
        if agent_name == "team-lead" {
            return Err(CrewError::Conflict("cannot remove team-lead".to_string()));
        }
        self.update_config(team, |config| {
            let before = config.members.len();
            config.members.retain(|m| m.name != agent_name);
            Ok(config.members.len() != before)
        })
    }
}

fn lock_to_crew_error(err: InboxError) -> CrewError {
    CrewError::IoFailure(err.to_string())
}

/// `^[A-Za-z0-9_-]+$`, 1..64 characters.
pub fn validate_name(name: &str) -> Result<(), CrewError> {
    if name.is_empty() || name.chars().count() > 64 {
        return Err(CrewError::InvalidArgument(format!(
            "name must be 1-64 characters: '{name}'"
        )));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(CrewError::InvalidArgument(format!(
            "name must match ^[A-Za-z0-9_-]+$: '{name}'"
        )));
    }
    Ok(())
}
