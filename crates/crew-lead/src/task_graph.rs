//! Task graph: one JSON file per task under `tasks/<team>/<id>.json`,
//! with a four-phase read/validate/mutate/write transaction for
//! updates so a half-applied dependency graph never reaches disk.

use crate::error::CrewError;
use crew_core::io::acquire_lock;
use crew_core::schema::{TaskItem, TaskStatus};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

pub struct TaskGraph {
    tasks_root: PathBuf,
}

#[derive(Default)]
pub struct TaskUpdate {
    pub status: Option<TaskStatus>,
    pub owner: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub active_form: Option<String>,
    pub add_blocks: Vec<String>,
    pub add_blocked_by: Vec<String>,
    /// `None` values delete the key; present entries merge/overwrite.
    pub metadata: HashMap<String, Option<serde_json::Value>>,
}

impl TaskGraph {
    pub fn new(tasks_root: impl Into<PathBuf>) -> Self {
        Self { tasks_root: tasks_root.into() }
    }

    fn team_dir(&self, team: &str) -> PathBuf {
        self.tasks_root.join(team)
    }

    fn lock_path(&self, team: &str) -> PathBuf {
        self.team_dir(team).join(".lock")
    }

    fn task_path(&self, team: &str, id: &str) -> PathBuf {
        self.team_dir(team).join(format!("{id}.json"))
    }

    fn read_task(path: &Path) -> Result<TaskItem, CrewError> {
        let bytes = fs::read(path).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| CrewError::IoFailure(e.to_string()))
    }

    fn write_task(path: &Path, task: &TaskItem) -> Result<(), CrewError> {
        let json = serde_json::to_vec_pretty(task).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &json).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(CrewError::IoFailure(e.to_string()));
        }
        Ok(())
    }

    fn next_task_id(&self, team: &str) -> String {
        let mut max_id = 0i64;
        if let Ok(entries) = fs::read_dir(self.team_dir(team)) {
            for entry in entries.flatten() {
                if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                    if let Ok(n) = stem.parse::<i64>() {
                        max_id = max_id.max(n);
                    }
                }
            }
        }
        (max_id + 1).to_string()
    }

    fn with_team_lock<F, T>(&self, team: &str, f: F) -> Result<T, CrewError>
    where
        F: FnOnce() -> Result<T, CrewError>,
    {
        let lock_path = self.lock_path(team);
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        }
        let _lock = acquire_lock(&lock_path, 5).map_err(|e| CrewError::IoFailure(e.to_string()))?;
        f()
    }

    pub fn create_task(
        &self,
        team: &str,
        subject: &str,
        description: &str,
        active_form: &str,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<TaskItem, CrewError> {
        if subject.trim().is_empty() {
            return Err(CrewError::InvalidArgument("task subject must not be empty".to_string()));
        }
        if !self.team_dir(team).exists() {
            return Err(CrewError::NotFound(format!("team '{team}'")));
        }
        self.with_team_lock(team, || {
            let id = self.next_task_id(team);
            let task = TaskItem {
                id: id.clone(),
                subject: subject.to_string(),
                description: description.to_string(),
                active_form: if active_form.is_empty() { None } else { Some(active_form.to_string()) },
                status: TaskStatus::Pending,
                owner: None,
                blocked_by: Vec::new(),
                blocks: Vec::new(),
                metadata,
                unknown_fields: HashMap::new(),
            };
            Self::write_task(&self.task_path(team, &id), &task)?;
            Ok(task)
        })
    }

    pub fn get_task(&self, team: &str, id: &str) -> Result<TaskItem, CrewError> {
        let path = self.task_path(team, id);
        if !path.exists() {
            return Err(CrewError::NotFound(format!("task '{id}'")));
        }
        Self::read_task(&path)
    }

    pub fn list_tasks(&self, team: &str) -> Result<Vec<TaskItem>, CrewError> {
        if !self.team_dir(team).exists() {
            return Err(CrewError::NotFound(format!("team '{team}'")));
        }
        let mut tasks = Vec::new();
        for entry in fs::read_dir(self.team_dir(team)).map_err(|e| CrewError::IoFailure(e.to_string()))? {
            let entry = entry.map_err(|e| CrewError::IoFailure(e.to_string()))?;
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            if stem.parse::<i64>().is_err() {
                continue;
            }
            tasks.push(Self::read_task(&path)?);
        }
        tasks.sort_by_key(|t| t.id.parse::<i64>().unwrap_or(i64::MAX));
        Ok(tasks)
    }

    /// BFS from `to_id` over `blocked_by` edges (on-disk ∪ pending);
    /// true if it reaches `from_id`.
    fn would_create_cycle(
        &self,
        team: &str,
        from_id: &str,
        to_id: &str,
        pending_edges: &HashMap<String, HashSet<String>>,
    ) -> bool {
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::from([to_id.to_string()]);
        while let Some(current) = queue.pop_front() {
            if current == from_id {
                return true;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            let path = self.task_path(team, &current);
            if path.exists() {
                if let Ok(task) = Self::read_task(&path) {
                    for dep in task.blocked_by {
                        if !visited.contains(&dep) {
                            queue.push_back(dep);
                        }
                    }
                }
            }
            if let Some(edges) = pending_edges.get(&current) {
                for dep in edges {
                    if !visited.contains(dep) {
                        queue.push_back(dep.clone());
                    }
                }
            }
        }
        false
    }

    /// The four-phase read/validate/mutate/write pipeline. Returns the
    /// updated task (or, for a delete, the task as it stood just before
    /// removal).
    pub fn update_task(
        &self,
        team: &str,
        id: &str,
        update: TaskUpdate,
    ) -> Result<TaskItem, CrewError> {
        self.with_team_lock(team, || {
            // Phase 1: read.
            let path = self.task_path(team, id);
            if !path.exists() {
                return Err(CrewError::NotFound(format!("task '{id}'")));
            }
            let mut task = Self::read_task(&path)?;

            // Phase 2: validate, no writes.
            let mut pending_edges: HashMap<String, HashSet<String>> = HashMap::new();

            for blocked_id in &update.add_blocks {
                if blocked_id == id {
                    return Err(CrewError::InvariantViolation(format!("task {id} cannot block itself")));
                }
                if !self.task_path(team, blocked_id).exists() {
                    return Err(CrewError::NotFound(format!("referenced task '{blocked_id}'")));
                }
                pending_edges.entry(blocked_id.clone()).or_default().insert(id.to_string());
            }
            for blocker_id in &update.add_blocked_by {
                if blocker_id == id {
                    return Err(CrewError::InvariantViolation(format!("task {id} cannot be blocked by itself")));
                }
                if !self.task_path(team, blocker_id).exists() {
                    return Err(CrewError::NotFound(format!("referenced task '{blocker_id}'")));
                }
                pending_edges.entry(id.to_string()).or_default().insert(blocker_id.clone());
            }
            for blocked_id in &update.add_blocks {
                if self.would_create_cycle(team, blocked_id, id, &pending_edges) {
                    return Err(CrewError::InvariantViolation(format!(
                        "adding block {id} -> {blocked_id} would create a circular dependency"
                    )));
                }
            }
            for blocker_id in &update.add_blocked_by {
                if self.would_create_cycle(team, id, blocker_id, &pending_edges) {
                    return Err(CrewError::InvariantViolation(format!(
                        "adding dependency {id} blocked_by {blocker_id} would create a circular dependency"
                    )));
                }
            }

            if let Some(status) = update.status {
                if status != TaskStatus::Deleted {
                    let cur_order = task.status.order().expect("current status always has an order");
                    let new_order = status.order().ok_or_else(|| {
                        CrewError::InvalidArgument(format!("invalid status {status:?}"))
                    })?;
                    if new_order < cur_order {
                        return Err(CrewError::InvariantViolation(format!(
                            "cannot transition from {:?} to {:?}",
                            task.status, status
                        )));
                    }
                    if matches!(status, TaskStatus::InProgress | TaskStatus::Completed) {
                        let mut effective_blocked_by: HashSet<String> = task.blocked_by.iter().cloned().collect();
                        effective_blocked_by.extend(update.add_blocked_by.iter().cloned());
                        for blocker_id in &effective_blocked_by {
                            let blocker_path = self.task_path(team, blocker_id);
                            if blocker_path.exists() {
                                let blocker = Self::read_task(&blocker_path)?;
                                if blocker.status != TaskStatus::Completed {
                                    return Err(CrewError::InvariantViolation(format!(
                                        "cannot set status to {status:?}: blocked by task {blocker_id} (status: {:?})",
                                        blocker.status
                                    )));
                                }
                            }
                        }
                    }
                }
            }

            // Phase 3: mutate in memory.
            let mut pending_writes: HashMap<PathBuf, TaskItem> = HashMap::new();

            if let Some(subject) = update.subject {
                task.subject = subject;
            }
            if let Some(description) = update.description {
                task.description = description;
            }
            if let Some(active_form) = update.active_form {
                task.active_form = Some(active_form);
            }
            if let Some(owner) = update.owner {
                task.owner = Some(owner);
            }

            if !update.add_blocks.is_empty() {
                self.link_dependency(team, &mut task, id, &update.add_blocks, true, &mut pending_writes)?;
            }
            if !update.add_blocked_by.is_empty() {
                self.link_dependency(team, &mut task, id, &update.add_blocked_by, false, &mut pending_writes)?;
            }

            if !update.metadata.is_empty() {
                for (key, value) in update.metadata {
                    match value {
                        Some(v) => {
                            task.metadata.insert(key, v);
                        }
                        None => {
                            task.metadata.remove(&key);
                        }
                    }
                }
            }

            let mut deleting = false;
            if let Some(status) = update.status {
                if status == TaskStatus::Deleted {
                    deleting = true;
                    task.status = TaskStatus::Deleted;
                    self.remove_task_references(team, id, &mut pending_writes, true)?;
                } else {
                    task.status = status;
                    if status == TaskStatus::Completed {
                        self.remove_task_references(team, id, &mut pending_writes, false)?;
                    }
                }
            }

            // Phase 4: write.
            if deleting {
                for (write_path, write_task) in &pending_writes {
                    Self::write_task(write_path, write_task)?;
                }
                fs::remove_file(&path).map_err(|e| CrewError::IoFailure(e.to_string()))?;
            } else {
                Self::write_task(&path, &task)?;
                for (write_path, write_task) in &pending_writes {
                    Self::write_task(write_path, write_task)?;
                }
            }
            Ok(task)
        })
    }

    fn link_dependency(
        &self,
        team: &str,
        task: &mut TaskItem,
        task_id: &str,
        dep_ids: &[String],
        forward_is_blocks: bool,
        pending_writes: &mut HashMap<PathBuf, TaskItem>,
    ) -> Result<(), CrewError> {
        let forward = if forward_is_blocks { &mut task.blocks } else { &mut task.blocked_by };
        let mut existing: HashSet<String> = forward.iter().cloned().collect();
        for dep_id in dep_ids {
            if existing.insert(dep_id.clone()) {
                forward.push(dep_id.clone());
            }
            let dep_path = self.task_path(team, dep_id);
            let mut other = match pending_writes.remove(&dep_path) {
                Some(t) => t,
                None => Self::read_task(&dep_path)?,
            };
            let inverse = if forward_is_blocks { &mut other.blocked_by } else { &mut other.blocks };
            if !inverse.iter().any(|x| x == task_id) {
                inverse.push(task_id.to_string());
            }
            pending_writes.insert(dep_path, other);
        }
        Ok(())
    }

    fn remove_task_references(
        &self,
        team: &str,
        task_id: &str,
        pending_writes: &mut HashMap<PathBuf, TaskItem>,
        also_blocks: bool,
    ) -> Result<(), CrewError> {
        for entry in fs::read_dir(self.team_dir(team)).map_err(|e| CrewError::IoFailure(e.to_string()))? {
            let entry = entry.map_err(|e| CrewError::IoFailure(e.to_string()))?;
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            if stem.parse::<i64>().is_err() || stem == task_id {
                continue;
            }
            let mut other = match pending_writes.remove(&path) {
                Some(t) => t,
                None => Self::read_task(&path)?,
            };
            let mut changed = false;
            let before = other.blocked_by.len();
            other.blocked_by.retain(|x| x != task_id);
            changed |= other.blocked_by.len() != before;
            if also_blocks {
                let before = other.blocks.len();
                other.blocks.retain(|x| x != task_id);
                changed |= other.blocks.len() != before;
            }
            if changed {
                pending_writes.insert(path, other);
            }
        }
        Ok(())
    }

    /// Clear `owner` on every task owned by `agent_name`; non-completed
    /// tasks are reset to `pending`. Used when a member is removed.
    pub fn reset_owner_tasks(&self, team: &str, agent_name: &str) -> Result<(), CrewError> {
        self.with_team_lock(team, || {
            let dir = self.team_dir(team);
            if !dir.exists() {
                return Ok(());
            }
            for entry in fs::read_dir(&dir).map_err(|e| CrewError::IoFailure(e.to_string()))? {
                let entry = entry.map_err(|e| CrewError::IoFailure(e.to_string()))?;
                let path = entry.path();
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
                if stem.parse::<i64>().is_err() {
                    continue;
                }
                let mut task = Self::read_task(&path)?;
                if task.owner.as_deref() == Some(agent_name) {
                    if task.status != TaskStatus::Completed {
                        task.status = TaskStatus::Pending;
                    }
                    task.owner = None;
                    Self::write_task(&path, &task)?;
                }
            }
            Ok(())
        })
    }
}
