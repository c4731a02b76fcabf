use crate::util::teams_root;
use anyhow::Result;
use clap::Args;
use crew_core::schema::TaskStatus;
use crew_lead::{TaskGraph, TeamStore};
use serde_json::json;

#[derive(Args)]
pub struct StatusArgs {
    /// Team name.
    team: String,

    /// Emit JSON instead of a text summary.
    #[arg(long)]
    json: bool,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let root = teams_root()?;
    let store = TeamStore::new(&root);
    let config = store.read_config(&args.team)?;
    let tasks = TaskGraph::new(root.join("tasks")).list_tasks(&args.team).unwrap_or_default();

    let mut pending = 0usize;
    let mut in_progress = 0usize;
    let mut completed = 0usize;
    for task in &tasks {
        match task.status {
            TaskStatus::Pending => pending += 1,
            TaskStatus::InProgress => in_progress += 1,
            TaskStatus::Completed => completed += 1,
            TaskStatus::Deleted => {}
        }
    }
    let worker_count = config.members.iter().filter(|m| m.is_worker()).count();

    if args.json {
        let members: Vec<_> = config
            .members
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "isWorker": m.is_worker(),
                    "backendType": m.backend_type.as_ref().map(|b| b.to_string()),
                    "isActive": m.is_active,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "team": config.name,
                "workers": worker_count,
                "members": members,
                "tasks": {"pending": pending, "inProgress": in_progress, "completed": completed, "total": tasks.len()},
            }))?
        );
        return Ok(());
    }

    println!("team:    {} ({worker_count} worker(s))", config.name);
    for member in &config.members {
        let backend = member.backend_type.as_ref().map(|b| b.to_string()).unwrap_or_else(|| "-".to_string());
        let active = if member.is_active.unwrap_or(true) { "active" } else { "inactive" };
        println!("  - {:<16} backend={backend:<12} {active}", member.name);
    }
    println!("tasks:   {pending} pending, {in_progress} in progress, {completed} completed ({} total)", tasks.len());
    Ok(())
}
