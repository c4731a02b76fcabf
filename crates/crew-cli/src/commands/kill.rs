use crate::util::teams_root;
use anyhow::{anyhow, Result};
use clap::Args;
use crew_backend::{BackendRegistry, TmuxPaneController};
use crew_lead::TeamStore;
use serde_json::json;

#[derive(Args)]
pub struct KillArgs {
    /// Team name.
    team: String,

    /// Agent name.
    agent: String,

    /// Emit JSON instead of a confirmation line.
    #[arg(long)]
    json: bool,
}

pub fn run(args: KillArgs) -> Result<()> {
    let store = TeamStore::new(teams_root()?);
    let config = store.read_config(&args.team)?;
    let member = config
        .members
        .iter()
        .find(|m| m.name == args.agent)
        .ok_or_else(|| anyhow!("member '{}' not found in team '{}'", args.agent, args.team))?;
    let handle = member.process_handle.clone();
    let backend_name = member.backend_type.as_ref().map(|b| b.to_string()).unwrap_or_else(|| "claude-code".to_string());

    if let Some(handle) = handle {
        let registry = BackendRegistry::with_builtins();
        if let Some(backend) = registry.get(&backend_name) {
            let pane = TmuxPaneController::new();
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(backend.kill(&pane, &handle))?;
        }
    }
    store.remove_member(&args.team, &args.agent)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json!({"killed": args.agent, "team": args.team}))?);
    } else {
        println!("killed '{}' in team '{}'", args.agent, args.team);
    }
    Ok(())
}
