use crate::util::teams_root;
use anyhow::{anyhow, Result};
use clap::Args;
use crew_backend::{BackendRegistry, TmuxPaneController};
use crew_lead::TeamStore;
use serde_json::json;

#[derive(Args)]
pub struct HealthArgs {
    /// Team name.
    team: String,

    /// Agent name.
    agent: String,

    /// Emit JSON instead of a one-line verdict.
    #[arg(long)]
    json: bool,
}

pub fn run(args: HealthArgs) -> Result<()> {
    let store = TeamStore::new(teams_root()?);
    let config = store.read_config(&args.team)?;
    let member = config
        .members
        .into_iter()
        .find(|m| m.name == args.agent)
        .ok_or_else(|| anyhow!("member '{}' not found in team '{}'", args.agent, args.team))?;
    let handle = member.process_handle.ok_or_else(|| anyhow!("'{}' has no recorded process handle", args.agent))?;
    let backend_name = member.backend_type.map(|b| b.to_string()).unwrap_or_else(|| "claude-code".to_string());

    let registry = BackendRegistry::with_builtins();
    let backend =
        registry.get(&backend_name).ok_or_else(|| anyhow!("backend '{backend_name}' is not registered"))?;
    let pane = TmuxPaneController::new();

    let runtime = tokio::runtime::Runtime::new()?;
    let status = runtime.block_on(backend.health_check(&pane, &handle))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json!({"alive": status.alive, "detail": status.detail}))?);
    } else {
        println!("{}: {}", if status.alive { "alive" } else { "dead" }, status.detail);
    }
    if !status.alive {
        std::process::exit(1);
    }
    Ok(())
}
