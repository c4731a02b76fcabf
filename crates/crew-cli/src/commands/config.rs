use crate::util::teams_root;
use anyhow::Result;
use clap::Args;
use crew_lead::TeamStore;

#[derive(Args)]
pub struct ConfigArgs {
    /// Team name.
    team: String,

    /// Emit the raw config as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let store = TeamStore::new(teams_root()?);
    let config = store.read_config(&args.team)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("team:        {}", config.name);
    if let Some(description) = &config.description {
        println!("description: {description}");
    }
    println!("lead:        {}", config.lead_agent_id);
    println!("members:     {}", config.members.len());
    for member in &config.members {
        let role = if member.is_worker() { member.agent_type.as_str() } else { "lead" };
        println!("  - {} ({role}, model={})", member.name, member.model);
    }
    Ok(())
}
