use anyhow::Result;
use clap::Args;
use crew_backend::BackendRegistry;
use serde_json::json;

#[derive(Args)]
pub struct BackendsArgs {
    /// Emit JSON instead of a text table.
    #[arg(long)]
    json: bool,
}

pub fn run(args: BackendsArgs) -> Result<()> {
    let registry = BackendRegistry::with_builtins();
    let available: std::collections::HashSet<String> =
        registry.list_available().iter().map(|b| b.name().to_string()).collect();

    if args.json {
        let rows: Vec<_> = registry
            .list_names()
            .into_iter()
            .map(|name| {
                let is_available = available.contains(&name);
                json!({"name": name, "available": is_available})
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for name in registry.list_names() {
        let mark = if available.contains(&name) { "available" } else { "not found" };
        println!("{name:<20} {mark}");
    }
    Ok(())
}
