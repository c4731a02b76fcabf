//! `crew serve` is a smoke-test entry point, not a daemon: it resolves
//! the team-store root and the backend registry the same way every
//! other subcommand does, prints what it found, and exits. The actual
//! event loop that spawns and relays teammates lives in the process
//! embedding `crew-lead`, not here.

use crate::util::teams_root;
use anyhow::Result;
use crew_backend::BackendRegistry;

pub fn run() -> Result<()> {
    let root = teams_root()?;
    let registry = BackendRegistry::with_builtins();
    let available: Vec<String> = registry.list_available().iter().map(|b| b.name().to_string()).collect();

    println!("team store root: {}", root.display());
    println!("registered backends: {}", registry.list_names().join(", "));
    println!("available backends:  {}", if available.is_empty() { "none".to_string() } else { available.join(", ") });
    Ok(())
}
