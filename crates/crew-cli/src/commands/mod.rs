use anyhow::Result;
use clap::{Parser, Subcommand};

mod backends;
mod config;
mod health;
mod inbox;
mod kill;
mod serve;
mod status;

#[derive(Parser)]
#[command(name = "crew", version, about = "Inspect and administer crew teams from the shell")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved team-store root and registered backends, then exit.
    Serve,
    /// List registered backends and whether their binary is on PATH.
    Backends(backends::BackendsArgs),
    /// Dump a team's configuration.
    Config(config::ConfigArgs),
    /// Summarize a team: member count, process health, task counts.
    Status(status::StatusArgs),
    /// Show an agent's inbox messages.
    Inbox(inbox::InboxArgs),
    /// Check whether a teammate's backend process is still alive.
    Health(health::HealthArgs),
    /// Force-kill a teammate's backend process and remove it from the team.
    Kill(kill::KillArgs),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve => serve::run(),
            Commands::Backends(args) => backends::run(args),
            Commands::Config(args) => config::run(args),
            Commands::Status(args) => status::run(args),
            Commands::Inbox(args) => inbox::run(args),
            Commands::Health(args) => health::run(args),
            Commands::Kill(args) => kill::run(args),
        }
    }
}
