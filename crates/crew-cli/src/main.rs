//! crew - command-line front end for the crew team-lead orchestration stack
//!
//! A thin shell over `crew-lead`'s file-based team store: inspect teams,
//! drain inboxes, list backends, and nudge a teammate's process without
//! going through the lead session itself.

use clap::Parser;

mod commands;
mod util;

use commands::Cli;

fn main() {
    crew_core::logging::init();
    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
