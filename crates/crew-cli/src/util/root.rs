//! Resolves the on-disk root every `crew-lead` store reads and writes
//! under: `~/.claude`, holding `teams/<name>/` and `tasks/<name>/`
//! subtrees. Overridable via `CREW_HOME` for tests and alternate
//! deployments (see [`crew_core::home::get_state_dir`]).

use crate::util::error::CliError;
use std::path::PathBuf;

pub fn teams_root() -> Result<PathBuf, CliError> {
    crew_core::home::get_state_dir().map_err(|e| CliError::Config(e.to_string()))
}
