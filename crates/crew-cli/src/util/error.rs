use thiserror::Error;

/// Errors the CLI surfaces directly to the shell. Wraps [`crew_lead::CrewError`]
/// so every command can exit 1 on the same taxonomy the tool surface uses.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Crew(#[from] crew_lead::CrewError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// `true` when this failure is a plain "nothing there" outcome
    /// rather than a hard error - used to choose an empty-but-valid
    /// JSON payload over a non-zero exit for lookups that are allowed
    /// to come back empty.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CliError::Crew(crew_lead::CrewError::NotFound(_)))
    }
}
