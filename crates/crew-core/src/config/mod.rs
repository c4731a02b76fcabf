//! Configuration resolution
//!
//! Resolves configuration from multiple sources with priority:
//! 1. Command-line flags (passed as parameters)
//! 2. Environment variables
//! 3. Repo-local config (.crew.toml)
//! 4. Global config (~/.config/crew/config.toml)
//! 5. Defaults

mod aliases;
mod discovery;
mod types;

pub use aliases::{aliases_for, merge_aliases, resolve_alias};
pub use discovery::{resolve_config, ConfigError, ConfigOverrides};
pub use types::{Config, CoreConfig, DisplayConfig, OutputFormat, SpawnConfig, TimestampFormat};
