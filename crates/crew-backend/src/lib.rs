//! Backend abstraction for crew: one trait over eighteen coding-agent CLIs
//!
//! [`Backend`] names a vendor, resolves its models, and builds its
//! command line. [`pane::PaneController`] is the thin external contract
//! every backend spawns into (a real tmux server in production, an
//! in-memory fake in tests). [`BackendRegistry`] is the name-keyed
//! lookup the spawn/relay orchestrator and CLI use to find one.

pub mod backend_trait;
pub mod error;
pub mod mock_backend;
pub mod pane;
pub mod registry;
pub mod spawn;
pub mod vendor_backend;
pub mod vendors;

pub use backend_trait::Backend;
pub use error::{BackendError, PaneError};
pub use pane::{PaneController, TmuxPaneController};
pub use registry::BackendRegistry;
pub use spawn::{CaptureResult, HealthStatus, SpawnRequest, SpawnResult};
pub use vendor_backend::{ClaudeCodeBackend, CommandLineBackend};
