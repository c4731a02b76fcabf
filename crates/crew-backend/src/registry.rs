//! Backend registry: name-keyed lookup with built-in and plugin entries
//!
//! Built-ins are constructed lazily on first access so a CLI invocation
//! that only ever spawns `claude-code` never pays to build command
//! tables for the other seventeen vendors.

use crate::backend_trait::Backend;
use crate::vendor_backend::{ClaudeCodeBackend, CommandLineBackend};
use crate::vendors::VENDOR_CATALOG;
use std::collections::HashMap;
use std::sync::Arc;

pub struct BackendRegistry {
    backends: HashMap<String, Arc<dyn Backend>>,
}

impl BackendRegistry {
    /// Build a registry pre-loaded with every built-in backend.
    pub fn with_builtins() -> Self {
        let mut backends: HashMap<String, Arc<dyn Backend>> = HashMap::new();
        backends.insert("claude-code".to_string(), Arc::new(ClaudeCodeBackend));
        for spec in VENDOR_CATALOG {
            let backend = CommandLineBackend::new(spec);
            backends.insert(backend.name().to_string(), Arc::new(backend));
        }
        Self { backends }
    }

    /// Register or override a backend under `name`, e.g. for a
    /// plugin-provided vendor or a test double.
    pub fn register(&mut self, name: impl Into<String>, backend: Arc<dyn Backend>) {
        self.backends.insert(name.into(), backend);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Backend>> {
        self.backends.get(name).cloned()
    }

    /// Names of every registered backend, sorted for stable display.
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    /// Backends whose binary is currently on PATH.
    pub fn list_available(&self) -> Vec<Arc<dyn Backend>> {
        let mut available: Vec<_> =
            self.backends.values().filter(|b| b.is_available()).cloned().collect();
        available.sort_by(|a, b| a.name().cmp(b.name()));
        available
    }

    /// The backend a fresh team should use when the operator doesn't
    /// name one: `claude-code` if available, otherwise whichever
    /// built-in is first available, otherwise `claude-code` unchanged
    /// (so downstream errors name the binary the operator needs).
    pub fn default_backend(&self) -> Arc<dyn Backend> {
        if let Some(backend) = self.get("claude-code").filter(|b| b.is_available()) {
            return backend;
        }
        if let Some(backend) = self.list_available().into_iter().next() {
            return backend;
        }
        self.get("claude-code").expect("claude-code is always registered")
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_builtins_registers_every_vendor_plus_claude_code() {
        let registry = BackendRegistry::with_builtins();
        let names = registry.list_names();
        assert!(names.contains(&"claude-code".to_string()));
        assert!(names.contains(&"codex".to_string()));
        assert_eq!(names.len(), VENDOR_CATALOG.len() + 1);
    }

    #[test]
    fn test_get_unknown_name_returns_none() {
        let registry = BackendRegistry::with_builtins();
        assert!(registry.get("not-a-real-backend").is_none());
    }

    #[test]
    fn test_register_overrides_existing_entry() {
        let mut registry = BackendRegistry::with_builtins();
        let original = registry.get("codex").unwrap();
        registry.register("codex", Arc::new(ClaudeCodeBackend));
        let replaced = registry.get("codex").unwrap();
        assert_ne!(original.binary_name(), replaced.binary_name());
    }

    #[test]
    fn test_default_backend_falls_back_when_claude_code_unavailable() {
        // On a CI box with no vendor binaries on PATH, default_backend
        // must not panic even though nothing is "available".
        let registry = BackendRegistry::with_builtins();
        let _ = registry.default_backend();
    }
}
