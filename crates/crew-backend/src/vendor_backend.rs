//! [`Backend`] implementations: one generic one-shot adapter driven by
//! [`VendorSpec`], plus the single hand-written interactive adapter for
//! Claude Code.

use crate::backend_trait::Backend;
use crate::error::BackendError;
use crate::spawn::SpawnRequest;
use crate::vendors::VendorSpec;
use std::collections::HashMap;

/// A one-shot vendor CLI backend, parameterized by its catalog entry.
pub struct CommandLineBackend {
    spec: &'static VendorSpec,
    name: String,
}

impl CommandLineBackend {
    pub fn new(spec: &'static VendorSpec) -> Self {
        let name = spec.backend_type.to_string();
        Self { spec, name }
    }
}

#[async_trait::async_trait]
impl Backend for CommandLineBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn binary_name(&self) -> &str {
        self.spec.binary_name
    }

    fn supported_models(&self) -> &[&str] {
        self.spec.supported_models
    }

    fn default_model(&self) -> &str {
        self.spec.default_model
    }

    fn resolve_model(&self, generic_name: &str) -> String {
        self.spec
            .model_aliases
            .iter()
            .find(|(alias, _)| *alias == generic_name)
            .map(|(_, resolved)| resolved.to_string())
            .unwrap_or_else(|| generic_name.to_string())
    }

    fn supports_output_file(&self) -> bool {
        self.spec.file_capable
    }

    fn build_command(&self, request: &SpawnRequest) -> Result<Vec<String>, BackendError> {
        let model = self.resolve_model(&request.model);
        let mut cmd = vec![self.binary_name().to_string()];
        cmd.extend((self.spec.build_args)(request, &model));
        Ok(cmd)
    }
}

/// Claude Code: the one interactive backend. Runs long-lived and
/// delivers mailbox messages itself once spawned, so its command line
/// carries identity/session flags instead of a prompt.
pub struct ClaudeCodeBackend;

const CLAUDE_CODE_MODELS: &[&str] = &["haiku", "sonnet", "opus"];

#[async_trait::async_trait]
impl Backend for ClaudeCodeBackend {
    fn name(&self) -> &str {
        "claude-code"
    }

    fn binary_name(&self) -> &str {
        "claude"
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn supported_models(&self) -> &[&str] {
        CLAUDE_CODE_MODELS
    }

    fn default_model(&self) -> &str {
        "sonnet"
    }

    fn resolve_model(&self, generic_name: &str) -> String {
        match generic_name {
            "fast" => "haiku".to_string(),
            "balanced" => "sonnet".to_string(),
            "powerful" => "opus".to_string(),
            other if CLAUDE_CODE_MODELS.contains(&other) => other.to_string(),
            other => other.to_string(),
        }
    }

    fn build_command(&self, request: &SpawnRequest) -> Result<Vec<String>, BackendError> {
        let model = self.resolve_model(&request.model);
        if !CLAUDE_CODE_MODELS.contains(&model.as_str()) {
            return Err(BackendError::UnsupportedModel {
                backend: self.name().to_string(),
                model,
                supported: CLAUDE_CODE_MODELS.join(", "),
            });
        }
        let mut cmd = vec![
            self.binary_name().to_string(),
            "--agent-id".into(),
            request.agent_id.clone(),
            "--agent-name".into(),
            request.name.clone(),
            "--team-name".into(),
            request.team_name.clone(),
            "--agent-color".into(),
            request.color.clone(),
            "--parent-session-id".into(),
            request.lead_session_id.clone(),
            "--agent-type".into(),
            request.agent_type.clone(),
            "--model".into(),
            model,
        ];
        if request.plan_mode_required {
            cmd.push("--plan-mode-required".into());
        }
        Ok(cmd)
    }

    fn build_env(&self, _request: &SpawnRequest) -> HashMap<String, String> {
        HashMap::from([
            ("CLAUDECODE".to_string(), "1".to_string()),
            ("CLAUDE_CODE_EXPERIMENTAL_AGENT_TEAMS".to_string(), "1".to_string()),
        ])
    }
}
