//! Data-driven catalog of the one-shot vendor CLIs
//!
//! Every one-shot backend differs from the others only in its binary
//! name, its model catalog, and the flags it wants after the binary —
//! the lifecycle (spawn/health/kill/capture/send) is identical tmux
//! plumbing. Rather than eighteen near-identical structs this keeps
//! the differences in one table and drives a single
//! [`crate::backend_trait::CommandLineBackend`] off it.

use crate::spawn::SpawnRequest;
use crew_core::BackendType;

/// Arguments to append after the binary name, given the full spawn
/// request (so a vendor can reach into `cwd`/`extra`) and the already
/// resolved model name.
pub type BuildArgs = fn(request: &SpawnRequest, model: &str) -> Vec<String>;

pub struct VendorSpec {
    pub backend_type: BackendType,
    pub binary_name: &'static str,
    pub supported_models: &'static [&'static str],
    pub default_model: &'static str,
    pub model_aliases: &'static [(&'static str, &'static str)],
    pub build_args: BuildArgs,
    /// Whether this CLI can be told to write its final reply to a
    /// file (`request.extra["output_last_message_path"]`) instead of
    /// only ever being scraped from pane scrollback.
    pub file_capable: bool,
}

fn codex_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    let mut args = vec!["exec".to_string(), "--model".into(), model.into(), "--full-auto".into(), "-C".into(), request.cwd.clone()];
    if let Some(path) = request.extra.get("output_last_message_path") {
        args.push("--output-last-message".into());
        args.push(path.clone());
    }
    args.push(request.prompt.clone());
    args
}

fn gemini_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["--prompt".into(), request.prompt.clone(), "--model".into(), model.into(), "--yolo".into()]
}

fn aider_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["--model".into(), model.into(), "--message".into(), request.prompt.clone(), "--yes-always".into()]
}

fn copilot_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["-p".into(), request.prompt.clone(), "--model".into(), model.into(), "--yolo".into(), "--no-ask-user".into()]
}

fn auggie_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["-i".into(), request.prompt.clone(), "--model".into(), model.into(), "--print".into()]
}

fn goose_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["run".into(), "-t".into(), request.prompt.clone(), "--model".into(), model.into(), "--no-session".into()]
}

fn qwen_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["-p".into(), request.prompt.clone(), "-m".into(), model.into(), "-y".into()]
}

fn vibe_args(request: &SpawnRequest, _model: &str) -> Vec<String> {
    vec!["-p".into(), request.prompt.clone(), "--output".into(), "text".into()]
}

fn kimi_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["--print".into(), "-p".into(), request.prompt.clone(), "-m".into(), model.into()]
}

fn amp_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    let mut cmd = vec!["-x".into(), request.prompt.clone(), "--dangerously-allow-all".into()];
    if matches!(model, "free" | "rush" | "smart") {
        cmd.push("-m".into());
        cmd.push(model.into());
    }
    cmd
}

fn rovodev_args(request: &SpawnRequest, _model: &str) -> Vec<String> {
    vec!["rovodev".into(), "run".into(), "--yolo".into(), request.prompt.clone()]
}

fn llxprt_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["-p".into(), request.prompt.clone(), "-m".into(), model.into(), "-y".into()]
}

fn coder_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["exec".into(), "-m".into(), model.into(), "--full-auto".into(), request.prompt.clone()]
}

fn claudish_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["--model".into(), model.into(), "-y".into(), request.prompt.clone()]
}

fn happy_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["--print".into(), "--model".into(), model.into(), "--yolo".into(), request.prompt.clone()]
}

fn opencode_args(request: &SpawnRequest, model: &str) -> Vec<String> {
    vec!["run".into(), "--model".into(), model.into(), request.prompt.clone()]
}

pub static VENDOR_CATALOG: &[VendorSpec] = &[
    VendorSpec {
        backend_type: BackendType::Codex,
        binary_name: "codex",
        supported_models: &["gpt-5.3-codex", "gpt-5.1-codex-max", "gpt-5.1-codex-mini"],
        default_model: "gpt-5.3-codex",
        model_aliases: &[
            ("fast", "gpt-5.1-codex-mini"),
            ("balanced", "gpt-5.3-codex"),
            ("powerful", "gpt-5.1-codex-max"),
        ],
        build_args: codex_args,
        file_capable: true,
    },
    VendorSpec {
        backend_type: BackendType::Gemini,
        binary_name: "gemini",
        supported_models: &["gemini-2.5-pro", "gemini-2.5-flash", "gemini-2.0-flash"],
        default_model: "gemini-2.5-flash",
        model_aliases: &[
            ("fast", "gemini-2.5-flash"),
            ("balanced", "gemini-2.5-pro"),
            ("powerful", "gemini-2.5-pro"),
        ],
        build_args: gemini_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Aider,
        binary_name: "aider",
        supported_models: &[
            "claude-3.5-haiku",
            "claude-sonnet-4",
            "claude-opus-4",
            "gpt-5.3-codex",
            "gemini-2.5-pro",
        ],
        default_model: "claude-sonnet-4",
        model_aliases: &[
            ("fast", "claude-3.5-haiku"),
            ("balanced", "claude-sonnet-4"),
            ("powerful", "claude-opus-4"),
        ],
        build_args: aider_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Copilot,
        binary_name: "copilot",
        supported_models: &[
            "claude-sonnet-4.5",
            "claude-haiku-4.5",
            "claude-opus-4.6",
            "gpt-5.2-codex",
            "gpt-5.1",
            "gemini-3-pro-preview",
        ],
        default_model: "claude-sonnet-4.5",
        model_aliases: &[
            ("fast", "claude-haiku-4.5"),
            ("balanced", "claude-sonnet-4.5"),
            ("powerful", "claude-opus-4.6"),
        ],
        build_args: copilot_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Auggie,
        binary_name: "auggie",
        supported_models: &["claude-sonnet-4.5", "claude-opus-4.6", "claude-haiku-4.5"],
        default_model: "claude-sonnet-4.5",
        model_aliases: &[
            ("fast", "claude-haiku-4.5"),
            ("balanced", "claude-sonnet-4.5"),
            ("powerful", "claude-opus-4.6"),
        ],
        build_args: auggie_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Goose,
        binary_name: "goose",
        supported_models: &["claude-sonnet-4.5", "gpt-5.2", "gemini-2.5-pro"],
        default_model: "claude-sonnet-4.5",
        model_aliases: &[
            ("fast", "claude-sonnet-4.5"),
            ("balanced", "claude-sonnet-4.5"),
            ("powerful", "gpt-5.2"),
        ],
        build_args: goose_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Qwen,
        binary_name: "qwen",
        supported_models: &["qwen-plus", "qwen-max", "qwen-turbo"],
        default_model: "qwen-plus",
        model_aliases: &[
            ("fast", "qwen-turbo"),
            ("balanced", "qwen-plus"),
            ("powerful", "qwen-max"),
        ],
        build_args: qwen_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Vibe,
        binary_name: "vibe",
        supported_models: &["devstral-2"],
        default_model: "devstral-2",
        model_aliases: &[],
        build_args: vibe_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Kimi,
        binary_name: "kimi",
        supported_models: &["kimi-k2-thinking", "kimi-k2"],
        default_model: "kimi-k2-thinking",
        model_aliases: &[
            ("fast", "kimi-k2"),
            ("balanced", "kimi-k2-thinking"),
            ("powerful", "kimi-k2-thinking"),
        ],
        build_args: kimi_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Amp,
        binary_name: "amp-cli",
        supported_models: &["free", "rush", "smart"],
        default_model: "smart",
        model_aliases: &[("fast", "rush"), ("balanced", "smart"), ("powerful", "smart")],
        build_args: amp_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::RovoDev,
        binary_name: "acli",
        supported_models: &["gpt-5-2025-08-07"],
        default_model: "gpt-5-2025-08-07",
        model_aliases: &[],
        build_args: rovodev_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Llxprt,
        binary_name: "llxprt",
        supported_models: &["claude-sonnet-4.5", "gemini-2.5-pro"],
        default_model: "claude-sonnet-4.5",
        model_aliases: &[
            ("fast", "gemini-2.5-pro"),
            ("balanced", "claude-sonnet-4.5"),
            ("powerful", "claude-sonnet-4.5"),
        ],
        build_args: llxprt_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Coder,
        binary_name: "coder",
        supported_models: &["claude-sonnet-4.5", "gpt-5.2-codex"],
        default_model: "claude-sonnet-4.5",
        model_aliases: &[
            ("fast", "claude-sonnet-4.5"),
            ("balanced", "claude-sonnet-4.5"),
            ("powerful", "gpt-5.2-codex"),
        ],
        build_args: coder_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Claudish,
        binary_name: "claudish",
        supported_models: &["oai@gpt-5.2", "anthropic@claude-sonnet-4.5"],
        default_model: "oai@gpt-5.2",
        model_aliases: &[],
        build_args: claudish_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::Happy,
        binary_name: "happy",
        supported_models: &["sonnet", "opus", "haiku"],
        default_model: "sonnet",
        model_aliases: &[("fast", "haiku"), ("balanced", "sonnet"), ("powerful", "opus")],
        build_args: happy_args,
        file_capable: false,
    },
    VendorSpec {
        backend_type: BackendType::OpenCode,
        binary_name: "opencode",
        supported_models: &["anthropic/claude-sonnet-4", "openai/gpt-5.2"],
        default_model: "anthropic/claude-sonnet-4",
        model_aliases: &[
            ("fast", "anthropic/claude-sonnet-4"),
            ("balanced", "anthropic/claude-sonnet-4"),
            ("powerful", "openai/gpt-5.2"),
        ],
        build_args: opencode_args,
        file_capable: false,
    },
];

pub fn find_vendor(backend_type: &BackendType) -> Option<&'static VendorSpec> {
    VENDOR_CATALOG.iter().find(|v| &v.backend_type == backend_type)
}
