use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Test-generation tools available to `run`; each entry becomes one
    /// registry adapter.
    #[serde(default)]
    pub tools: Vec<ToolConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            runner: RunnerConfig::default(),
            evaluation: EvaluationConfig::default(),
            tools: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "covbench_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Wall-clock budget per tool run in milliseconds; 0 disables the
    /// budget entirely.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Bytes of stdout/stderr tail kept per stream for diagnostics.
    #[serde(default = "default_capture_bytes")]
    pub capture_bytes: usize,

    /// Working directory for spawned tools; unset inherits ours.
    #[serde(default)]
    pub workdir: Option<String>,

    /// Root directory for per-snippet artifacts (one subdirectory per
    /// tool and snippet).
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_timeout_ms() -> u64 {
    120_000
}

fn default_capture_bytes() -> usize {
    65536
}

fn default_out_dir() -> String {
    "./covbench-out".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            capture_bytes: default_capture_bytes(),
            workdir: None,
            out_dir: default_out_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Required statement coverage percent when a snippet does not carry
    /// its own threshold.
    #[serde(default = "default_required_percent")]
    pub required_percent: f64,
}

fn default_required_percent() -> f64 {
    80.0
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            required_percent: default_required_percent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Registry name; `run --tool <name>` selects this entry.
    pub name: String,

    #[serde(flatten)]
    pub kind: ToolKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ToolKind {
    #[serde(rename = "command")]
    Command(CommandToolConfig),
}

/// Tool driven through an external command line. Argument and env
/// templates may use the placeholders `{snippet}`, `{file}`, `{out_dir}`
/// and `{required}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandToolConfig {
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub envs: HashMap<String, String>,

    /// Report file the tool writes, relative to the snippet's out_dir.
    #[serde(default = "default_report_file")]
    pub report_file: String,

    /// Per-tool working directory; overrides `runner.workdir`.
    #[serde(default)]
    pub workdir: Option<String>,
}

fn default_report_file() -> String {
    "coverage.json".to_string()
}
