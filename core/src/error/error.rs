use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("runner failed: {0}")]
    Runner(#[from] RunnerError),
    #[error("tool adapter failed: {0}")]
    Tool(#[from] ToolError),
    #[error("config error: {0}")]
    Config(String),
    #[error("catalogue error: {0}")]
    Catalogue(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Recoverable failures of one bounded process execution.
///
/// Anything here fires before or instead of a usable `ExecutionResult`; a
/// nonzero child exit code is ordinary data, never a `RunnerError`.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("redirect failed: {}: {source}", path.display())]
    Redirect {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
    #[error("kill failed: {0}")]
    Kill(String),
    #[error("wait failed: {0}")]
    Wait(String),
}

/// Failures of a tool adapter while building a command line or extracting
/// coverage from the tool's report artifact.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    Unknown(String),
    #[error("command build failed: {0}")]
    Command(String),
    #[error("coverage report missing: {}", .0.display())]
    ReportMissing(PathBuf),
    #[error("coverage report malformed: {}: {reason}", path.display())]
    ReportMalformed { path: PathBuf, reason: String },
    #[error("adapter error: {0}")]
    Adapter(#[from] anyhow::Error),
}
