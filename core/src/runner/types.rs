use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to do with one output stream of the child process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamRedirect {
    /// Share the parent's stream; no gobbler is started.
    Inherit,
    /// Capture through a pipe drained by a gobbler task.
    #[default]
    Pipe,
    /// Redirect straight into a file; no gobbler is started.
    ToFile(PathBuf),
}

impl StreamRedirect {
    pub fn is_piped(&self) -> bool {
        matches!(self, StreamRedirect::Pipe)
    }
}

/// Full description of one external process to execute. Immutable once
/// handed to `execute`.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; inherits the parent's when unset.
    pub cwd: Option<PathBuf>,
    /// Environment overrides applied on top of the inherited environment.
    pub envs: HashMap<String, String>,
    pub stdout: StreamRedirect,
    pub stderr: StreamRedirect,
}

impl ProcessSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: HashMap::new(),
            stdout: StreamRedirect::default(),
            stderr: StreamRedirect::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.insert(key.into(), value.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

/// Outcome of one bounded execution. Created exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Child exit code; `128 + signal` when the child died from a signal.
    pub exit_code: i32,
    /// True iff the process was forcibly terminated after exceeding its
    /// timeout. Never true for a child that exited on its own.
    pub destroyed: bool,
    pub duration_ms: u64,
}
