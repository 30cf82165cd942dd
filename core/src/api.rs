//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `covbench_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from, AppConfig, Catalogue, CommandToolConfig, EvaluationConfig,
    LoggingConfig, RunnerConfig, Snippet, ToolConfig, ToolKind,
};
pub use crate::context::AppContext;
pub use crate::coverage::{
    classify, Classification, CoverageVerdict, FileCoverage, FileId, LineStatus, LineStatuses,
    MethodRange, COVERAGE_TOLERANCE_PCT,
};
pub use crate::engine::{
    evaluate_catalogue, evaluate_snippet, EvaluationRecord, RecordWriter, RunSummary,
    SnippetStatus,
};
pub use crate::error::{CliError, RunnerError, ToolError};
pub use crate::runner::{
    execute, ExecutionListener, ExecutionResult, ProcessSpec, StreamRedirect, TailListener,
    KILL_GRACE,
};
pub use crate::tool::{CommandRequest, CoverageRequest, ToolAdapter, ToolRegistry};
