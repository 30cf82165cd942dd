//! Adapter seam between the evaluation engine and concrete
//! test-generation tools.
//!
//! An adapter answers exactly two questions: how to invoke the tool for
//! one snippet, and how to read the coverage artifact it left behind.
//! Everything else (budgets, kill handling, classification) stays in the
//! engine.

mod registry;

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::Snippet;
use crate::coverage::{FileCoverage, FileId};
use crate::error::ToolError;
use crate::runner::ProcessSpec;

pub use registry::ToolRegistry;

/// Everything an adapter may use when building the tool invocation for
/// one snippet.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    pub snippet: Snippet,
    /// Working directory for the spawned tool; `None` inherits ours.
    pub workdir: Option<PathBuf>,
    /// Directory reserved for this snippet's artifacts (report included).
    pub out_dir: PathBuf,
    /// Required statement coverage, after per-snippet overrides.
    pub required_percent: f64,
}

/// Locates the coverage artifact produced by a finished tool run.
#[derive(Debug, Clone)]
pub struct CoverageRequest {
    pub snippet: Snippet,
    pub out_dir: PathBuf,
}

#[async_trait]
pub trait ToolAdapter: Send + Sync {
    /// Registry key, also the `tool` field of every evaluation record.
    fn name(&self) -> &str;

    /// Builds the process invocation that asks the tool to generate and
    /// run tests for one snippet. Pure: nothing is spawned here.
    fn build_command(&self, request: &CommandRequest) -> Result<ProcessSpec, ToolError>;

    /// Reads back the per-file coverage the tool reported for one
    /// snippet. Called only after the process exited normally.
    async fn parse_coverage(
        &self,
        request: &CoverageRequest,
    ) -> Result<BTreeMap<FileId, FileCoverage>, ToolError>;
}
