use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coverage::CoverageVerdict;

/// Final state of one snippet evaluated with one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnippetStatus {
    /// Generated tests reach the required statement coverage.
    Covered,
    /// The tool finished and reported coverage, but below the requirement.
    NotCovered,
    /// The tool exited abnormally or left no usable coverage artifact.
    GenerationFailed,
    /// The tool exceeded its wall-clock budget and was destroyed.
    TimedOut,
}

/// One line of the run's JSONL output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub run_id: Uuid,
    pub ts: DateTime<Utc>,
    pub tool: String,
    pub snippet: String,
    pub status: SnippetStatus,

    /// Present only when the tool finished and its report was readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<CoverageVerdict>,

    pub exit_code: i32,
    pub destroyed: bool,
    pub duration_ms: u64,

    /// Tail of the tool's stderr, kept for failed and timed-out runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr_tail: Option<String>,
}

/// Per-status counts over one catalogue run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub covered: usize,
    pub not_covered: usize,
    pub generation_failed: usize,
    pub timed_out: usize,
}

impl RunSummary {
    pub fn add(&mut self, status: SnippetStatus) {
        match status {
            SnippetStatus::Covered => self.covered += 1,
            SnippetStatus::NotCovered => self.not_covered += 1,
            SnippetStatus::GenerationFailed => self.generation_failed += 1,
            SnippetStatus::TimedOut => self.timed_out += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.covered + self.not_covered + self.generation_failed + self.timed_out
    }
}
