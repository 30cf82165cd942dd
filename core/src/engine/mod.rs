//! Turns catalogue snippets plus one tool adapter into evaluation
//! records: run the tool under its budget, read its coverage back,
//! classify, and account.

mod report;
mod run;
mod types;

pub use report::RecordWriter;
pub use run::{evaluate_catalogue, evaluate_snippet};
pub use types::{EvaluationRecord, RunSummary, SnippetStatus};
