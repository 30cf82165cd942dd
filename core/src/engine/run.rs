//! Evaluation engine: run one tool against snippets and fold the
//! execution outcome plus the parsed coverage into a final status.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::{AppConfig, Catalogue, Snippet};
use crate::context::AppContext;
use crate::coverage::{classify, Classification};
use crate::error::CliError;
use crate::runner::{execute, TailListener};
use crate::tool::{CommandRequest, CoverageRequest, ToolAdapter};

use super::types::{EvaluationRecord, RunSummary, SnippetStatus};

/// Evaluates one snippet with one tool.
///
/// Template problems, spawn failures and I/O trouble abort with an
/// `Err`; everything the tool itself gets wrong (abnormal exit, budget
/// overrun, missing or unreadable report, insufficient coverage) is
/// folded into the record's status instead.
pub async fn evaluate_snippet(
    ctx: &AppContext,
    tool: &Arc<dyn ToolAdapter>,
    snippet: &Snippet,
) -> Result<EvaluationRecord, CliError> {
    let cfg = ctx.cfg();
    let run_id = Uuid::new_v4();
    let required_percent = snippet
        .required_percent
        .unwrap_or(cfg.evaluation.required_percent);

    let out_dir = snippet_out_dir(cfg, tool.name(), &snippet.id);
    tokio::fs::create_dir_all(&out_dir).await?;

    let request = CommandRequest {
        snippet: snippet.clone(),
        workdir: cfg.runner.workdir.as_deref().map(PathBuf::from),
        out_dir: out_dir.clone(),
        required_percent,
    };
    let spec = tool.build_command(&request)?;

    tracing::info!(
        tool = %tool.name(),
        snippet = %snippet.id,
        run_id = %run_id,
        timeout_ms = cfg.runner.timeout_ms,
        "starting evaluation"
    );

    let listener = Arc::new(TailListener::new(cfg.runner.capture_bytes));
    let execution = execute(&spec, cfg.runner.timeout_ms, listener.clone()).await?;

    let (status, verdict) = if execution.destroyed {
        (SnippetStatus::TimedOut, None)
    } else if execution.exit_code != 0 {
        (SnippetStatus::GenerationFailed, None)
    } else {
        let request = CoverageRequest {
            snippet: snippet.clone(),
            out_dir,
        };
        match tool.parse_coverage(&request).await {
            Ok(per_file) if per_file.is_empty() => {
                tracing::warn!(
                    tool = %tool.name(),
                    snippet = %snippet.id,
                    "tool reported no files; treating as failed generation"
                );
                (SnippetStatus::GenerationFailed, None)
            }
            Ok(per_file) => {
                let verdict = classify(
                    &per_file,
                    &snippet.primary,
                    &snippet.auxiliary,
                    required_percent,
                );
                let status = match verdict.classification {
                    Classification::Covered => SnippetStatus::Covered,
                    Classification::NotCovered => SnippetStatus::NotCovered,
                };
                (status, Some(verdict))
            }
            Err(e) => {
                tracing::warn!(
                    tool = %tool.name(),
                    snippet = %snippet.id,
                    error = %e,
                    "coverage report unusable; treating as failed generation"
                );
                (SnippetStatus::GenerationFailed, None)
            }
        }
    };

    // Stderr is only worth keeping when something went wrong.
    let stderr_tail = match status {
        SnippetStatus::Covered | SnippetStatus::NotCovered => None,
        SnippetStatus::GenerationFailed | SnippetStatus::TimedOut => {
            Some(listener.stderr_tail()).filter(|s| !s.is_empty())
        }
    };

    tracing::info!(
        tool = %tool.name(),
        snippet = %snippet.id,
        run_id = %run_id,
        status = ?status,
        exit_code = execution.exit_code,
        duration_ms = execution.duration_ms,
        "evaluation finished"
    );

    Ok(EvaluationRecord {
        run_id,
        ts: Utc::now(),
        tool: tool.name().to_string(),
        snippet: snippet.id.clone(),
        status,
        verdict,
        exit_code: execution.exit_code,
        destroyed: execution.destroyed,
        duration_ms: execution.duration_ms,
        stderr_tail,
    })
}

/// Runs every catalogue snippet sequentially against one registered tool.
pub async fn evaluate_catalogue(
    ctx: &AppContext,
    tool_name: &str,
    catalogue: &Catalogue,
) -> Result<(Vec<EvaluationRecord>, RunSummary), CliError> {
    let tool = ctx.registry().get(tool_name)?;

    let mut records = Vec::with_capacity(catalogue.len());
    let mut summary = RunSummary::default();
    for snippet in &catalogue.snippets {
        let record = evaluate_snippet(ctx, &tool, snippet).await?;
        summary.add(record.status);
        records.push(record);
    }
    Ok((records, summary))
}

fn snippet_out_dir(cfg: &AppConfig, tool: &str, snippet_id: &str) -> PathBuf {
    PathBuf::from(&cfg.runner.out_dir).join(tool).join(snippet_id)
}
