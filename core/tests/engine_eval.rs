mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use covbench_core::config::{AppConfig, Catalogue, Snippet};
use covbench_core::context::AppContext;
use covbench_core::coverage::{FileCoverage, FileId, MethodRange};
use covbench_core::engine::{evaluate_catalogue, evaluate_snippet, SnippetStatus};
use covbench_core::error::{CliError, ToolError};
use covbench_core::runner::ProcessSpec;
use covbench_core::tool::{CommandRequest, CoverageRequest, ToolAdapter, ToolRegistry};

use common::sh;

/// What the stub adapter should answer when asked to parse coverage.
enum Parse {
    Report(BTreeMap<FileId, FileCoverage>),
    Missing,
    /// The engine must not even ask (abnormal exit or timeout).
    Forbidden,
}

/// Adapter running a fixed shell script per snippet and answering parse
/// requests from canned data.
struct ScriptTool {
    scripts: BTreeMap<String, String>,
    parses: BTreeMap<String, Parse>,
}

#[async_trait]
impl ToolAdapter for ScriptTool {
    fn name(&self) -> &str {
        "script"
    }

    fn build_command(&self, request: &CommandRequest) -> Result<ProcessSpec, ToolError> {
        let script = self
            .scripts
            .get(&request.snippet.id)
            .unwrap_or_else(|| panic!("no script for snippet {}", request.snippet.id));
        Ok(sh(script))
    }

    async fn parse_coverage(
        &self,
        request: &CoverageRequest,
    ) -> Result<BTreeMap<FileId, FileCoverage>, ToolError> {
        match self.parses.get(&request.snippet.id) {
            Some(Parse::Report(map)) => Ok(map.clone()),
            Some(Parse::Missing) => Err(ToolError::ReportMissing(
                request.out_dir.join("coverage.json"),
            )),
            Some(Parse::Forbidden) | None => {
                panic!("parse_coverage must not run for {}", request.snippet.id)
            }
        }
    }
}

fn snippet(id: &str, owner: &str, begin_line: u32, end_line: u32) -> Snippet {
    Snippet {
        id: id.to_string(),
        primary: MethodRange {
            owner: owner.to_string(),
            name: "target".to_string(),
            begin_line,
            end_line,
        },
        auxiliary: Vec::new(),
        required_percent: None,
    }
}

fn report(owner: &str, fully: &[u32], not: &[u32]) -> BTreeMap<FileId, FileCoverage> {
    let mut map = BTreeMap::new();
    map.insert(
        owner.to_string(),
        FileCoverage {
            begin_line: 1,
            end_line: 50,
            not_covered: not.iter().copied().collect(),
            partly_covered: Default::default(),
            fully_covered: fully.iter().copied().collect(),
        },
    );
    map
}

fn context(tool: ScriptTool, timeout_ms: u64, out_dir: &std::path::Path) -> AppContext {
    let cfg = AppConfig {
        runner: covbench_core::config::RunnerConfig {
            timeout_ms,
            out_dir: out_dir.to_string_lossy().to_string(),
            ..Default::default()
        },
        ..Default::default()
    };

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(tool));
    AppContext::new(cfg, registry)
}

#[tokio::test]
async fn statuses_fold_from_exit_parse_and_classification() {
    let dir = tempfile::tempdir().unwrap();

    let mut scripts = BTreeMap::new();
    let mut parses = BTreeMap::new();

    scripts.insert("covered".to_string(), "exit 0".to_string());
    parses.insert(
        "covered".to_string(),
        Parse::Report(report("Lib", &[1, 2, 3, 4], &[])),
    );

    scripts.insert("short".to_string(), "exit 0".to_string());
    parses.insert(
        "short".to_string(),
        Parse::Report(report("Lib", &[1], &[2, 3, 4])),
    );

    scripts.insert("crasher".to_string(), "echo boom >&2; exit 3".to_string());
    parses.insert("crasher".to_string(), Parse::Forbidden);

    scripts.insert("empty-report".to_string(), "exit 0".to_string());
    parses.insert("empty-report".to_string(), Parse::Report(BTreeMap::new()));

    scripts.insert("no-report".to_string(), "exit 0".to_string());
    parses.insert("no-report".to_string(), Parse::Missing);

    let ctx = context(ScriptTool { scripts, parses }, 30_000, dir.path());
    let catalogue = Catalogue {
        snippets: vec![
            snippet("covered", "Lib", 1, 4),
            snippet("short", "Lib", 1, 4),
            snippet("crasher", "Lib", 1, 4),
            snippet("empty-report", "Lib", 1, 4),
            snippet("no-report", "Lib", 1, 4),
        ],
    };

    let (records, summary) = evaluate_catalogue(&ctx, "script", &catalogue).await.unwrap();

    assert_eq!(records.len(), 5);
    assert_eq!(summary.covered, 1);
    assert_eq!(summary.not_covered, 1);
    assert_eq!(summary.generation_failed, 3);
    assert_eq!(summary.timed_out, 0);

    let by_id = |id: &str| records.iter().find(|r| r.snippet == id).unwrap();

    let covered = by_id("covered");
    assert_eq!(covered.status, SnippetStatus::Covered);
    let verdict = covered.verdict.as_ref().unwrap();
    assert_eq!(verdict.lines_to_cover, 4);
    assert_eq!(verdict.lines_covered, 4);
    assert!(covered.stderr_tail.is_none());

    let short = by_id("short");
    assert_eq!(short.status, SnippetStatus::NotCovered);
    assert_eq!(short.verdict.as_ref().unwrap().lines_covered, 1);

    let crasher = by_id("crasher");
    assert_eq!(crasher.status, SnippetStatus::GenerationFailed);
    assert_eq!(crasher.exit_code, 3);
    assert!(crasher.verdict.is_none());
    assert!(crasher.stderr_tail.as_ref().unwrap().contains("boom"));

    assert_eq!(by_id("empty-report").status, SnippetStatus::GenerationFailed);
    assert_eq!(by_id("no-report").status, SnippetStatus::GenerationFailed);
}

#[tokio::test]
async fn budget_overruns_become_timed_out_without_a_parse() {
    let dir = tempfile::tempdir().unwrap();

    let mut scripts = BTreeMap::new();
    let mut parses = BTreeMap::new();
    scripts.insert("sleeper".to_string(), "sleep 30".to_string());
    parses.insert("sleeper".to_string(), Parse::Forbidden);

    let ctx = context(ScriptTool { scripts, parses }, 300, dir.path());

    let tool = ctx.registry().get("script").unwrap();
    let record = evaluate_snippet(&ctx, &tool, &snippet("sleeper", "Lib", 1, 4))
        .await
        .unwrap();

    assert_eq!(record.status, SnippetStatus::TimedOut);
    assert!(record.destroyed);
    assert!(record.verdict.is_none());
    assert!(record.duration_ms >= 300);
}

#[tokio::test]
async fn unknown_tool_names_abort_instead_of_folding() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(
        ScriptTool {
            scripts: BTreeMap::new(),
            parses: BTreeMap::new(),
        },
        1000,
        dir.path(),
    );

    let catalogue = Catalogue {
        snippets: vec![snippet("any", "Lib", 1, 4)],
    };
    let err = evaluate_catalogue(&ctx, "no-such-tool", &catalogue)
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Tool(ToolError::Unknown(_))));
}
