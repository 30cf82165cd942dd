use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;

use covbench_core::api::{
    CommandRequest, CommandToolConfig, CoverageRequest, FileCoverage, FileId, ProcessSpec,
    ToolAdapter, ToolError,
};

use crate::report;

/// Adapter driving a test-generation tool through its command line. The
/// invocation shape comes entirely from configuration; per-snippet
/// placeholders are expanded here.
pub struct CommandTool {
    name: String,
    cfg: CommandToolConfig,
}

impl CommandTool {
    pub fn new(name: String, cfg: CommandToolConfig) -> Self {
        Self { name, cfg }
    }

    fn expand(&self, template: &str, request: &CommandRequest) -> String {
        template
            .replace("{snippet}", &request.snippet.id)
            .replace("{file}", &request.snippet.primary.owner)
            .replace("{out_dir}", &request.out_dir.to_string_lossy())
            .replace("{required}", &format_percent(request.required_percent))
    }
}

/// 80.0 renders as "80" so thresholds read naturally on command lines.
fn format_percent(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{pct:.0}")
    } else {
        pct.to_string()
    }
}

#[async_trait]
impl ToolAdapter for CommandTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_command(&self, request: &CommandRequest) -> Result<ProcessSpec, ToolError> {
        if self.cfg.program.trim().is_empty() {
            return Err(ToolError::Command(format!(
                "tool {}: empty program",
                self.name
            )));
        }

        let mut spec = ProcessSpec::new(self.expand(&self.cfg.program, request));
        for arg in &self.cfg.args {
            spec = spec.arg(self.expand(arg, request));
        }
        for (key, value) in &self.cfg.envs {
            spec = spec.env(key, self.expand(value, request));
        }
        spec.cwd = self
            .cfg
            .workdir
            .as_deref()
            .map(PathBuf::from)
            .or_else(|| request.workdir.clone());

        tracing::debug!(
            tool = %self.name,
            program = %spec.program,
            args = ?spec.args,
            "built tool invocation"
        );
        Ok(spec)
    }

    async fn parse_coverage(
        &self,
        request: &CoverageRequest,
    ) -> Result<BTreeMap<FileId, FileCoverage>, ToolError> {
        report::load_report(&request.out_dir.join(&self.cfg.report_file)).await
    }
}
