use std::sync::Arc;

use covbench_core::api::{AppConfig, ToolAdapter, ToolConfig, ToolKind, ToolRegistry};

use crate::tools::CommandTool;

/// Builds one adapter from its config entry.
pub fn build_tool(cfg: &ToolConfig) -> Arc<dyn ToolAdapter> {
    match &cfg.kind {
        ToolKind::Command(command_cfg) => {
            Arc::new(CommandTool::new(cfg.name.clone(), command_cfg.clone()))
        }
    }
}

/// Builds the full tool registry from configuration. Later entries with
/// a repeated name replace earlier ones, matching registry semantics.
pub fn build_registry(cfg: &AppConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool_cfg in &cfg.tools {
        registry.register(build_tool(tool_cfg));
    }
    registry
}
