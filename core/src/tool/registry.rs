use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ToolError;

use super::ToolAdapter;

/// Explicit adapter registry: a plain value owned by the application
/// context and passed by reference, never process-wide state.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolAdapter>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers under the adapter's own name; a later registration with
    /// the same name replaces the earlier one.
    pub fn register(&mut self, tool: Arc<dyn ToolAdapter>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn ToolAdapter>, ToolError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
