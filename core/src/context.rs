//! Application context: configuration plus the tool registry, built once
//! at startup and passed by reference. There is no process-wide registry;
//! whoever holds the context decides which tools exist.

use crate::config::AppConfig;
use crate::tool::ToolRegistry;

#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    registry: ToolRegistry,
}

impl AppContext {
    pub fn new(cfg: AppConfig, registry: ToolRegistry) -> Self {
        Self { cfg, registry }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Same registry, different configuration. Used by commands that
    /// apply flag overrides on top of the loaded config.
    pub fn with_config(&self, cfg: AppConfig) -> Self {
        Self {
            cfg,
            registry: self.registry.clone(),
        }
    }
}
