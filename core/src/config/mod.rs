pub mod catalogue;
mod load;
mod types;

pub use catalogue::{Catalogue, Snippet};
pub use load::{covbench_data_dir, load_default, load_from};
pub use types::{
    AppConfig, CommandToolConfig, EvaluationConfig, LoggingConfig, RunnerConfig, ToolConfig,
    ToolKind,
};
