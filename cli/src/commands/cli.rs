use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "covbench",
    version,
    about = "Coverage benchmark harness for test-generation tools"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file; otherwise $COVBENCH_CONFIG, ./covbench.toml,
    /// ~/.covbench/config.toml, then built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (EnvFilter syntax, e.g. "debug").
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Snippet catalogue to evaluate.
    #[arg(long)]
    pub catalogue: PathBuf,

    /// Registered tool to run against every snippet.
    #[arg(long)]
    pub tool: String,

    /// Write JSONL records to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Per-snippet wall-clock budget in milliseconds; 0 disables it.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ClassifyArgs {
    /// Existing coverage report to classify.
    #[arg(long)]
    pub report: PathBuf,

    /// Catalogue holding the snippet's ranges.
    #[arg(long)]
    pub catalogue: PathBuf,

    /// Snippet id within the catalogue.
    #[arg(long)]
    pub snippet: String,

    /// Required percent; overrides the snippet's own and the config default.
    #[arg(long)]
    pub required: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate every catalogue snippet with one tool.
    Run(RunArgs),
    /// Classify an existing coverage report without running a tool.
    Classify(ClassifyArgs),
    /// List registered tools.
    Tools,
}
