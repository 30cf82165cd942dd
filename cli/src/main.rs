use clap::Parser;

mod commands;

use commands::cli;
use covbench_core::context::AppContext;
use covbench_core::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, error::CliError> {
    let args = cli::Args::parse();

    let mut cfg = match args.config.as_deref() {
        Some(path) => covbench_core::config::load_from(path),
        None => covbench_core::config::load_default(),
    }
    .map_err(|e| error::CliError::Config(e.to_string()))?;

    if let Some(level) = args.log_level.as_deref() {
        cfg.logging.level = level.to_string();
    }
    init_tracing(&cfg.logging).map_err(error::CliError::Command)?;

    let registry = covbench_plugins::factory::build_registry(&cfg);
    let ctx = AppContext::new(cfg, registry);

    dispatch(args.command, &ctx).await
}

fn exit_code_for_error(e: &error::CliError) -> i32 {
    // 0: success
    // 11: config/catalogue error
    // 20: process start / IO error
    // 30: tool adapter error
    // 50: internal/uncategorized
    match e {
        error::CliError::Config(_) | error::CliError::Catalogue(_) => 11,
        error::CliError::Runner(_) | error::CliError::Io(_) | error::CliError::Command(_) => 20,
        error::CliError::Tool(_) => 30,
        error::CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(cmd: cli::Commands, ctx: &AppContext) -> Result<i32, error::CliError> {
    match cmd {
        cli::Commands::Run(run_args) => commands::run::run_cmd(run_args, ctx).await,
        cli::Commands::Classify(classify_args) => {
            commands::classify::classify_cmd(classify_args, ctx).await
        }
        cli::Commands::Tools => commands::tools::tools_cmd(ctx),
    }
}

fn init_tracing(logging: &covbench_core::config::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("covbench"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("covbench.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
