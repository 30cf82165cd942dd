use covbench_core::config::Catalogue;
use covbench_core::context::AppContext;
use covbench_core::engine::{evaluate_catalogue, RecordWriter};
use covbench_core::error::CliError;

use super::cli::RunArgs;

pub async fn run_cmd(args: RunArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let catalogue = Catalogue::load(&args.catalogue)?;
    tracing::debug!(
        "Loaded {} snippet(s) from {}",
        catalogue.len(),
        args.catalogue.display()
    );

    let ctx = match args.timeout_ms {
        Some(timeout_ms) => {
            let mut cfg = ctx.cfg().clone();
            cfg.runner.timeout_ms = timeout_ms;
            ctx.with_config(cfg)
        }
        None => ctx.clone(),
    };

    let (records, summary) = evaluate_catalogue(&ctx, &args.tool, &catalogue).await?;

    let mut writer = RecordWriter::create(args.out.as_deref()).await?;
    for record in &records {
        writer.write(record).await?;
    }
    writer.flush().await?;

    // The summary goes to stderr so stdout stays machine-readable JSONL.
    eprintln!(
        "covered={} not_covered={} generation_failed={} timed_out={} total={}",
        summary.covered,
        summary.not_covered,
        summary.generation_failed,
        summary.timed_out,
        summary.total()
    );

    Ok(0)
}
