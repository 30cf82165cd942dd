use covbench_core::config::Catalogue;
use covbench_core::context::AppContext;
use covbench_core::coverage::classify;
use covbench_core::error::CliError;

use super::cli::ClassifyArgs;

pub async fn classify_cmd(args: ClassifyArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let catalogue = Catalogue::load(&args.catalogue)?;
    let snippet = catalogue.get(&args.snippet).ok_or_else(|| {
        CliError::Catalogue(format!(
            "{}: no snippet named {}",
            args.catalogue.display(),
            args.snippet
        ))
    })?;

    let per_file = covbench_plugins::report::load_report(&args.report).await?;
    let required = args
        .required
        .or(snippet.required_percent)
        .unwrap_or(ctx.cfg().evaluation.required_percent);

    tracing::debug!("Classifying {} at {:.1}% required", args.snippet, required);
    let verdict = classify(&per_file, &snippet.primary, &snippet.auxiliary, required);
    println!(
        "{}",
        serde_json::to_string_pretty(&verdict).map_err(|e| CliError::Command(e.to_string()))?
    );
    Ok(0)
}
