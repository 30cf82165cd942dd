use covbench_core::context::AppContext;
use covbench_core::error::CliError;

pub fn tools_cmd(ctx: &AppContext) -> Result<i32, CliError> {
    let names = ctx.registry().names();
    if names.is_empty() {
        eprintln!("no tools configured");
        return Ok(0);
    }
    for name in names {
        println!("{name}");
    }
    Ok(0)
}
