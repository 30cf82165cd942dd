use covbench_core::runner::ProcessSpec;

/// Runs a small shell script through `sh -c`, the lowest-friction way to
/// get real child processes with controlled exit codes and output.
pub fn sh(script: &str) -> ProcessSpec {
    ProcessSpec::new("sh").arg("-c").arg(script)
}
