use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::error::RunnerError;

use super::io_pump;
use super::listener::ExecutionListener;
use super::types::{ExecutionResult, ProcessSpec, StreamRedirect};

/// Pause between interrupting the gobblers and force-killing the process
/// tree, so the stream tasks unwind before their pipes go away.
pub const KILL_GRACE: Duration = Duration::from_millis(200);

/// Runs `spec` to completion, bounded by `timeout_ms` (`0` = unlimited).
///
/// A gobbler task drains each piped stream into the listener. When the child
/// finishes in time both gobblers are joined before the result is built, so
/// every buffered chunk reaches the listener first. On timeout the gobblers
/// are aborted, the grace period elapses, and the whole process group is
/// killed; the result then carries `destroyed = true` and the
/// platform-defined exit code.
///
/// Spawn and redirect failures return `Err` before any listener hook fires.
/// A nonzero child exit code is an ordinary result, not an error.
pub async fn execute(
    spec: &ProcessSpec,
    timeout_ms: u64,
    listener: Arc<dyn ExecutionListener>,
) -> Result<ExecutionResult, RunnerError> {
    let mut child = spawn_child(spec)?;
    let started_at = Instant::now();
    listener.on_start();

    let out_task = child
        .stdout
        .take()
        .map(|rd| io_pump::pump_stdout(rd, Arc::clone(&listener)));
    let err_task = child
        .stderr
        .take()
        .map(|rd| io_pump::pump_stderr(rd, Arc::clone(&listener)));

    let (status, destroyed) = if timeout_ms == 0 {
        let status = child
            .wait()
            .await
            .map_err(|e| RunnerError::Wait(e.to_string()))?;
        (status, false)
    } else {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        tokio::select! {
            res = child.wait() => {
                let status = res.map_err(|e| RunnerError::Wait(e.to_string()))?;
                (status, false)
            }
            _ = tokio::time::sleep_until(deadline) => {
                tracing::warn!(
                    program = %spec.program,
                    timeout_ms,
                    "execution timed out, killing process tree"
                );
                if let Some(task) = &out_task {
                    task.abort();
                }
                if let Some(task) = &err_task {
                    task.abort();
                }
                tokio::time::sleep(KILL_GRACE).await;
                force_kill(&mut child)?;
                let status = child
                    .wait()
                    .await
                    .map_err(|e| RunnerError::Wait(e.to_string()))?;
                (status, true)
            }
        }
    };

    join_pump(out_task, "stdout").await;
    join_pump(err_task, "stderr").await;

    let result = ExecutionResult {
        exit_code: normalize_exit(&status),
        destroyed,
        duration_ms: started_at.elapsed().as_millis() as u64,
    };
    tracing::debug!(
        program = %spec.program,
        exit_code = result.exit_code,
        destroyed = result.destroyed,
        duration_ms = result.duration_ms,
        "execution finished"
    );
    listener.on_complete(&result);
    Ok(result)
}

fn spawn_child(spec: &ProcessSpec) -> Result<Child, RunnerError> {
    let mut std_cmd = std::process::Command::new(&spec.program);
    std_cmd.args(&spec.args);
    if let Some(dir) = &spec.cwd {
        std_cmd.current_dir(dir);
    }
    for (key, value) in &spec.envs {
        std_cmd.env(key, value);
    }
    std_cmd.stdin(Stdio::null());
    std_cmd.stdout(stdio_for(&spec.stdout)?);
    std_cmd.stderr(stdio_for(&spec.stderr)?);

    // Own process group, so a timeout can take down the whole tree.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        std_cmd.process_group(0);
    }

    let mut cmd = Command::from(std_cmd);
    cmd.kill_on_drop(true);
    cmd.spawn()
        .map_err(|e| RunnerError::Spawn(format!("{}: {e}", spec.program)))
}

fn stdio_for(redirect: &StreamRedirect) -> Result<Stdio, RunnerError> {
    match redirect {
        StreamRedirect::Inherit => Ok(Stdio::inherit()),
        StreamRedirect::Pipe => Ok(Stdio::piped()),
        StreamRedirect::ToFile(path) => {
            let file = std::fs::File::create(path).map_err(|e| RunnerError::Redirect {
                path: path.clone(),
                source: e,
            })?;
            Ok(Stdio::from(file))
        }
    }
}

async fn join_pump(task: Option<JoinHandle<Result<u64, RunnerError>>>, stream: &'static str) {
    let Some(task) = task else {
        return;
    };
    match task.await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            tracing::warn!(error.kind = "stream.pump_failed", stream, error.message = %e);
        }
        // Aborted on the timeout path.
        Err(_) => {}
    }
}

/// The child was spawned as its own group leader, so its pid doubles as the
/// process-group id.
#[cfg(unix)]
fn force_kill(child: &mut Child) -> Result<(), RunnerError> {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        // Already reaped.
        return Ok(());
    };
    match killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
        // ESRCH: the group exited before the signal landed.
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(e) => Err(RunnerError::Kill(format!("killpg({pid}): {e}"))),
    }
}

#[cfg(not(unix))]
fn force_kill(child: &mut Child) -> Result<(), RunnerError> {
    child
        .start_kill()
        .map_err(|e| RunnerError::Kill(e.to_string()))
}

#[cfg(unix)]
fn normalize_exit(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    if let Some(code) = status.code() {
        code
    } else if let Some(sig) = status.signal() {
        128 + sig
    } else {
        1
    }
}

#[cfg(not(unix))]
fn normalize_exit(status: &std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
