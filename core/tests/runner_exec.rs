mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use covbench_core::runner::{
    execute, ExecutionListener, ExecutionResult, ProcessSpec, StreamRedirect, KILL_GRACE,
};
use tokio_test::assert_ok;

use common::sh;

/// Records chunk payloads per stream plus hook ordering, so tests can
/// assert both content and lifecycle.
#[derive(Default)]
struct ChunkLog {
    stdout: Mutex<Vec<u8>>,
    stderr: Mutex<Vec<u8>>,
    started: AtomicBool,
    completed: AtomicBool,
    chunks_after_complete: AtomicUsize,
}

impl ExecutionListener for ChunkLog {
    fn on_start(&self) {
        self.started.store(true, Ordering::SeqCst);
    }

    fn on_stdout_chunk(&self, chunk: &[u8]) {
        if self.completed.load(Ordering::SeqCst) {
            self.chunks_after_complete.fetch_add(1, Ordering::SeqCst);
        }
        self.stdout.lock().unwrap().extend_from_slice(chunk);
    }

    fn on_stderr_chunk(&self, chunk: &[u8]) {
        if self.completed.load(Ordering::SeqCst) {
            self.chunks_after_complete.fetch_add(1, Ordering::SeqCst);
        }
        self.stderr.lock().unwrap().extend_from_slice(chunk);
    }

    fn on_complete(&self, _result: &ExecutionResult) {
        self.completed.store(true, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn nonzero_exit_codes_are_results_not_errors() {
    let listener = Arc::new(ChunkLog::default());
    let result = tokio_test::assert_ok!(execute(&sh("exit 7"), 0, listener).await);

    assert_eq!(result.exit_code, 7);
    assert!(!result.destroyed);
}

#[tokio::test]
async fn stdout_arrives_in_order_and_before_completion() {
    let listener = Arc::new(ChunkLog::default());
    let result = execute(
        &sh("printf 'one\\n'; printf 'two\\n'; printf 'three\\n'"),
        0,
        listener.clone(),
    )
    .await
    .unwrap();

    assert_eq!(result.exit_code, 0);
    assert!(listener.started.load(Ordering::SeqCst));
    assert!(listener.completed.load(Ordering::SeqCst));
    assert_eq!(listener.chunks_after_complete.load(Ordering::SeqCst), 0);

    let stdout = listener.stdout.lock().unwrap().clone();
    assert_eq!(String::from_utf8(stdout).unwrap(), "one\ntwo\nthree\n");
}

#[tokio::test]
async fn stderr_routes_to_its_own_hook() {
    let listener = Arc::new(ChunkLog::default());
    execute(&sh("echo oops >&2"), 0, listener.clone())
        .await
        .unwrap();

    let stderr = listener.stderr.lock().unwrap().clone();
    assert_eq!(String::from_utf8(stderr).unwrap(), "oops\n");
    assert!(listener.stdout.lock().unwrap().is_empty());
}

#[tokio::test]
async fn large_output_is_delivered_losslessly() {
    // 20000 bytes spans several pump buffers.
    let listener = Arc::new(ChunkLog::default());
    let script = "i=0; while [ $i -lt 2000 ]; do printf '0123456789'; i=$((i+1)); done";
    let result = execute(&sh(script), 0, listener.clone()).await.unwrap();

    assert_eq!(result.exit_code, 0);
    let stdout = listener.stdout.lock().unwrap().clone();
    assert_eq!(stdout.len(), 20000);
    assert!(stdout.chunks(10).all(|c| c == b"0123456789"));
}

#[tokio::test]
async fn timeout_destroys_the_process_and_reports_it() {
    let listener = Arc::new(ChunkLog::default());
    let result = tokio_test::assert_ok!(execute(&sh("sleep 30"), 300, listener).await);

    assert!(result.destroyed);
    #[cfg(unix)]
    assert_eq!(result.exit_code, 137);
    // Budget plus grace, with slack for a loaded machine.
    assert!(result.duration_ms >= 300);
    assert!(result.duration_ms < 300 + KILL_GRACE.as_millis() as u64 + 5000);
}

#[tokio::test]
async fn timeout_zero_waits_indefinitely() {
    let listener = Arc::new(ChunkLog::default());
    let result = execute(&sh("sleep 1; echo done"), 0, listener.clone())
        .await
        .unwrap();

    assert_eq!(result.exit_code, 0);
    assert!(!result.destroyed);
    assert!(result.duration_ms >= 1000);

    let stdout = listener.stdout.lock().unwrap().clone();
    assert_eq!(String::from_utf8(stdout).unwrap(), "done\n");
}

#[tokio::test]
async fn spawn_failure_precedes_every_listener_hook() {
    let listener = Arc::new(ChunkLog::default());
    let spec = ProcessSpec::new("/no/such/binary/anywhere");
    let err = execute(&spec, 0, listener.clone()).await.unwrap_err();

    assert!(err.to_string().contains("/no/such/binary/anywhere"));
    assert!(!listener.started.load(Ordering::SeqCst));
    assert!(!listener.completed.load(Ordering::SeqCst));
    assert!(listener.stdout.lock().unwrap().is_empty());
}

#[tokio::test]
async fn stdout_can_redirect_to_a_file_instead_of_the_listener() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut spec = sh("echo captured");
    spec.stdout = StreamRedirect::ToFile(path.clone());

    let listener = Arc::new(ChunkLog::default());
    let result = execute(&spec, 0, listener.clone()).await.unwrap();

    assert_eq!(result.exit_code, 0);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "captured\n");
    // No pump runs for a non-piped stream.
    assert!(listener.stdout.lock().unwrap().is_empty());
}
