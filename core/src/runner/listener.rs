use crate::util::TailBuffer;

use super::types::ExecutionResult;

/// Observer of one execution's lifecycle and output.
///
/// `on_stdout_chunk` and `on_stderr_chunk` are invoked from the two gobbler
/// tasks and may run concurrently with each other; implementations that
/// accumulate into shared state must synchronize internally. Within one
/// stream, chunks arrive in the order the child produced them; no ordering
/// holds across the two streams. `on_complete` fires after both gobblers
/// have stopped, so no chunk callback runs once the result is reported.
pub trait ExecutionListener: Send + Sync {
    fn on_start(&self) {}
    fn on_stdout_chunk(&self, _chunk: &[u8]) {}
    fn on_stderr_chunk(&self, _chunk: &[u8]) {}
    fn on_complete(&self, _result: &ExecutionResult) {}
}

/// Listener retaining the tail of each stream for diagnostics.
pub struct TailListener {
    stdout: TailBuffer,
    stderr: TailBuffer,
}

impl TailListener {
    pub fn new(capacity: usize) -> Self {
        Self {
            stdout: TailBuffer::new(capacity),
            stderr: TailBuffer::new(capacity),
        }
    }

    pub fn stdout_tail(&self) -> String {
        self.stdout.to_string_lossy()
    }

    pub fn stderr_tail(&self) -> String {
        self.stderr.to_string_lossy()
    }
}

impl ExecutionListener for TailListener {
    fn on_stdout_chunk(&self, chunk: &[u8]) {
        self.stdout.push(chunk);
    }

    fn on_stderr_chunk(&self, chunk: &[u8]) {
        self.stderr.push(chunk);
    }
}
