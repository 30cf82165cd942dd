use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::error::RunnerError;

use super::listener::ExecutionListener;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

pub fn pump_stdout<R>(
    rd: R,
    listener: Arc<dyn ExecutionListener>,
) -> JoinHandle<Result<u64, RunnerError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    pump(rd, "stdout", StreamKind::Stdout, listener)
}

pub fn pump_stderr<R>(
    rd: R,
    listener: Arc<dyn ExecutionListener>,
) -> JoinHandle<Result<u64, RunnerError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    pump(rd, "stderr", StreamKind::Stderr, listener)
}

fn pump<R>(
    mut rd: R,
    label: &'static str,
    kind: StreamKind,
    listener: Arc<dyn ExecutionListener>,
) -> JoinHandle<Result<u64, RunnerError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 16 * 1024];
        let mut total = 0u64;

        loop {
            let n = rd.read(&mut buf).await.map_err(|e| RunnerError::StreamIo {
                stream: label,
                source: e,
            })?;
            if n == 0 {
                break;
            }

            match kind {
                StreamKind::Stdout => listener.on_stdout_chunk(&buf[..n]),
                StreamKind::Stderr => listener.on_stderr_chunk(&buf[..n]),
            }
            total += n as u64;
        }

        Ok(total)
    })
}
