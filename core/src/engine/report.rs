use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::CliError;

use super::types::EvaluationRecord;

/// Writes evaluation records as JSON Lines, one record per line, to
/// stdout or a file. Records are few and ordered, so this writes
/// inline rather than through a channel.
pub struct RecordWriter {
    out: Box<dyn tokio::io::AsyncWrite + Unpin + Send>,
}

impl RecordWriter {
    pub async fn create(path: Option<&Path>) -> Result<Self, CliError> {
        let out: Box<dyn tokio::io::AsyncWrite + Unpin + Send> = match path {
            None => Box::new(tokio::io::stdout()),
            Some(path) => Box::new(tokio::fs::File::create(path).await?),
        };
        Ok(Self { out })
    }

    pub async fn write(&mut self, record: &EvaluationRecord) -> Result<(), CliError> {
        let mut line =
            serde_json::to_string(record).map_err(|e| CliError::Command(e.to_string()))?;
        line.push('\n');
        self.out.write_all(line.as_bytes()).await?;
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<(), CliError> {
        self.out.flush().await?;
        Ok(())
    }
}
