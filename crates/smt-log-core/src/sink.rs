//! Event sink abstraction: where converted JSON documents are stored.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{LogError, LogResult};

/// Destination for converted JSON documents, keyed by path.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Delete a previously written document. Returns `true` if one existed.
    async fn remove(&self, dest: &str) -> LogResult<bool>;

    /// Store the full document body, replacing anything at `dest`.
    async fn write(&self, dest: &str, body: &str) -> LogResult<()>;

    /// Fetch a stored document verbatim, `None` if nothing is stored.
    async fn read(&self, dest: &str) -> LogResult<Option<String>>;
}

/// Writes documents as files, creating parent directories as needed.
///
/// Writes are not atomic: a failure part way through can leave a truncated
/// or missing file behind.
pub struct FileSink;

#[async_trait]
impl EventSink for FileSink {
    async fn remove(&self, dest: &str) -> LogResult<bool> {
        match tokio::fs::remove_file(dest).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(LogError::Io(format!("{dest}: {e}"))),
        }
    }

    async fn write(&self, dest: &str, body: &str) -> LogResult<()> {
        let write_err = |e: std::io::Error| LogError::Write {
            path: dest.to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = Path::new(dest).parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        tokio::fs::write(dest, body).await.map_err(write_err)
    }

    async fn read(&self, dest: &str) -> LogResult<Option<String>> {
        match tokio::fs::read_to_string(dest).await {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LogError::Io(format!("{dest}: {e}"))),
        }
    }
}
