//! Log source abstraction: raw log files from disk or from test doubles.

use async_trait::async_trait;

use crate::error::{LogError, LogResult};

/// Abstraction for reading raw equipment logs.
///
/// Lets the converter run against the filesystem in production and against
/// [`MockLogSource`](crate::mock::MockLogSource) in tests.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Read the whole file as UTF-8 text.
    ///
    /// A missing file must be reported as [`LogError::NotFound`].
    async fn read_to_string(&self, path: &str) -> LogResult<String>;
}

/// Reads logs from the local filesystem.
pub struct FileLogSource;

#[async_trait]
impl LogSource for FileLogSource {
    async fn read_to_string(&self, path: &str) -> LogResult<String> {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogError::NotFound(path.to_string())
            } else {
                LogError::Io(format!("{path}: {e}"))
            }
        })
    }
}
