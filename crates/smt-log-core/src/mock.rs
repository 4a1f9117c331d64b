//! In-memory log source and sink for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{LogError, LogResult};
use crate::sink::EventSink;
use crate::source::LogSource;

/// A mock log source that serves pre-loaded content by path.
pub struct MockLogSource {
    files: HashMap<String, String>,
    unreadable: HashSet<String>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            unreadable: HashSet::new(),
        }
    }

    /// Add a file with the given lines, joined by `\n`.
    pub fn add_file(&mut self, path: impl Into<String>, lines: &[&str]) {
        self.files.insert(path.into(), lines.join("\n"));
    }

    /// Make reads of `path` fail with an I/O error other than not-found.
    pub fn add_unreadable(&mut self, path: impl Into<String>) {
        self.unreadable.insert(path.into());
    }

    /// Create a mock with a sample error log at `/logs/Error.log`.
    pub fn with_error_log_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/logs/Error.log",
            &[
                "01/15/24 08:30:05 WARNING Feeder F12 Part R1234.056 Failed to pick up a part properly Part R1234.056",
                "01/15/24 08:31:10 Head3 Clamp Locked",
                "",
                "01/15/24 08:31:40 Head3 Clamp Unlocked",
                "01/15/24 08:32:00 ERROR [E2011] The retry count for part pickup was exceeded Feeder F7 Part C0402",
                "--- operator note: nozzle swap ---",
                "01/15/24 08:35:12 WARNING [W0412] Vacuum level low Head1",
                "01/15/24 08:40:00 FREEZE [F0001] Conveyor stopped",
                "01/15/24 08:41:30 WARNING [W0412] Vacuum level low Head2",
            ],
        );
        m
    }

    /// Create a mock with a sample operate log at `/logs/Operate.log`.
    pub fn with_operate_log_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/logs/Operate.log",
            &[
                "01/15/24 08:00:00 Production started",
                "01/15/24 08:05:10 [LMEvent::RID_EVENT_PCB] Board completed",
                "01/15/24 08:06:00 Pickup from F12 ok Part R1234.056",
                "",
                "01/15/24 08:07:45 Clamp Unlocked",
                "01/15/24 08:10:20 [LMEvent::RID_EVENT_PCB] Board completed",
                "01/15/24 08:11:00 Failed to pick up a part properly Part C0402",
            ],
        );
        m
    }
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    async fn read_to_string(&self, path: &str) -> LogResult<String> {
        if self.unreadable.contains(path) {
            return Err(LogError::Io(format!("{path}: permission denied")));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LogError::NotFound(path.to_string()))
    }
}

/// A sink that keeps written documents in memory.
pub struct MemorySink {
    documents: Mutex<HashMap<String, String>>,
    failing: HashSet<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            failing: HashSet::new(),
        }
    }

    /// Pre-populate a document, as if left over from an earlier run.
    pub fn with_document(self, dest: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents
            .lock()
            .unwrap()
            .insert(dest.into(), body.into());
        self
    }

    /// Make writes to `dest` fail.
    pub fn fail_writes_to(mut self, dest: impl Into<String>) -> Self {
        self.failing.insert(dest.into());
        self
    }

    /// Current contents of `dest`, if any.
    pub fn document(&self, dest: &str) -> Option<String> {
        self.documents.lock().unwrap().get(dest).cloned()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn remove(&self, dest: &str) -> LogResult<bool> {
        Ok(self.documents.lock().unwrap().remove(dest).is_some())
    }

    async fn write(&self, dest: &str, body: &str) -> LogResult<()> {
        if self.failing.contains(dest) {
            return Err(LogError::Write {
                path: dest.to_string(),
                message: "disk full".into(),
            });
        }
        self.documents
            .lock()
            .unwrap()
            .insert(dest.to_string(), body.to_string());
        Ok(())
    }

    async fn read(&self, dest: &str) -> LogResult<Option<String>> {
        Ok(self.document(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_read_file() {
        let source = MockLogSource::with_error_log_sample();
        let text = source.read_to_string("/logs/Error.log").await.unwrap();
        assert_eq!(text.split('\n').count(), 9);
    }

    #[tokio::test]
    async fn mock_not_found() {
        let source = MockLogSource::new();
        let result = source.read_to_string("/nonexistent").await;
        assert!(matches!(result, Err(LogError::NotFound(_))));
    }

    #[tokio::test]
    async fn mock_unreadable() {
        let mut source = MockLogSource::new();
        source.add_unreadable("/logs/locked.log");
        let result = source.read_to_string("/logs/locked.log").await;
        assert!(matches!(result, Err(LogError::Io(_))));
    }

    #[tokio::test]
    async fn memory_sink_write_and_remove() {
        let sink = MemorySink::new();
        sink.write("/out/Error.json", "[]").await.unwrap();
        assert_eq!(sink.read("/out/Error.json").await.unwrap().as_deref(), Some("[]"));
        assert!(sink.remove("/out/Error.json").await.unwrap());
        assert!(!sink.remove("/out/Error.json").await.unwrap());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn memory_sink_failure() {
        let sink = MemorySink::new().fail_writes_to("/out/Error.json");
        let result = sink.write("/out/Error.json", "[]").await;
        assert!(matches!(result, Err(LogError::Write { .. })));
    }
}
