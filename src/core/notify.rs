//! Outbound notification port
//!
//! Each analysis hands the redacted transcript to a [`NotificationSink`]
//! exactly once. Delivery is best-effort: failures are logged and never reach
//! the numeric results.

use crate::core::error::SinkError;
use planner_logger::{debug, warn};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Receiver for the redacted transcript payload
pub trait NotificationSink {
    /// Deliver one payload.
    ///
    /// # Errors
    /// Returns an error if delivery fails. Callers log it and carry on.
    fn submit(&self, payload: &[Value]) -> Result<(), SinkError>;
}

/// Sink that drops every payload
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn submit(&self, _payload: &[Value]) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that writes each payload as pretty JSON into an outbox directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Create a sink writing into `dir` (created on first submit)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Outbox directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl NotificationSink for FileSink {
    fn submit(&self, payload: &[Value]) -> Result<(), SinkError> {
        fs::create_dir_all(&self.dir)?;
        let body = serde_json::to_string_pretty(payload)?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis());

        // Never overwrite an earlier payload written in the same millisecond
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("grades-{stamp}.json")
            } else {
                format!("grades-{stamp}-{attempt}.json")
            };
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(body.as_bytes())?;
                    debug!("Payload written to {}", path.display());
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e.into()),
            }
        }
        Err(SinkError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free outbox file name for timestamp {stamp}"),
        )))
    }
}

/// Sink that keeps payloads in memory, for embedding callers and tests
#[derive(Debug, Default)]
pub struct MemorySink {
    payloads: Mutex<Vec<Vec<Value>>>,
}

impl MemorySink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads received so far
    #[must_use]
    pub fn payloads(&self) -> Vec<Vec<Value>> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for MemorySink {
    fn submit(&self, payload: &[Value]) -> Result<(), SinkError> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload.to_vec());
        Ok(())
    }
}

/// Submit `payload` and swallow any failure. Returns whether delivery succeeded.
pub fn notify_best_effort(sink: &dyn NotificationSink, payload: &[Value]) -> bool {
    match sink.submit(payload) {
        Ok(()) => true,
        Err(e) => {
            warn!("Notification not delivered: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn submit(&self, _payload: &[Value]) -> Result<(), SinkError> {
            Err(SinkError::Io(std::io::Error::other("webhook down")))
        }
    }

    #[test]
    fn test_best_effort_swallows_failure() {
        assert!(!notify_best_effort(&FailingSink, &[json!({"maMonHoc": "X"})]));
        assert!(notify_best_effort(&NullSink, &[]));
    }

    #[test]
    fn test_memory_sink_records_payloads() {
        let sink = MemorySink::new();
        notify_best_effort(&sink, &[json!({"a": 1})]);
        notify_best_effort(&sink, &[]);
        assert_eq!(sink.payloads(), vec![vec![json!({"a": 1})], vec![]]);
    }

    #[test]
    fn test_memory_sink_survives_poisoned_lock() {
        let sink = MemorySink::new();
        notify_best_effort(&sink, &[json!({"a": 1})]);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = sink.payloads.lock().expect("unpoisoned");
            panic!("poison the lock");
        }));
        assert!(result.is_err());
        assert!(sink.payloads.is_poisoned());

        notify_best_effort(&sink, &[json!({"b": 2})]);
        assert_eq!(sink.payloads(), vec![vec![json!({"a": 1})], vec![json!({"b": 2})]]);
    }

    #[test]
    fn test_file_sink_writes_distinct_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let sink = FileSink::new(dir.path().join("outbox"));
        let payload = [json!({"maMonHoc": "MT1003", "diemChu": "B+"})];

        sink.submit(&payload).expect("first write");
        sink.submit(&payload).expect("second write");

        let files: Vec<_> = fs::read_dir(sink.dir())
            .expect("outbox exists")
            .filter_map(Result::ok)
            .collect();
        assert_eq!(files.len(), 2);

        let content = fs::read_to_string(files[0].path()).expect("readable");
        let parsed: Vec<Value> = serde_json::from_str(&content).expect("valid JSON");
        assert_eq!(parsed, payload);
    }
}
