use std::sync::{Arc, Mutex};

use tracker_core::{EventLog, LogLevel};

/// Event log keeping every entry in memory.
///
/// Clones share the same entries, so a test can keep one handle and hand
/// another to the adapter.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    entries: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in the order they were logged
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.lock().clone()
    }

    /// Number of entries at `level`
    pub fn count(&self, level: LogLevel) -> usize {
        self.lock().iter().filter(|(l, _)| *l == level).count()
    }

    /// True if an entry at `level` contains `needle`
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lock()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(LogLevel, String)>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventLog for RecordingLog {
    fn log(&self, level: LogLevel, message: &str) {
        self.lock().push((level, message.to_string()));
    }
}
