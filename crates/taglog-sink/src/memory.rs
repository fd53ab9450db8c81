//! crates/taglog-sink/src/memory.rs
//! Sink that keeps every record in memory.

use std::sync::{Mutex, MutexGuard, PoisonError};

use taglog::{Cause, Level, Sink};

/// One record received by a [`MemorySink`].
#[derive(Clone, Debug)]
pub struct SinkEntry {
    /// Native severity code.
    pub code: i32,
    /// Tag current at dispatch time.
    pub tag: String,
    /// Enriched message text.
    pub message: String,
    /// Cause handed over with the record.
    pub cause: Option<Cause>,
}

impl SinkEntry {
    /// Returns the level matching [`code`](Self::code), if any.
    #[must_use]
    pub const fn level(&self) -> Option<Level> {
        Level::from_native_code(self.code)
    }
}

/// Thread-safe sink that records every dispatch in order of arrival.
///
/// Useful for tests and for hosts that forward records in batches.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<SinkEntry>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded entry.
    pub fn entries(&self) -> Vec<SinkEntry> {
        self.lock().clone()
    }

    /// Removes and returns every recorded entry.
    pub fn take(&self) -> Vec<SinkEntry> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SinkEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for MemorySink {
    fn write(&self, code: i32, tag: &str, message: &str, cause: Option<&Cause>) {
        self.lock().push(SinkEntry {
            code,
            tag: tag.to_owned(),
            message: message.to_owned(),
            cause: cause.cloned(),
        });
    }
}
