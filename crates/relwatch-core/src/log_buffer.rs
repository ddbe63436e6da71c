//! Bounded buffer of the most recent action log lines.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// Lines kept when no size is configured.
pub const DEFAULT_LOG_BUFFER_SIZE: usize = 5;

/// Keeps the last N log lines of an action, for attaching to events.
///
/// Consecutive duplicate lines are collapsed, which happens a lot while an
/// action waits for workloads to become ready. Every logged line is also
/// forwarded to `tracing` at debug level.
#[derive(Debug)]
pub struct LogBuffer {
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl LogBuffer {
    /// A buffer of `size` lines; `0` means [`DEFAULT_LOG_BUFFER_SIZE`].
    pub fn new(size: usize) -> Self {
        let capacity = if size == 0 {
            DEFAULT_LOG_BUFFER_SIZE
        } else {
            size
        };
        Self {
            capacity,
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn log(&self, line: impl Into<String>) {
        let line = line.into();
        debug!(target: "relwatch::action", "{}", line);

        let mut lines = self.lock();
        if lines.back() == Some(&line) {
            return;
        }
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn reset(&self) {
        self.lock().clear();
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_BUFFER_SIZE)
    }
}

impl fmt::Display for LogBuffer {
    /// Buffered lines, oldest first, joined by newlines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .lock()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        f.write_str(joined.trim())
    }
}
