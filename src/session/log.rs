//! The in-game battle log.
//!
//! A bounded FIFO of tagged messages shown to the player. Only the most
//! recent `capacity` entries are kept. Backed by `im::Vector` so snapshots
//! share structure instead of copying every message.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Who a log entry is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogTag {
    Player,
    Enemy,
    System,
}

impl From<Side> for LogTag {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => LogTag::Player,
            Side::Enemy => LogTag::Enemy,
        }
    }
}

/// One log line.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    pub tag: LogTag,
    pub message: String,
}

/// Bounded battle log, oldest entry first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vector<LogEntry>,
    capacity: usize,
}

impl BattleLog {
    /// Create an empty log keeping at most `capacity` entries.
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Log capacity must be positive");
        Self {
            entries: Vector::new(),
            capacity,
        }
    }

    /// Append a message, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, tag: LogTag, message: impl Into<String>) {
        let message = message.into();
        log::trace!("[{tag:?}] {message}");
        self.entries.push_back(LogEntry { tag, message });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Shared copy of the entries.
    #[must_use]
    pub fn entries(&self) -> Vector<LogEntry> {
        self.entries.clone()
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The newest entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Does any retained entry contain `needle`?
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }
}
