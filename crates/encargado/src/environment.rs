//! Sources of identifiers and wall-clock time.
//!
//! The data operations never call the clock or the id generator directly;
//! they receive an [`Environment`] so tests and replays stay deterministic.

use chrono::Utc;
use uuid::Uuid;

use crate::model::Millis;

/// Trait for the id and time sources consumed by the data operations.
pub trait Environment {
    /// Produce a fresh, collision-resistant identifier.
    fn next_id(&mut self) -> String;

    /// Current wall-clock time in milliseconds since the Unix epoch.
    fn now(&self) -> Millis;
}

/// Random UUID v4 identifiers and the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }

    fn now(&self) -> Millis {
        Utc::now().timestamp_millis()
    }
}

/// Sequential identifiers and a manually advanced clock.
///
/// Ids are `<prefix>-<n>` starting at 1.
#[derive(Debug, Clone)]
pub struct SequenceEnvironment {
    prefix: String,
    counter: u64,
    now: Millis,
}

impl SequenceEnvironment {
    /// Create a sequence starting at the given time.
    #[must_use]
    pub fn new(prefix: impl Into<String>, start: Millis) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
            now: start,
        }
    }

    /// Move the clock forward.
    pub fn advance(&mut self, millis: Millis) {
        self.now += millis;
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl Environment for SequenceEnvironment {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }

    fn now(&self) -> Millis {
        self.now
    }
}
