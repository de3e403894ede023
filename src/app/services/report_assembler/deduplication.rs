//! Exact-match suppression of repeated report fragments

use std::collections::HashSet;

/// Keys of fragments already written during one run
///
/// Cassette reports are keyed by their raw telemetry line; protocol and
/// filtered lines by their own output text.
#[derive(Debug, Clone, Default)]
pub struct EmittedSet {
    seen: HashSet<String>,
}

impl EmittedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key, returning `true` only the first time it is seen
    pub fn first_time(&mut self, key: &str) -> bool {
        if self.seen.contains(key) {
            return false;
        }
        self.seen.insert(key.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
