//! Correlation statistics

use serde::Serialize;

/// Counters kept by one correlator run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrelationStats {
    /// Command lines that created a pending entry
    pub requests_issued: usize,
    /// Command lines that replaced an entry with the same request id
    pub requests_overwritten: usize,
    /// Error lines attached to a pending entry
    pub errors_attached: usize,
    /// Error lines with no error-free pending entry to attach to
    pub errors_unattached: usize,
    /// Completion lines matched to a pending entry
    pub completions_matched: usize,
    /// Completion lines with no pending entry for their request id
    pub completions_unmatched: usize,
}

impl CorrelationStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that produced report output
    pub fn lines_emitted(&self) -> usize {
        self.requests_issued + self.errors_attached + self.completions_matched
    }

    /// Lines recognised but left without output
    pub fn lines_ignored(&self) -> usize {
        self.errors_unattached + self.completions_unmatched
    }

    /// Percentage of issued requests that saw a completion
    pub fn completion_rate(&self) -> f64 {
        if self.requests_issued == 0 {
            0.0
        } else {
            (self.completions_matched as f64 / self.requests_issued as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "CDM correlation: {} requests ({} overwritten), {} errors attached, {} completed ({:.1}%), {} ignored",
            self.requests_issued,
            self.requests_overwritten,
            self.errors_attached,
            self.completions_matched,
            self.completion_rate(),
            self.lines_ignored()
        )
    }
}
