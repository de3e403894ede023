//! Run statistics for one assembler pass

use crate::app::models::ReportFormat;
use crate::app::services::cdm_correlator::CorrelationStats;
use serde::Serialize;
use std::time::Duration;

/// Counters for one pass over a journal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Output strategy used for the run
    pub format: ReportFormat,
    /// Lines read from the input
    pub lines_read: usize,
    /// Bytes read from the input
    pub bytes_read: u64,
    /// Lines dropped inside supervisor sessions
    pub supervisor_skipped: usize,
    /// Lines dropped by the fixed noise markers
    pub noise_dropped: usize,
    /// Lines no component wanted
    pub lines_unmatched: usize,
    /// Cassette status reports written
    pub cassette_reports: usize,
    /// Discrepancies found across all cassette reports
    pub discrepancies: usize,
    /// Request, error and response lines written
    pub protocol_lines: usize,
    /// Normalized journal lines written
    pub filtered_lines: usize,
    /// Transaction banners written
    pub separators: usize,
    /// Fragments suppressed as exact repeats
    pub duplicates_suppressed: usize,
    /// Standard rows written
    pub rows_written: usize,
    /// Standard rows discarded without a trace number
    pub rows_dropped: usize,
    /// Requests still awaiting completion at end of input
    pub pending_left: usize,
    /// Correlator counters for the run
    pub protocol: CorrelationStats,
    /// Wall-clock time of the pass
    #[serde(skip)]
    pub processing_time: Duration,
}

impl RunStats {
    /// Create new empty statistics for a format
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Fragments written to the report, excluding banners and the header
    pub fn fragments_written(&self) -> usize {
        self.cassette_reports + self.protocol_lines + self.filtered_lines + self.rows_written
    }

    /// Lines removed before any strategy saw them
    pub fn lines_skipped(&self) -> usize {
        self.supervisor_skipped + self.noise_dropped
    }

    /// Percentage of input lines that produced output
    pub fn output_rate(&self) -> f64 {
        if self.lines_read == 0 {
            0.0
        } else {
            (self.fragments_written() as f64 / self.lines_read as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "{} run: {} lines read, {} skipped, {} fragments written ({:.1}%), {} duplicates suppressed, {} pending",
            self.format,
            self.lines_read,
            self.lines_skipped(),
            self.fragments_written(),
            self.output_rate(),
            self.duplicates_suppressed,
            self.pending_left
        )
    }
}
