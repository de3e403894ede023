//! Standard report: pipe-delimited rows keyed by trace number

use super::stats::RunStats;
use crate::app::models::LogLine;
use crate::app::services::line_filter::PatternFilter;
use crate::config::Config;
use crate::constants;
use regex::Regex;
use std::io::{self, Write};
use std::sync::LazyLock;
use tracing::debug;

static TRACE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"RRN\s*(\d+)").unwrap());

/// Caller-supplied identifiers written into every Standard row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardParams {
    pub tid: String,
    pub participant_id: String,
}

impl StandardParams {
    pub fn new(tid: impl Into<String>, participant_id: impl Into<String>) -> Self {
        Self {
            tid: tid.into(),
            participant_id: participant_id.into(),
        }
    }
}

/// Row waiting for the trace number of its transaction
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingRow {
    journal_time: String,
    text: String,
}

/// Writes `[INFO:10]` and `[PRINT:10]` lines as rows under the current trace number
///
/// Rows seen inside a transaction before its trace number are held back and
/// written with the first trace number that follows.
#[derive(Debug)]
pub struct StandardAssembler {
    filter: PatternFilter,
    params: StandardParams,
    in_transaction: bool,
    trace_number: String,
    transaction_time: String,
    buffer: Vec<PendingRow>,
}

impl StandardAssembler {
    pub fn new(config: &Config, params: StandardParams) -> Self {
        Self {
            filter: PatternFilter::from_config(config),
            params,
            in_transaction: false,
            trace_number: String::new(),
            transaction_time: String::new(),
            buffer: Vec::new(),
        }
    }

    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", constants::STANDARD_HEADER)?;
        out.flush()
    }

    /// Process one admitted line
    pub fn process_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        stats: &mut RunStats,
    ) -> io::Result<()> {
        if line.contains(constants::CARD_INSERTED) {
            self.in_transaction = true;
            stats.rows_dropped += self.buffer.len();
            self.buffer.clear();
        }

        let log_line = LogLine::new(line);

        if let Some(trace_number) = extract_trace_number(line) {
            self.trace_number = trace_number.to_string();
            self.transaction_time = seconds_timestamp(&log_line).unwrap_or_default();
            debug!(
                "Trace number {} at {}, flushing {} buffered rows",
                self.trace_number,
                self.transaction_time,
                self.buffer.len()
            );

            for row in std::mem::take(&mut self.buffer) {
                self.write_row(out, &row.journal_time, &row.text)?;
                stats.rows_written += 1;
            }
            out.flush()?;
        }

        if !line.contains(constants::INFO_10_TAG) && !line.contains(constants::PRINT_10_TAG) {
            stats.lines_unmatched += 1;
            return Ok(());
        }

        let Some(journal_time) = seconds_timestamp(&log_line) else {
            stats.lines_unmatched += 1;
            return Ok(());
        };
        let text = self.filter.clean_content(line);

        if self.has_trace() {
            self.write_row(out, &journal_time, &text)?;
            out.flush()?;
            stats.rows_written += 1;
        } else if self.in_transaction {
            self.buffer.push(PendingRow { journal_time, text });
        } else {
            stats.rows_dropped += 1;
        }

        Ok(())
    }

    /// Count rows still waiting for a trace number as dropped
    pub fn finish(&mut self, stats: &mut RunStats) {
        stats.rows_dropped += self.buffer.len();
        self.buffer.clear();
    }

    /// Both a trace number and its transaction time are known
    pub fn has_trace(&self) -> bool {
        !self.trace_number.is_empty() && !self.transaction_time.is_empty()
    }

    pub fn trace_number(&self) -> &str {
        &self.trace_number
    }

    pub fn buffered_rows(&self) -> usize {
        self.buffer.len()
    }

    fn write_row<W: Write>(&self, out: &mut W, journal_time: &str, text: &str) -> io::Result<()> {
        let d = constants::STANDARD_DELIMITER;
        writeln!(
            out,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            self.params.tid,
            self.trace_number,
            self.params.participant_id,
            self.transaction_time,
            journal_time,
            text
        )
    }
}

/// Digits following an `RRN` marker
pub fn extract_trace_number(line: &str) -> Option<&str> {
    TRACE_NUMBER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn seconds_timestamp(line: &LogLine<'_>) -> Option<String> {
    line.timestamp_seconds().map(str::to_string)
}
