//! Comprehensive report: annotated journal with cassette and protocol sections

use super::deduplication::EmittedSet;
use super::stats::RunStats;
use crate::app::services::cassette_detector::CassetteDetector;
use crate::app::services::cdm_correlator::CdmCorrelator;
use crate::app::services::line_filter::{PatternFilter, build_separator, is_transaction_start};
use crate::config::Config;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Routes each admitted line to the cassette engine, the correlator or the
/// filter, in that order, and writes what comes back
#[derive(Debug)]
pub struct ComprehensiveAssembler {
    filter: PatternFilter,
    detector: CassetteDetector,
    correlator: CdmCorrelator,
    emitted: EmittedSet,
}

impl ComprehensiveAssembler {
    pub fn new(config: &Config) -> Self {
        Self {
            filter: PatternFilter::from_config(config),
            detector: CassetteDetector::from_config(config),
            correlator: CdmCorrelator::new(),
            emitted: EmittedSet::new(),
        }
    }

    /// Process one admitted line; every fragment is flushed once written
    pub fn process_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        stats: &mut RunStats,
    ) -> io::Result<()> {
        if CassetteDetector::is_cassette_data(line) {
            return self.write_cassette_report(line, out, stats);
        }

        if CdmCorrelator::is_cdm_data(line) {
            return self.write_protocol_line(line, out, stats);
        }

        if self.filter.classify(line) {
            return self.write_filtered_line(line, out, stats);
        }

        stats.lines_unmatched += 1;
        Ok(())
    }

    fn write_cassette_report<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        stats: &mut RunStats,
    ) -> io::Result<()> {
        if !self.emitted.first_time(line) {
            stats.duplicates_suppressed += 1;
            return Ok(());
        }

        let report = self.detector.detect(line);
        writeln!(out, "{}", report.to_crlf())?;
        out.flush()?;

        stats.cassette_reports += 1;
        stats.discrepancies += report.discrepancies().len();
        debug!(
            "Cassette report written with {} discrepancies",
            report.discrepancies().len()
        );
        Ok(())
    }

    fn write_protocol_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        stats: &mut RunStats,
    ) -> io::Result<()> {
        let Some(output) = self.correlator.process_line(line) else {
            trace!("Protocol line produced no output: {}", line);
            return Ok(());
        };

        if !self.emitted.first_time(&output) {
            stats.duplicates_suppressed += 1;
            return Ok(());
        }

        writeln!(out, "{}", output)?;
        out.flush()?;
        stats.protocol_lines += 1;
        debug!("Protocol line: {}", output);
        Ok(())
    }

    fn write_filtered_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        stats: &mut RunStats,
    ) -> io::Result<()> {
        let normalized = self.filter.normalize(line);

        if !self.emitted.first_time(&normalized) {
            stats.duplicates_suppressed += 1;
            return Ok(());
        }

        if is_transaction_start(&normalized) {
            write!(out, "{}", build_separator(&normalized))?;
            out.flush()?;
            stats.separators += 1;
        }

        writeln!(out, "{}", normalized)?;
        out.flush()?;
        stats.filtered_lines += 1;
        Ok(())
    }

    /// Copy end-of-run counters into the statistics
    pub fn finish(&self, stats: &mut RunStats) {
        stats.pending_left = self.correlator.pending_count();
        stats.protocol = self.correlator.stats().clone();
    }

    pub fn correlator(&self) -> &CdmCorrelator {
        &self.correlator
    }

    pub fn emitted(&self) -> &EmittedSet {
        &self.emitted
    }
}
