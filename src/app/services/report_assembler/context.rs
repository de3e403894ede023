//! Per-run state shared by both output strategies

use super::comprehensive::ComprehensiveAssembler;
use super::session::{LineAdmission, SessionGate};
use super::standard::{StandardAssembler, StandardParams};
use super::stats::RunStats;
use crate::app::models::ReportFormat;
use crate::config::Config;
use std::io::{self, Write};

/// Output strategy selected once per run
#[derive(Debug)]
pub enum ReportStrategy {
    Comprehensive(ComprehensiveAssembler),
    Standard(StandardAssembler),
}

impl ReportStrategy {
    pub fn for_format(format: ReportFormat, config: &Config, params: StandardParams) -> Self {
        match format {
            ReportFormat::Comprehensive => Self::Comprehensive(ComprehensiveAssembler::new(config)),
            ReportFormat::Standard => Self::Standard(StandardAssembler::new(config, params)),
        }
    }

    pub fn format(&self) -> ReportFormat {
        match self {
            Self::Comprehensive(_) => ReportFormat::Comprehensive,
            Self::Standard(_) => ReportFormat::Standard,
        }
    }
}

/// Everything one processing run owns: session gate, strategy and counters
///
/// A fresh context starts with an empty pending set and an empty set of
/// emitted fragments, so runs never see each other's state.
#[derive(Debug)]
pub struct RunContext {
    gate: SessionGate,
    strategy: ReportStrategy,
    stats: RunStats,
}

impl RunContext {
    /// Build a context for the format configured in `config`
    pub fn new(config: &Config, params: StandardParams) -> Self {
        let strategy = ReportStrategy::for_format(config.format, config, params);
        Self {
            gate: SessionGate::new(),
            stats: RunStats::new(strategy.format()),
            strategy,
        }
    }

    /// Write anything that precedes the first line
    pub fn begin<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match &self.strategy {
            ReportStrategy::Comprehensive(_) => Ok(()),
            ReportStrategy::Standard(assembler) => assembler.write_header(out),
        }
    }

    /// Gate one line and hand it to the strategy
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        self.stats.lines_read += 1;

        match self.gate.admit(line) {
            LineAdmission::SupervisorSkipped => {
                self.stats.supervisor_skipped += 1;
                return Ok(());
            }
            LineAdmission::Noise => {
                self.stats.noise_dropped += 1;
                return Ok(());
            }
            LineAdmission::Accepted => {}
        }

        match &mut self.strategy {
            ReportStrategy::Comprehensive(assembler) => {
                assembler.process_line(line, out, &mut self.stats)
            }
            ReportStrategy::Standard(assembler) => {
                assembler.process_line(line, out, &mut self.stats)
            }
        }
    }

    /// Close the run and return its statistics
    pub fn finish(mut self) -> RunStats {
        match &mut self.strategy {
            ReportStrategy::Comprehensive(assembler) => assembler.finish(&mut self.stats),
            ReportStrategy::Standard(assembler) => assembler.finish(&mut self.stats),
        }
        self.stats
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn strategy(&self) -> &ReportStrategy {
        &self.strategy
    }

    pub fn in_supervisor_session(&self) -> bool {
        self.gate.in_supervisor_session()
    }
}
