//! Command-line argument definitions for the EJ processor
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::models::ReportFormat;
use crate::app::services::report_assembler::StandardParams;
use crate::constants::{
    DEFAULT_OUTPUT_DIR, DEFAULT_PARTICIPANT_ID, FILE_DATE_FORMAT, LOG_LEVEL_DEBUG,
    LOG_LEVEL_ERROR, LOG_LEVEL_INFO, LOG_LEVEL_TRACE, LOG_LEVEL_WARN, PARTICIPANT_IDS,
    REPORT_FILE_PREFIX,
};
use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::warn;

/// CLI arguments for the ATM Electronic Journal processor
///
/// Turns raw ATM journal logs into an annotated comprehensive report or a
/// pipe-delimited table keyed by trace number.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ej-processor",
    version,
    about = "Normalize ATM Electronic Journal logs into annotated reports",
    long_about = "Reads an ATM Electronic Journal log in one pass and writes either a \
                  comprehensive annotated report (filtered lines, transaction banners, \
                  correlated cash dispenser commands and cassette reconciliation) or a \
                  standard pipe-delimited table of journal lines keyed by trace number."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the EJ processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process a journal file into a report (main command)
    Process(ProcessArgs),
    /// Show the effective keyword and remove patterns
    Patterns(PatternsArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Electronic Journal log file to read
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Electronic Journal log file to process"
    )]
    pub input: PathBuf,

    /// Explicit report path
    ///
    /// When omitted the report is written to
    /// `<output-dir>/EJ_<TID>_<DDMMYYYY>.txt`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Report file to write (default: <output-dir>/EJ_<TID>_<DDMMYYYY>.txt)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory for generated reports"
    )]
    pub output_dir: PathBuf,

    /// Terminal identifier
    ///
    /// Written into every Standard row and used in the default file name.
    #[arg(long = "tid", value_name = "TID", help = "Terminal ID of the ATM")]
    pub tid: Option<String>,

    /// Journal date as DDMMYYYY, used in the default file name
    #[arg(
        long = "date",
        value_name = "DDMMYYYY",
        help = "Journal date for the report file name (default: today)"
    )]
    pub date: Option<String>,

    #[arg(
        long = "participant-id",
        value_name = "ID",
        default_value = DEFAULT_PARTICIPANT_ID,
        help = "Participant ID written into Standard rows (200, 008, 002 or 009)"
    )]
    pub participant_id: String,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "comprehensive",
        help = "Report format"
    )]
    pub format: ReportFormatArg,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to pattern configuration file (key=value format)"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the patterns command
#[derive(Debug, Clone, Parser)]
pub struct PatternsArgs {
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to pattern configuration file (key=value format)"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the pattern listing"
    )]
    pub output_format: OutputFormat,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Report format as selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Comprehensive,
    Standard,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Comprehensive => ReportFormat::Comprehensive,
            ReportFormatArg::Standard => ReportFormat::Standard,
        }
    }
}

/// Output format for command results
#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

impl Args {
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}

impl ProcessArgs {
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::file_not_found(self.input.display().to_string()));
        }

        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.input.display()
            )));
        }

        let tid_required =
            self.output.is_none() || self.report_format() == ReportFormat::Standard;
        if tid_required && self.tid().is_none() {
            return Err(Error::configuration(
                "A terminal ID (--tid) is required for Standard reports and default file names"
                    .to_string(),
            ));
        }

        self.report_date()?;

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    pub fn report_format(&self) -> ReportFormat {
        self.format.into()
    }

    /// Trimmed terminal id, if one was given
    pub fn tid(&self) -> Option<&str> {
        self.tid
            .as_deref()
            .map(str::trim)
            .filter(|tid| !tid.is_empty())
    }

    /// Date from `--date`, or today
    pub fn report_date(&self) -> Result<NaiveDate> {
        match &self.date {
            Some(date) => NaiveDate::parse_from_str(date.trim(), FILE_DATE_FORMAT).map_err(|e| {
                Error::datetime_parsing(format!("Invalid date '{}', expected DDMMYYYY", date), e)
            }),
            None => Ok(Local::now().date_naive()),
        }
    }

    /// Participant id for Standard rows; unknown ids fall back to the default
    pub fn participant_id(&self) -> &str {
        let participant_id = self.participant_id.trim();
        if PARTICIPANT_IDS.contains(&participant_id) {
            participant_id
        } else {
            warn!(
                "Unknown participant ID '{}', using {}",
                participant_id, DEFAULT_PARTICIPANT_ID
            );
            DEFAULT_PARTICIPANT_ID
        }
    }

    /// Caller identifiers for Standard rows
    pub fn standard_params(&self) -> StandardParams {
        StandardParams::new(self.tid().unwrap_or_default(), self.participant_id())
    }

    /// Explicit `--output`, else `<output-dir>/EJ_<TID>_<DDMMYYYY>.txt`
    pub fn output_path(&self) -> Result<PathBuf> {
        if let Some(output) = &self.output {
            return Ok(output.clone());
        }

        let tid = self.tid().ok_or_else(|| {
            Error::configuration("A terminal ID (--tid) is required for the default file name")
        })?;
        let date = self.report_date()?.format(FILE_DATE_FORMAT);

        Ok(self
            .output_dir
            .join(format!("{}{}_{}.txt", REPORT_FILE_PREFIX, tid, date)))
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            LOG_LEVEL_ERROR
        } else {
            log_level_for(self.verbose)
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl PatternsArgs {
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => LOG_LEVEL_WARN,
        1 => LOG_LEVEL_INFO,
        2 => LOG_LEVEL_DEBUG,
        _ => LOG_LEVEL_TRACE,
    }
}
