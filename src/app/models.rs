//! Data models for Electronic Journal processing
//!
//! This module contains the core data structures shared by the line filter,
//! the cash dispenser correlator, the cassette detector and the report
//! assembler. Journal lines are borrowed views over the input; correlator and
//! cassette records own their text because they outlive the line they came from.

use crate::constants::{self, cdm};
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static TIMESTAMP_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4} \d{2}:\d{2}:\d{2}\.\d{3}").unwrap());

static LEADING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[([A-Za-z]+):([^\]\s]+)\]").unwrap());

// =============================================================================
// Journal Line
// =============================================================================

/// One raw journal record
///
/// A line normally reads `DD.MM.YYYY HH:MM:SS.mmm [TID:0x..] [INFO:10] payload`.
/// The view never mutates the text; derived parts are sliced on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    raw: &'a str,
}

impl<'a> LogLine<'a> {
    /// Wrap a line produced by line-splitting, dropping a trailing carriage return
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw: raw.strip_suffix('\r').unwrap_or(raw),
        }
    }

    /// Full text of the line
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Leading `DD.MM.YYYY HH:MM:SS.mmm` timestamp, if present
    pub fn timestamp(&self) -> Option<&'a str> {
        TIMESTAMP_PREFIX.find(self.raw).map(|m| m.as_str())
    }

    /// Leading timestamp truncated to whole seconds (`DD.MM.YYYY HH:MM:SS`)
    ///
    /// The text is sliced, not parsed, so a calendar-invalid date is kept as written.
    pub fn timestamp_seconds(&self) -> Option<&'a str> {
        self.timestamp()?.get(..constants::SECONDS_TIMESTAMP_LEN)
    }

    /// Bracketed tags directly following the timestamp, in order
    pub fn tags(&self) -> Vec<JournalTag<'a>> {
        let mut rest = self.after_timestamp();
        let mut tags = Vec::new();
        while let Some(caps) = LEADING_TAG.captures(rest) {
            let (Some(whole), Some(kind), Some(value)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                break;
            };
            tags.push(JournalTag {
                kind: kind.as_str(),
                value: value.as_str(),
            });
            rest = &rest[whole.end()..];
        }
        tags
    }

    /// Free text after the timestamp and leading tags
    pub fn payload(&self) -> &'a str {
        let mut rest = self.after_timestamp();
        while let Some(whole) = LEADING_TAG.find(rest) {
            rest = &rest[whole.end()..];
        }
        rest.trim_start()
    }

    fn after_timestamp(&self) -> &'a str {
        match self.timestamp() {
            Some(timestamp) => &self.raw[timestamp.len()..],
            None => self.raw,
        }
    }
}

impl fmt::Display for LogLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

/// A `[KIND:value]` tag such as `[TID:0x1A2B]` or `[XML:15]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalTag<'a> {
    pub kind: &'a str,
    pub value: &'a str,
}

// =============================================================================
// Cash Dispenser Transactions
// =============================================================================

/// Asynchronous dispenser commands tracked by the correlator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CdmCommand {
    Dispense,
    Present,
}

impl CdmCommand {
    /// Protocol name of the command
    pub fn as_str(&self) -> &'static str {
        match self {
            CdmCommand::Dispense => cdm::CMD_DISPENSE,
            CdmCommand::Present => cdm::CMD_PRESENT,
        }
    }

    /// Detect the command named on a line; dispense wins when both appear
    pub fn detect(line: &str) -> Option<Self> {
        if line.contains(cdm::CMD_DISPENSE) {
            Some(CdmCommand::Dispense)
        } else if line.contains(cdm::CMD_PRESENT) {
            Some(CdmCommand::Present)
        } else {
            None
        }
    }
}

impl fmt::Display for CdmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error text attached to an in-flight command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachedError {
    /// Message starting with `DSP--`
    pub message: String,
    /// Digits following `MStatus`, `0` when absent
    pub status: String,
}

/// One in-flight dispenser command awaiting completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTransaction {
    pub req_id: String,
    pub command: CdmCommand,
    /// Timestamp of the command line (may be empty)
    pub issued_at: String,
    /// Service provider token trailing the request id
    pub service_provider: Option<String>,
    pub error: Option<AttachedError>,
}

impl PendingTransaction {
    /// Create an entry in the issued state
    pub fn new(
        req_id: impl Into<String>,
        command: CdmCommand,
        issued_at: impl Into<String>,
        service_provider: Option<String>,
    ) -> Self {
        Self {
            req_id: req_id.into(),
            command,
            issued_at: issued_at.into(),
            service_provider,
            error: None,
        }
    }

    /// Whether an error has already been attached
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Attach an error; returns false if one is already attached
    pub fn attach_error(&mut self, message: impl Into<String>, status: impl Into<String>) -> bool {
        if self.has_error() {
            return false;
        }
        self.error = Some(AttachedError {
            message: message.into(),
            status: status.into(),
        });
        true
    }

    /// `<ts>    <COMMAND> ReqID: <id>[ (<provider>)]`
    pub fn formatted_request(&self) -> String {
        let mut line = format!(
            "{}{}{} ReqID: {}",
            self.issued_at,
            constants::TIMESTAMP_GAP,
            self.command,
            self.req_id
        );
        if let Some(provider) = &self.service_provider {
            line.push_str(&format!(" ({})", provider));
        }
        line
    }

    /// `<request ts>    MStatus <status> <message>` once an error is attached
    pub fn formatted_error(&self) -> Option<String> {
        self.error.as_ref().map(|error| {
            format!(
                "{}{}MStatus {} {}",
                self.issued_at,
                constants::TIMESTAMP_GAP,
                error.status,
                error.message
            )
        })
    }

    /// Finalize the request with its completion result
    pub fn complete(
        self,
        result: impl Into<String>,
        completed_at: impl Into<String>,
    ) -> CompletedTransaction {
        CompletedTransaction {
            request: self,
            result: result.into(),
            completed_at: completed_at.into(),
        }
    }
}

/// A request matched with its completion event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTransaction {
    pub request: PendingTransaction,
    /// Symbolic outcome name such as `WFS_SUCCESS`
    pub result: String,
    /// Timestamp of the completion line (may be empty)
    pub completed_at: String,
}

impl CompletedTransaction {
    /// `<ts>    <result> ResID: <id>`
    pub fn formatted_response(&self) -> String {
        format!(
            "{}{}{} ResID: {}",
            self.completed_at,
            constants::TIMESTAMP_GAP,
            self.result,
            self.request.req_id
        )
    }

    /// Whether the dispenser reported success
    pub fn is_success(&self) -> bool {
        self.result == cdm::RESULT_SUCCESS
    }
}

// =============================================================================
// Cassette Snapshot
// =============================================================================

/// Cash unit type codes reported in the `typ` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CassetteType {
    Reject,
    Dispenser,
    Retract,
    Other(i64),
    #[default]
    Unknown,
}

impl CassetteType {
    /// Numeric code as written in the telemetry
    pub fn code(&self) -> i64 {
        match self {
            CassetteType::Reject => 2,
            CassetteType::Dispenser => 3,
            CassetteType::Retract => 6,
            CassetteType::Other(code) => *code,
            CassetteType::Unknown => 0,
        }
    }

    /// Reject and retract bins hold no dispensable stock
    pub fn is_financial(&self) -> bool {
        !matches!(self, CassetteType::Reject | CassetteType::Retract)
    }

    /// Prefix of the cash total label for this type, if it has one
    pub fn label_prefix(&self) -> Option<&'static str> {
        match self {
            CassetteType::Reject => Some("REJECT_"),
            CassetteType::Dispenser => Some("CASSETTE_"),
            CassetteType::Retract => Some("RETRACT_"),
            _ => None,
        }
    }
}

impl From<i64> for CassetteType {
    fn from(code: i64) -> Self {
        match code {
            0 => CassetteType::Unknown,
            2 => CassetteType::Reject,
            3 => CassetteType::Dispenser,
            6 => CassetteType::Retract,
            other => CassetteType::Other(other),
        }
    }
}

/// One physical cash unit as reported by a single telemetry line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CassetteSlot {
    /// 1-based slot number
    pub index: usize,
    /// Note value in major currency units
    pub denomination: i64,
    pub cassette_type: CassetteType,
    pub initial: i64,
    pub dispensed: i64,
    pub rejected: i64,
    pub remaining: i64,
}

impl CassetteSlot {
    /// Empty slot at the given 1-based position
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Any counter is nonzero
    pub fn is_active(&self) -> bool {
        self.initial > 0 || self.dispensed > 0 || self.rejected > 0 || self.remaining > 0
    }

    /// Active slot holding dispensable stock
    pub fn is_financial(&self) -> bool {
        self.is_active() && self.cassette_type.is_financial()
    }

    pub fn initial_amount(&self) -> i64 {
        self.initial.saturating_mul(self.denomination)
    }

    pub fn dispensed_amount(&self) -> i64 {
        self.dispensed.saturating_mul(self.denomination)
    }

    pub fn rejected_amount(&self) -> i64 {
        self.rejected.saturating_mul(self.denomination)
    }

    pub fn remaining_amount(&self) -> i64 {
        self.remaining.saturating_mul(self.denomination)
    }

    /// Remaining + dispensed + rejected value
    ///
    /// Amounts saturate at `i64::MAX` instead of overflowing.
    pub fn total_amount(&self) -> i64 {
        self.remaining_amount()
            .saturating_add(self.dispensed_amount())
            .saturating_add(self.rejected_amount())
    }

    /// Fallback label when no cash total label exists for this slot
    pub fn default_label(&self) -> String {
        format!("CASSETTE_{}", self.index)
    }
}

// =============================================================================
// Report Format
// =============================================================================

/// Output strategy chosen once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Annotated log with separators, correlated CDM lines and cassette reports
    #[default]
    Comprehensive,
    /// Pipe-delimited rows keyed by trace number
    Standard,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Comprehensive => "comprehensive",
            ReportFormat::Standard => "standard",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comprehensive" => Ok(ReportFormat::Comprehensive),
            "standard" => Ok(ReportFormat::Standard),
            other => Err(Error::data_validation(format!(
                "Unknown report format '{}'. Expected 'comprehensive' or 'standard'",
                other
            ))),
        }
    }
}
