//! Per-run correlation of dispenser commands, errors and completions

use super::result_codes::map_result;
use super::stats::CorrelationStats;
use crate::app::models::{CdmCommand, CompletedTransaction, LogLine, PendingTransaction};
use crate::constants::{self, cdm};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

static DISPENSE_REQUEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"WFS_CMD_CDM_DISPENSE.*ReqID:\s*(\d+)(?:\s+(\w+))?").unwrap()
});

static PRESENT_REQUEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"WFS_CMD_CDM_PRESENT.*ReqID:\s*(\d+)(?:\s+(\w+))?").unwrap()
});

static COMPLETION_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"EventID:\s*30[23]\b").unwrap());

static COMPLETION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"WFS_EXECUTE_COMPLETE.*?(\d+)\s+EventID:\s*(30[23])\b\s*HR:\s*(.+)").unwrap()
});

static DSP_ERROR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"DSP--(.+)").unwrap());

static MSTATUS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"MStatus\s+(\d+)").unwrap());

/// One report fragment produced by the correlator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrelationEvent {
    /// A command was issued
    Request(PendingTransaction),
    /// An error was attached to the pending entry shown
    Error(PendingTransaction),
    /// A pending entry was completed and removed
    Response(CompletedTransaction),
}

impl CorrelationEvent {
    /// Report line for this event
    pub fn render(&self) -> String {
        match self {
            CorrelationEvent::Request(pending) => pending.formatted_request(),
            CorrelationEvent::Error(pending) => pending.formatted_error().unwrap_or_default(),
            CorrelationEvent::Response(completed) => completed.formatted_response(),
        }
    }
}

/// Matches asynchronous CDM command, error and completion lines
///
/// The pending set keeps insertion order: error attachment walks it from the
/// oldest entry. Re-issuing a request id replaces the entry in its original slot.
#[derive(Debug, Default)]
pub struct CdmCorrelator {
    pending: Vec<PendingTransaction>,
    stats: CorrelationStats,
}

impl CdmCorrelator {
    /// Create a correlator with an empty pending set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a line belongs to the dispenser protocol
    ///
    /// Completion lines qualify only with event 302 or 303, with or without a
    /// space after `EventID:`; status polls and `[DEBUG:20]` diagnostics never
    /// qualify.
    pub fn is_cdm_data(line: &str) -> bool {
        if line.contains(constants::DEBUG_20_TAG) || line.contains(constants::GETINFO_COMPLETE) {
            return false;
        }

        if CdmCommand::detect(line).is_some() {
            return true;
        }

        if line.contains(cdm::EXECUTE_COMPLETE) {
            return COMPLETION_EVENT.is_match(line);
        }

        line.contains(cdm::ERROR_MARKER)
    }

    /// Process one line and return the report text it produces, if any
    pub fn process_line(&mut self, line: &str) -> Option<String> {
        self.process(line).map(|event| event.render())
    }

    /// Process one line and return the correlation event it produces, if any
    pub fn process(&mut self, line: &str) -> Option<CorrelationEvent> {
        let log_line = LogLine::new(line);
        let timestamp = log_line.timestamp().unwrap_or_default();

        if let Some(command) = CdmCommand::detect(line) {
            return self.handle_request(line, command, timestamp);
        }

        if is_dsp_error(line) && !self.pending.is_empty() {
            return self.handle_error(line);
        }

        if line.contains(cdm::EXECUTE_COMPLETE) {
            return self.handle_completion(line, timestamp);
        }

        None
    }

    /// Drop all pending entries and counters
    pub fn clear(&mut self) {
        self.pending.clear();
        self.stats = CorrelationStats::new();
    }

    /// Number of requests still awaiting completion
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pending entries in insertion order
    pub fn pending(&self) -> &[PendingTransaction] {
        &self.pending
    }

    /// Counters for this run
    pub fn stats(&self) -> &CorrelationStats {
        &self.stats
    }

    fn handle_request(
        &mut self,
        line: &str,
        command: CdmCommand,
        timestamp: &str,
    ) -> Option<CorrelationEvent> {
        let caps = DISPENSE_REQUEST
            .captures(line)
            .or_else(|| PRESENT_REQUEST.captures(line));

        let Some(caps) = caps else {
            trace!("CDM command without request id: {}", line);
            return None;
        };

        let req_id = caps.get(1)?.as_str();
        let service_provider = caps.get(2).map(|m| m.as_str().to_string());
        let entry = PendingTransaction::new(req_id, command, timestamp, service_provider);

        match self.pending.iter_mut().find(|p| p.req_id == req_id) {
            Some(existing) => {
                debug!("Request {} re-issued, replacing pending entry", req_id);
                *existing = entry.clone();
                self.stats.requests_overwritten += 1;
            }
            None => self.pending.push(entry.clone()),
        }
        self.stats.requests_issued += 1;

        Some(CorrelationEvent::Request(entry))
    }

    fn handle_error(&mut self, line: &str) -> Option<CorrelationEvent> {
        let Some(message) = extract_error_message(line) else {
            trace!("DSP-- line without message: {}", line);
            return None;
        };
        let status = MSTATUS
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(cdm::DEFAULT_MSTATUS);

        match self.pending.iter_mut().find(|p| !p.has_error()) {
            Some(pending) => {
                pending.attach_error(message, status);
                self.stats.errors_attached += 1;
                debug!("Attached dispenser error to request {}", pending.req_id);
                Some(CorrelationEvent::Error(pending.clone()))
            }
            None => {
                trace!("No error-free pending request for: {}", line);
                self.stats.errors_unattached += 1;
                None
            }
        }
    }

    fn handle_completion(&mut self, line: &str, timestamp: &str) -> Option<CorrelationEvent> {
        let Some(caps) = COMPLETION.captures(line) else {
            trace!("Completion line without dispense event: {}", line);
            return None;
        };

        let req_id = caps.get(1)?.as_str();
        let result = map_result(caps.get(3)?.as_str());

        let Some(position) = self.pending.iter().position(|p| p.req_id == req_id) else {
            trace!("Completion for unknown request {}", req_id);
            self.stats.completions_unmatched += 1;
            return None;
        };

        let completed = self.pending.remove(position).complete(result, timestamp);
        self.stats.completions_matched += 1;

        Some(CorrelationEvent::Response(completed))
    }
}

/// `DSP--` marker present on a line that is not a `[DEBUG:20]` diagnostic
fn is_dsp_error(line: &str) -> bool {
    !line.contains(constants::DEBUG_20_TAG) && line.contains(cdm::ERROR_MARKER)
}

/// `DSP--` followed by the remainder of the line, trailing whitespace removed
fn extract_error_message(line: &str) -> Option<String> {
    let remainder = DSP_ERROR.captures(line)?.get(1)?.as_str();
    Some(format!("{}{}", cdm::ERROR_MARKER, remainder.trim_end()))
}
