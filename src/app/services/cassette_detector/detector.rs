//! Entry point for cassette telemetry lines

use super::report::CassetteReport;
use super::snapshot::CassetteSnapshot;
use crate::config::Config;
use crate::constants;
use tracing::debug;

/// Turns `[XML:15]` cash unit lines into status reports
#[derive(Debug, Clone)]
pub struct CassetteDetector {
    currency_symbol: String,
}

impl Default for CassetteDetector {
    fn default() -> Self {
        Self::new(constants::DEFAULT_CURRENCY_SYMBOL)
    }
}

impl CassetteDetector {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.currency_symbol.clone())
    }

    /// Lines carrying the telemetry tag and the cash unit container
    pub fn is_cassette_data(line: &str) -> bool {
        line.contains(constants::XML_15_TAG) && line.contains(constants::CASH_UNITS_OPEN)
    }

    /// Parse and reconcile one telemetry line
    pub fn detect(&self, line: &str) -> CassetteReport {
        let snapshot = CassetteSnapshot::parse(line);
        let report = CassetteReport::render(&snapshot, &self.currency_symbol);

        debug!(
            "Cassette snapshot: {} active slots, {} discrepancies",
            snapshot.active_slots().count(),
            report.discrepancies().len()
        );
        report
    }

    /// Report text for one telemetry line with `\n` line endings
    pub fn parse_snapshot(&self, line: &str) -> String {
        self.detect(line).text().to_string()
    }

    /// Report with `\r\n` line endings, or `None` for non-telemetry lines
    pub fn process_cassette_line(&self, line: &str) -> Option<String> {
        Self::is_cassette_data(line).then(|| self.detect(line).to_crlf())
    }
}
