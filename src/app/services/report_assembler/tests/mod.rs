//! Tests for report assembly
//!
//! Journal fixtures shared by the strategy and processor tests.

pub mod session_tests;

use crate::app::models::ReportFormat;
use crate::app::services::report_assembler::{RunStats, StandardParams, process_reader};
use crate::config::Config;

/// Journal line with the usual terminal and level tags
pub fn journal_line(time: &str, level: &str, text: &str) -> String {
    format!("12.03.2024 {} [TID:0x1A2B] [{}] {}", time, level, text)
}

/// Cassette telemetry line with one balanced 50 cassette and one jammed 100 cassette
pub fn telemetry_line(time: &str) -> String {
    format!(
        "12.03.2024 {} [TID:0x1A2B] [XML:15] <cunits count='2'>\
         <cu n='1' v='5000' typ='3' dc='1' ic='100' ds='60' rj='10' c='30'/>\
         <cu n='2' v='10000' typ='3' dc='2' ic='200' ds='20' rj='0' c='170'/>\
         </cunits>",
        time
    )
}

/// Run a whole journal through `process_reader` and return the report text
pub fn run(lines: &[String], format: ReportFormat, params: &StandardParams) -> (String, RunStats) {
    let journal = lines.join("\n");
    let config = Config::default().with_format(format);
    let mut output = Vec::new();

    let stats = process_reader(journal.as_bytes(), &mut output, &config, params, None).unwrap();
    (String::from_utf8(output).unwrap(), stats)
}

/// Standard parameters used across tests
pub fn standard_params() -> StandardParams {
    StandardParams::new("T001", "P01")
}
