//! Cash cassette reconciliation from inline dispenser telemetry
//!
//! The journal embeds a pseudo-XML snapshot of every cash unit on a single
//! `[XML:15]` line. This module parses that snapshot, totals the counters per
//! cassette, per denomination and overall, and flags cassettes whose counters
//! no longer add up to the initial load ("suspect jammed").
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`attributes`] - Prefix stripping, bare value quoting and attribute extraction
//! - [`snapshot`] - [`CassetteSnapshot`] with the five slots, labels and denomination totals
//! - [`report`] - Text report rendering and discrepancy detection
//! - [`currency`] - Thousands-grouped currency amounts
//! - [`detector`] - [`CassetteDetector`] entry point used by the report assembler
//!
//! # Reconciliation Rule
//!
//! For every dispensable cassette, `remaining + dispensed + rejected` (as
//! currency value) must equal the initial value. Reject and retract bins are
//! listed in the slot table but excluded from the money sections.
//!
//! # Example Usage
//!
//! ```rust
//! use ej_processor::app::services::cassette_detector::{CassetteDetector, format_currency};
//!
//! let line = "12.03.2024 10:16:00.000 [TID:0x1A2B] [XML:15] <cunits>\
//!             <cu n='1' v='5000000' typ='3' dc='1' ic='100' ds='60' rj='10' c='30'/>\
//!             </cunits>";
//!
//! assert!(CassetteDetector::is_cassette_data(line));
//! let report = CassetteDetector::default().process_cassette_line(line).unwrap();
//! assert!(report.contains("CASSETTE_1 (DISPENSER):\r\n"));
//! assert_eq!(format_currency(1_234_567, "Rp"), "Rp 1.234.567");
//! ```

pub mod attributes;
pub mod currency;
pub mod detector;
pub mod report;
pub mod snapshot;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use currency::format_currency;
pub use detector::CassetteDetector;
pub use report::{CassetteReport, Discrepancy, DiscrepancyScope};
pub use snapshot::{CassetteSnapshot, DenominationAggregate};
