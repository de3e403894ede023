//! Cash dispenser (CDM) command correlation
//!
//! Dispense and present commands are asynchronous: the command, any dispenser
//! error and the completion event are written on separate, interleaved journal
//! lines. This module stitches them back together per request id.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`correlator`] - The per-run [`CdmCorrelator`] state machine and line relevance test
//! - [`result_codes`] - Mapping of completion HRESULT sections to symbolic names
//! - [`stats`] - Counters for issued, errored, completed and unmatched lines
//!
//! # Request Lifecycle
//!
//! 1. **Issued**: a command line with a `ReqID` creates (or overwrites) a pending entry
//! 2. **ErrorAttached**: a `DSP--` line attaches to the first pending entry without an error
//! 3. **Completed**: an `EventID: 302/303` completion for the same id finalizes and removes it
//!
//! Error lines carry no request id, so attachment is order based. When two
//! commands are truly concurrent the error may land on the wrong one; the log
//! offers nothing better to correlate on.
//!
//! # Example Usage
//!
//! ```rust
//! use ej_processor::app::services::cdm_correlator::CdmCorrelator;
//!
//! let mut correlator = CdmCorrelator::new();
//! let request = correlator.process_line(
//!     "12.03.2024 10:15:31.000 [TID:0x1A2B] WFS_CMD_CDM_DISPENSE ReqID: 7",
//! );
//! assert_eq!(
//!     request.as_deref(),
//!     Some("12.03.2024 10:15:31.000    WFS_CMD_CDM_DISPENSE ReqID: 7")
//! );
//! assert_eq!(correlator.pending_count(), 1);
//! ```

pub mod correlator;
pub mod result_codes;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use correlator::{CdmCorrelator, CorrelationEvent};
pub use result_codes::map_result;
pub use stats::CorrelationStats;
