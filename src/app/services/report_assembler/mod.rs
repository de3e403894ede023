//! Report assembly for Electronic Journal files
//!
//! This module drives one pass over a journal and writes either the
//! Comprehensive annotated log or the Standard trace-number table. Lines are
//! read once, gated by the shared supervisor-session and noise rules, then
//! handed to the strategy chosen for the run.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`processor`] - File and stream entry points, line decoding and progress
//! - [`context`] - Per-run state and the strategy selected once per run
//! - [`session`] - Supervisor session skipping and fixed noise drops
//! - [`comprehensive`] - Cassette, protocol and filtered-line routing with banners
//! - [`standard`] - Pipe-delimited rows buffered until a trace number is known
//! - [`deduplication`] - Exact-match suppression of repeated fragments
//! - [`stats`] - Run statistics
//!
//! # Routing
//!
//! In Comprehensive mode a line is tried against the cassette engine, then the
//! protocol correlator, then the keyword filter. The first component whose
//! relevance test holds owns the line; no line reaches more than one.
//!
//! # Example Usage
//!
//! ```rust
//! use ej_processor::app::services::report_assembler::{StandardParams, process_reader};
//! use ej_processor::Config;
//!
//! let journal = "12.03.2024 10:15:30.123 [TID:0x1A2B] [INFO:10] CARD INSERTED\n";
//! let mut output = Vec::new();
//!
//! let stats = process_reader(
//!     journal.as_bytes(),
//!     &mut output,
//!     &Config::default(),
//!     &StandardParams::default(),
//!     None,
//! )?;
//!
//! let report = String::from_utf8(output).unwrap();
//! assert!(report.contains("CARD INSERTED TRANSACTION"));
//! assert!(report.ends_with("12.03.2024 10:15:30.123    CARD INSERTED\n"));
//! assert_eq!(stats.separators, 1);
//! # Ok::<(), ej_processor::Error>(())
//! ```

pub mod comprehensive;
pub mod context;
pub mod deduplication;
pub mod processor;
pub mod session;
pub mod standard;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use comprehensive::ComprehensiveAssembler;
pub use context::{ReportStrategy, RunContext};
pub use deduplication::EmittedSet;
pub use processor::{process_file, process_reader};
pub use session::{LineAdmission, SessionGate};
pub use standard::{StandardAssembler, StandardParams, extract_trace_number};
pub use stats::RunStats;
