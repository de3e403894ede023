//! Line filtering and transaction segmentation for journal lines
//!
//! This module decides which journal lines are worth reporting and rewrites
//! their prefix into a compact `timestamp + 4 spaces + content` form. It also
//! recognises the lines that open a customer transaction so the report can
//! insert a banner before them.
//!
//! # Architecture
//!
//! The module is organized into two components:
//! - [`filter`] - Keyword allow-list, fixed exclusions and remove-pattern rewriting
//! - [`segmenter`] - Transaction start detection and banner separators
//!
//! # Pattern Handling
//!
//! Keyword and remove patterns come from configuration as regex sources.
//! A pattern that does not compile is still honoured as a literal substring,
//! so a bad configuration entry narrows matching but never stops a run.
//!
//! # Example Usage
//!
//! ```rust
//! use ej_processor::app::services::line_filter::{PatternFilter, is_transaction_start};
//! use ej_processor::Config;
//!
//! let filter = PatternFilter::from_config(&Config::default());
//! let line = "12.03.2024 10:15:30.123 [TID:0x1A2B] [INFO:10] CARD INSERTED";
//!
//! assert!(filter.classify(line));
//! assert_eq!(filter.normalize(line), "12.03.2024 10:15:30.123    CARD INSERTED");
//! assert!(is_transaction_start(line));
//! ```

pub mod filter;
pub mod segmenter;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use filter::PatternFilter;
pub use segmenter::{build_separator, is_transaction_start, transaction_label};
