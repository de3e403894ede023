//! EJ Processor Library
//!
//! A Rust library for turning raw ATM "Electronic Journal" device logs into
//! normalized, human-readable reports.
//!
//! This library provides tools for:
//! - Classifying journal lines and rewriting their timestamp/tag prefix
//! - Marking transaction boundaries with banner separators
//! - Correlating asynchronous cash-dispenser (CDM) commands with their
//!   error and completion events
//! - Reconciling inline cassette telemetry and flagging suspected jams
//! - Assembling a comprehensive annotated log or a trace-number keyed table

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod cassette_detector;
        pub mod cdm_correlator;
        pub mod line_filter;
        pub mod report_assembler;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CassetteSlot, CassetteType, LogLine, PendingTransaction, ReportFormat};
pub use config::Config;

/// Result type alias for the EJ processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for EJ processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input journal could not be opened or read
    #[error("Failed to read input journal '{path}': {source}")]
    InputUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Output report could not be created or written
    #[error("Failed to write output report '{path}': {source}")]
    OutputUnwritable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an unreadable input error
    pub fn input_unreadable(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::InputUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create an unwritable output error
    pub fn output_unwritable(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::OutputUnwritable {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}
