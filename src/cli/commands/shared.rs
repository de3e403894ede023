//! Shared components for CLI commands
//!
//! This module contains the logging, configuration and progress helpers used
//! by more than one command.

use crate::app::models::ReportFormat;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` overrides the level derived from the command line. A second
/// call in the same process keeps the first subscriber.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ej_processor={}", log_level)));

    let result = if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        debug!("Logging already initialized: {}", e);
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (explicit file -> default file -> defaults)
pub fn load_configuration(config_file: Option<&Path>, format: ReportFormat) -> Result<Config> {
    info!("Loading configuration");

    let config = Config::load_layered(config_file)?.with_format(format);

    // Final validation
    config.validate()?;

    debug!(
        "Loaded {} keyword patterns and {} remove patterns",
        config.keyword_patterns.len(),
        config.remove_patterns.len()
    );
    Ok(config)
}

/// Create the directory a report will be written into
pub fn prepare_output_directory(output: &Path) -> Result<()> {
    let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::configuration(format!(
                "Failed to create output directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
        info!("Created output directory: {}", parent.display());
    }

    Ok(())
}

/// Create a byte-based progress bar with appropriate styling
pub fn create_progress_bar(total_bytes: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {msg} [{bytes_per_sec}] ETA: {eta}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_prepare_output_directory_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("EJParse").join("nested").join("EJ_T001_12032024.txt");

        prepare_output_directory(&output).unwrap();
        assert!(output.parent().unwrap().is_dir());

        // Existing directory and bare file names are fine
        prepare_output_directory(&output).unwrap();
        prepare_output_directory(Path::new("report.txt")).unwrap();
    }

    #[test]
    fn test_load_configuration_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logKeywordPatterns=CARD INSERTED,RRN").unwrap();

        let config = load_configuration(Some(file.path()), ReportFormat::Standard).unwrap();
        assert_eq!(config.keyword_patterns, vec!["CARD INSERTED", "RRN"]);
        assert_eq!(config.format, ReportFormat::Standard);
    }

    #[test]
    fn test_load_configuration_missing_file() {
        let result = load_configuration(
            Some(Path::new("/nonexistent/config.ini")),
            ReportFormat::Comprehensive,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(2048, "Processing journal");
        assert_eq!(pb.length(), Some(2048));
        assert_eq!(pb.message(), "Processing journal");
    }
}
