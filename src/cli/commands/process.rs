//! Process command implementation for the EJ processor CLI
//!
//! This module runs one journal through the report assembler and prints the
//! run summary.

use super::shared::{
    create_progress_bar, load_configuration, prepare_output_directory, setup_logging,
};
use crate::app::models::ReportFormat;
use crate::app::services::report_assembler::{RunStats, process_file};
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::{Error, Result};
use colored::*;
use indicatif::HumanDuration;
use std::path::Path;
use tracing::{debug, info};

/// Process command runner
///
/// This function orchestrates one run:
/// 1. Set up logging and validate arguments
/// 2. Load configuration and resolve the output path
/// 3. Process the journal on a blocking task with progress reporting
/// 4. Print the run summary
pub async fn run_process(args: ProcessArgs) -> Result<RunStats> {
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting EJ processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(args.config_file.as_deref(), args.report_format())?;
    let output = args.output_path()?;
    prepare_output_directory(&output)?;

    let params = args.standard_params();
    let input = args.input.clone();
    let total_bytes = std::fs::metadata(&input).map(|m| m.len()).unwrap_or(0);

    let progress = args
        .show_progress()
        .then(|| create_progress_bar(total_bytes, "Processing journal"));

    let task_output = output.clone();
    let task_progress = progress.clone();
    let stats = tokio::task::spawn_blocking(move || {
        process_file(
            &input,
            &task_output,
            &config,
            &params,
            task_progress.as_ref(),
        )
    })
    .await
    .map_err(|e| Error::processing_interrupted(format!("Processing task failed: {}", e)))??;

    if let Some(pb) = progress {
        pb.finish_with_message("Journal processed");
    }

    info!("{}", stats.summary());
    info!("{}", stats.protocol.summary());

    generate_final_report(&args, &output, &stats)?;
    Ok(stats)
}

/// Generate final report in the requested format
fn generate_final_report(args: &ProcessArgs, output: &Path, stats: &RunStats) -> Result<()> {
    info!("Generating final report");

    match args.output_format {
        OutputFormat::Human => generate_human_report(output, stats),
        OutputFormat::Json => generate_json_report(output, stats),
    }
}

/// Generate human-readable report
fn generate_human_report(output: &Path, stats: &RunStats) -> Result<()> {
    let duration = HumanDuration(stats.processing_time);

    println!("\n🎉 {}", "EJ Processing Complete!".bright_green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📊 Processing Summary:");
    println!("   • {} {}", "Format:".bright_cyan(), stats.format);
    println!("   • {} {}", "Lines read:".bright_cyan(), stats.lines_read);
    println!(
        "   • {} {}",
        "Supervisor lines skipped:".bright_cyan(),
        stats.supervisor_skipped
    );
    println!("   • {} {}", "Noise lines dropped:".bright_cyan(), stats.noise_dropped);

    match stats.format {
        ReportFormat::Comprehensive => {
            println!("   • {} {}", "Filtered lines:".bright_cyan(), stats.filtered_lines);
            println!("   • {} {}", "Transactions:".bright_cyan(), stats.separators);
            println!("   • {} {}", "Protocol lines:".bright_cyan(), stats.protocol_lines);
            println!("   • {} {}", "Cassette reports:".bright_cyan(), stats.cassette_reports);
            println!(
                "   • {} {}",
                "Duplicates suppressed:".bright_cyan(),
                stats.duplicates_suppressed
            );
        }
        ReportFormat::Standard => {
            println!("   • {} {}", "Rows written:".bright_cyan(), stats.rows_written);
            println!(
                "   • {} {}",
                "Rows without trace number:".bright_cyan(),
                stats.rows_dropped
            );
        }
    }
    println!("   • {} {}", "Processing time:".bright_cyan(), duration);

    if stats.discrepancies > 0 {
        println!(
            "⚠️  {} {}",
            "Cassette discrepancies:".bright_red(),
            stats.discrepancies.to_string().bright_red().bold()
        );
    }

    if stats.pending_left > 0 {
        println!(
            "⚠️  {} {}",
            "Dispenser requests without completion:".bright_yellow(),
            stats.pending_left
        );
    }

    println!("\n📁 Output File:");
    println!("   • {}", output.display().to_string().bright_white());

    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(output: &Path, stats: &RunStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "output_file": output.display().to_string(),
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "stats": stats,
    });

    let rendered = serde_json::to_string_pretty(&json_stats)
        .map_err(|e| Error::data_validation(format!("Failed to render JSON summary: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::ReportFormatArg;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, TempDir};

    fn process_args(input: PathBuf, output_dir: PathBuf, format: ReportFormatArg) -> ProcessArgs {
        ProcessArgs {
            input,
            output: None,
            output_dir,
            tid: Some("T001".to_string()),
            date: Some("12032024".to_string()),
            participant_id: "200".to_string(),
            format,
            config_file: None,
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Json,
        }
    }

    #[tokio::test]
    async fn test_run_process_standard() {
        let temp_dir = TempDir::new().unwrap();
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "12.03.2024 10:15:30.123 [TID:0x1A2B] [INFO:10] CARD INSERTED").unwrap();
        writeln!(input, "12.03.2024 10:15:45.900 [TID:0x1A2B] [INFO:10] RRN 123456").unwrap();

        let output_dir = temp_dir.path().join("EJParse");
        let args = process_args(
            input.path().to_path_buf(),
            output_dir.clone(),
            ReportFormatArg::Standard,
        );

        let stats = run_process(args).await.unwrap();
        assert_eq!(stats.rows_written, 2);

        let report = std::fs::read_to_string(output_dir.join("EJ_T001_12032024.txt")).unwrap();
        assert!(report.starts_with("TID|Trace Number|Participant ID|"));
        assert!(report.contains(
            "T001|123456|200|12.03.2024 10:15:45|12.03.2024 10:15:30|CARD INSERTED"
        ));
    }

    #[tokio::test]
    async fn test_run_process_rejects_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let args = process_args(
            temp_dir.path().join("missing.txt"),
            temp_dir.path().to_path_buf(),
            ReportFormatArg::Comprehensive,
        );

        let result = run_process(args).await;
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_json_report_renders() {
        let stats = RunStats::default();
        assert!(generate_json_report(Path::new("out.txt"), &stats).is_ok());
    }
}
