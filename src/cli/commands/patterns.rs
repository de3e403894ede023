//! Patterns command implementation
//!
//! Prints the keyword and remove patterns a run would use, after the
//! configuration file has been applied, and whether each one is matched as
//! a regex or literally.

use super::shared::{load_configuration, setup_logging};
use crate::app::models::ReportFormat;
use crate::app::services::line_filter::PatternFilter;
use crate::cli::args::{OutputFormat, PatternsArgs};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use regex::Regex;
use tracing::info;

/// Patterns command runner
pub async fn run_patterns(args: PatternsArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false)?;
    args.validate()?;

    let config = load_configuration(args.config_file.as_deref(), ReportFormat::default())?;
    let filter = PatternFilter::from_config(&config);
    info!(
        "Pattern filter built, all patterns compiled: {}",
        filter.is_fully_compiled()
    );

    match args.output_format {
        OutputFormat::Human => print_human(&config, &filter),
        OutputFormat::Json => print_json(&config, &filter),
    }
}

/// One configured pattern and how the filter applies it
#[derive(Debug, Clone, PartialEq, Eq)]
struct PatternStatus<'a> {
    pattern: &'a str,
    compiles: bool,
    matched_literally: bool,
}

/// Whether a configured pattern compiles as a regex
fn compiles(pattern: &str) -> bool {
    Regex::new(pattern).is_ok()
}

/// Keywords are combined into one alternation, so they go literal together
fn keyword_statuses<'a>(config: &'a Config, filter: &PatternFilter) -> Vec<PatternStatus<'a>> {
    let literal = filter.keywords_are_literal();
    config
        .keyword_patterns
        .iter()
        .map(|pattern| PatternStatus {
            pattern,
            compiles: compiles(pattern),
            matched_literally: literal,
        })
        .collect()
}

/// Remove patterns fall back one at a time
fn remove_statuses(config: &Config) -> Vec<PatternStatus<'_>> {
    config
        .remove_patterns
        .iter()
        .map(|pattern| {
            let compiles = compiles(pattern);
            PatternStatus {
                pattern,
                compiles,
                matched_literally: !compiles,
            }
        })
        .collect()
}

fn print_human(config: &Config, filter: &PatternFilter) -> Result<()> {
    println!("\n🔎 {}", "Effective Filter Patterns".bright_green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("📋 {}", "Keyword patterns:".bright_cyan());
    if filter.keywords_are_literal() && !config.keyword_patterns.is_empty() {
        println!(
            "   {}",
            "Keyword list does not compile as one pattern, every keyword is matched literally"
                .bright_yellow()
        );
    }
    for status in keyword_statuses(config, filter) {
        print_pattern(&status);
    }

    println!("\n✂️  {}", "Remove patterns:".bright_cyan());
    for status in remove_statuses(config) {
        print_pattern(&status);
    }

    println!(
        "\n💰 {} {}",
        "Currency symbol:".bright_cyan(),
        config.currency_symbol
    );
    println!();
    Ok(())
}

fn print_pattern(status: &PatternStatus<'_>) {
    let note = match (status.compiles, status.matched_literally) {
        (false, _) => Some("(invalid regex, matched literally)"),
        (true, true) => Some("(matched literally)"),
        (true, false) => None,
    };

    match note {
        Some(note) => println!("   • {} {}", status.pattern, note.bright_yellow()),
        None => println!("   • {}", status.pattern),
    }
}

fn describe(statuses: &[PatternStatus<'_>]) -> Vec<serde_json::Value> {
    statuses
        .iter()
        .map(|status| {
            serde_json::json!({
                "pattern": status.pattern,
                "compiles": status.compiles,
                "matched_literally": status.matched_literally,
            })
        })
        .collect()
}

fn patterns_json(config: &Config, filter: &PatternFilter) -> serde_json::Value {
    serde_json::json!({
        "keyword_patterns": describe(&keyword_statuses(config, filter)),
        "keywords_matched_literally": filter.keywords_are_literal(),
        "remove_patterns": describe(&remove_statuses(config)),
        "currency_symbol": config.currency_symbol,
    })
}

fn print_json(config: &Config, filter: &PatternFilter) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&patterns_json(config, filter))
        .map_err(|e| Error::data_validation(format!("Failed to render JSON patterns: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
