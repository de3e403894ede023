//! Command implementations for the EJ processor CLI
//!
//! Each command is implemented in its own module; shared logging,
//! configuration and progress helpers live in [`shared`].

pub mod patterns;
pub mod process;
pub mod shared;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the EJ processor
///
/// This function dispatches to the appropriate subcommand handler based on CLI args:
/// - `process`: Journal processing into a Comprehensive or Standard report
/// - `patterns`: Listing of the effective filter patterns
pub async fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Some(Commands::Process(process_args)) => {
            process::run_process(process_args).await?;
            Ok(())
        }
        Some(Commands::Patterns(patterns_args)) => patterns::run_patterns(patterns_args).await,
        None => Ok(()),
    }
}
