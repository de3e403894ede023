use clap::Parser;
use ej_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Fragments are flushed as they are written, so stopping here keeps
        // everything already in the report file
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, stopping...");
                Err(ej_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            // Success - the command has already printed its summary
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("EJ Processor - ATM Electronic Journal Normalizer");
    println!("================================================");
    println!();
    println!("Turn raw ATM Electronic Journal logs into an annotated comprehensive");
    println!("report or a pipe-delimited table keyed by trace number.");
    println!();
    println!("USAGE:");
    println!("    ej-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process a journal file into a report (main command)");
    println!("    patterns    Show the effective keyword and remove patterns");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Comprehensive report into EJParse/EJ_<TID>_<DDMMYYYY>.txt:");
    println!("    ej-processor process --input EJDATA.LOG --tid T001 --date 12032024");
    println!();
    println!("    # Standard trace-number table with a participant ID:");
    println!("    ej-processor process -i EJDATA.LOG --tid T001 --format standard \\");
    println!("                         --participant-id 008");
    println!();
    println!("    # Check which patterns a configuration file produces:");
    println!("    ej-processor patterns --config config.ini");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ej-processor <COMMAND> --help");
}
