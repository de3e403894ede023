//! Single pass over a journal stream

use super::context::RunContext;
use super::standard::StandardParams;
use super::stats::RunStats;
use crate::config::Config;
use crate::constants::PROGRESS_UPDATE_INTERVAL;
use crate::{Error, Result};
use indicatif::ProgressBar;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Which side of the pass an I/O failure came from
enum PassError {
    Read(io::Error),
    Write(io::Error),
}

/// Process a journal file into a report file
///
/// The output file is created before the first line is read. Fragments are
/// flushed as they are written, so a failure partway through leaves
/// everything written so far on disk.
pub fn process_file(
    input: &Path,
    output: &Path,
    config: &Config,
    params: &StandardParams,
    progress: Option<&ProgressBar>,
) -> Result<RunStats> {
    info!(
        "Processing {} into {} ({} format)",
        input.display(),
        output.display(),
        config.format
    );

    let input_file =
        File::open(input).map_err(|e| Error::input_unreadable(input.display().to_string(), e))?;
    let output_file =
        File::create(output).map_err(|e| Error::output_unwritable(output.display().to_string(), e))?;

    let stats = run_pass(
        BufReader::new(input_file),
        BufWriter::new(output_file),
        config,
        params,
        progress,
    )
    .map_err(|failure| match failure {
        PassError::Read(e) => Error::input_unreadable(input.display().to_string(), e),
        PassError::Write(e) => Error::output_unwritable(output.display().to_string(), e),
    })?;

    info!("{}", stats.summary());
    Ok(stats)
}

/// Process a journal stream into any writer
pub fn process_reader<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    config: &Config,
    params: &StandardParams,
    progress: Option<&ProgressBar>,
) -> Result<RunStats> {
    run_pass(reader, writer, config, params, progress).map_err(|failure| match failure {
        PassError::Read(e) => Error::io("Failed to read journal stream", e),
        PassError::Write(e) => Error::io("Failed to write report stream", e),
    })
}

fn run_pass<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    config: &Config,
    params: &StandardParams,
    progress: Option<&ProgressBar>,
) -> std::result::Result<RunStats, PassError> {
    let start_time = Instant::now();
    let mut context = RunContext::new(config, params.clone());
    context.begin(&mut writer).map_err(PassError::Write)?;

    let mut buffer = Vec::new();
    let mut bytes_read: u64 = 0;

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(PassError::Read)?;
        if read == 0 {
            break;
        }
        bytes_read += read as u64;

        let text = String::from_utf8_lossy(&buffer);
        let line = text.strip_suffix('\n').unwrap_or(&text);
        let line = line.strip_suffix('\r').unwrap_or(line);

        context
            .process_line(line, &mut writer)
            .map_err(PassError::Write)?;

        if let Some(pb) = progress {
            if context.stats().lines_read % PROGRESS_UPDATE_INTERVAL == 0 {
                pb.set_position(bytes_read);
                pb.set_message(format!("{} lines", context.stats().lines_read));
            }
        }
    }

    writer.flush().map_err(PassError::Write)?;

    if let Some(pb) = progress {
        pb.set_position(bytes_read);
    }

    let mut stats = context.finish();
    stats.bytes_read = bytes_read;
    stats.processing_time = start_time.elapsed();

    debug!(
        "Pass complete: {} lines, {} bytes in {:?}",
        stats.lines_read, stats.bytes_read, stats.processing_time
    );
    Ok(stats)
}
