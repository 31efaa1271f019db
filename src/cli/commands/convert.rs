//! Convert command implementation
//!
//! Orchestrates the full conversion workflow: input discovery, per-file
//! parse and NetCDF write with progress reporting, and a final summary.
//! File-level failures are reported and the run continues with the
//! remaining inputs unless `--debug` asks to stop at the first one.

use super::shared::{
    ProcessingStats, create_progress_bar, discover_inputs, output_path_for, setup_logging,
};
use crate::app::services::mrr_parser::MrrParser;
use crate::app::services::netcdf_writer::NetcdfWriter;
use crate::cli::args::ConvertArgs;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::HumanDuration;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// Convert command runner
pub fn run_convert(args: ConvertArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args)?;

    info!("Starting MRR conversion");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let inputs = discover_inputs(&args.inputs)?;
    info!("Converting {} input file(s)", inputs.len());

    if let Some(output_dir) = &args.output_dir {
        std::fs::create_dir_all(output_dir).map_err(|e| {
            Error::io(
                format!("Failed to create output directory {}", output_dir.display()),
                e,
            )
        })?;
    }

    let progress = args.show_progress().then(|| create_progress_bar(inputs.len()));

    let parser = MrrParser::new();
    let writer = NetcdfWriter::new();
    let mut stats = ProcessingStats::default();

    for input in &inputs {
        let output = output_path_for(input, args.output_dir.as_deref());
        if let Some(bar) = &progress {
            bar.set_message(input.display().to_string());
        }

        match convert_file(&parser, &writer, input, &output) {
            Ok((profiles, warnings)) => {
                stats.files_processed += 1;
                stats.profiles_converted += profiles;
                stats.warnings_emitted += warnings;

                if let Ok(metadata) = std::fs::metadata(&output) {
                    stats
                        .output_sizes
                        .push((output.display().to_string(), metadata.len()));
                }
                info!(
                    "Converted {} -> {} ({} profiles, {} warnings)",
                    input.display(),
                    output.display(),
                    profiles,
                    warnings
                );
            }
            Err(e) => {
                stats.files_failed += 1;
                error!("Failed to convert {}: {}", input.display(), e);

                if args.debug {
                    if let Some(bar) = &progress {
                        bar.abandon();
                    }
                    return Err(e);
                }
                eprintln!("{} {}: {}", "error:".red().bold(), input.display(), e);
            }
        }

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }

    stats.processing_time = start_time.elapsed();
    print_summary(&args, &stats);

    Ok(stats)
}

/// Convert one input file; returns (profiles parsed, warnings emitted)
fn convert_file(
    parser: &MrrParser,
    writer: &NetcdfWriter,
    input: &Path,
    output: &Path,
) -> Result<(usize, usize)> {
    let outcome = parser.parse_file(input)?;
    writer.write(&outcome.dataset, output)?;
    Ok((
        outcome.stats.profiles_parsed,
        outcome.stats.warnings.len(),
    ))
}

/// Print the human-readable conversion summary
fn print_summary(args: &ConvertArgs, stats: &ProcessingStats) {
    if args.quiet {
        return;
    }

    println!();
    println!("{}", "Conversion complete".bold());
    println!(
        "  {} file(s) converted, {} failed",
        stats.files_processed.to_string().green(),
        if stats.files_failed > 0 {
            stats.files_failed.to_string().red()
        } else {
            stats.files_failed.to_string().normal()
        }
    );
    println!("  {} profile(s) parsed", stats.profiles_converted);
    if stats.warnings_emitted > 0 {
        println!(
            "  {} line warning(s), see log output",
            stats.warnings_emitted.to_string().yellow()
        );
    }
    println!(
        "  {} written in {}",
        ProcessingStats::format_size(stats.total_output_size()),
        HumanDuration(stats.processing_time)
    );
}
