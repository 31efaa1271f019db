use clap::Parser;
use mrr_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(stats) => {
            // Success is reported by the command itself; a run where every
            // file failed still exits nonzero
            if stats.files_processed == 0 && stats.files_failed > 0 {
                process::exit(1);
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("MRR Processor - Metek MRR-2 Radar Telemetry Converter");
    println!("=====================================================");
    println!();
    println!("Convert Metek MRR-2 micro rain radar telemetry exports into NetCDF");
    println!("datasets with named, unit-annotated variables.");
    println!();
    println!("USAGE:");
    println!("    mrr-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert MRR-2 telemetry files to NetCDF (main command)");
    println!("    inspect     Report file structure and warnings without writing output");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert one file, writing 0304.nc next to it:");
    println!("    mrr-processor convert 0304.raw");
    println!();
    println!("    # Convert a day of files into a separate output directory:");
    println!("    mrr-processor convert --output ./netcdf 'data/0304*.raw'");
    println!();
    println!("    # Inspect a file that converts with warnings:");
    println!("    mrr-processor inspect -v 0304.raw");
    println!();
    println!("For detailed help on any command, use:");
    println!("    mrr-processor <COMMAND> --help");
}
