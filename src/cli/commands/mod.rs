//! Command implementations for the MRR processor CLI
//!
//! Each command lives in its own module:
//! - `convert`: the main file conversion workflow with NetCDF output
//! - `inspect`: structure reporting without writing output
//! - `shared`: statistics, logging setup, and input discovery

pub mod convert;
pub mod inspect;
pub mod shared;

// Re-export the main types for convenient access
pub use shared::ProcessingStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the MRR processor
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub fn run(args: Args) -> Result<ProcessingStats> {
    match args.get_command() {
        Commands::Convert(convert_args) => convert::run_convert(convert_args),
        Commands::Inspect(inspect_args) => inspect::run_inspect(inspect_args),
    }
}
