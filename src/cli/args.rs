//! Command-line argument definitions for the MRR processor
//!
//! Defines the complete CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the MRR telemetry converter
///
/// Converts Metek MRR-2 micro rain radar telemetry exports from their
/// line-oriented text format into NetCDF datasets.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mrr-processor",
    version,
    about = "Convert Metek MRR-2 radar telemetry exports to NetCDF",
    long_about = "Converts Metek MRR-2 micro rain radar telemetry exports into NetCDF \
                  datasets with named, unit-annotated variables over time, height level, \
                  and Doppler band dimensions. Handles all three instrument processing \
                  levels (RAW, AVE, PRO) and recovers from malformed lines with per-line \
                  diagnostics."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the MRR processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert MRR-2 telemetry files to NetCDF (main command)
    Convert(ConvertArgs),
    /// Parse MRR-2 files and report their structure without writing output
    Inspect(InspectArgs),
}

/// Arguments for the convert command (main conversion workflow)
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input MRR-2 files or glob patterns
    ///
    /// Each argument is either a file path or a glob pattern such as
    /// 'data/0304*.raw'. All matched files are converted independently.
    #[arg(
        value_name = "INPUT",
        required = true,
        help = "Input MRR-2 files or glob patterns"
    )]
    pub inputs: Vec<String>,

    /// Output directory for generated NetCDF files
    ///
    /// Each input produces one output named after the input file with a .nc
    /// extension. If not specified, outputs are written next to their inputs.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory for generated NetCDF files"
    )]
    pub output_dir: Option<PathBuf>,

    /// Abort the whole run on the first file that fails
    ///
    /// By default a file-level failure is reported and the run continues
    /// with the remaining inputs. This flag stops at the first failure and
    /// propagates it, which is more useful when diagnosing a broken file.
    #[arg(long = "debug", help = "Stop at the first failing file")]
    pub debug: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the inspect command (structure reporting)
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Input MRR-2 files or glob patterns
    #[arg(
        value_name = "INPUT",
        required = true,
        help = "Input MRR-2 files or glob patterns"
    )]
    pub inputs: Vec<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::configuration(
                "At least one input file must be specified".to_string(),
            ));
        }

        // Validate output directory exists if specified
        if let Some(output_dir) = &self.output_dir {
            if output_dir.exists() && !output_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Output path is not a directory: {}",
                    output_dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl InspectArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: None,
            debug: false,
            verbose: 0,
            quiet: false,
        }
    }
}
