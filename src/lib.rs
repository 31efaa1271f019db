//! MRR Processor Library
//!
//! A Rust library for converting Metek MRR-2 micro rain radar telemetry
//! exports into NetCDF datasets.
//!
//! This library provides tools for:
//! - Parsing the MRR-2 tag-prefixed text format with dynamic column widths
//! - Assembling profile/level/band resolved arrays with missing-value fill
//! - Enforcing file-level structural invariants (consistent processing level)
//! - Recovering from malformed individual lines with per-line diagnostics
//! - Writing NetCDF output with physical units and coordinate variables

pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod mrr_parser;
        pub mod netcdf_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldDtype, FieldRank, ProcessingLevel};
pub use app::services::mrr_parser::{Dataset, MrrParser, ParseOutcome};

/// Result type alias for the MRR processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for MRR processing operations
///
/// These are the file-level fatal failures: a file that raises one of these
/// produces no output at all. Recoverable per-line problems are represented
/// separately by [`app::services::mrr_parser::LineError`] and reported
/// through the warning channel instead of aborting the conversion.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Header lines within one file report different processing levels
    #[error(
        "mixed processing levels in line {line_number}: file is {file_level}, header says {found}"
    )]
    MixedProcessingLevels {
        line_number: usize,
        file_level: String,
        found: String,
    },

    /// A field descriptor declares a dtype its rank cannot carry
    #[error("field registry invariant violated for '{field}': {message}")]
    RegistryInvariant { field: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// NetCDF writing error
    #[error("NetCDF writing error: {message}")]
    NetcdfWrite {
        message: String,
        #[source]
        source: netcdf::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a mixed-processing-level error
    pub fn mixed_levels(
        line_number: usize,
        file_level: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::MixedProcessingLevels {
            line_number,
            file_level: file_level.into(),
            found: found.into(),
        }
    }

    /// Create a field registry invariant error
    pub fn registry_invariant(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RegistryInvariant {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a NetCDF writing error with context
    pub fn netcdf_write(message: impl Into<String>, source: netcdf::Error) -> Self {
        Self::NetcdfWrite {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<netcdf::Error> for Error {
    fn from(error: netcdf::Error) -> Self {
        Self::NetcdfWrite {
            message: "NetCDF operation failed".to_string(),
            source: error,
        }
    }
}
