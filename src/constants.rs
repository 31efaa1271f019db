//! Application constants for MRR processor
//!
//! This module contains the fixed markers, sentinel values, and format
//! strings of the MRR-2 telemetry format and of the NetCDF output.

// =============================================================================
// MRR-2 Line Format Markers
// =============================================================================

/// Marker introducing a profile header line
pub const PROFILE_HEADER_MARKER: &str = "MRR";

/// Marker introducing a height row (the row whose column count fixes the
/// level dimension for the whole file)
pub const HEIGHT_ROW_MARKER: &str = "H";

/// Prefixes of comment lines, ignored by the parser
pub const COMMENT_MARKERS: &[&str] = &["C:", "R:"];

/// Width of the leading tag column on every data line
pub const TAG_WIDTH: usize = 3;

// =============================================================================
// Array Dimensions
// =============================================================================

/// Number of Doppler spectral bands per level, fixed by the instrument
pub const SPECTRAL_BAND_COUNT: usize = 64;

// =============================================================================
// Missing-Value Sentinels
// =============================================================================

/// Sentinel for missing floating-point data
pub const MISSING_FLOAT: f64 = f64::NAN;

/// Sentinel for missing integer data
pub const MISSING_INT: i64 = i64::MIN;

// =============================================================================
// Timestamp Handling
// =============================================================================

/// Century base for the two-digit years in MRR-2 headers
pub const YEAR_BASE: i32 = 2000;

/// Timestamp representation stored in the `time` field
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Units attribute advertised for the `time` field
pub const TIME_UNITS: &str = "iso8601";

// =============================================================================
// Output Conventions
// =============================================================================

/// Dimension names of the output dataset, in rank order
pub const DIM_TIME: &str = "time";
pub const DIM_LEVEL: &str = "level";
pub const DIM_BAND: &str = "band";

/// File extension of generated NetCDF files
pub const OUTPUT_EXTENSION: &str = "nc";

/// Tool name recorded in the output global attributes
pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");

/// Tool version recorded in the output global attributes
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Helper Functions
// =============================================================================

/// Check whether a line is a comment row
pub fn is_comment_line(line: &str) -> bool {
    COMMENT_MARKERS.iter().any(|m| line.starts_with(m))
}

/// Get the expected output filename for an input file
pub fn get_output_filename(input_stem: &str) -> String {
    format!("{}.{}", input_stem, OUTPUT_EXTENSION)
}
