//! Parser for Metek MRR-2 telemetry exports
//!
//! This module turns one line-oriented MRR-2 text export into a structured
//! dataset of named, unit-annotated arrays. Parsing is two-pass: a
//! read-only pass computes the global array dimensions, then a stateful
//! pass routes every line into the growing array collection.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`fields`] - Static registry of every recognized physical quantity
//! - [`size`] - Dimension probing (profile, level, and band counts)
//! - [`header`] - Profile header decoding against the three level layouts
//! - [`tokenizer`] - Dynamic fixed-width column splitting
//! - [`parser`] - Record routing and the parse state machine
//! - [`dataset`] - Array assembly, sentinel fill, and finalization
//! - [`stats`] - Parsing statistics and the recoverable-warning taxonomy
//!
//! ## Usage
//!
//! ```rust
//! use mrr_processor::app::services::mrr_parser::MrrParser;
//!
//! # fn example() -> mrr_processor::Result<()> {
//! let parser = MrrParser::new();
//! let outcome = parser.parse_file(std::path::Path::new("data.mrr"))?;
//!
//! println!("Parsed {} profiles with {} warnings",
//!          outcome.stats.profiles_parsed,
//!          outcome.stats.warnings.len());
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod fields;
pub mod header;
pub mod parser;
pub mod size;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use dataset::{DataArray, Dataset, Field};
pub use fields::{FieldDescriptor, FieldRegistry};
pub use parser::{MrrParser, ParseOutcome};
pub use size::FileGeometry;
pub use stats::{LineError, LineWarning, ParseStats};
