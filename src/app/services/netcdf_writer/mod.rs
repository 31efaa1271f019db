//! NetCDF writer for parsed MRR-2 datasets
//!
//! Serializes a finalized [`Dataset`](crate::Dataset) into a NetCDF file:
//! one variable per field, dimensioned over time, height level, and Doppler
//! band, with physical units and missing-value fill carried as variable
//! attributes and provenance carried as global attributes.
//!
//! # Architecture
//!
//! - [`writer`] - Core NetcdfWriter implementation and write statistics
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use mrr_processor::MrrParser;
//! use mrr_processor::app::services::netcdf_writer::NetcdfWriter;
//!
//! # fn example() -> mrr_processor::Result<()> {
//! let outcome = MrrParser::new().parse_file(Path::new("data.mrr"))?;
//!
//! let writer = NetcdfWriter::new();
//! let stats = writer.write(&outcome.dataset, Path::new("data.nc"))?;
//!
//! println!("Wrote {} variables", stats.variables_written);
//! # Ok(())
//! # }
//! ```

pub mod writer;

// Re-export main types for convenient access
pub use writer::{NetcdfWriter, WriteStats};
