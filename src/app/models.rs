//! Core data models for MRR processing
//!
//! This module defines the processing-level enum, the dtype/rank
//! classification of output fields, and the decoded header record shared
//! between the parser components.

use std::fmt;

use chrono::NaiveDateTime;

/// Instrument output mode, fixed for a whole file
///
/// The first accepted header line establishes the level; any later header
/// reporting a different level is a fatal structural violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingLevel {
    /// Unprocessed spectral reflectivities
    Raw,
    /// Averaged spectra with derived quantities
    Ave,
    /// Fully processed profiles
    Pro,
}

impl ProcessingLevel {
    /// Parse the trailing TYP token of a header line
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "RAW" => Some(Self::Raw),
            "AVE" => Some(Self::Ave),
            "PRO" => Some(Self::Pro),
            _ => None,
        }
    }

    /// The literal TYP token for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::Ave => "AVE",
            Self::Pro => "PRO",
        }
    }
}

impl fmt::Display for ProcessingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element datatype of an output field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDtype {
    Float64,
    Int64,
    /// Short fixed-width token (serial numbers, version strings, zone names)
    Text,
}

/// Dimensionality class of an output field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRank {
    /// One value per profile, shape `(n_profiles,)`
    Scalar,
    /// One value per profile and level, shape `(n_profiles, n_levels)`
    LevelVector,
    /// One value per profile, level, and spectral band,
    /// shape `(n_profiles, n_levels, n_bands)`
    BandVector,
}

/// A scalar value decoded from a header line, typed per the coercion table
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// One decoded profile header
///
/// Produced by the header line decoder when a line matches one of the three
/// fixed layouts. `scalars` holds the level-specific tagged values keyed by
/// their tag symbol, in the order they appear in the layout.
#[derive(Debug, Clone)]
pub struct HeaderRecord {
    pub level: ProcessingLevel,
    pub timestamp: NaiveDateTime,
    pub time_zone: String,
    pub scalars: Vec<(&'static str, HeaderValue)>,
}

impl HeaderRecord {
    /// Render the timestamp in the representation stored in the `time` field
    pub fn format_time(&self) -> String {
        self.timestamp
            .format(crate::constants::TIME_FORMAT)
            .to_string()
    }
}
