//! Parsing statistics and the recoverable-warning taxonomy
//!
//! Line-local failures never abort a conversion: the offending line is
//! skipped, its array slice keeps the sentinel fill, and one warning per
//! line is recorded here with the 1-based line number.

use serde::Serialize;

/// A recoverable, line-local parse failure
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize)]
pub enum LineError {
    /// The line matches no known record shape
    #[error("unrecognized line format")]
    UnrecognizedFormat,

    /// A data line arrived before any profile header
    #[error("unexpected line before first header")]
    UnexpectedBeforeHeader,

    /// A data row tokenized to the wrong number of level columns
    #[error("expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A column failed numeric conversion
    #[error("invalid numeric value '{value}'")]
    InvalidValue { value: String },

    /// A band-resolved tag carries an index beyond the band axis
    #[error("band index {index} out of range ({bands} bands)")]
    BandIndexOutOfRange { index: usize, bands: usize },
}

/// One recorded warning, tagged with its 1-based line number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineWarning {
    pub line_number: usize,
    pub error: LineError,
}

impl std::fmt::Display for LineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error parsing line {}: {}", self.line_number, self.error)
    }
}

/// Counters collected across one parsing pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseStats {
    /// Total lines read
    pub lines_total: usize,
    /// Header lines accepted (equals the profile count on clean input)
    pub profiles_parsed: usize,
    /// Data rows routed into an array
    pub rows_parsed: usize,
    /// Comment lines ignored
    pub comments_skipped: usize,
    /// Recoverable per-line failures, in file order
    pub warnings: Vec<LineWarning>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of lines consumed without a warning, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.lines_total == 0 {
            100.0
        } else {
            let clean = self.lines_total - self.warnings.len();
            (clean as f64 / self.lines_total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display_cites_line_number() {
        let warning = LineWarning {
            line_number: 12,
            error: LineError::LengthMismatch {
                expected: 31,
                found: 30,
            },
        };
        assert_eq!(
            warning.to_string(),
            "Error parsing line 12: expected 31 values, found 30"
        );
    }

    #[test]
    fn test_success_rate() {
        let mut stats = ParseStats::new();
        assert_eq!(stats.success_rate(), 100.0);

        stats.lines_total = 4;
        stats.warnings.push(LineWarning {
            line_number: 3,
            error: LineError::UnrecognizedFormat,
        });
        assert_eq!(stats.success_rate(), 75.0);
    }
}
