//! Record router: the stateful, single-pass line interpreter
//!
//! Pass 1 probes the file geometry; pass 2 walks the same buffer line by
//! line, classifies each line by its leading tag, and routes its columns
//! into the array assembler. Parse state advances only on accepted header
//! lines; data lines read it but never mutate it.
//!
//! Failures split into two tiers. Line-local problems (unrecognized
//! layouts, wrong column counts, bad numbers) skip the line and emit one
//! warning. Structural violations (mixed processing levels, a corrupted
//! field registry) abort the whole file with a crate [`Error`].

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::app::models::{FieldDtype, FieldRank, ProcessingLevel};
use crate::constants::{MISSING_FLOAT, MISSING_INT, PROFILE_HEADER_MARKER, is_comment_line};
use crate::{Error, Result};

use super::dataset::{ArraySet, Dataset};
use super::fields::{FieldRegistry, TIME_FIELD, TIME_ZONE_FIELD};
use super::header;
use super::size::{self, FileGeometry};
use super::stats::{LineError, LineWarning, ParseStats};
use super::tokenizer::tokenize;

/// Per-line verdict: consumed, or skipped with a recoverable error
type LineResult = std::result::Result<(), LineError>;

/// Mutable state threaded through the second pass
///
/// `profile` is the row index established by the most recent header line;
/// every array write targets that row and no other.
#[derive(Debug, Default)]
struct ParseState {
    profile: Option<usize>,
    file_level: Option<ProcessingLevel>,
    current_level: Option<ProcessingLevel>,
}

/// Result of parsing one file
#[derive(Debug)]
pub struct ParseOutcome {
    pub dataset: Dataset,
    pub stats: ParseStats,
}

/// Two-pass parser for MRR-2 telemetry exports
#[derive(Debug, Default)]
pub struct MrrParser {
    registry: FieldRegistry,
}

impl MrrParser {
    pub fn new() -> Self {
        Self {
            registry: FieldRegistry::new(),
        }
    }

    /// Parse a file from disk
    pub fn parse_file(&self, path: &Path) -> Result<ParseOutcome> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
        self.parse_str(&content)
    }

    /// Parse in-memory content
    pub fn parse_str(&self, content: &str) -> Result<ParseOutcome> {
        self.parse_with_warnings(content, |_| {})
    }

    /// Parse in-memory content, invoking `on_warning` for every
    /// recoverable per-line failure as it is encountered
    pub fn parse_with_warnings(
        &self,
        content: &str,
        mut on_warning: impl FnMut(&LineWarning),
    ) -> Result<ParseOutcome> {
        // Pass 1: dimensions only
        let geometry = size::probe(content);
        debug!(
            profiles = geometry.profiles,
            levels = geometry.levels,
            bands = geometry.bands,
            "probed file geometry"
        );

        // Pass 2: route every line
        let mut arrays = ArraySet::new(geometry);
        let mut state = ParseState::default();
        let mut stats = ParseStats::new();

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            stats.lines_total += 1;

            match self.route_line(line, line_number, geometry, &mut state, &mut arrays, &mut stats)? {
                Ok(()) => {}
                Err(error) => {
                    let warning = LineWarning { line_number, error };
                    warn!("{}", warning);
                    on_warning(&warning);
                    stats.warnings.push(warning);
                }
            }
        }

        stats.profiles_parsed = state.profile.map_or(0, |i| i + 1);
        let dataset = arrays.finalize(state.file_level)?;
        Ok(ParseOutcome { dataset, stats })
    }

    /// Dispatch one line by its tokenized leading tag
    ///
    /// The outer `Result` carries file-fatal errors; the inner
    /// [`LineResult`] carries the line-local verdict.
    fn route_line(
        &self,
        line: &str,
        line_number: usize,
        geometry: FileGeometry,
        state: &mut ParseState,
        arrays: &mut ArraySet,
        stats: &mut ParseStats,
    ) -> Result<LineResult> {
        // A file without a single height row has no column geometry; no
        // line in it can be interpreted.
        let Some(tokens) = tokenize(line, geometry.levels) else {
            return Ok(Err(LineError::UnrecognizedFormat));
        };
        let tag = tokens[0].as_str();

        if tag == PROFILE_HEADER_MARKER {
            return self.consume_header(line, line_number, state, arrays);
        }

        if let Some(descriptor) = self.registry.lookup(tag) {
            let (Some(profile), Some(file_level)) = (state.profile, state.file_level) else {
                return Ok(Err(LineError::UnexpectedBeforeHeader));
            };
            if state.current_level != Some(file_level) {
                let found = state.current_level.map_or("none", |l| l.as_str());
                return Err(Error::mixed_levels(line_number, file_level.as_str(), found));
            }

            let values = &tokens[1..];
            return match descriptor.rank {
                FieldRank::BandVector => {
                    if descriptor.dtype != FieldDtype::Float64 {
                        return Err(Error::registry_invariant(
                            descriptor.name,
                            format!("invalid dtype {:?} for a band-resolved field", descriptor.dtype),
                        ));
                    }
                    let Ok(band) = tag[1..].parse::<usize>() else {
                        return Ok(Err(LineError::InvalidValue {
                            value: tag[1..].to_string(),
                        }));
                    };
                    if band >= geometry.bands {
                        return Ok(Err(LineError::BandIndexOutOfRange {
                            index: band,
                            bands: geometry.bands,
                        }));
                    }
                    let row = match parse_floats(values) {
                        Ok(row) => row,
                        Err(error) => return Ok(Err(error)),
                    };
                    if row.len() != geometry.levels {
                        return Ok(Err(LineError::LengthMismatch {
                            expected: geometry.levels,
                            found: row.len(),
                        }));
                    }
                    arrays.write_band_row(descriptor, profile, band, &row)?;
                    stats.rows_parsed += 1;
                    Ok(Ok(()))
                }
                FieldRank::LevelVector => match descriptor.dtype {
                    FieldDtype::Float64 => {
                        let row = match parse_floats(values) {
                            Ok(row) => row,
                            Err(error) => return Ok(Err(error)),
                        };
                        if row.len() != geometry.levels {
                            return Ok(Err(LineError::LengthMismatch {
                                expected: geometry.levels,
                                found: row.len(),
                            }));
                        }
                        arrays.write_level_row_f64(descriptor, profile, &row)?;
                        stats.rows_parsed += 1;
                        Ok(Ok(()))
                    }
                    FieldDtype::Int64 => {
                        let row = match parse_ints(values) {
                            Ok(row) => row,
                            Err(error) => return Ok(Err(error)),
                        };
                        if row.len() != geometry.levels {
                            return Ok(Err(LineError::LengthMismatch {
                                expected: geometry.levels,
                                found: row.len(),
                            }));
                        }
                        arrays.write_level_row_i64(descriptor, profile, &row)?;
                        stats.rows_parsed += 1;
                        Ok(Ok(()))
                    }
                    FieldDtype::Text => Err(Error::registry_invariant(
                        descriptor.name,
                        "text dtype is not valid for a level vector",
                    )),
                },
                // A header-scalar symbol standing alone on a data line has
                // no row shape to write into
                FieldRank::Scalar => Ok(Err(LineError::UnrecognizedFormat)),
            };
        }

        if is_comment_line(line) {
            stats.comments_skipped += 1;
            return Ok(Ok(()));
        }

        Ok(Err(LineError::UnrecognizedFormat))
    }

    /// Consume one profile header line
    fn consume_header(
        &self,
        line: &str,
        line_number: usize,
        state: &mut ParseState,
        arrays: &mut ArraySet,
    ) -> Result<LineResult> {
        let Some(record) = header::decode(line) else {
            return Ok(Err(LineError::UnrecognizedFormat));
        };

        state.current_level = Some(record.level);
        if let Some(file_level) = state.file_level {
            if file_level != record.level {
                return Err(Error::mixed_levels(
                    line_number,
                    file_level.as_str(),
                    record.level.as_str(),
                ));
            }
        }
        state.file_level = Some(record.level);

        let profile = state.profile.map_or(0, |i| i + 1);
        state.profile = Some(profile);

        arrays.write_text(TIME_FIELD, profile, &record.format_time())?;
        arrays.write_text(TIME_ZONE_FIELD, profile, &record.time_zone)?;
        for (symbol, value) in &record.scalars {
            if let Some(descriptor) = self.registry.lookup_exact(symbol) {
                arrays.write_header_scalar(descriptor, profile, value)?;
            }
        }

        Ok(Ok(()))
    }
}

/// Parse row columns as floats; an empty column is missing data
fn parse_floats(tokens: &[String]) -> std::result::Result<Vec<f64>, LineError> {
    tokens
        .iter()
        .map(|token| {
            if token.is_empty() {
                Ok(MISSING_FLOAT)
            } else {
                token.parse::<f64>().map_err(|_| LineError::InvalidValue {
                    value: token.clone(),
                })
            }
        })
        .collect()
}

/// Parse row columns as integers; an empty column is missing data
fn parse_ints(tokens: &[String]) -> std::result::Result<Vec<i64>, LineError> {
    tokens
        .iter()
        .map(|token| {
            if token.is_empty() {
                Ok(MISSING_INT)
            } else {
                token.parse::<i64>().map_err(|_| LineError::InvalidValue {
                    value: token.clone(),
                })
            }
        })
        .collect()
}
