//! Size prober: the read-only first pass over an MRR-2 file
//!
//! Computes the global array dimensions needed to preallocate the output
//! arrays before any data line is interpreted. The profile count is the
//! number of header lines; the level count is the maximum column count seen
//! on any height row; the band count is fixed by the instrument.

use crate::constants::{
    HEIGHT_ROW_MARKER, PROFILE_HEADER_MARKER, SPECTRAL_BAND_COUNT, TAG_WIDTH,
};

/// Global dimensions of one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileGeometry {
    /// Number of profile header lines
    pub profiles: usize,
    /// Maximum whitespace-delimited column count on any height row
    pub levels: usize,
    /// Fixed Doppler band count
    pub bands: usize,
}

/// Probe a complete file for its array dimensions
///
/// The input is held fully in memory, so "rewinding" for the second pass is
/// simply iterating the same buffer again. Reading the file is the only
/// fallible step of this pass and happens before probing; a read failure
/// aborts the whole conversion.
pub fn probe(content: &str) -> FileGeometry {
    let mut profiles = 0;
    let mut levels = 0;

    for line in content.lines() {
        if line.starts_with(PROFILE_HEADER_MARKER) {
            profiles += 1;
        }
        if line.starts_with(HEIGHT_ROW_MARKER) {
            let columns = line
                .get(TAG_WIDTH.min(line.len())..)
                .unwrap_or("")
                .split_whitespace()
                .count();
            levels = levels.max(columns);
        }
    }

    FileGeometry {
        profiles,
        levels,
        bands: SPECTRAL_BAND_COUNT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_counts_headers_and_levels() {
        let content = "\
MRR 210304100000 UTC DVS 6.10 DSN 123 BW 100 CC 200 MDQ 100 0 0 TYP RAW
H     100    200    300
F00     1      2      3
MRR 210304100100 UTC DVS 6.10 DSN 123 BW 100 CC 200 MDQ 100 0 0 TYP RAW
H     100    200    300    400
";
        let geometry = probe(content);
        assert_eq!(geometry.profiles, 2);
        // Running maximum over both height rows
        assert_eq!(geometry.levels, 4);
        assert_eq!(geometry.bands, SPECTRAL_BAND_COUNT);
    }

    #[test]
    fn test_probe_empty_input() {
        let geometry = probe("");
        assert_eq!(geometry.profiles, 0);
        assert_eq!(geometry.levels, 0);
        assert_eq!(geometry.bands, SPECTRAL_BAND_COUNT);
    }

    #[test]
    fn test_probe_ignores_non_height_rows() {
        let content = "Z     1      2      3\nC:comment line\n";
        let geometry = probe(content);
        assert_eq!(geometry.profiles, 0);
        assert_eq!(geometry.levels, 0);
    }

    #[test]
    fn test_probe_short_height_row() {
        // A bare tag with no columns contributes zero levels
        let geometry = probe("H\n");
        assert_eq!(geometry.levels, 0);
    }
}
