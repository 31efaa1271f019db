//! Column tokenizer for non-header data lines
//!
//! A data line carries a 3-character tag followed by `n_levels` fixed-width
//! columns. The column width is recomputed from the line's own length on
//! every line, not once per file: different quantities are encoded with
//! different widths within the same file, and the format leaves the width
//! implicit in the line geometry.

use crate::constants::TAG_WIDTH;

/// Split a line into its trimmed tag plus trimmed fixed-width columns
///
/// The column width is `max(1, (line_length - 3) / n_levels)`. Returns
/// `None` when `n_levels` is zero (a file without any height row has no
/// column geometry, so no data line can be interpreted).
pub fn tokenize(line: &str, n_levels: usize) -> Option<Vec<String>> {
    if n_levels == 0 {
        return None;
    }

    let bytes = line.as_bytes();
    let width = (bytes.len().saturating_sub(TAG_WIDTH) / n_levels).max(1);
    let tag_end = TAG_WIDTH.min(bytes.len());

    let mut tokens = Vec::with_capacity(n_levels + 1);
    tokens.push(String::from_utf8_lossy(&bytes[..tag_end]).trim().to_string());
    for chunk in bytes[tag_end..].chunks(width) {
        tokens.push(String::from_utf8_lossy(chunk).trim().to_string());
    }
    Some(tokens)
}
