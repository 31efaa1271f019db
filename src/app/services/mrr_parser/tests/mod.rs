//! Test fixtures and helpers for the MRR-2 parser
//!
//! Provides complete in-memory MRR-2 file fixtures shared across the test
//! modules. All data lines use a 3-level geometry with 7-character columns
//! so that the length-derived column width is exercised the same way real
//! instrument exports exercise it.

use std::io::Write;
use tempfile::NamedTempFile;


/// A two-profile RAW-level export, one minute apart
pub fn create_raw_content() -> String {
    "\
MRR 210304100000 UTC DVS 6.10 DSN 0510556690 BW 58 CC 1897120 MDQ 100 58 58 TYP RAW
H      100    200    300
TF    0.10   0.20   0.30
F07    1.5    2.5    3.5
MRR 210304100100 UTC DVS 6.10 DSN 0510556690 BW 58 CC 1897120 MDQ 100 58 58 TYP RAW
H      100    200    300
F07    4.5    5.5    6.5
"
    .to_string()
}

/// A single-profile AVE-level export with derived quantities
pub fn create_ave_content() -> String {
    "\
MRR 210304100000 UTC AVE 60 STP 35 ASL 0 SMP 125e3 SVS 6.0.0.9 DVS 6.10 DSN 0510556690 CC 1897120 MDQ 100 TYP AVE
H      100    200    300
Z     10.5   11.5   12.5
RR     0.1    0.2    0.3
"
    .to_string()
}

/// Helper to write fixture content into a temporary file
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
