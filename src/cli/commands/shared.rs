//! Shared components for CLI commands
//!
//! Common types and utilities used across the command implementations:
//! statistics reporting, logging setup, input discovery, and output path
//! derivation.

use crate::cli::args::{ConvertArgs, InspectArgs};
use crate::constants::get_output_filename;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of files converted successfully
    pub files_processed: usize,
    /// Number of files that failed with a file-level error
    pub files_failed: usize,
    /// Total profiles parsed across all files
    pub profiles_converted: usize,
    /// Total recoverable line warnings across all files
    pub warnings_emitted: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ProcessingStats {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging for the convert command
pub fn setup_logging(args: &ConvertArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mrr_processor={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Set up structured logging for the inspect command
pub fn setup_inspect_logging(args: &InspectArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mrr_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Expand the input arguments into a sorted list of existing files
///
/// Each argument is either a literal path or a glob pattern. A literal path
/// that does not exist, or a pattern matching nothing, is an error: silently
/// converting zero files hides typos.
pub fn discover_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let literal = Path::new(pattern);
        if literal.is_file() {
            files.push(literal.to_path_buf());
            continue;
        }

        let matches = glob::glob(pattern)
            .map_err(|e| Error::configuration(format!("Invalid glob pattern '{}': {}", pattern, e)))?;

        let mut matched_any = false;
        for entry in matches {
            let path = entry
                .map_err(|e| Error::configuration(format!("Cannot read '{}': {}", pattern, e)))?;
            if path.is_file() {
                files.push(path);
                matched_any = true;
            }
        }

        if !matched_any {
            return Err(Error::file_not_found(pattern.clone()));
        }
    }

    files.sort();
    files.dedup();
    debug!("Discovered {} input file(s)", files.len());
    Ok(files)
}

/// Derive the output path for one input file
///
/// The output keeps the input's file stem with a `.nc` extension, placed in
/// `output_dir` when given and next to the input otherwise.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let filename = get_output_filename(&stem);

    match output_dir {
        Some(dir) => dir.join(filename),
        None => input.with_file_name(filename),
    }
}

/// Create a progress bar styled for the conversion loop
pub fn create_progress_bar(total_files: usize) -> ProgressBar {
    let bar = ProgressBar::new(total_files as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({msg})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(ProcessingStats::format_size(512), "512 B");
        assert_eq!(ProcessingStats::format_size(2048), "2.00 KB");
        assert_eq!(ProcessingStats::format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_total_output_size() {
        let mut stats = ProcessingStats::default();
        stats.output_sizes.push(("a.nc".to_string(), 100));
        stats.output_sizes.push(("b.nc".to_string(), 200));
        assert_eq!(stats.total_output_size(), 300);
    }

    #[test]
    fn test_output_path_next_to_input() {
        let path = output_path_for(Path::new("/data/0304.raw"), None);
        assert_eq!(path, PathBuf::from("/data/0304.nc"));
    }

    #[test]
    fn test_output_path_in_output_dir() {
        let path = output_path_for(Path::new("/data/0304.raw"), Some(Path::new("/out")));
        assert_eq!(path, PathBuf::from("/out/0304.nc"));
    }

    #[test]
    fn test_discover_literal_files() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.mrr");
        fs::write(&file, "").unwrap();

        let files = discover_inputs(&[file.display().to_string()]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_discover_glob_pattern() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.mrr"), "").unwrap();
        fs::write(temp_dir.path().join("b.mrr"), "").unwrap();
        fs::write(temp_dir.path().join("ignore.txt"), "").unwrap();

        let pattern = format!("{}/*.mrr", temp_dir.path().display());
        let files = discover_inputs(&[pattern]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_discover_missing_input_is_an_error() {
        let result = discover_inputs(&["/nonexistent/file.mrr".to_string()]);
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
