//! End-to-end conversion tests
//!
//! Exercises the public pipeline the way the convert command does: read an
//! MRR-2 text export from disk, parse it, write NetCDF, and reopen the
//! result to check what landed in the file.

use std::fs;

use mrr_processor::app::services::netcdf_writer::NetcdfWriter;
use mrr_processor::cli::commands::shared::{discover_inputs, output_path_for};
use mrr_processor::{Error, MrrParser};
use tempfile::TempDir;

const RAW_CONTENT: &str = "\
MRR 210304100000 UTC DVS 6.10 DSN 0510556690 BW 58 CC 1897120 MDQ 100 58 58 TYP RAW
H      100    200    300
TF    0.10   0.20   0.30
F07    1.5    2.5    3.5
MRR 210304100100 UTC DVS 6.10 DSN 0510556690 BW 58 CC 1897120 MDQ 100 58 58 TYP RAW
H      100    200    300
F07    4.5    5.5    6.5
";

const AVE_CONTENT: &str = "\
MRR 210304100000 UTC AVE 60 STP 35 ASL 0 SMP 125e3 SVS 6.0.0.9 DVS 6.10 DSN 0510556690 CC 1897120 MDQ 100 TYP AVE
H      100    200    300
Z     10.5   11.5   12.5
RR     0.1    0.2    0.3
";

#[test]
fn converts_a_raw_file_from_disk_to_netcdf() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("0304.raw");
    fs::write(&input, RAW_CONTENT).unwrap();
    let output = output_path_for(&input, None);
    assert_eq!(output, temp_dir.path().join("0304.nc"));

    let outcome = MrrParser::new().parse_file(&input).unwrap();
    assert!(outcome.stats.warnings.is_empty());
    assert_eq!(outcome.stats.profiles_parsed, 2);

    NetcdfWriter::new().write(&outcome.dataset, &output).unwrap();

    let nc = netcdf::open(&output).unwrap();
    assert_eq!(nc.dimension("time").unwrap().len(), 2);
    assert_eq!(nc.dimension("level").unwrap().len(), 3);
    assert_eq!(nc.dimension("band").unwrap().len(), 64);

    let height = nc.variable("height").unwrap();
    let values = height.get_values::<f64, _>(..).unwrap();
    assert_eq!(values, vec![100.0, 200.0, 300.0, 100.0, 200.0, 300.0]);

    // Spectral reflectivity landed in band 7 only
    let spectral = nc.variable("spectral_reflectivity").unwrap();
    let values = spectral.get_values::<f64, _>(..).unwrap();
    assert_eq!(values.len(), 2 * 3 * 64);
    assert_eq!(values[7], 1.5);
    assert!(values[6].is_nan());

    // Second profile starts at row offset profiles x levels x bands / 2
    assert_eq!(values[3 * 64 + 7], 4.5);
}

#[test]
fn converts_an_ave_file_with_derived_quantities() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("0304.ave");
    fs::write(&input, AVE_CONTENT).unwrap();
    let output = temp_dir.path().join("0304.nc");

    let outcome = MrrParser::new().parse_file(&input).unwrap();
    NetcdfWriter::new().write(&outcome.dataset, &output).unwrap();

    let nc = netcdf::open(&output).unwrap();
    let rain = nc.variable("rain_rate").unwrap();
    assert_eq!(rain.get_values::<f64, _>(..).unwrap(), vec![0.1, 0.2, 0.3]);

    // Relevant but never written: present, full of fill values
    let drop_size = nc.variable("drop_size").unwrap();
    assert!(
        drop_size
            .get_values::<f64, _>(..)
            .unwrap()
            .iter()
            .all(|v| v.is_nan())
    );

    // RAW-only diagnostics do not leak into AVE output
    assert!(nc.variable("valid_spectra").is_none());
    assert!(nc.variable("bandwidth").is_none());
}

#[test]
fn variable_attributes_carry_units() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("0304.raw");
    fs::write(&input, RAW_CONTENT).unwrap();
    let output = temp_dir.path().join("0304.nc");

    let outcome = MrrParser::new().parse_file(&input).unwrap();
    NetcdfWriter::new().write(&outcome.dataset, &output).unwrap();

    let nc = netcdf::open(&output).unwrap();
    let height = nc.variable("height").unwrap();
    assert!(height.attribute("units").is_some());
    assert!(height.attribute("long_name").is_some());
    assert!(nc.attribute("source").is_some());
    assert!(nc.attribute("history").is_some());
}

#[test]
fn mixed_processing_levels_fail_the_whole_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("mixed.mrr");
    fs::write(&input, format!("{RAW_CONTENT}{AVE_CONTENT}")).unwrap();

    let error = MrrParser::new().parse_file(&input).unwrap_err();
    assert!(matches!(error, Error::MixedProcessingLevels { .. }));
}

#[test]
fn malformed_lines_convert_with_warnings_not_failures() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("noisy.mrr");
    let content = format!("{RAW_CONTENT}GARBAGE LINE THAT MATCHES NOTHING\n");
    fs::write(&input, content).unwrap();
    let output = temp_dir.path().join("noisy.nc");

    let outcome = MrrParser::new().parse_file(&input).unwrap();
    assert_eq!(outcome.stats.warnings.len(), 1);
    assert_eq!(outcome.stats.warnings[0].line_number, 8);

    // The file still converts
    NetcdfWriter::new().write(&outcome.dataset, &output).unwrap();
    assert!(output.exists());
}

#[test]
fn input_discovery_expands_glob_patterns() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.raw"), RAW_CONTENT).unwrap();
    fs::write(temp_dir.path().join("b.raw"), RAW_CONTENT).unwrap();

    let pattern = format!("{}/*.raw", temp_dir.path().display());
    let inputs = discover_inputs(&[pattern]).unwrap();
    assert_eq!(inputs.len(), 2);

    for input in &inputs {
        let output = output_path_for(input, Some(temp_dir.path()));
        let outcome = MrrParser::new().parse_file(input).unwrap();
        NetcdfWriter::new().write(&outcome.dataset, &output).unwrap();
        assert!(output.exists());
    }
}
