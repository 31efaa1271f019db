//! Core NetCDF writer implementation
//!
//! One call writes one finalized dataset into one NetCDF file. Variables are
//! dimensioned from the array ranks the parser produced: per-profile scalars
//! over `time`, level vectors over `time x level`, spectral quantities over
//! `time x level x band`.

use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::app::services::mrr_parser::dataset::{DataArray, Dataset, Field};
use crate::app::services::mrr_parser::size::FileGeometry;
use crate::constants::{
    DIM_BAND, DIM_LEVEL, DIM_TIME, MISSING_FLOAT, MISSING_INT, TOOL_NAME, TOOL_VERSION,
};
use crate::{Error, Result};

/// Counters describing one completed write
#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteStats {
    /// Data variables written (coordinate variables excluded)
    pub variables_written: usize,
    /// Variable attributes written
    pub attributes_written: usize,
}

/// Writer serializing parsed MRR-2 datasets to NetCDF
#[derive(Debug, Default)]
pub struct NetcdfWriter;

impl NetcdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write one dataset to `output_path`, replacing any existing file
    ///
    /// An empty dataset still produces a file so that batch runs leave one
    /// output per input; it carries the global attributes and nothing else.
    pub fn write(&self, dataset: &Dataset, output_path: &Path) -> Result<WriteStats> {
        info!("Writing NetCDF output to {}", output_path.display());

        let mut nc = netcdf::create(output_path).map_err(|e| {
            Error::netcdf_write(
                format!("Failed to create {}", output_path.display()),
                e,
            )
        })?;
        let mut stats = WriteStats::default();

        self.write_global_attributes(&mut nc)?;

        if dataset.is_empty() {
            debug!("dataset is empty, wrote global attributes only");
            return Ok(stats);
        }

        let geometry = dataset.geometry;
        nc.add_dimension(DIM_TIME, geometry.profiles)?;
        nc.add_dimension(DIM_LEVEL, geometry.levels)?;
        nc.add_dimension(DIM_BAND, geometry.bands)?;

        self.write_coordinates(&mut nc, geometry)?;

        for (name, field) in dataset.iter() {
            self.write_field(&mut nc, name, field, &mut stats)?;
        }

        debug!(
            variables = stats.variables_written,
            attributes = stats.attributes_written,
            "NetCDF write complete"
        );
        Ok(stats)
    }

    /// Index variables for the level and band axes
    ///
    /// Named `level_index` and `band_index` rather than after the dimensions:
    /// the dataset itself carries a `level` data variable (the processing
    /// level string), and the time axis gets its values from the `time` data
    /// variable.
    fn write_coordinates(&self, nc: &mut netcdf::FileMut, geometry: FileGeometry) -> Result<()> {
        let mut level = nc.add_variable::<i32>("level_index", &[DIM_LEVEL])?;
        level.put_attribute("long_name", "height level index")?;
        let levels: Vec<i32> = (0..geometry.levels).map(|i| i as i32).collect();
        level.put_values(&levels, ..)?;
        drop(level);

        let mut band = nc.add_variable::<i32>("band_index", &[DIM_BAND])?;
        band.put_attribute("long_name", "Doppler band index")?;
        let bands: Vec<i32> = (0..geometry.bands).map(|i| i as i32).collect();
        band.put_values(&bands, ..)?;

        Ok(())
    }

    /// Write one data variable with its attributes
    fn write_field(
        &self,
        nc: &mut netcdf::FileMut,
        name: &str,
        field: &Field,
        stats: &mut WriteStats,
    ) -> Result<()> {
        let dims = dimensions_for(field.data.shape().len());

        match &field.data {
            DataArray::Float(array) => {
                let mut var = nc.add_variable::<f64>(name, dims)?;
                var.set_fill_value(MISSING_FLOAT)?;
                var.put_attribute("missing_value", MISSING_FLOAT)?;
                for (attr, value) in &field.attributes {
                    var.put_attribute(attr.as_str(), value.as_str())?;
                    stats.attributes_written += 1;
                }
                let flat: Vec<f64> = array.iter().copied().collect();
                var.put_values(&flat, ..)?;
            }
            DataArray::Int(array) => {
                let mut var = nc.add_variable::<i64>(name, dims)?;
                var.set_fill_value(MISSING_INT)?;
                var.put_attribute("missing_value", MISSING_INT)?;
                for (attr, value) in &field.attributes {
                    var.put_attribute(attr.as_str(), value.as_str())?;
                    stats.attributes_written += 1;
                }
                let flat: Vec<i64> = array.iter().copied().collect();
                var.put_values(&flat, ..)?;
            }
            DataArray::Text(values) => {
                let mut var = nc.add_string_variable(name, dims)?;
                for (attr, value) in &field.attributes {
                    var.put_attribute(attr.as_str(), value.as_str())?;
                    stats.attributes_written += 1;
                }
                for (index, value) in values.iter().enumerate() {
                    var.put_string(value, [index])?;
                }
            }
        }

        stats.variables_written += 1;
        Ok(())
    }

    /// Provenance attributes on the file itself
    fn write_global_attributes(&self, nc: &mut netcdf::FileMut) -> Result<()> {
        nc.add_attribute("source", format!("{TOOL_NAME} {TOOL_VERSION}").as_str())?;
        nc.add_attribute(
            "history",
            format!(
                "{}: converted by {} {}",
                Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                TOOL_NAME,
                TOOL_VERSION
            )
            .as_str(),
        )?;
        Ok(())
    }
}

/// Dimension names for an array of the given rank
fn dimensions_for(rank: usize) -> &'static [&'static str] {
    match rank {
        1 => &[DIM_TIME],
        2 => &[DIM_TIME, DIM_LEVEL],
        _ => &[DIM_TIME, DIM_LEVEL, DIM_BAND],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MrrParser;
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

    #[test]
    fn test_write_and_reopen_raw_dataset() {
        let outcome = MrrParser::new().parse_str(RAW_CONTENT).unwrap();
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("out.nc");

        let stats = NetcdfWriter::new()
            .write(&outcome.dataset, &output_path)
            .unwrap();
        assert_eq!(stats.variables_written, outcome.dataset.len());
        assert!(output_path.exists());

        let nc = netcdf::open(&output_path).unwrap();
        assert_eq!(nc.dimension("time").unwrap().len(), 2);
        assert_eq!(nc.dimension("level").unwrap().len(), 3);
        assert_eq!(nc.dimension("band").unwrap().len(), 64);

        let height = nc.variable("height").unwrap();
        let values = height.get_values::<f64, _>(..).unwrap();
        assert_eq!(values.len(), 6);
        assert_eq!(values[0], 100.0);
        assert_eq!(values[5], 300.0);

        // Text fields come out as string variables
        assert!(nc.variable("time").is_some());
        assert!(nc.variable("level").is_some());

        // Axis index variables
        assert!(nc.variable("level_index").is_some());
        assert!(nc.variable("band_index").is_some());
    }

    #[test]
    fn test_units_carried_as_variable_attributes() {
        let outcome = MrrParser::new().parse_str(RAW_CONTENT).unwrap();
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("out.nc");

        NetcdfWriter::new()
            .write(&outcome.dataset, &output_path)
            .unwrap();

        let nc = netcdf::open(&output_path).unwrap();
        let height = nc.variable("height").unwrap();
        assert!(height.attribute("units").is_some());
        assert!(height.attribute("long_name").is_some());

        let spectral = nc.variable("spectral_reflectivity").unwrap();
        assert_eq!(spectral.dimensions().len(), 3);
    }

    #[test]
    fn test_sentinel_values_survive_the_round_trip() {
        let outcome = MrrParser::new().parse_str(RAW_CONTENT).unwrap();
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("out.nc");

        NetcdfWriter::new()
            .write(&outcome.dataset, &output_path)
            .unwrap();

        let nc = netcdf::open(&output_path).unwrap();
        let spectral = nc.variable("spectral_reflectivity").unwrap();
        let values = spectral.get_values::<f64, _>(..).unwrap();
        // [profile 0, level 0, band 7] was written, band 6 never was
        assert_eq!(values[7], 1.5);
        assert!(values[6].is_nan());
    }

    #[test]
    fn test_empty_dataset_still_produces_a_file() {
        let outcome = MrrParser::new().parse_str("").unwrap();
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("empty.nc");

        let stats = NetcdfWriter::new()
            .write(&outcome.dataset, &output_path)
            .unwrap();
        assert_eq!(stats.variables_written, 0);
        assert!(output_path.exists());

        let nc = netcdf::open(&output_path).unwrap();
        assert!(nc.attribute("source").is_some());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let outcome = MrrParser::new().parse_str(RAW_CONTENT).unwrap();
        let result = NetcdfWriter::new().write(
            &outcome.dataset,
            Path::new("/nonexistent/directory/out.nc"),
        );
        assert!(matches!(result, Err(Error::NetcdfWrite { .. })));
    }
}
