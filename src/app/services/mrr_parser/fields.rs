//! Field registry for MRR-2 output quantities
//!
//! Declares, for every recognized physical quantity, its tag symbol, output
//! name, element datatype, dimensionality class, and descriptive attributes.
//! The registry is static data; construction never fails.

use std::collections::HashMap;

use crate::app::models::{FieldDtype, FieldRank, ProcessingLevel};

/// Immutable description of one output field
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Tag symbol on data or header lines, if the field has one
    pub symbol: Option<&'static str>,
    /// Output variable name
    pub name: &'static str,
    pub dtype: FieldDtype,
    pub rank: FieldRank,
    pub long_name: &'static str,
    pub units: Option<&'static str>,
}

impl FieldDescriptor {
    /// Descriptive attributes attached to the output variable
    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut attrs = vec![("long_name".to_string(), self.long_name.to_string())];
        if let Some(units) = self.units {
            attrs.push(("units".to_string(), units.to_string()));
        }
        if let Some(symbol) = self.symbol {
            attrs.push(("symbol".to_string(), symbol.to_string()));
        }
        attrs
    }
}

use FieldDtype::{Float64, Int64, Text};
use FieldRank::{BandVector, LevelVector, Scalar};

/// Every quantity the converter knows about, across all processing levels
pub const ALL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        symbol: None,
        name: "time",
        dtype: Text,
        rank: Scalar,
        long_name: "time",
        units: Some(crate::constants::TIME_UNITS),
    },
    FieldDescriptor {
        symbol: None,
        name: "time_zone",
        dtype: Text,
        rank: Scalar,
        long_name: "time zone",
        units: None,
    },
    FieldDescriptor {
        symbol: Some("H"),
        name: "height",
        dtype: Float64,
        rank: LevelVector,
        long_name: "height",
        units: Some("m"),
    },
    FieldDescriptor {
        symbol: Some("TF"),
        name: "transfer_function",
        dtype: Float64,
        rank: LevelVector,
        long_name: "transfer function",
        units: None,
    },
    FieldDescriptor {
        symbol: Some("F"),
        name: "spectral_reflectivity",
        dtype: Float64,
        rank: BandVector,
        long_name: "spectral reflectivity",
        units: Some("dB"),
    },
    FieldDescriptor {
        symbol: Some("D"),
        name: "drop_size",
        dtype: Float64,
        rank: BandVector,
        long_name: "drop size",
        units: Some("mm"),
    },
    FieldDescriptor {
        symbol: Some("N"),
        name: "spectral_drop_density",
        dtype: Float64,
        rank: BandVector,
        long_name: "spectral drop density",
        units: Some("m^{-3} mm^{-1}"),
    },
    FieldDescriptor {
        symbol: Some("PIA"),
        name: "path_integrated_attenuation",
        dtype: Float64,
        rank: LevelVector,
        long_name: "path integrated attenuation",
        units: Some("dB"),
    },
    FieldDescriptor {
        symbol: Some("Z"),
        name: "radar_reflectivity",
        dtype: Float64,
        rank: LevelVector,
        long_name: "radar reflectivity",
        units: Some("dBZ"),
    },
    FieldDescriptor {
        symbol: Some("z"),
        name: "attenuated_radar_reflectivity",
        dtype: Float64,
        rank: LevelVector,
        long_name: "attenuated radar reflectivity",
        units: Some("dBZ"),
    },
    FieldDescriptor {
        symbol: Some("RR"),
        name: "rain_rate",
        dtype: Float64,
        rank: LevelVector,
        long_name: "rain rate",
        units: Some("mm h^{-1}"),
    },
    FieldDescriptor {
        symbol: Some("LWC"),
        name: "liquid_water_content",
        dtype: Float64,
        rank: LevelVector,
        long_name: "liquid water content",
        units: Some("g m^{-3}"),
    },
    FieldDescriptor {
        symbol: Some("W"),
        name: "fall_velocity",
        dtype: Float64,
        rank: LevelVector,
        long_name: "fall velocity",
        units: Some("m s^{-1}"),
    },
    FieldDescriptor {
        symbol: Some("CC"),
        name: "calibration_constant",
        dtype: Float64,
        rank: Scalar,
        long_name: "calibration constant",
        units: None,
    },
    FieldDescriptor {
        symbol: Some("BW"),
        name: "bandwidth",
        dtype: Float64,
        rank: Scalar,
        long_name: "bandwidth",
        units: None,
    },
    FieldDescriptor {
        symbol: Some("MDQ1"),
        name: "valid_spectra_percentage",
        dtype: Float64,
        rank: Scalar,
        long_name: "percentage of valid spectra",
        units: Some("percent"),
    },
    FieldDescriptor {
        symbol: Some("MDQ2"),
        name: "valid_spectra",
        dtype: Int64,
        rank: Scalar,
        long_name: "number of valid spectra",
        units: None,
    },
    FieldDescriptor {
        symbol: Some("MDQ3"),
        name: "total_spectra",
        dtype: Int64,
        rank: Scalar,
        long_name: "number of total spectra",
        units: None,
    },
    FieldDescriptor {
        symbol: Some("DVS"),
        name: "firmware_version",
        dtype: Text,
        rank: Scalar,
        long_name: "firmware version",
        units: None,
    },
    FieldDescriptor {
        symbol: Some("SVS"),
        name: "service_version",
        dtype: Text,
        rank: Scalar,
        long_name: "service version",
        units: None,
    },
    FieldDescriptor {
        symbol: Some("DSN"),
        name: "device_serial_number",
        dtype: Text,
        rank: Scalar,
        long_name: "device serial number",
        units: None,
    },
    FieldDescriptor {
        symbol: Some("AVE"),
        name: "averaging_time",
        dtype: Float64,
        rank: Scalar,
        long_name: "averaging time",
        units: Some("s"),
    },
    FieldDescriptor {
        symbol: Some("STP"),
        name: "height_resolution",
        dtype: Float64,
        rank: Scalar,
        long_name: "height resolution",
        units: Some("m"),
    },
    FieldDescriptor {
        symbol: Some("ASL"),
        name: "radar_altitude",
        dtype: Float64,
        rank: Scalar,
        long_name: "radar altitude above sea level",
        units: Some("m"),
    },
    FieldDescriptor {
        symbol: Some("SMP"),
        name: "sampling_rate",
        dtype: Float64,
        rank: Scalar,
        long_name: "sampling rate",
        units: Some("Hz"),
    },
    FieldDescriptor {
        symbol: Some("TYP"),
        name: "level",
        dtype: Text,
        rank: Scalar,
        long_name: "processing level",
        units: None,
    },
];

/// The `time` field, written on every accepted header line
pub const TIME_FIELD: &FieldDescriptor = &ALL_FIELDS[0];

/// The `time_zone` field, written on every accepted header line
pub const TIME_ZONE_FIELD: &FieldDescriptor = &ALL_FIELDS[1];

/// Field names present in a RAW-level file
const RAW_FIELDS: &[&str] = &[
    "bandwidth",
    "calibration_constant",
    "device_serial_number",
    "firmware_version",
    "height",
    "level",
    "spectral_reflectivity",
    "time",
    "time_zone",
    "total_spectra",
    "transfer_function",
    "valid_spectra",
    "valid_spectra_percentage",
];

/// Field names present in AVE- and PRO-level files (the derived quantities)
const AVE_PRO_FIELDS: &[&str] = &[
    "attenuated_radar_reflectivity",
    "averaging_time",
    "calibration_constant",
    "device_serial_number",
    "drop_size",
    "fall_velocity",
    "firmware_version",
    "height",
    "height_resolution",
    "level",
    "liquid_water_content",
    "path_integrated_attenuation",
    "radar_altitude",
    "radar_reflectivity",
    "rain_rate",
    "sampling_rate",
    "service_version",
    "spectral_drop_density",
    "spectral_reflectivity",
    "time",
    "time_zone",
    "transfer_function",
    "valid_spectra_percentage",
];

/// Symbol-indexed view of the field table
///
/// Lookups support both the full tag symbol and, for band-resolved rows
/// whose tag carries an inline band index ("F07"), the single-letter first
/// character. An exact symbol match always takes priority over a
/// first-character match.
#[derive(Debug)]
pub struct FieldRegistry {
    by_symbol: HashMap<&'static str, &'static FieldDescriptor>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        let by_symbol = ALL_FIELDS
            .iter()
            .filter_map(|d| d.symbol.map(|s| (s, d)))
            .collect();
        Self { by_symbol }
    }

    /// Resolve a data-line tag to its field descriptor
    pub fn lookup(&self, tag: &str) -> Option<&'static FieldDescriptor> {
        if let Some(descriptor) = self.by_symbol.get(tag).copied() {
            return Some(descriptor);
        }
        let first = tag.get(..1)?;
        self.by_symbol.get(first).copied()
    }

    /// Resolve an exact symbol only (header scalar routing)
    pub fn lookup_exact(&self, symbol: &str) -> Option<&'static FieldDescriptor> {
        self.by_symbol.get(symbol).copied()
    }

    /// Output field names relevant to one processing level
    pub fn field_names_for_level(level: ProcessingLevel) -> &'static [&'static str] {
        match level {
            ProcessingLevel::Raw => RAW_FIELDS,
            ProcessingLevel::Ave | ProcessingLevel::Pro => AVE_PRO_FIELDS,
        }
    }

    /// Look up a descriptor by output field name
    pub fn descriptor_by_name(name: &str) -> Option<&'static FieldDescriptor> {
        ALL_FIELDS.iter().find(|d| d.name == name)
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_descriptors_point_at_the_right_fields() {
        assert_eq!(TIME_FIELD.name, "time");
        assert_eq!(TIME_ZONE_FIELD.name, "time_zone");
    }

    #[test]
    fn test_symbols_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for descriptor in ALL_FIELDS {
            if let Some(symbol) = descriptor.symbol {
                assert!(seen.insert(symbol), "duplicate symbol {}", symbol);
            }
        }
    }

    #[test]
    fn test_exact_match_takes_priority() {
        let registry = FieldRegistry::new();
        // "D" alone is drop size, "DSN" must resolve to the serial number
        assert_eq!(registry.lookup("D").unwrap().name, "drop_size");
        assert_eq!(registry.lookup("DSN").unwrap().name, "device_serial_number");
        assert_eq!(registry.lookup("DVS").unwrap().name, "firmware_version");
    }

    #[test]
    fn test_band_suffixed_tags_fall_back_to_first_character() {
        let registry = FieldRegistry::new();
        assert_eq!(
            registry.lookup("F07").unwrap().name,
            "spectral_reflectivity"
        );
        assert_eq!(registry.lookup("D63").unwrap().name, "drop_size");
        assert_eq!(
            registry.lookup("N00").unwrap().name,
            "spectral_drop_density"
        );
    }

    #[test]
    fn test_case_sensitive_reflectivity_symbols() {
        let registry = FieldRegistry::new();
        assert_eq!(registry.lookup("Z").unwrap().name, "radar_reflectivity");
        assert_eq!(
            registry.lookup("z").unwrap().name,
            "attenuated_radar_reflectivity"
        );
    }

    #[test]
    fn test_unknown_tags() {
        let registry = FieldRegistry::new();
        assert!(registry.lookup("Q").is_none());
        assert!(registry.lookup("XYZ").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_level_field_lists_name_known_fields() {
        for level in [
            ProcessingLevel::Raw,
            ProcessingLevel::Ave,
            ProcessingLevel::Pro,
        ] {
            for name in FieldRegistry::field_names_for_level(level) {
                assert!(
                    FieldRegistry::descriptor_by_name(name).is_some(),
                    "level list names unknown field {}",
                    name
                );
            }
        }
    }
}
