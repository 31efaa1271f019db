//! Array assembler and finalized dataset
//!
//! Owns the growing set of output arrays. Arrays are allocated lazily on
//! first write, sentinel-filled (NaN for floats, a fixed negative sentinel
//! for integers, empty strings for text), shaped from the probed file
//! geometry, and mutated in place for the rest of the pass. They are never
//! resized after allocation.

use std::collections::BTreeMap;

use ndarray::{ArrayD, IxDyn};

use crate::app::models::{FieldDtype, FieldRank, HeaderValue, ProcessingLevel};
use crate::app::services::mrr_parser::fields::{FieldDescriptor, FieldRegistry};
use crate::app::services::mrr_parser::size::FileGeometry;
use crate::constants::{MISSING_FLOAT, MISSING_INT};
use crate::{Error, Result};

/// One output array, typed per its field descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum DataArray {
    Float(ArrayD<f64>),
    Int(ArrayD<i64>),
    /// Per-profile text values (text fields are always profile scalars)
    Text(Vec<String>),
}

impl DataArray {
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Float(a) => a.shape().to_vec(),
            Self::Int(a) => a.shape().to_vec(),
            Self::Text(v) => vec![v.len()],
        }
    }
}

/// A finalized field: its array plus descriptive attributes
#[derive(Debug, Clone)]
pub struct Field {
    pub data: DataArray,
    pub attributes: Vec<(String, String)>,
}

/// The assembler owning all arrays during the parsing pass
#[derive(Debug)]
pub struct ArraySet {
    geometry: FileGeometry,
    fields: BTreeMap<&'static str, Field>,
}

impl ArraySet {
    pub fn new(geometry: FileGeometry) -> Self {
        Self {
            geometry,
            fields: BTreeMap::new(),
        }
    }

    fn shape_for(&self, rank: FieldRank) -> Vec<usize> {
        match rank {
            FieldRank::Scalar => vec![self.geometry.profiles],
            FieldRank::LevelVector => vec![self.geometry.profiles, self.geometry.levels],
            FieldRank::BandVector => vec![
                self.geometry.profiles,
                self.geometry.levels,
                self.geometry.bands,
            ],
        }
    }

    /// Get the array for a field, allocating and sentinel-filling on first use
    ///
    /// Allocation parameters always come from the static field registry.
    /// A descriptor combining a vector rank with a non-float dtype other
    /// than the level-vector integer case indicates a corrupted registry
    /// and is fatal, not recoverable.
    pub fn ensure(&mut self, descriptor: &FieldDescriptor) -> Result<&mut DataArray> {
        if !self.fields.contains_key(descriptor.name) {
            let shape = self.shape_for(descriptor.rank);
            let data = match (descriptor.dtype, descriptor.rank) {
                (FieldDtype::Float64, _) => {
                    DataArray::Float(ArrayD::from_elem(IxDyn(&shape), MISSING_FLOAT))
                }
                (FieldDtype::Int64, FieldRank::Scalar | FieldRank::LevelVector) => {
                    DataArray::Int(ArrayD::from_elem(IxDyn(&shape), MISSING_INT))
                }
                (FieldDtype::Text, FieldRank::Scalar) => {
                    DataArray::Text(vec![String::new(); self.geometry.profiles])
                }
                (dtype, rank) => {
                    return Err(Error::registry_invariant(
                        descriptor.name,
                        format!("dtype {:?} is not valid for rank {:?}", dtype, rank),
                    ));
                }
            };
            self.fields.insert(
                descriptor.name,
                Field {
                    data,
                    attributes: descriptor.attributes(),
                },
            );
        }
        Ok(&mut self
            .fields
            .get_mut(descriptor.name)
            .expect("field allocated above")
            .data)
    }

    /// Write one decoded header scalar at the given profile row
    ///
    /// Integer header values are widened into float64 arrays where the
    /// registry declares the field as float; any other dtype disagreement
    /// is a registry invariant violation.
    pub fn write_header_scalar(
        &mut self,
        descriptor: &FieldDescriptor,
        profile: usize,
        value: &HeaderValue,
    ) -> Result<()> {
        if descriptor.rank != FieldRank::Scalar {
            return Err(Error::registry_invariant(
                descriptor.name,
                "header scalar routed to a vector-ranked field",
            ));
        }
        match (self.ensure(descriptor)?, value) {
            (DataArray::Float(a), HeaderValue::Float(x)) => a[[profile]] = *x,
            (DataArray::Float(a), HeaderValue::Int(i)) => a[[profile]] = *i as f64,
            (DataArray::Int(a), HeaderValue::Int(i)) => a[[profile]] = *i,
            (DataArray::Text(v), HeaderValue::Text(s)) => v[profile] = s.clone(),
            _ => {
                return Err(Error::registry_invariant(
                    descriptor.name,
                    "header value type disagrees with declared dtype",
                ));
            }
        }
        Ok(())
    }

    /// Write a per-profile text value (time, time zone)
    pub fn write_text(
        &mut self,
        descriptor: &FieldDescriptor,
        profile: usize,
        value: &str,
    ) -> Result<()> {
        match self.ensure(descriptor)? {
            DataArray::Text(v) => {
                v[profile] = value.to_string();
                Ok(())
            }
            _ => Err(Error::registry_invariant(
                descriptor.name,
                "text value routed to a numeric field",
            )),
        }
    }

    /// Write a full level row `[profile, :]` of floats
    pub fn write_level_row_f64(
        &mut self,
        descriptor: &FieldDescriptor,
        profile: usize,
        values: &[f64],
    ) -> Result<()> {
        match self.ensure(descriptor)? {
            DataArray::Float(a) => {
                for (level, value) in values.iter().enumerate() {
                    a[[profile, level]] = *value;
                }
                Ok(())
            }
            _ => Err(Error::registry_invariant(
                descriptor.name,
                "float row routed to a non-float field",
            )),
        }
    }

    /// Write a full level row `[profile, :]` of integers
    pub fn write_level_row_i64(
        &mut self,
        descriptor: &FieldDescriptor,
        profile: usize,
        values: &[i64],
    ) -> Result<()> {
        match self.ensure(descriptor)? {
            DataArray::Int(a) => {
                for (level, value) in values.iter().enumerate() {
                    a[[profile, level]] = *value;
                }
                Ok(())
            }
            _ => Err(Error::registry_invariant(
                descriptor.name,
                "integer row routed to a non-integer field",
            )),
        }
    }

    /// Write a band-resolved row `[profile, :, band]`
    pub fn write_band_row(
        &mut self,
        descriptor: &FieldDescriptor,
        profile: usize,
        band: usize,
        values: &[f64],
    ) -> Result<()> {
        match self.ensure(descriptor)? {
            DataArray::Float(a) => {
                for (level, value) in values.iter().enumerate() {
                    a[[profile, level, band]] = *value;
                }
                Ok(())
            }
            _ => Err(Error::registry_invariant(
                descriptor.name,
                "band-resolved fields must be float64",
            )),
        }
    }

    /// Finalize into the output dataset for the detected processing level
    ///
    /// Every field relevant to the level is present in the output, written
    /// or not; unwritten fields materialize as all-sentinel arrays. A file
    /// that never established a processing level yields an empty dataset.
    pub fn finalize(mut self, level: Option<ProcessingLevel>) -> Result<Dataset> {
        let names = match level {
            Some(level) => FieldRegistry::field_names_for_level(level),
            None => &[],
        };

        let mut fields = BTreeMap::new();
        for &name in names {
            if let Some(descriptor) = FieldRegistry::descriptor_by_name(name) {
                self.ensure(descriptor)?;
            }
            if let Some(field) = self.fields.remove(name) {
                fields.insert(name.to_string(), field);
            }
        }

        Ok(Dataset {
            geometry: self.geometry,
            fields,
        })
    }
}

/// The finalized mapping from field name to array and attributes
#[derive(Debug, Clone)]
pub struct Dataset {
    pub geometry: FileGeometry,
    fields: BTreeMap<String, Field>,
}

impl Dataset {
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
