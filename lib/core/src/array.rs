//! Learned arrays and their shapes
//!
//! Arrays arrive from the attribute store either as nested JSON arrays
//! (`[[1, 2], [3, 4]]`) or as an explicit `{"shape": [...], "data": [...]}`
//! object. Both decode into a flat row-major [`NdArray`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded numeric array: flat row-major data plus its declared shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdArray {
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

impl NdArray {
    /// Create an array, checking that the shape covers the data exactly
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(|| {
                Error::shape_mismatch(
                    "array data",
                    format!("an addressable element count for shape {:?}", shape),
                    format!("{} values", data.len()),
                )
            })?;
        if expected != data.len() {
            return Err(Error::shape_mismatch(
                "array data",
                format!("{} values for shape {:?}", expected, shape),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional array over `data`
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Decode an attribute value into an array
    ///
    /// `key` is only used for error messages.
    pub fn from_value(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => {
                let shape = map
                    .get("shape")
                    .ok_or_else(|| Error::MissingAttribute(format!("{}.shape", key)))?;
                let data = map
                    .get("data")
                    .ok_or_else(|| Error::MissingAttribute(format!("{}.data", key)))?;

                let shape = shape
                    .as_array()
                    .ok_or_else(|| invalid(key, "shape must be an array"))?
                    .iter()
                    .map(|dim| {
                        dim.as_u64()
                            .and_then(|d| usize::try_from(d).ok())
                            .ok_or_else(|| invalid(key, "shape entries must be non-negative integers"))
                    })
                    .collect::<Result<Vec<_>>>()?;

                let mut flat = Vec::new();
                flatten(key, data, &mut flat)?;
                Self::new(shape, flat)
            }
            Value::Array(_) => {
                let shape = nested_shape(key, value)?;
                let mut flat = Vec::new();
                flatten(key, value, &mut flat)?;
                Self::new(shape, flat)
            }
            other => Err(invalid(key, &format!("expected an array, got {}", type_name(other)))),
        }
    }

    /// Declared shape, checked against the expected rank
    pub fn shape_of_rank(&self, key: &str, rank: usize) -> Result<&[usize]> {
        if self.shape.len() != rank {
            return Err(Error::shape_mismatch(
                key,
                format!("rank {}", rank),
                format!("rank {} (shape {:?})", self.shape.len(), self.shape),
            ));
        }
        Ok(&self.shape)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Training feature matrix, row-major
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    n_instances: usize,
    n_features: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Partition flat data into rows of `n_features` values
    pub fn from_flat(data: Vec<f64>, n_features: usize) -> Result<Self> {
        if n_features == 0 {
            return Err(Error::shape_mismatch("feature matrix", "at least 1 feature", 0));
        }
        if data.len() % n_features != 0 {
            return Err(Error::shape_mismatch(
                "feature matrix",
                format!("a multiple of {} values", n_features),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self {
            n_instances: data.len() / n_features,
            n_features,
            data,
        })
    }

    /// Reshape a rank-2 learned array into a matrix
    pub fn from_array(key: &str, array: NdArray) -> Result<Self> {
        let shape = array.shape_of_rank(key, 2)?;
        let (rows, cols) = (shape[0], shape[1]);

        let matrix = Self::from_flat(array.data, cols)?;
        if matrix.n_instances != rows {
            return Err(Error::shape_mismatch(key, format!("{} rows", rows), matrix.n_instances));
        }
        Ok(matrix)
    }

    /// Returns the shape as (instances, features)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_instances, self.n_features)
    }

    pub fn n_instances(&self) -> usize {
        self.n_instances
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Feature values of instance `i`
    ///
    /// Panics if `i >= n_instances()`.
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_features;
        &self.data[start..start + self.n_features]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.n_features)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Check that there is exactly one target per training instance
pub fn check_targets(targets: &[f64], n_instances: usize) -> Result<()> {
    if targets.len() != n_instances {
        return Err(Error::shape_mismatch("target vector", n_instances, targets.len()));
    }
    Ok(())
}

fn nested_shape(key: &str, value: &Value) -> Result<Vec<usize>> {
    match value {
        Value::Array(items) => {
            let mut shape = vec![items.len()];
            if let Some(first) = items.first() {
                let inner = nested_shape(key, first)?;
                for item in &items[1..] {
                    let other = nested_shape(key, item)?;
                    if other != inner {
                        return Err(Error::shape_mismatch(
                            key,
                            format!("rows of shape {:?}", inner),
                            format!("a row of shape {:?}", other),
                        ));
                    }
                }
                shape.extend(inner);
            }
            Ok(shape)
        }
        Value::Number(_) => Ok(Vec::new()),
        other => Err(invalid(key, &format!("expected a number, got {}", type_name(other)))),
    }
}

fn flatten(key: &str, value: &Value, out: &mut Vec<f64>) -> Result<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten(key, item, out)?;
            }
            Ok(())
        }
        Value::Number(n) => {
            let v = n
                .as_f64()
                .ok_or_else(|| invalid(key, &format!("{} is not representable as f64", n)))?;
            out.push(v);
            Ok(())
        }
        other => Err(invalid(key, &format!("expected a number, got {}", type_name(other)))),
    }
}

fn invalid(key: &str, msg: &str) -> Error {
    Error::InvalidConfiguration(format!("{}: {}", key, msg))
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
