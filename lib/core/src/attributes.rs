//! Attribute store of a fitted estimator
//!
//! The store is the decoded `__dict__` of the estimator as a JSON object.
//! Every read is typed; a missing key is [`Error::MissingAttribute`] and a
//! value of the wrong kind is [`Error::InvalidConfiguration`].

use crate::array::{type_name, NdArray};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeStore {
    attributes: Map<String, Value>,
}

impl AttributeStore {
    /// Wrap an already decoded attribute dictionary
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// Wrap a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(attributes) => Ok(Self { attributes }),
            other => Err(Error::InvalidConfiguration(format!(
                "attribute store must be an object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Set `key`, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    /// Whether `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Raw value for `key`
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.attributes
            .get(key)
            .ok_or_else(|| Error::MissingAttribute(key.to_string()))
    }

    /// String stored under `key`
    pub fn get_str(&self, key: &str) -> Result<&str> {
        let value = self.get(key)?;
        value.as_str().ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "{}: expected a string, got {}",
                key,
                type_name(value)
            ))
        })
    }

    /// Integer-valued number; floats are accepted when they are integral
    pub fn get_integer(&self, key: &str) -> Result<i64> {
        let value = self.get(key)?;
        let number = match value {
            Value::Number(number) => number,
            other => {
                return Err(Error::InvalidConfiguration(format!(
                    "{}: expected a number, got {}",
                    key,
                    type_name(other)
                )))
            }
        };

        if let Some(i) = number.as_i64() {
            return Ok(i);
        }
        match number.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < (1u64 << 53) as f64 => {
                Ok(f as i64)
            }
            _ => Err(Error::InvalidConfiguration(format!(
                "{}: expected an integral value, got {}",
                key, number
            ))),
        }
    }

    /// Numeric array stored under `key`
    pub fn get_array(&self, key: &str) -> Result<NdArray> {
        NdArray::from_value(key, self.get(key)?)
    }
}

impl From<Map<String, Value>> for AttributeStore {
    fn from(attributes: Map<String, Value>) -> Self {
        Self::new(attributes)
    }
}
