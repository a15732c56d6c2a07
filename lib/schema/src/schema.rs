//! Field schema of an encoded model
//!
//! Maps the estimator's target and active fields to the column keys of the
//! training instance table, the KNN inputs and the mining schema.

use ahash::AHashSet;
use knnx_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a model field
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Input/output fields the estimator is encoded against
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Target (label) field, absent for unsupervised encodings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<FieldName>,

    /// Active (feature) fields in column order
    #[serde(default)]
    pub active: Vec<FieldName>,
}

impl Schema {
    /// Schema with an optional target and the active fields in column order
    pub fn new(target: Option<FieldName>, active: Vec<FieldName>) -> Self {
        Self { target, active }
    }

    /// Schema with target `y` and active fields `x1..xn`
    pub fn with_default_names(n_features: usize) -> Self {
        Self {
            target: Some(FieldName::new("y")),
            active: (1..=n_features).map(|i| FieldName::new(format!("x{}", i))).collect(),
        }
    }

    /// Build column keys, instance fields, KNN inputs and mining schema
    pub fn field_mapping(&self) -> Result<FieldMapping> {
        let mut seen = AHashSet::with_capacity(self.active.len() + 1);
        let mut mapping = FieldMapping::default();

        if let Some(target) = &self.target {
            mapping.push(target, &mut seen)?;
            mapping.mining_schema.fields.push(MiningField {
                name: target.clone(),
                usage: UsageType::Target,
            });
        }

        for field in &self.active {
            mapping.push(field, &mut seen)?;
            mapping.knn_inputs.push(field.clone());
            mapping.mining_schema.fields.push(MiningField {
                name: field.clone(),
                usage: UsageType::Active,
            });
        }

        Ok(mapping)
    }
}

/// Field to table column binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceField {
    pub field: FieldName,
    pub column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageType {
    Target,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningField {
    pub name: FieldName,
    pub usage: UsageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MiningSchema {
    pub fields: Vec<MiningField>,
}

impl MiningSchema {
    pub fn target(&self) -> Option<&FieldName> {
        self.fields
            .iter()
            .find(|f| f.usage == UsageType::Target)
            .map(|f| &f.name)
    }

    pub fn active(&self) -> impl Iterator<Item = &FieldName> {
        self.fields
            .iter()
            .filter(|f| f.usage == UsageType::Active)
            .map(|f| &f.name)
    }
}

/// Output of [`Schema::field_mapping`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMapping {
    /// Table column keys: target first if present, then active fields
    pub column_keys: Vec<String>,
    pub instance_fields: Vec<InstanceField>,
    /// Active fields only, order preserved
    pub knn_inputs: Vec<FieldName>,
    pub mining_schema: MiningSchema,
}

impl FieldMapping {
    /// Whether the mapping includes a target field
    pub fn has_target(&self) -> bool {
        self.mining_schema.target().is_some()
    }

    fn push(&mut self, field: &FieldName, seen: &mut AHashSet<String>) -> Result<()> {
        let column = field.as_str().to_string();
        if column.is_empty() {
            return Err(Error::InvalidConfiguration("field name must not be empty".to_string()));
        }
        if !seen.insert(column.clone()) {
            return Err(Error::DuplicateField(column));
        }
        self.instance_fields.push(InstanceField {
            field: field.clone(),
            column: column.clone(),
        });
        self.column_keys.push(column);
        Ok(())
    }
}
