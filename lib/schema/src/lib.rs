//! # knnx Schema
//!
//! Field schema mapping and training instance tables.
//!
//! ## Overview
//!
//! An encoded nearest-neighbor model embeds its training data verbatim.
//! This crate decides how that data is laid out:
//!
//! 1. [`Schema`] names the target field and the active (feature) fields
//! 2. [`Schema::field_mapping`] turns it into column keys, KNN inputs and
//!    a mining schema, rejecting duplicate names
//! 3. [`build_instance_table`] formats one row per training instance
//!
//! ## Example
//!
//! ```rust
//! use knnx_core::{CanonicalFormatter, FeatureMatrix};
//! use knnx_schema::{build_instance_table, FieldName, Schema};
//!
//! let schema = Schema::new(
//!     Some(FieldName::new("y")),
//!     vec![FieldName::new("x1"), FieldName::new("x2")],
//! );
//! let mapping = schema.field_mapping().unwrap();
//!
//! let matrix = FeatureMatrix::from_flat(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
//! let targets = [10.0, 20.0];
//! let table = build_instance_table(
//!     &mapping.column_keys,
//!     Some(&targets[..]),
//!     &matrix,
//!     &CanonicalFormatter,
//! ).unwrap();
//!
//! assert_eq!(table.rows[1].get("x2"), Some("4"));
//! ```

pub mod schema;
pub mod table;

// Re-export main types
pub use schema::{
    Schema,
    FieldName,
    FieldMapping,
    InstanceField,
    MiningSchema,
    MiningField,
    UsageType,
};
pub use table::{build_instance_table, InstanceTable, Row};
