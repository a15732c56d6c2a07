//! # knnx
//!
//! Converts fitted k-nearest-neighbors regressors into self-contained
//! distance-model descriptions.
//!
//! The encoded model embeds the training instances verbatim, together with
//! the neighbor count and comparison measure, so a scorer can reproduce
//! predictions without the original training runtime.
//!
//! ## Quick Start
//!
//! ### From the Command Line
//!
//! ```bash
//! knnx --attributes knn.json --schema schema.json --output model.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use knnx::prelude::*;
//! use serde_json::json;
//!
//! let store = AttributeStore::from_value(json!({
//!     "n_neighbors": 2,
//!     "weights": "uniform",
//!     "metric": "minkowski",
//!     "p": 1,
//!     "_fit_X": [[1, 2], [3, 4], [5, 6]],
//!     "_y": [10, 20, 30],
//! })).unwrap();
//!
//! let knn = KNeighborsRegressor::from_attributes(&store).unwrap();
//! let model = knn.encode_model(&Schema::with_default_names(2)).unwrap();
//! assert_eq!(model.comparison_measure.measure, Measure::CityBlock);
//! ```
//!
//! ## Crate Structure
//!
//! - [`knnx-core`](https://docs.rs/knnx-core) - Attribute store, shape validation, number formatting
//! - [`knnx-schema`](https://docs.rs/knnx-schema) - Field mapping and training instance tables
//! - [`knnx-model`](https://docs.rs/knnx-model) - Comparison measures, model assembly, reference scoring

// Re-export core types
pub use knnx_core::{
    AttributeStore, Hyperparameters, LearnedState,
    NdArray, FeatureMatrix,
    ValueFormatter, CanonicalFormatter,
    Error, Result,
};

// Re-export schema
pub use knnx_schema::{Schema, FieldName, FieldMapping, InstanceTable, Row};

// Re-export model
pub use knnx_model::{
    KNeighborsRegressor, ModelDescription, Scorer,
    ComparisonMeasure, Measure,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AttributeStore, Hyperparameters, LearnedState,
        ValueFormatter, CanonicalFormatter,
        Error, Result,
        Schema, FieldName,
        KNeighborsRegressor, ModelDescription, Scorer,
        ComparisonMeasure, Measure,
    };
}

/// Canonical number formatting
pub mod format {
    pub use knnx_core::format::{format_value, parse_value};
}
