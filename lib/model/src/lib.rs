//! # knnx Model
//!
//! Encodes fitted nearest-neighbor regressors into portable model
//! descriptions.
//!
//! ## Example
//!
//! ```rust
//! use knnx_core::AttributeStore;
//! use knnx_model::{KNeighborsRegressor, Measure};
//! use knnx_schema::Schema;
//! use serde_json::json;
//!
//! let store = AttributeStore::from_value(json!({
//!     "n_neighbors": 2,
//!     "weights": "uniform",
//!     "metric": "minkowski",
//!     "p": 2,
//!     "_fit_X": [[1, 2], [3, 4], [5, 6]],
//!     "_y": [10, 20, 30],
//! })).unwrap();
//!
//! let knn = KNeighborsRegressor::from_attributes(&store).unwrap();
//! let model = knn.encode_model(&Schema::with_default_names(2)).unwrap();
//!
//! assert_eq!(model.comparison_measure.measure, Measure::Euclidean);
//! assert_eq!(model.evaluate(&[1.0, 2.0]).unwrap(), 15.0);
//! ```
//!
//! ## Encoding Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Attributes  │────>│   Schema    │────>│  Instance   │
//! │ (validated) │     │  (columns)  │     │   Table     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌──────┴──────┐
//!                     │   Model     │<────│ Comparison  │
//!                     │ Description │     │  Measure    │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod measure;
pub mod model;
pub mod encoder;
pub mod score;

pub use measure::{
    encode_comparison_measure,
    ComparisonMeasure,
    CompareFunction,
    Measure,
    MeasureKind,
};
pub use model::{
    assemble,
    ModelDescription,
    TrainingInstances,
    MiningFunction,
    ContinuousScoringMethod,
    DataType,
};
pub use encoder::KNeighborsRegressor;
pub use score::Scorer;
