//! # knnx Core
//!
//! Core library for knnx.
//!
//! This crate reads the learned state of a fitted nearest-neighbors
//! regressor and prepares it for encoding:
//!
//! - [`AttributeStore`] - Typed reads from the estimator's decoded attributes
//! - [`Hyperparameters`] / [`LearnedState`] - Validated estimator configuration and training data
//! - [`NdArray`] / [`FeatureMatrix`] - Learned arrays and shape validation
//! - [`ValueFormatter`] - Canonical, round-tripping number formatting
//!
//! ## Example
//!
//! ```rust
//! use knnx_core::{AttributeStore, Hyperparameters, LearnedState};
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
//! let params = Hyperparameters::from_attributes(&store).unwrap();
//! let state = LearnedState::from_attributes(&store).unwrap();
//! assert_eq!(params.n_neighbors, 2);
//! assert_eq!(state.fit_x.shape(), (3, 2));
//! ```

pub mod error;
pub mod attributes;
pub mod array;
pub mod params;

/// Number formatting for encoded table cells
pub mod format;

pub use error::{Error, Result};
pub use attributes::AttributeStore;
pub use array::{NdArray, FeatureMatrix, check_targets};
pub use params::{Hyperparameters, LearnedState};
pub use format::{ValueFormatter, CanonicalFormatter, format_value, parse_value};
