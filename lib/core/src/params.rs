//! Typed view of a fitted `KNeighborsRegressor`
//!
//! All coercions from the untyped attribute store happen here, once.

use crate::array::{FeatureMatrix, NdArray};
use crate::attributes::AttributeStore;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const N_NEIGHBORS: &str = "n_neighbors";
pub const WEIGHTS: &str = "weights";
pub const METRIC: &str = "metric";
pub const P: &str = "p";
pub const FIT_X: &str = "_fit_X";
pub const Y: &str = "_y";

/// Estimator hyperparameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub n_neighbors: usize,
    pub weights: String,
    pub metric: String,
    /// Minkowski order
    pub p: u32,
}

impl Hyperparameters {
    pub fn from_attributes(store: &AttributeStore) -> Result<Self> {
        let n_neighbors = positive(N_NEIGHBORS, store.get_integer(N_NEIGHBORS)?)?;
        let p = positive(P, store.get_integer(P)?)?;

        let p = u32::try_from(p)
            .map_err(|_| Error::InvalidConfiguration(format!("{}: {} is out of range", P, p)))?;

        Ok(Self {
            n_neighbors,
            weights: store.get_str(WEIGHTS)?.to_string(),
            metric: store.get_str(METRIC)?.to_string(),
            p,
        })
    }
}

impl Default for Hyperparameters {
    /// scikit-learn defaults
    fn default() -> Self {
        Self {
            n_neighbors: 5,
            weights: "uniform".to_string(),
            metric: "minkowski".to_string(),
            p: 2,
        }
    }
}

/// Training data memorised by the estimator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnedState {
    pub fit_x: FeatureMatrix,
    pub y: Vec<f64>,
}

impl LearnedState {
    /// Read `_fit_X` (rank 2) and `_y`
    ///
    /// The target length is not checked here; the encoder reports it as a
    /// shape mismatch together with the instance count.
    pub fn from_attributes(store: &AttributeStore) -> Result<Self> {
        let fit_x = FeatureMatrix::from_array(FIT_X, store.get_array(FIT_X)?)?;
        let y: NdArray = store.get_array(Y)?;

        debug!(
            instances = fit_x.n_instances(),
            features = fit_x.n_features(),
            targets = y.len(),
            "read learned state"
        );
        Ok(Self { fit_x, y: y.data })
    }
}

fn positive(key: &str, value: i64) -> Result<usize> {
    if value < 1 {
        return Err(Error::InvalidConfiguration(format!(
            "{}: expected a positive integer, got {}",
            key, value
        )));
    }
    usize::try_from(value)
        .map_err(|_| Error::InvalidConfiguration(format!("{}: {} is out of range", key, value)))
}
