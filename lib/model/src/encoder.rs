//! Encoder for fitted `KNeighborsRegressor` estimators

use crate::measure::encode_comparison_measure;
use crate::model::{assemble, DataType, ModelDescription};
use knnx_core::{
    check_targets, AttributeStore, CanonicalFormatter, Hyperparameters, LearnedState, Result,
    ValueFormatter,
};
use knnx_schema::{build_instance_table, Schema};
use tracing::debug;

/// A fitted k-nearest-neighbors regressor, read from its attribute store
#[derive(Debug, Clone, PartialEq)]
pub struct KNeighborsRegressor {
    params: Hyperparameters,
    state: LearnedState,
}

impl KNeighborsRegressor {
    /// Build from already validated parts
    pub fn new(params: Hyperparameters, state: LearnedState) -> Self {
        Self { params, state }
    }

    /// Read and validate hyperparameters and learned arrays
    pub fn from_attributes(store: &AttributeStore) -> Result<Self> {
        let params = Hyperparameters::from_attributes(store)?;
        let state = LearnedState::from_attributes(store)?;
        Ok(Self { params, state })
    }

    /// Validated hyperparameters
    pub fn params(&self) -> &Hyperparameters {
        &self.params
    }

    /// Learned training arrays
    pub fn state(&self) -> &LearnedState {
        &self.state
    }

    /// Columns of `_fit_X`
    pub fn number_of_features(&self) -> usize {
        self.state.fit_x.n_features()
    }

    /// Rows of `_fit_X`
    pub fn number_of_instances(&self) -> usize {
        self.state.fit_x.n_instances()
    }

    /// Data type of every encoded field
    pub fn data_type(&self) -> DataType {
        DataType::Float
    }

    /// Encode with the canonical number formatter
    pub fn encode_model(&self, schema: &Schema) -> Result<ModelDescription> {
        self.encode_model_with(schema, &CanonicalFormatter)
    }

    /// Encode, formatting table cells with `formatter`
    pub fn encode_model_with<F>(&self, schema: &Schema, formatter: &F) -> Result<ModelDescription>
    where
        F: ValueFormatter + ?Sized,
    {
        let (n_instances, n_features) = self.state.fit_x.shape();
        debug!(n_instances, n_features, "encoding KNeighborsRegressor");

        // one target per instance, whether or not the schema embeds it
        check_targets(&self.state.y, n_instances)?;

        let mapping = schema.field_mapping()?;

        let targets = if mapping.has_target() {
            Some(self.state.y.as_slice())
        } else {
            None
        };

        let table = build_instance_table(&mapping.column_keys, targets, &self.state.fit_x, formatter)?;

        let measure = encode_comparison_measure(&self.params.metric, self.params.p)?;
        debug!(measure = ?measure.measure, "encoded comparison measure");

        assemble(&self.params, mapping, table, measure, self.data_type())
    }
}
