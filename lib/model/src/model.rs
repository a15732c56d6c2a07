//! Nearest-neighbor model description
//!
//! The assembled model is a plain serde value; emitting it as PMML, JSON or
//! anything else is left to the caller.

use crate::measure::ComparisonMeasure;
use knnx_core::{Error, Hyperparameters, Result};
use knnx_schema::{FieldMapping, FieldName, InstanceField, InstanceTable, MiningSchema};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const UNIFORM: &str = "uniform";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MiningFunction {
    Regression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContinuousScoringMethod {
    Average,
}

/// Data type of the model's input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    Float,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingInstances {
    /// Table values are already in model input space
    pub transformed: bool,
    pub instance_fields: Vec<InstanceField>,
    pub inline_table: InstanceTable,
}

/// Encoded k-nearest-neighbors regression model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescription {
    pub function_name: MiningFunction,
    pub number_of_neighbors: usize,
    pub data_type: DataType,
    pub mining_schema: MiningSchema,
    pub training_instances: TrainingInstances,
    pub comparison_measure: ComparisonMeasure,
    pub knn_inputs: Vec<FieldName>,
    pub continuous_scoring_method: ContinuousScoringMethod,
}

impl ModelDescription {
    pub fn target_field(&self) -> Option<&FieldName> {
        self.mining_schema.target()
    }

    pub fn number_of_instances(&self) -> usize {
        self.training_instances.inline_table.len()
    }
}

/// Compose the model from its validated parts
///
/// Fails with [`Error::UnsupportedWeighting`] unless `params.weights` is
/// `"uniform"`.
pub fn assemble(
    params: &Hyperparameters,
    mapping: FieldMapping,
    table: InstanceTable,
    comparison_measure: ComparisonMeasure,
    data_type: DataType,
) -> Result<ModelDescription> {
    if params.weights != UNIFORM {
        return Err(Error::UnsupportedWeighting(params.weights.clone()));
    }

    let FieldMapping {
        instance_fields,
        knn_inputs,
        mining_schema,
        ..
    } = mapping;

    let model = ModelDescription {
        function_name: MiningFunction::Regression,
        number_of_neighbors: params.n_neighbors,
        data_type,
        mining_schema,
        training_instances: TrainingInstances {
            transformed: true,
            instance_fields,
            inline_table: table,
        },
        comparison_measure,
        knn_inputs,
        continuous_scoring_method: ContinuousScoringMethod::Average,
    };

    info!(
        neighbors = model.number_of_neighbors,
        instances = model.number_of_instances(),
        inputs = model.knn_inputs.len(),
        measure = ?model.comparison_measure.measure,
        "assembled nearest-neighbor model"
    );
    Ok(model)
}
