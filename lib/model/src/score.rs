//! Reference scorer for encoded models
//!
//! Reads the training instances back out of a [`ModelDescription`] and
//! predicts the way a downstream consumer would: rank instances by the
//! comparison measure, keep the `number_of_neighbors` closest (ties go to
//! the earlier instance) and average their targets.

use crate::measure::ComparisonMeasure;
use crate::model::ModelDescription;
use knnx_core::{parse_value, Error, Result};
use knnx_schema::{FieldName, InstanceField};
use ordered_float::OrderedFloat;

/// Scorer over a parsed copy of a model's training instances
#[derive(Debug, Clone)]
pub struct Scorer {
    k: usize,
    measure: ComparisonMeasure,
    n_inputs: usize,
    /// Row-major instance features in KNN input order
    features: Vec<f64>,
    targets: Vec<f64>,
}

impl Scorer {
    /// Parse the model's training instances; a model must keep at least one neighbor
    pub fn new(model: &ModelDescription) -> Result<Self> {
        if model.number_of_neighbors == 0 {
            return Err(Error::InvalidConfiguration(
                "numberOfNeighbors: expected a positive integer, got 0".to_string(),
            ));
        }

        let target = model.target_field().ok_or_else(|| {
            Error::InvalidConfiguration("model has no target field to average".to_string())
        })?;

        let columns = &model.training_instances.instance_fields;
        let target_column = column_of(columns, target)?;
        let input_columns = model
            .knn_inputs
            .iter()
            .map(|f| column_of(columns, f))
            .collect::<Result<Vec<_>>>()?;

        let table = &model.training_instances.inline_table;
        let mut features = Vec::with_capacity(table.len() * input_columns.len());
        let mut targets = Vec::with_capacity(table.len());

        for (i, row) in table.iter().enumerate() {
            targets.push(cell(row.get(target_column), i, target_column)?);
            for column in &input_columns {
                features.push(cell(row.get(column), i, column)?);
            }
        }

        Ok(Self {
            k: model.number_of_neighbors,
            measure: model.comparison_measure,
            n_inputs: input_columns.len(),
            features,
            targets,
        })
    }

    /// Average target of the `k` nearest training instances to `input`
    pub fn predict(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.n_inputs {
            return Err(Error::shape_mismatch("scoring input", self.n_inputs, input.len()));
        }
        if self.targets.is_empty() {
            return Err(Error::shape_mismatch("training instances", "at least 1", 0));
        }

        let mut ranked: Vec<(OrderedFloat<f64>, usize)> = self
            .instances()
            .enumerate()
            .map(|(i, x)| (OrderedFloat(self.measure.distance(x, input)), i))
            .collect();
        ranked.sort();

        let k = self.k.min(ranked.len());
        let sum: f64 = ranked[..k].iter().map(|&(_, i)| self.targets[i]).sum();
        Ok(sum / k as f64)
    }

    fn instances(&self) -> impl Iterator<Item = &[f64]> {
        let width = self.n_inputs;
        (0..self.targets.len()).map(move |i| &self.features[i * width..(i + 1) * width])
    }
}

impl ModelDescription {
    /// Predict a single input; see [`Scorer`]
    pub fn evaluate(&self, input: &[f64]) -> Result<f64> {
        Scorer::new(self)?.predict(input)
    }
}

fn column_of<'a>(columns: &'a [InstanceField], field: &FieldName) -> Result<&'a str> {
    columns
        .iter()
        .find(|f| &f.field == field)
        .map(|f| f.column.as_str())
        .ok_or_else(|| Error::MissingAttribute(format!("instance field {}", field)))
}

fn cell(value: Option<&str>, row: usize, column: &str) -> Result<f64> {
    let value = value
        .ok_or_else(|| Error::MissingAttribute(format!("row {} column {}", row, column)))?;
    parse_value(value).ok_or_else(|| {
        Error::InvalidConfiguration(format!("row {} column {}: {:?} is not a number", row, column, value))
    })
}
