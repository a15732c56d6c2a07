//! Comparison measures for nearest-neighbor models
//!
//! Only the Minkowski family is encodable. Orders 1 and 2 have named
//! variants; any other order keeps its explicit parameter.

use knnx_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub const MINKOWSKI: &str = "minkowski";

/// Distance function variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Measure {
    /// Manhattan distance: `sum(|a_i - b_i|)`
    CityBlock,
    /// Euclidean distance: `sqrt(sum((a_i - b_i)^2))`
    Euclidean,
    /// Minkowski distance: `sum(|a_i - b_i|^p)^(1/p)`
    Minkowski { p: u32 },
}

impl Measure {
    /// Distance between two points of equal dimension
    pub fn distance(&self, a: &[f64], b: &[f64], compare: CompareFunction) -> f64 {
        let diffs = a.iter().zip(b).map(|(x, y)| compare.apply(*x, *y));
        match *self {
            Measure::CityBlock => diffs.sum(),
            Measure::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            Measure::Minkowski { p } => {
                let p = f64::from(p);
                diffs.map(|d| d.powf(p)).sum::<f64>().powf(1.0 / p)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasureKind {
    Distance,
}

/// Per-field comparison applied before aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareFunction {
    AbsDiff,
}

impl CompareFunction {
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            CompareFunction::AbsDiff => (a - b).abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMeasure {
    pub kind: MeasureKind,
    pub compare_function: CompareFunction,
    pub measure: Measure,
}

impl ComparisonMeasure {
    /// Distance between `a` and `b` under this measure
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self.measure.distance(a, b, self.compare_function)
    }
}

/// Encode a scikit-learn `metric`/`p` pair
pub fn encode_comparison_measure(metric: &str, p: u32) -> Result<ComparisonMeasure> {
    if metric != MINKOWSKI {
        return Err(Error::UnsupportedMetric(metric.to_string()));
    }

    let measure = match p {
        1 => Measure::CityBlock,
        2 => Measure::Euclidean,
        _ => Measure::Minkowski { p },
    };

    Ok(ComparisonMeasure {
        kind: MeasureKind::Distance,
        compare_function: CompareFunction::AbsDiff,
        measure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_orders() {
        assert_eq!(encode_comparison_measure("minkowski", 1).unwrap().measure, Measure::CityBlock);
        assert_eq!(encode_comparison_measure("minkowski", 2).unwrap().measure, Measure::Euclidean);
        assert_eq!(
            encode_comparison_measure("minkowski", 5).unwrap().measure,
            Measure::Minkowski { p: 5 }
        );
    }

    #[test]
    fn test_compare_function_fixed() {
        for p in [1, 2, 3, 7] {
            let cm = encode_comparison_measure("minkowski", p).unwrap();
            assert_eq!(cm.kind, MeasureKind::Distance);
            assert_eq!(cm.compare_function, CompareFunction::AbsDiff);
        }
    }

    #[test]
    fn test_unsupported_metric() {
        assert_eq!(
            encode_comparison_measure("euclidean", 2).unwrap_err(),
            Error::UnsupportedMetric("euclidean".to_string())
        );
        assert!(encode_comparison_measure("Minkowski", 2).is_err());
    }

    #[test]
    fn test_distances() {
        let a = [0.0, 0.0];
        let b = [3.0, -4.0];
        let abs = CompareFunction::AbsDiff;

        assert_eq!(Measure::CityBlock.distance(&a, &b, abs), 7.0);
        assert_eq!(Measure::Euclidean.distance(&a, &b, abs), 5.0);
        assert!((Measure::Minkowski { p: 2 }.distance(&a, &b, abs) - 5.0).abs() < 1e-12);

        let d3 = Measure::Minkowski { p: 3 }.distance(&a, &b, abs);
        assert!((d3 - 91f64.cbrt()).abs() < 1e-12);
    }

    #[test]
    fn test_serde_shape() {
        let cm = encode_comparison_measure("minkowski", 4).unwrap();
        let json = serde_json::to_value(cm).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "distance",
                "compareFunction": "absDiff",
                "measure": {"type": "minkowski", "p": 4}
            })
        );
    }
}
