//! Training instance table
//!
//! One row per training instance, in instance order. A row maps each column
//! key to the formatted value of that instance: the target first (when the
//! schema has one), then every feature.

use knnx_core::{check_targets, Error, FeatureMatrix, Result, ValueFormatter};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::debug;

/// A single table row, column order preserved
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    /// Row from `(column, value)` pairs in column order
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Value of `column`, if the row has it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Row, A::Error> {
                let mut cells = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    cells.push((key, value));
                }
                Ok(Row { cells })
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Rows of training instances
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstanceTable {
    pub rows: Vec<Row>,
}

impl InstanceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

/// Materialise one formatted row per training instance
///
/// `targets` is `None` when the schema has no target field; otherwise it must
/// hold one value per instance. `column_keys` must cover the target (if any)
/// followed by every feature.
pub fn build_instance_table<F>(
    column_keys: &[String],
    targets: Option<&[f64]>,
    matrix: &FeatureMatrix,
    formatter: &F,
) -> Result<InstanceTable>
where
    F: ValueFormatter + ?Sized,
{
    let (n_instances, n_features) = matrix.shape();

    if let Some(targets) = targets {
        check_targets(targets, n_instances)?;
    }

    let width = n_features + usize::from(targets.is_some());
    if column_keys.len() != width {
        return Err(Error::shape_mismatch("column keys", width, column_keys.len()));
    }

    let rows = matrix
        .rows()
        .enumerate()
        .map(|(i, features)| {
            let values = targets
                .map(|t| t[i])
                .into_iter()
                .chain(features.iter().copied());

            let cells = column_keys
                .iter()
                .zip(values)
                .map(|(key, value)| (key.clone(), formatter.format(value)))
                .collect();
            Row { cells }
        })
        .collect::<Vec<_>>();

    debug!(rows = rows.len(), columns = width, "built instance table");
    Ok(InstanceTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use knnx_core::{parse_value, CanonicalFormatter};
    use proptest::prelude::*;

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_table_with_target() {
        let matrix = FeatureMatrix::from_flat(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2).unwrap();
        let targets = [10.0, 20.0, 30.0];
        let table = build_instance_table(
            &keys(&["y", "x1", "x2"]),
            Some(&targets[..]),
            &matrix,
            &CanonicalFormatter,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0].get("y"), Some("10"));
        assert_eq!(table.rows[0].get("x1"), Some("1"));
        assert_eq!(table.rows[2].get("x2"), Some("6"));
        assert_eq!(
            table.rows[1].iter().collect::<Vec<_>>(),
            vec![("y", "20"), ("x1", "3"), ("x2", "4")]
        );
    }

    #[test]
    fn test_table_without_target() {
        let matrix = FeatureMatrix::from_flat(vec![0.5, 1.5], 1).unwrap();
        let table =
            build_instance_table(&keys(&["x1"]), None, &matrix, &CanonicalFormatter).unwrap();
        assert_eq!(table.rows[1].get("x1"), Some("1.5"));
        assert_eq!(table.rows[1].len(), 1);
    }

    #[test]
    fn test_target_length_mismatch() {
        let matrix = FeatureMatrix::from_flat(vec![1.0, 2.0, 3.0, 4.0], 1).unwrap();
        let targets = [1.0, 2.0, 3.0];
        let err = build_instance_table(&keys(&["y", "x1"]), Some(&targets[..]), &matrix, &CanonicalFormatter)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_column_key_count_mismatch() {
        let matrix = FeatureMatrix::from_flat(vec![1.0, 2.0], 2).unwrap();
        let err = build_instance_table(&keys(&["x1"]), None, &matrix, &CanonicalFormatter)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_custom_formatter() {
        let matrix = FeatureMatrix::from_flat(vec![1.0], 1).unwrap();
        let fixed = |v: f64| format!("{:.3}", v);
        let table = build_instance_table(&keys(&["x1"]), None, &matrix, &fixed).unwrap();
        assert_eq!(table.rows[0].get("x1"), Some("1.000"));
    }

    #[test]
    fn test_row_serde_keeps_column_order() {
        let row = Row::new(vec![
            ("y".to_string(), "10".to_string()),
            ("b".to_string(), "1".to_string()),
            ("a".to_string(), "2".to_string()),
        ]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"y":"10","b":"1","a":"2"}"#);

        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    proptest! {
        #[test]
        fn prop_table_shape_and_values(
            n in 1usize..20,
            f in 1usize..6,
            with_target in any::<bool>(),
            seed in prop::collection::vec(-1e6f64..1e6, 120),
        ) {
            let data: Vec<f64> = seed.iter().cycle().take(n * f).copied().collect();
            let targets: Vec<f64> = seed.iter().rev().cycle().take(n).copied().collect();
            let matrix = FeatureMatrix::from_flat(data.clone(), f).unwrap();

            let mut column_keys = Vec::new();
            if with_target {
                column_keys.push("y".to_string());
            }
            column_keys.extend((1..=f).map(|i| format!("x{}", i)));

            let table = build_instance_table(
                &column_keys,
                with_target.then_some(targets.as_slice()),
                &matrix,
                &CanonicalFormatter,
            ).unwrap();

            prop_assert_eq!(table.len(), n);
            for (i, row) in table.iter().enumerate() {
                prop_assert_eq!(row.len(), f + usize::from(with_target));
                if with_target {
                    prop_assert_eq!(parse_value(row.get("y").unwrap()), Some(targets[i]));
                }
                for j in 0..f {
                    let cell = row.get(&format!("x{}", j + 1)).unwrap();
                    prop_assert_eq!(parse_value(cell), Some(data[i * f + j]));
                }
            }
        }
    }
}
