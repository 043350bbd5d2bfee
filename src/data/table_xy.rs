use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Range;
use crate::error::{ChartError, ChartResult};

/// Cumulative totals of earlier series at one item, split by sign.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StackValues {
    pub negative: f64,
    pub positive: f64,
}

impl StackValues {
    #[must_use]
    pub const fn new(negative: f64, positive: f64) -> Self {
        Self { negative, positive }
    }

    /// Midpoint between two neighbouring stacks.
    #[must_use]
    pub fn average(self, other: StackValues) -> Self {
        Self {
            negative: (self.negative + other.negative) / 2.0,
            positive: (self.positive + other.positive) / 2.0,
        }
    }

    /// Like [`StackValues::average`], but a side collapses to zero when either
    /// neighbour has nothing stacked on that side.
    #[must_use]
    pub fn adjusted_average(self, other: StackValues) -> Self {
        let side = |a: f64, b: f64| {
            if a == 0.0 || b == 0.0 {
                0.0
            } else {
                (a + b) / 2.0
            }
        };
        Self {
            negative: side(self.negative, other.negative),
            positive: side(self.positive, other.positive),
        }
    }

    /// Stack base for a value of the given sign.
    #[must_use]
    pub fn base_for(self, value: f64) -> f64 {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }
}

/// XY dataset whose series share one set of x values.
///
/// Missing y values are `None`; stacking treats them as absent. Deserializing
/// goes through the same checks as [`TableXyDataset::add_series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableXyDatasetJson", into = "TableXyDatasetJson")]
pub struct TableXyDataset {
    x_values: Vec<f64>,
    series: IndexMap<String, Vec<Option<f64>>>,
}

#[derive(Serialize, Deserialize)]
struct TableXyDatasetJson {
    x_values: Vec<f64>,
    #[serde(default)]
    series: IndexMap<String, Vec<Option<f64>>>,
}

impl TryFrom<TableXyDatasetJson> for TableXyDataset {
    type Error = ChartError;

    fn try_from(raw: TableXyDatasetJson) -> ChartResult<Self> {
        let mut dataset = TableXyDataset::new(raw.x_values)?;
        for (key, values) in raw.series {
            dataset.add_series(key, values)?;
        }
        Ok(dataset)
    }
}

impl From<TableXyDataset> for TableXyDatasetJson {
    fn from(dataset: TableXyDataset) -> Self {
        Self {
            x_values: dataset.x_values,
            series: dataset.series,
        }
    }
}

impl TableXyDataset {
    pub fn new(x_values: Vec<f64>) -> ChartResult<Self> {
        if let Some(index) = x_values.iter().position(|x| !x.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "x value at index {index} must be finite"
            )));
        }
        Ok(Self {
            x_values,
            series: IndexMap::new(),
        })
    }

    /// Appends (or replaces) a series. Its length must match the x values.
    pub fn add_series(
        &mut self,
        key: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> ChartResult<()> {
        let key = key.into();
        if values.len() != self.x_values.len() {
            return Err(ChartError::InvalidData(format!(
                "series `{key}` has {} values, expected {}",
                values.len(),
                self.x_values.len()
            )));
        }
        debug!(series = %key, items = values.len(), "add stacked series");
        self.series.insert(key, values);
        Ok(())
    }

    pub fn with_series(
        mut self,
        key: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> ChartResult<Self> {
        self.add_series(key, values)?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse table xy dataset json: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize table xy dataset: {e}"))
        })
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.x_values.len()
    }

    pub fn series_key(&self, series: usize) -> ChartResult<&str> {
        self.series
            .get_index(series)
            .map(|(key, _)| key.as_str())
            .ok_or(ChartError::IndexOutOfRange {
                what: "series",
                index: series,
                len: self.series.len(),
            })
    }

    pub fn x_value(&self, item: usize) -> ChartResult<f64> {
        self.x_values
            .get(item)
            .copied()
            .ok_or(ChartError::IndexOutOfRange {
                what: "item",
                index: item,
                len: self.x_values.len(),
            })
    }

    /// Y value, `None` when missing or not a number.
    pub fn y_value(&self, series: usize, item: usize) -> ChartResult<Option<f64>> {
        let (_, values) = self
            .series
            .get_index(series)
            .ok_or(ChartError::IndexOutOfRange {
                what: "series",
                index: series,
                len: self.series.len(),
            })?;
        let value = values.get(item).ok_or(ChartError::IndexOutOfRange {
            what: "item",
            index: item,
            len: values.len(),
        })?;
        Ok(value.filter(|v| v.is_finite()))
    }

    /// Sums the values of all series before `series` at `item`, by sign.
    pub fn stack_values(&self, series: usize, item: usize) -> ChartResult<StackValues> {
        let mut stack = StackValues::default();
        for earlier in 0..series {
            if let Some(value) = self.y_value(earlier, item)? {
                if value >= 0.0 {
                    stack.positive += value;
                } else {
                    stack.negative += value;
                }
            }
        }
        Ok(stack)
    }

    /// Range covered by the fully stacked values; always includes zero.
    #[must_use]
    pub fn stacked_range_bounds(&self) -> Option<Range> {
        if self.series.is_empty() || self.x_values.is_empty() {
            return None;
        }
        let mut range = Range {
            lower: 0.0,
            upper: 0.0,
        };
        for item in 0..self.x_values.len() {
            let mut positive = 0.0;
            let mut negative = 0.0;
            for values in self.series.values() {
                match values.get(item).copied().flatten() {
                    Some(value) if value.is_finite() && value >= 0.0 => positive += value,
                    Some(value) if value.is_finite() => negative += value,
                    _ => {}
                }
            }
            range = range.expand_to_include(positive).expand_to_include(negative);
        }
        Some(range)
    }

    /// Smallest and largest x value.
    #[must_use]
    pub fn domain_bounds(&self) -> Option<Range> {
        let first = *self.x_values.first()?;
        let start = Range {
            lower: first,
            upper: first,
        };
        Some(
            self.x_values
                .iter()
                .fold(start, |range, x| range.expand_to_include(*x)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{StackValues, TableXyDataset};
    use approx::assert_relative_eq;

    fn dataset() -> TableXyDataset {
        TableXyDataset::new(vec![1.0, 2.0, 3.0])
            .and_then(|data| data.with_series("a", vec![Some(1.0), Some(-2.0), None]))
            .and_then(|data| data.with_series("b", vec![Some(3.0), Some(4.0), Some(-1.0)]))
            .and_then(|data| {
                data.with_series("c", vec![Some(2.0), Some(f64::NAN), Some(5.0)])
            })
            .expect("dataset")
    }

    #[test]
    fn stack_values_sum_earlier_series_by_sign() {
        let data = dataset();
        assert_eq!(data.stack_values(0, 0).expect("stack"), StackValues::new(0.0, 0.0));
        assert_eq!(data.stack_values(2, 0).expect("stack"), StackValues::new(0.0, 4.0));
        assert_eq!(data.stack_values(2, 1).expect("stack"), StackValues::new(-2.0, 4.0));
        assert_eq!(data.stack_values(2, 2).expect("stack"), StackValues::new(-1.0, 0.0));
    }

    #[test]
    fn adjusted_average_collapses_to_zero_at_empty_side() {
        let left = StackValues::new(-2.0, 4.0);
        let right = StackValues::new(0.0, 6.0);
        let adjusted = left.adjusted_average(right);
        assert_relative_eq!(adjusted.negative, 0.0);
        assert_relative_eq!(adjusted.positive, 5.0);
        let plain = left.average(right);
        assert_relative_eq!(plain.negative, -1.0);
    }

    #[test]
    fn stacked_range_includes_zero_and_totals() {
        let range = dataset().stacked_range_bounds().expect("range");
        assert_relative_eq!(range.lower, -2.0);
        assert_relative_eq!(range.upper, 6.0);
    }

    #[test]
    fn mismatched_series_length_is_rejected() {
        let mut data = TableXyDataset::new(vec![0.0, 1.0]).expect("dataset");
        assert!(data.add_series("short", vec![Some(1.0)]).is_err());
        assert!(data.clone().with_series("short", vec![Some(1.0)]).is_err());
        assert_eq!(data.series_count(), 0);
        assert!(TableXyDataset::new(vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn deserializing_rejects_short_series() {
        let json = r#"{"x_values":[0.0,1.0,2.0],"series":{"s":[1.0]}}"#;
        assert!(serde_json::from_str::<TableXyDataset>(json).is_err());
        assert!(TableXyDataset::from_json_str(json).is_err());
    }

    #[test]
    fn deserialized_dataset_keeps_series_order() {
        let json = r#"{"x_values":[0.0,1.0],"series":{"b":[1.0,2.0],"a":[-3.0,null]}}"#;
        let data: TableXyDataset = serde_json::from_str(json).expect("parse");
        assert_eq!(data.series_key(0).expect("key"), "b");
        let range = data.stacked_range_bounds().expect("range");
        assert_relative_eq!(range.lower, -3.0);
        assert_relative_eq!(range.upper, 2.0);
        let restored = TableXyDataset::from_json_str(&data.to_json_pretty().expect("json"))
            .expect("restore");
        assert_eq!(restored, data);
    }

    #[test]
    fn stack_base_follows_value_sign() {
        let stack = StackValues::new(-2.0, 4.0);
        assert_relative_eq!(stack.base_for(1.0), 4.0);
        assert_relative_eq!(stack.base_for(0.0), 4.0);
        assert_relative_eq!(stack.base_for(-1.0), -2.0);
    }

    #[test]
    fn json_round_trip_uses_null_for_missing_values() {
        let json = r#"{"x_values":[0.0,1.0],"series":{"s":[1.5,null]}}"#;
        let data = TableXyDataset::from_json_str(json).expect("parse");
        assert_eq!(data.y_value(0, 1).expect("value"), None);
        assert_eq!(data.series_key(0).expect("key"), "s");
    }
}
