use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Ordered key/value pairs, one pie section each.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PieDataset {
    values: IndexMap<String, f64>,
}

impl PieDataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: f64) -> ChartResult<()> {
        let key = key.into();
        if value.is_nan() {
            return Err(ChartError::InvalidData(format!(
                "pie value for `{key}` must not be NaN"
            )));
        }
        self.values.insert(key, value);
        Ok(())
    }

    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> ChartResult<Self> {
        self.set_value(key, value)?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse pie dataset json: {e}")))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Sum of the positive, finite values; other values get no section.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values
            .values()
            .filter(|value| value.is_finite() && **value > 0.0)
            .sum()
    }

    pub fn percent(&self, key: &str) -> ChartResult<f64> {
        let value = self
            .value(key)
            .ok_or_else(|| ChartError::UnknownKey(key.to_owned()))?;
        let total = self.total();
        if total <= 0.0 || !value.is_finite() || value <= 0.0 {
            return Ok(0.0);
        }
        Ok(value / total)
    }
}
