use std::fmt;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::data::{GanttDataset, TableXyDataset};

/// Produces tooltip text for one XY item.
pub trait XyToolTipGenerator: fmt::Debug {
    fn generate_tool_tip(&self, dataset: &TableXyDataset, series: usize, item: usize)
    -> Option<String>;
}

/// Produces label or tooltip text for one category item.
pub trait CategoryItemLabelGenerator: fmt::Debug {
    fn generate_label(&self, dataset: &GanttDataset, row: usize, column: usize) -> Option<String>;
}

/// Template-based XY tooltips.
///
/// Placeholders: `{series}`, `{x}`, `{y}`. Missing y values render as `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardXyToolTipGenerator {
    pub template: String,
    pub precision: usize,
}

impl Default for StandardXyToolTipGenerator {
    fn default() -> Self {
        Self {
            template: "{series}: ({x}, {y})".to_owned(),
            precision: 2,
        }
    }
}

impl XyToolTipGenerator for StandardXyToolTipGenerator {
    fn generate_tool_tip(
        &self,
        dataset: &TableXyDataset,
        series: usize,
        item: usize,
    ) -> Option<String> {
        let key = dataset.series_key(series).ok()?;
        let x = dataset.x_value(item).ok()?;
        let y = dataset.y_value(series, item).ok()?;
        let precision = self.precision;
        let y = y.map_or_else(|| "-".to_owned(), |y| format!("{y:.precision$}"));
        Some(
            self.template
                .replace("{series}", key)
                .replace("{x}", &format!("{x:.precision$}"))
                .replace("{y}", &y),
        )
    }
}

/// Template-based labels for Gantt tasks.
///
/// Placeholders: `{series}`, `{category}`, `{start}`, `{end}`, `{percent}`.
/// Dates are formatted with `date_format` (chrono `strftime` syntax).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalCategoryLabelGenerator {
    pub template: String,
    pub date_format: String,
}

impl Default for IntervalCategoryLabelGenerator {
    fn default() -> Self {
        Self::tool_tips()
    }
}

impl IntervalCategoryLabelGenerator {
    #[must_use]
    pub fn tool_tips() -> Self {
        Self {
            template: "{series}, {category}: {start} - {end}".to_owned(),
            date_format: "%Y-%m-%d".to_owned(),
        }
    }

    #[must_use]
    pub fn percent_labels() -> Self {
        Self {
            template: "{percent}".to_owned(),
            date_format: "%Y-%m-%d".to_owned(),
        }
    }

    fn format_millis(&self, millis: Option<f64>) -> String {
        millis
            .and_then(|millis| DateTime::from_timestamp_millis(millis as i64))
            .map_or_else(
                || "-".to_owned(),
                |time| time.format(&self.date_format).to_string(),
            )
    }
}

impl CategoryItemLabelGenerator for IntervalCategoryLabelGenerator {
    fn generate_label(&self, dataset: &GanttDataset, row: usize, column: usize) -> Option<String> {
        let series = dataset.row_key(row).ok()?;
        let category = dataset.column_key(column).ok()?;
        let start = dataset.start_value(row, column).ok()?;
        let end = dataset.end_value(row, column).ok()?;
        let percent = dataset
            .percent_complete(row, column)
            .ok()?
            .map_or_else(String::new, |p| format!("{:.0}%", p * 100.0));
        let text = self
            .template
            .replace("{series}", series)
            .replace("{category}", category)
            .replace("{start}", &self.format_millis(start))
            .replace("{end}", &self.format_millis(end))
            .replace("{percent}", &percent);
        (!text.trim().is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CategoryItemLabelGenerator, IntervalCategoryLabelGenerator, StandardXyToolTipGenerator,
        XyToolTipGenerator,
    };
    use crate::data::{GanttDataset, TableXyDataset, Task, TaskSeries, TimePeriod};
    use chrono::{TimeZone, Utc};

    #[test]
    fn xy_tool_tip_formats_values() {
        let data = TableXyDataset::new(vec![1.0, 2.0])
            .and_then(|data| data.with_series("sales", vec![Some(3.25), None]))
            .expect("dataset");
        let generator = StandardXyToolTipGenerator::default();
        assert_eq!(
            generator.generate_tool_tip(&data, 0, 0).as_deref(),
            Some("sales: (1.00, 3.25)")
        );
        assert_eq!(
            generator.generate_tool_tip(&data, 0, 1).as_deref(),
            Some("sales: (2.00, -)")
        );
    }

    #[test]
    fn interval_labels_format_dates_and_percent() {
        let period = TimePeriod::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap(),
        )
        .expect("period");
        let mut series = TaskSeries::new();
        series
            .add(Task::new("build", period).with_percent_complete(0.25))
            .expect("task");
        let mut data = GanttDataset::new();
        data.add_series("plan", series).expect("series");

        let tips = IntervalCategoryLabelGenerator::tool_tips();
        assert_eq!(
            tips.generate_label(&data, 0, 0).as_deref(),
            Some("plan, build: 2024-03-01 - 2024-03-09")
        );
        let labels = IntervalCategoryLabelGenerator::percent_labels();
        assert_eq!(labels.generate_label(&data, 0, 0).as_deref(), Some("25%"));
    }
}
