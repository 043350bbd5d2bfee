use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Range;
use crate::error::{ChartError, ChartResult};

/// Half-open span of time covered by a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimePeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ChartResult<Self> {
        if end < start {
            return Err(ChartError::InvalidData(format!(
                "time period ends before it starts: {start} > {end}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start_millis(self) -> f64 {
        self.start.timestamp_millis() as f64
    }

    #[must_use]
    pub fn end_millis(self) -> f64 {
        self.end.timestamp_millis() as f64
    }
}

/// One Gantt task, optionally split into sub-intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub duration: TimePeriod,
    #[serde(default)]
    pub percent_complete: Option<f64>,
    #[serde(default)]
    pub subtasks: Vec<Task>,
}

impl Task {
    #[must_use]
    pub fn new(description: impl Into<String>, duration: TimePeriod) -> Self {
        Self {
            description: description.into(),
            duration,
            percent_complete: None,
            subtasks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_percent_complete(mut self, percent: f64) -> Self {
        self.percent_complete = Some(percent);
        self
    }

    #[must_use]
    pub fn with_subtask(mut self, subtask: Task) -> Self {
        self.subtasks.push(subtask);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(percent) = self.percent_complete {
            if !percent.is_finite() || !(0.0..=1.0).contains(&percent) {
                return Err(ChartError::InvalidData(format!(
                    "task `{}` percent complete must be in [0, 1], got {percent}",
                    self.description
                )));
            }
        }
        if self.duration.end < self.duration.start {
            return Err(ChartError::InvalidData(format!(
                "task `{}` ends before it starts",
                self.description
            )));
        }
        for subtask in &self.subtasks {
            subtask.validate()?;
        }
        Ok(())
    }
}

/// Named group of tasks drawn as one Gantt row (series).
///
/// Tasks are keyed by their description; serialized maps must use the same keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "TaskSeriesJson", into = "TaskSeriesJson")]
pub struct TaskSeries {
    tasks: IndexMap<String, Task>,
}

#[derive(Serialize, Deserialize)]
struct TaskSeriesJson {
    #[serde(default)]
    tasks: IndexMap<String, Task>,
}

impl TryFrom<TaskSeriesJson> for TaskSeries {
    type Error = ChartError;

    fn try_from(raw: TaskSeriesJson) -> ChartResult<Self> {
        let mut series = TaskSeries::new();
        for (key, task) in raw.tasks {
            if key != task.description {
                return Err(ChartError::InvalidData(format!(
                    "task keyed `{key}` is described as `{}`",
                    task.description
                )));
            }
            series.add(task)?;
        }
        Ok(series)
    }
}

impl From<TaskSeries> for TaskSeriesJson {
    fn from(series: TaskSeries) -> Self {
        Self {
            tasks: series.tasks,
        }
    }
}

impl TaskSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) -> ChartResult<()> {
        task.validate()?;
        self.tasks.insert(task.description.clone(), task);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, description: &str) -> Option<&Task> {
        self.tasks.get(description)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }
}

/// Rows are task series, columns are task descriptions in first-seen order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "GanttDatasetJson", into = "GanttDatasetJson")]
pub struct GanttDataset {
    series: IndexMap<String, TaskSeries>,
    columns: IndexSet<String>,
}

#[derive(Serialize, Deserialize)]
struct GanttDatasetJson {
    #[serde(default)]
    series: IndexMap<String, TaskSeries>,
}

impl TryFrom<GanttDatasetJson> for GanttDataset {
    type Error = ChartError;

    fn try_from(raw: GanttDatasetJson) -> ChartResult<Self> {
        let mut dataset = GanttDataset::new();
        for (key, series) in raw.series {
            dataset.add_series(key, series)?;
        }
        Ok(dataset)
    }
}

impl From<GanttDataset> for GanttDatasetJson {
    fn from(dataset: GanttDataset) -> Self {
        Self {
            series: dataset.series,
        }
    }
}

impl GanttDataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_series(&mut self, key: impl Into<String>, series: TaskSeries) -> ChartResult<()> {
        let key = key.into();
        for task in series.tasks() {
            task.validate()?;
        }
        debug!(series = %key, tasks = series.len(), "add gantt series");
        self.series.insert(key, series);
        self.rebuild_columns();
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse gantt dataset json: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize gantt dataset: {e}")))
    }

    fn rebuild_columns(&mut self) {
        self.columns = self
            .series
            .values()
            .flat_map(|series| series.tasks().map(|task| task.description.clone()))
            .collect();
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_key(&self, row: usize) -> ChartResult<&str> {
        self.series
            .get_index(row)
            .map(|(key, _)| key.as_str())
            .ok_or(ChartError::IndexOutOfRange {
                what: "row",
                index: row,
                len: self.series.len(),
            })
    }

    pub fn column_key(&self, column: usize) -> ChartResult<&str> {
        self.columns
            .get_index(column)
            .map(String::as_str)
            .ok_or(ChartError::IndexOutOfRange {
                what: "column",
                index: column,
                len: self.columns.len(),
            })
    }

    #[must_use]
    pub fn row_index(&self, key: &str) -> Option<usize> {
        self.series.get_index_of(key)
    }

    #[must_use]
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.get_index_of(key)
    }

    /// Task at (row, column); `Ok(None)` when the row has no such task.
    pub fn task(&self, row: usize, column: usize) -> ChartResult<Option<&Task>> {
        let column_key = self.column_key(column)?;
        let (_, series) = self
            .series
            .get_index(row)
            .ok_or(ChartError::IndexOutOfRange {
                what: "row",
                index: row,
                len: self.series.len(),
            })?;
        Ok(series.get(column_key))
    }

    pub fn start_value(&self, row: usize, column: usize) -> ChartResult<Option<f64>> {
        Ok(self
            .task(row, column)?
            .map(|task| task.duration.start_millis()))
    }

    pub fn end_value(&self, row: usize, column: usize) -> ChartResult<Option<f64>> {
        Ok(self.task(row, column)?.map(|task| task.duration.end_millis()))
    }

    pub fn percent_complete(&self, row: usize, column: usize) -> ChartResult<Option<f64>> {
        Ok(self
            .task(row, column)?
            .and_then(|task| task.percent_complete))
    }

    pub fn sub_interval_count(&self, row: usize, column: usize) -> ChartResult<usize> {
        Ok(self
            .task(row, column)?
            .map_or(0, |task| task.subtasks.len()))
    }

    fn subtask(&self, row: usize, column: usize, sub: usize) -> ChartResult<Option<&Task>> {
        Ok(self
            .task(row, column)?
            .and_then(|task| task.subtasks.get(sub)))
    }

    pub fn sub_start_value(
        &self,
        row: usize,
        column: usize,
        sub: usize,
    ) -> ChartResult<Option<f64>> {
        Ok(self
            .subtask(row, column, sub)?
            .map(|task| task.duration.start_millis()))
    }

    pub fn sub_end_value(
        &self,
        row: usize,
        column: usize,
        sub: usize,
    ) -> ChartResult<Option<f64>> {
        Ok(self
            .subtask(row, column, sub)?
            .map(|task| task.duration.end_millis()))
    }

    pub fn sub_percent_complete(
        &self,
        row: usize,
        column: usize,
        sub: usize,
    ) -> ChartResult<Option<f64>> {
        Ok(self
            .subtask(row, column, sub)?
            .and_then(|task| task.percent_complete))
    }

    /// Range spanned by every task and subtask, in epoch milliseconds.
    #[must_use]
    pub fn range_bounds(&self) -> Option<Range> {
        fn visit(task: &Task, range: &mut Option<Range>) {
            let span = Range {
                lower: task.duration.start_millis(),
                upper: task.duration.end_millis(),
            };
            *range = Range::combine(*range, Some(span));
            for subtask in &task.subtasks {
                visit(subtask, range);
            }
        }

        let mut range = None;
        for series in self.series.values() {
            for task in series.tasks() {
                visit(task, &mut range);
            }
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::{GanttDataset, Task, TaskSeries, TimePeriod};
    use chrono::{TimeZone, Utc};

    fn period(start_day: u32, end_day: u32) -> TimePeriod {
        TimePeriod::new(
            Utc.with_ymd_and_hms(2024, 1, start_day, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, end_day, 0, 0, 0).unwrap(),
        )
        .expect("period")
    }

    fn dataset() -> GanttDataset {
        let mut scheduled = TaskSeries::new();
        scheduled
            .add(Task::new("design", period(1, 5)))
            .expect("task");
        scheduled
            .add(Task::new("build", period(5, 20)).with_percent_complete(0.5))
            .expect("task");
        let mut actual = TaskSeries::new();
        actual
            .add(
                Task::new("build", period(6, 25))
                    .with_subtask(Task::new("phase 1", period(6, 10)))
                    .with_subtask(Task::new("phase 2", period(12, 25))),
            )
            .expect("task");
        actual.add(Task::new("ship", period(25, 28))).expect("task");

        let mut data = GanttDataset::new();
        data.add_series("scheduled", scheduled).expect("series");
        data.add_series("actual", actual).expect("series");
        data
    }

    #[test]
    fn columns_are_union_of_descriptions_in_first_seen_order() {
        let data = dataset();
        assert_eq!(data.column_count(), 3);
        assert_eq!(data.column_key(0).expect("key"), "design");
        assert_eq!(data.column_key(2).expect("key"), "ship");
        assert_eq!(data.row_index("actual"), Some(1));
    }

    #[test]
    fn missing_tasks_yield_none() {
        let data = dataset();
        assert_eq!(data.start_value(1, 0).expect("lookup"), None);
        assert!(data.start_value(0, 0).expect("lookup").is_some());
        assert_eq!(data.percent_complete(0, 1).expect("lookup"), Some(0.5));
        assert_eq!(data.sub_interval_count(1, 1).expect("lookup"), 2);
        assert!(data.start_value(5, 0).is_err());
    }

    #[test]
    fn range_covers_all_tasks() {
        let data = dataset();
        let range = data.range_bounds().expect("range");
        assert_eq!(range.lower, period(1, 2).start_millis());
        assert_eq!(range.upper, period(1, 28).end_millis());
    }

    #[test]
    fn invalid_percent_is_rejected() {
        let mut series = TaskSeries::new();
        assert!(
            series
                .add(Task::new("x", period(1, 2)).with_percent_complete(1.5))
                .is_err()
        );
        assert!(TimePeriod::new(period(3, 4).end, period(3, 4).start).is_err());
    }

    #[test]
    fn json_load_rebuilds_columns() {
        let json = dataset().to_json_pretty().expect("json");
        let restored = GanttDataset::from_json_str(&json).expect("parse");
        assert_eq!(restored.column_count(), 3);
        assert_eq!(restored, dataset());

        let direct: GanttDataset = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(direct.column_count(), 3);
        assert!(direct.start_value(1, 2).expect("lookup").is_some());
    }

    #[test]
    fn task_keys_must_match_descriptions() {
        let json = dataset().to_json_pretty().expect("json");
        let renamed = json.replacen(r#""description": "design""#, r#""description": "other""#, 1);
        assert_ne!(renamed, json);
        assert!(GanttDataset::from_json_str(&renamed).is_err());
        assert!(serde_json::from_str::<GanttDataset>(&renamed).is_err());
    }

    #[test]
    fn deserializing_validates_tasks() {
        let json = dataset().to_json_pretty().expect("json");
        let overdone = json.replacen(r#""percent_complete": 0.5"#, r#""percent_complete": 1.5"#, 1);
        assert_ne!(overdone, json);
        assert!(GanttDataset::from_json_str(&overdone).is_err());
    }
}
