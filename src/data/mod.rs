pub mod gantt;
pub mod pie;
pub mod table_xy;

pub use gantt::{GanttDataset, Task, TaskSeries, TimePeriod};
pub use pie::PieDataset;
pub use table_xy::{StackValues, TableXyDataset};
