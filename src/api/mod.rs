//! Chart facades: each owns a renderer, a serde config and a dataset, and
//! turns them into a [`RenderFrame`](crate::render::RenderFrame) per draw.

mod chart_config;
mod gantt_chart;
mod pie3d_chart;
mod stacked_area_chart;

pub use chart_config::{GanttChartConfig, Pie3dChartConfig, StackedAreaChartConfig};
pub use gantt_chart::GanttChart;
pub use pie3d_chart::{Pie3dChart, PieLayout, PieSectionLayout};
pub use stacked_area_chart::StackedAreaChart;
