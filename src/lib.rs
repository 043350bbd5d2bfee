//! chart-painters: backend-agnostic painters for 3D pie sides, stacked XY
//! areas and Gantt task bars.
//!
//! Painters append draw commands to a [`render::RenderFrame`] in paint order
//! and record clickable entities and crosshair candidates alongside. Chart
//! facades in [`api`] wire datasets, axes and a [`render::Renderer`] together.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod painters;
pub mod render;
pub mod telemetry;

pub use api::{
    GanttChart, GanttChartConfig, Pie3dChart, Pie3dChartConfig, StackedAreaChart,
    StackedAreaChartConfig,
};
pub use error::{ChartError, ChartResult};
