//! Painters translate dataset items into draw commands.
//!
//! Each painter appends to a [`RenderFrame`](crate::render::RenderFrame) in
//! paint order and optionally records entities and crosshair candidates.

mod bar_painter;
mod gantt;
mod labels;
mod pie3d;
mod stacked_area;

pub use bar_painter::{BarPainter, StandardBarPainter};
pub use gantt::{GanttPainter, GanttRendererState, GanttStyle, TaskBars};
pub use labels::{
    CategoryItemLabelGenerator, IntervalCategoryLabelGenerator, StandardXyToolTipGenerator,
    XyToolTipGenerator,
};
pub use pie3d::{PieSidePainter, PieSideRegions, SideFace, SideLayout, SideSelection};
pub use stacked_area::{StackedAreaSegment, StackedXyAreaPainter};

use serde::{Deserialize, Serialize};

use crate::core::{CategoryAxis, PlotOrientation, Rect, ValueAxis};
use crate::render::Color;

/// Series colors, cycled by series index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::from_rgb8(0xFF, 0x55, 0x55),
                Color::from_rgb8(0x55, 0x55, 0xFF),
                Color::from_rgb8(0x55, 0xFF, 0x55),
                Color::from_rgb8(0xFF, 0xFF, 0x55),
                Color::from_rgb8(0xFF, 0x55, 0xFF),
                Color::from_rgb8(0x55, 0xFF, 0xFF),
                Color::from_rgb8(0xFF, 0xAF, 0xAF),
                Color::from_rgb8(0x80, 0x80, 0x80),
            ],
        }
    }
}

impl Palette {
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::GRAY;
        }
        self.colors[index % self.colors.len()]
    }
}

/// Axes and area shared by every item of an XY plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyPlotContext {
    pub data_area: Rect,
    pub orientation: PlotOrientation,
    pub domain_axis: ValueAxis,
    pub range_axis: ValueAxis,
}

/// Axes and area shared by every item of a category plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryPlotContext {
    pub data_area: Rect,
    pub orientation: PlotOrientation,
    pub domain_axis: CategoryAxis,
    pub range_axis: ValueAxis,
    pub dataset_index: usize,
}
