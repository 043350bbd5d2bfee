use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{CategoryAxis, PlotOrientation, Rect, RectangleEdge};
use crate::data::GanttDataset;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    CategoryCrosshairState, ChartEntity, EntityArea, EntityCollection, EntityKind,
};
use crate::render::{Color, RenderFrame, StrokeStyle, TextHAlign, TextPrimitive};

use super::{
    BarPainter, CategoryItemLabelGenerator, CategoryPlotContext, Palette, StandardBarPainter,
};

/// Outlines are skipped for bars thinner than this many pixels.
pub const BAR_OUTLINE_WIDTH_THRESHOLD: f64 = 3.0;

/// Serializable appearance settings for Gantt bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttStyle {
    /// Where the completion overlay starts across the bar breadth (0..=1).
    #[serde(default = "default_start_percent")]
    pub start_percent: f64,
    /// Where the completion overlay ends across the bar breadth (0..=1).
    #[serde(default = "default_end_percent")]
    pub end_percent: f64,
    #[serde(default = "default_complete_paint")]
    pub complete_paint: Color,
    #[serde(default = "default_incomplete_paint")]
    pub incomplete_paint: Color,
    #[serde(default = "default_true")]
    pub shadows_visible: bool,
    #[serde(default = "default_true")]
    pub draw_bar_outline: bool,
    #[serde(default = "default_outline")]
    pub outline: Option<StrokeStyle>,
    /// Fraction of a category spent on gaps between series.
    #[serde(default = "default_item_margin")]
    pub item_margin: f64,
    /// Upper bound on bar breadth as a fraction of the plot's category length.
    #[serde(default = "default_maximum_bar_width")]
    pub maximum_bar_width: f64,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub item_labels_visible: bool,
    #[serde(default = "default_label_font_size")]
    pub label_font_size_px: f64,
    #[serde(default = "default_label_color")]
    pub label_color: Color,
}

fn default_start_percent() -> f64 {
    0.35
}

fn default_end_percent() -> f64 {
    0.65
}

fn default_complete_paint() -> Color {
    Color::GREEN
}

fn default_incomplete_paint() -> Color {
    Color::RED
}

fn default_true() -> bool {
    true
}

fn default_outline() -> Option<StrokeStyle> {
    Some(StrokeStyle::new(1.0, Color::GRAY))
}

fn default_item_margin() -> f64 {
    0.2
}

fn default_maximum_bar_width() -> f64 {
    1.0
}

fn default_label_font_size() -> f64 {
    10.0
}

fn default_label_color() -> Color {
    Color::BLACK
}

impl Default for GanttStyle {
    fn default() -> Self {
        Self {
            start_percent: default_start_percent(),
            end_percent: default_end_percent(),
            complete_paint: default_complete_paint(),
            incomplete_paint: default_incomplete_paint(),
            shadows_visible: true,
            draw_bar_outline: true,
            outline: default_outline(),
            item_margin: default_item_margin(),
            maximum_bar_width: default_maximum_bar_width(),
            palette: Palette::default(),
            item_labels_visible: false,
            label_font_size_px: default_label_font_size(),
            label_color: default_label_color(),
        }
    }
}

impl GanttStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("start_percent", self.start_percent),
            ("end_percent", self.end_percent),
            ("item_margin", self.item_margin),
            ("maximum_bar_width", self.maximum_bar_width),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "gantt style `{name}` must be in [0, 1], got {value}"
                )));
            }
        }
        if self.start_percent > self.end_percent {
            return Err(ChartError::InvalidData(
                "gantt style start_percent must not exceed end_percent".to_owned(),
            ));
        }
        self.complete_paint.validate()?;
        self.incomplete_paint.validate()?;
        if let Some(outline) = self.outline {
            outline.validate()?;
        }
        Ok(())
    }
}

/// Per-pass state: bar breadth plus optional bookkeeping sinks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GanttRendererState {
    pub bar_width: f64,
    pub crosshair: Option<CategoryCrosshairState>,
    pub entities: Option<EntityCollection>,
}

/// Rectangles making up one task bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskBars {
    pub bar: Rect,
    pub base: RectangleEdge,
    pub complete: Option<Rect>,
    pub incomplete: Option<Rect>,
}

/// Draws Gantt task bars with completion overlays.
#[derive(Debug)]
pub struct GanttPainter {
    pub style: GanttStyle,
    pub bar_painter: Box<dyn BarPainter>,
    pub label_generator: Option<Box<dyn CategoryItemLabelGenerator>>,
    pub tool_tip_generator: Option<Box<dyn CategoryItemLabelGenerator>>,
}

impl Default for GanttPainter {
    fn default() -> Self {
        Self::new(GanttStyle::default())
    }
}

impl GanttPainter {
    #[must_use]
    pub fn new(style: GanttStyle) -> Self {
        Self {
            style,
            bar_painter: Box::new(StandardBarPainter::default()),
            label_generator: None,
            tool_tip_generator: None,
        }
    }

    #[must_use]
    pub fn with_bar_painter(mut self, painter: Box<dyn BarPainter>) -> Self {
        self.bar_painter = painter;
        self
    }

    #[must_use]
    pub fn with_label_generator(mut self, generator: Box<dyn CategoryItemLabelGenerator>) -> Self {
        self.label_generator = Some(generator);
        self
    }

    #[must_use]
    pub fn with_tool_tip_generator(
        mut self,
        generator: Box<dyn CategoryItemLabelGenerator>,
    ) -> Self {
        self.tool_tip_generator = Some(generator);
        self
    }

    fn category_space(ctx: &CategoryPlotContext) -> f64 {
        match ctx.orientation {
            PlotOrientation::Horizontal => ctx.data_area.height,
            PlotOrientation::Vertical => ctx.data_area.width,
        }
    }

    /// Bar breadth shared by every task in the dataset.
    #[must_use]
    pub fn calculate_bar_width(&self, ctx: &CategoryPlotContext, dataset: &GanttDataset) -> f64 {
        let space = Self::category_space(ctx);
        let max_width = space * self.style.maximum_bar_width;
        let columns = dataset.column_count();
        let rows = dataset.row_count();
        let category_margin = if columns > 1 {
            ctx.domain_axis.category_margin
        } else {
            0.0
        };
        let item_margin = if rows > 1 { self.style.item_margin } else { 0.0 };
        let used = space
            * (1.0
                - ctx.domain_axis.lower_margin
                - ctx.domain_axis.upper_margin
                - category_margin
                - item_margin);
        let slots = rows * columns;
        if slots > 0 {
            (used / slots as f64).min(max_width)
        } else {
            used.min(max_width)
        }
    }

    /// Fresh state for one paint pass over `dataset`.
    #[must_use]
    pub fn initialise(
        &self,
        ctx: &CategoryPlotContext,
        dataset: &GanttDataset,
    ) -> GanttRendererState {
        GanttRendererState {
            bar_width: self.calculate_bar_width(ctx, dataset),
            crosshair: None,
            entities: None,
        }
    }

    fn calculate_series_width(
        &self,
        space: f64,
        axis: CategoryAxis,
        categories: usize,
        series: usize,
    ) -> f64 {
        let mut factor = 1.0 - self.style.item_margin - axis.lower_margin - axis.upper_margin;
        if categories > 1 {
            factor -= axis.category_margin;
        }
        space * factor / (categories * series).max(1) as f64
    }

    /// Position of the bar's leading edge across the category axis.
    #[must_use]
    pub fn calculate_bar_w0(
        &self,
        ctx: &CategoryPlotContext,
        state: &GanttRendererState,
        dataset: &GanttDataset,
        row: usize,
        column: usize,
    ) -> f64 {
        let space = Self::category_space(ctx);
        let edge = ctx.orientation.domain_axis_edge();
        let columns = dataset.column_count();
        let rows = dataset.row_count();
        if rows > 1 {
            let bar_w0 = ctx
                .domain_axis
                .category_start(column, columns, ctx.data_area, edge);
            let series_gap = space * self.style.item_margin / (columns * (rows - 1)) as f64;
            let series_w = self.calculate_series_width(space, ctx.domain_axis, columns, rows);
            bar_w0 + row as f64 * (series_w + series_gap) + series_w / 2.0
                - state.bar_width / 2.0
        } else {
            ctx.domain_axis
                .category_middle(column, columns, ctx.data_area, edge)
                - state.bar_width / 2.0
        }
    }

    /// Bar and overlay rectangles for a task spanning `low_px..low_px + length`
    /// along the range axis.
    #[must_use]
    pub fn task_bars(
        &self,
        orientation: PlotOrientation,
        low_px: f64,
        length: f64,
        rect_start: f64,
        breadth: f64,
        percent: Option<f64>,
    ) -> TaskBars {
        let start = self.style.start_percent;
        let end = self.style.end_percent;
        let overlay_start = rect_start + start * breadth;
        let overlay_breadth = breadth * (end - start);

        match orientation {
            PlotOrientation::Horizontal => {
                let bar = Rect::new(low_px, rect_start, length, breadth);
                let (complete, incomplete) = percent.map_or((None, None), |p| {
                    (
                        Some(Rect::new(low_px, overlay_start, length * p, overlay_breadth)),
                        Some(Rect::new(
                            low_px + length * p,
                            overlay_start,
                            length * (1.0 - p),
                            overlay_breadth,
                        )),
                    )
                });
                TaskBars {
                    bar,
                    base: RectangleEdge::Left,
                    complete,
                    incomplete,
                }
            }
            PlotOrientation::Vertical => {
                let bar = Rect::new(rect_start, low_px, breadth, length);
                // Completion grows up from the bar's base.
                let (complete, incomplete) = percent.map_or((None, None), |p| {
                    (
                        Some(Rect::new(
                            overlay_start,
                            low_px + length * (1.0 - p),
                            overlay_breadth,
                            length * p,
                        )),
                        Some(Rect::new(
                            overlay_start,
                            low_px,
                            overlay_breadth,
                            length * (1.0 - p),
                        )),
                    )
                });
                TaskBars {
                    bar,
                    base: RectangleEdge::Bottom,
                    complete,
                    incomplete,
                }
            }
        }
    }

    fn paint_task_bars(
        &self,
        frame: &mut RenderFrame,
        state: &GanttRendererState,
        bars: &TaskBars,
        row: usize,
    ) {
        let item_paint = self.style.palette.color(row);
        if self.style.shadows_visible {
            self.bar_painter
                .paint_bar_shadow(frame, bars.bar, bars.base, item_paint, true);
        }
        self.bar_painter
            .paint_bar(frame, bars.bar, bars.base, item_paint);

        if let Some(complete) = bars.complete {
            frame.fill_rect(complete, self.style.complete_paint);
        }
        if let Some(incomplete) = bars.incomplete {
            frame.fill_rect(incomplete, self.style.incomplete_paint);
        }

        if self.style.draw_bar_outline && state.bar_width > BAR_OUTLINE_WIDTH_THRESHOLD {
            if let Some(outline) = self.style.outline {
                frame.stroke_rect(bars.bar, outline);
            }
        }
    }

    fn translate(ctx: &CategoryPlotContext, value: f64) -> f64 {
        ctx.range_axis
            .value_to_pixel(value, ctx.data_area, ctx.orientation.range_axis_edge())
    }

    #[allow(clippy::too_many_arguments)]
    fn submit_crosshair(
        &self,
        state: &mut GanttRendererState,
        ctx: &CategoryPlotContext,
        dataset: &GanttDataset,
        row: usize,
        column: usize,
        value: f64,
        range_px: f64,
    ) -> ChartResult<()> {
        let Some(crosshair) = state.crosshair.as_mut() else {
            return Ok(());
        };
        let xx = ctx.domain_axis.category_series_middle(
            column,
            dataset.column_count(),
            row,
            dataset.row_count(),
            self.style.item_margin,
            ctx.data_area,
            ctx.orientation.domain_axis_edge(),
        );
        crosshair.submit(
            dataset.row_key(row)?,
            dataset.column_key(column)?,
            value,
            ctx.dataset_index,
            xx,
            range_px,
            ctx.orientation,
        );
        Ok(())
    }

    fn add_item_entity(
        &self,
        state: &mut GanttRendererState,
        dataset: &GanttDataset,
        row: usize,
        column: usize,
        bar: Rect,
    ) -> ChartResult<()> {
        let Some(entities) = state.entities.as_mut() else {
            return Ok(());
        };
        let tooltip = self
            .tool_tip_generator
            .as_ref()
            .and_then(|generator| generator.generate_label(dataset, row, column));
        entities.add(ChartEntity {
            area: EntityArea::Rect(bar),
            kind: EntityKind::CategoryItem {
                row_key: dataset.row_key(row)?.to_owned(),
                column_key: dataset.column_key(column)?.to_owned(),
            },
            tooltip,
        });
        Ok(())
    }

    /// Draws one task, or its sub-intervals when it has any.
    pub fn draw_item(
        &self,
        frame: &mut RenderFrame,
        state: &mut GanttRendererState,
        ctx: &CategoryPlotContext,
        dataset: &GanttDataset,
        row: usize,
        column: usize,
    ) -> ChartResult<()> {
        self.draw_tasks(frame, state, ctx, dataset, row, column)
    }

    /// Draws every sub-interval of a task as its own bar.
    pub fn draw_tasks(
        &self,
        frame: &mut RenderFrame,
        state: &mut GanttRendererState,
        ctx: &CategoryPlotContext,
        dataset: &GanttDataset,
        row: usize,
        column: usize,
    ) -> ChartResult<()> {
        let count = dataset.sub_interval_count(row, column)?;
        if count == 0 {
            return self.draw_task(frame, state, ctx, dataset, row, column);
        }

        let rect_start = self.calculate_bar_w0(ctx, state, dataset, row, column);
        let breadth = state.bar_width;

        for sub in 0..count {
            let Some(value0) = dataset.sub_start_value(row, column, sub)? else {
                return Ok(());
            };
            let Some(value1) = dataset.sub_end_value(row, column, sub)? else {
                return Ok(());
            };
            let mut px0 = Self::translate(ctx, value0);
            let mut px1 = Self::translate(ctx, value1);
            let mut crosshair_value = value1;
            if px1 < px0 {
                std::mem::swap(&mut px0, &mut px1);
                crosshair_value = value0;
            }
            let length = (px1 - px0).abs();
            let percent = dataset.sub_percent_complete(row, column, sub)?;
            let bars = self.task_bars(ctx.orientation, px0, length, rect_start, breadth, percent);
            trace!(row, column, sub, ?bars, "draw gantt sub-interval");

            self.paint_task_bars(frame, state, &bars, row);

            if sub == count - 1 {
                self.submit_crosshair(state, ctx, dataset, row, column, crosshair_value, px1)?;
            }
            self.add_item_entity(state, dataset, row, column, bars.bar)?;
        }
        Ok(())
    }

    /// Draws a single task bar with its completion overlay.
    ///
    /// Tasks missing a start or end value are skipped silently.
    pub fn draw_task(
        &self,
        frame: &mut RenderFrame,
        state: &mut GanttRendererState,
        ctx: &CategoryPlotContext,
        dataset: &GanttDataset,
        row: usize,
        column: usize,
    ) -> ChartResult<()> {
        let Some(end_value) = dataset.end_value(row, column)? else {
            return Ok(());
        };
        let Some(start_value) = dataset.start_value(row, column)? else {
            return Ok(());
        };

        let mut px0 = Self::translate(ctx, end_value);
        let mut px1 = Self::translate(ctx, start_value);
        let mut crosshair_value = start_value;
        if px1 < px0 {
            std::mem::swap(&mut px0, &mut px1);
            crosshair_value = end_value;
        }

        let rect_start = self.calculate_bar_w0(ctx, state, dataset, row, column);
        let breadth = state.bar_width;
        let length = (px1 - px0).abs();
        let percent = dataset.percent_complete(row, column)?;
        let bars = self.task_bars(ctx.orientation, px0, length, rect_start, breadth, percent);
        trace!(row, column, ?bars, "draw gantt task");

        self.paint_task_bars(frame, state, &bars, row);

        if self.style.item_labels_visible {
            if let Some(generator) = self.label_generator.as_ref() {
                if let Some(label) = generator.generate_label(dataset, row, column) {
                    let center = bars.bar.center();
                    frame.text(TextPrimitive::new(
                        label,
                        center.x,
                        center.y,
                        self.style.label_font_size_px,
                        self.style.label_color,
                        TextHAlign::Center,
                    ));
                }
            }
        }

        self.submit_crosshair(state, ctx, dataset, row, column, crosshair_value, px1)?;
        self.add_item_entity(state, dataset, row, column, bars.bar)
    }

    /// Draws every (row, column) cell of the dataset.
    pub fn draw_all(
        &self,
        frame: &mut RenderFrame,
        state: &mut GanttRendererState,
        ctx: &CategoryPlotContext,
        dataset: &GanttDataset,
    ) -> ChartResult<()> {
        debug!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            bar_width = state.bar_width,
            "draw gantt dataset"
        );
        for row in 0..dataset.row_count() {
            for column in 0..dataset.column_count() {
                self.draw_item(frame, state, ctx, dataset, row, column)?;
            }
        }
        Ok(())
    }
}
