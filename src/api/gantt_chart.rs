use tracing::debug;

use crate::core::{Point, Range, ValueAxis};
use crate::data::GanttDataset;
use crate::error::ChartResult;
use crate::interaction::{CategoryCrosshairState, ChartEntity, EntityCollection};
use crate::painters::{CategoryPlotContext, GanttPainter, IntervalCategoryLabelGenerator};
use crate::render::{Color, RenderFrame, Renderer, StrokeStyle};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::GanttChartConfig;

const CROSSHAIR_STROKE: StrokeStyle = StrokeStyle::new(1.0, Color::rgba(0.0, 0.0, 1.0, 0.8));

/// Gantt chart bound to one renderer.
///
/// Setting a crosshair anchor makes the next frame pick the task nearest to it
/// and draw a range crosshair through that task's value.
pub struct GanttChart<R: Renderer> {
    renderer: R,
    config: GanttChartConfig,
    dataset: GanttDataset,
    painter: GanttPainter,
    entities: EntityCollection,
    crosshair_anchor: Option<Point>,
    crosshair: Option<CategoryCrosshairState>,
}

impl<R: Renderer> GanttChart<R> {
    pub fn new(renderer: R, config: GanttChartConfig, dataset: GanttDataset) -> ChartResult<Self> {
        config.validate()?;
        let mut painter = GanttPainter::new(config.style.clone())
            .with_label_generator(Box::new(IntervalCategoryLabelGenerator::percent_labels()));
        if config.tool_tips {
            painter = painter
                .with_tool_tip_generator(Box::new(IntervalCategoryLabelGenerator::tool_tips()));
        }
        Ok(Self {
            renderer,
            config,
            dataset,
            painter,
            entities: EntityCollection::new(),
            crosshair_anchor: None,
            crosshair: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GanttChartConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &GanttDataset {
        &self.dataset
    }

    pub fn set_dataset(&mut self, dataset: GanttDataset) {
        self.dataset = dataset;
    }

    pub fn set_crosshair_anchor(&mut self, anchor: Option<Point>) {
        self.crosshair_anchor = anchor;
    }

    /// Crosshair pick from the most recent frame build.
    #[must_use]
    pub fn crosshair(&self) -> Option<&CategoryCrosshairState> {
        self.crosshair.as_ref()
    }

    pub fn plot_context(&self) -> ChartResult<CategoryPlotContext> {
        let range = match self.config.time_range {
            Some(range) => range,
            None => self
                .dataset
                .range_bounds()
                .map_or(Range { lower: 0.0, upper: 1.0 }, |range| {
                    range.with_margins(self.config.range_margin, self.config.range_margin)
                }),
        };
        Ok(CategoryPlotContext {
            data_area: self.config.viewport.inset(self.config.inset),
            orientation: self.config.orientation,
            domain_axis: self.config.category_axis,
            range_axis: ValueAxis::new(range)?,
            dataset_index: 0,
        })
    }

    pub fn build_render_frame(&mut self) -> ChartResult<RenderFrame> {
        let ctx = self.plot_context()?;
        let mut frame = RenderFrame::new(self.config.viewport);
        frame.fill_rect(self.config.viewport.bounds(), self.config.background);

        let mut state = self.painter.initialise(&ctx, &self.dataset);
        state.entities = Some(EntityCollection::new());
        state.crosshair = self.crosshair_anchor.map(|anchor| CategoryCrosshairState {
            locked_on_data: self.config.crosshair_locked_on_data,
            ..CategoryCrosshairState::with_anchor(anchor)
        });

        self.painter
            .draw_all(&mut frame, &mut state, &ctx, &self.dataset)?;

        if let Some(value) = state.crosshair.as_ref().and_then(|c| c.crosshair_y) {
            let edge = ctx.orientation.range_axis_edge();
            let px = ctx.range_axis.value_to_pixel(value, ctx.data_area, edge);
            let area = ctx.data_area;
            let (from, to) = if edge.is_top_or_bottom() {
                (Point::new(px, area.min_y()), Point::new(px, area.max_y()))
            } else {
                (Point::new(area.min_x(), px), Point::new(area.max_x(), px))
            };
            frame.line(from, to, CROSSHAIR_STROKE);
        }

        self.entities = state.entities.unwrap_or_default();
        self.crosshair = state.crosshair;
        debug!(
            commands = frame.commands.len(),
            entities = self.entities.len(),
            bar_width = state.bar_width,
            "built gantt frame"
        );
        Ok(frame)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn entities(&self) -> &EntityCollection {
        &self.entities
    }

    #[must_use]
    pub fn entity_at(&self, point: Point) -> Option<&ChartEntity> {
        self.entities.entity_at(point)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
