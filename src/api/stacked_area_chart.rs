use tracing::debug;

use crate::core::{Point, Range, ValueAxis};
use crate::data::TableXyDataset;
use crate::error::ChartResult;
use crate::interaction::{ChartEntity, EntityCollection};
use crate::painters::{StackedXyAreaPainter, StandardXyToolTipGenerator, XyPlotContext};
use crate::render::{RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::StackedAreaChartConfig;

/// Stacked XY area chart bound to one renderer.
pub struct StackedAreaChart<R: Renderer> {
    renderer: R,
    config: StackedAreaChartConfig,
    dataset: TableXyDataset,
    painter: StackedXyAreaPainter,
    entities: EntityCollection,
}

impl<R: Renderer> StackedAreaChart<R> {
    pub fn new(
        renderer: R,
        config: StackedAreaChartConfig,
        dataset: TableXyDataset,
    ) -> ChartResult<Self> {
        config.validate()?;
        let mut painter = StackedXyAreaPainter::new()
            .with_round_x_coordinates(config.round_x_coordinates);
        painter.palette = config.palette.clone();
        if config.tool_tips {
            painter =
                painter.with_tool_tip_generator(Box::new(StandardXyToolTipGenerator::default()));
        }
        Ok(Self {
            renderer,
            config,
            dataset,
            painter,
            entities: EntityCollection::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StackedAreaChartConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &TableXyDataset {
        &self.dataset
    }

    pub fn set_dataset(&mut self, dataset: TableXyDataset) {
        self.dataset = dataset;
    }

    /// Axes and data area used for the next frame.
    pub fn plot_context(&self) -> ChartResult<XyPlotContext> {
        let domain = match self.config.domain_range {
            Some(range) => range,
            None => self
                .dataset
                .domain_bounds()
                .map_or(Range { lower: 0.0, upper: 1.0 }, |range| range.with_margins(0.0, 0.0)),
        };
        let range = match self.config.range_range {
            Some(range) => range,
            None => self
                .painter
                .find_range_bounds(&self.dataset)
                .map_or(Range { lower: 0.0, upper: 1.0 }, |range| {
                    range.with_margins(self.config.range_margin, self.config.range_margin)
                }),
        };
        Ok(XyPlotContext {
            data_area: self.config.viewport.inset(self.config.inset),
            orientation: self.config.orientation,
            domain_axis: ValueAxis::new(domain)?,
            range_axis: ValueAxis::new(range)?.with_inverted(self.config.range_axis_inverted),
        })
    }

    /// Paints the chart and refreshes the entity collection.
    pub fn build_render_frame(&mut self) -> ChartResult<RenderFrame> {
        let ctx = self.plot_context()?;
        let mut frame = RenderFrame::new(self.config.viewport);
        frame.fill_rect(self.config.viewport.bounds(), self.config.background);

        self.entities.clear();
        self.painter
            .draw_all(&mut frame, Some(&mut self.entities), &ctx, &self.dataset)?;
        debug!(
            commands = frame.commands.len(),
            entities = self.entities.len(),
            "built stacked area frame"
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

    /// Entities recorded by the most recent frame build.
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
