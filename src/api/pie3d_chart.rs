use tracing::{debug, warn};

use crate::core::{PieArc, Point, Rect, Region};
use crate::data::PieDataset;
use crate::error::ChartResult;
use crate::interaction::{ChartEntity, EntityArea, EntityCollection, EntityKind};
use crate::painters::{PieSidePainter, PieSideRegions, SideSelection};
use crate::render::{Color, RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::Pie3dChartConfig;

const WEDGE_STEP_DEG: f64 = 2.0;

/// One laid-out pie section.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSectionLayout {
    pub key: String,
    pub value: f64,
    pub arc: PieArc,
    pub paint: Color,
}

/// Geometry shared by every section of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    pub plot_area: Rect,
    pub top_frame: Rect,
    pub depth: f64,
    pub sections: Vec<PieSectionLayout>,
}

/// 3D pie chart bound to one renderer.
pub struct Pie3dChart<R: Renderer> {
    renderer: R,
    config: Pie3dChartConfig,
    dataset: PieDataset,
    entities: EntityCollection,
}

impl<R: Renderer> Pie3dChart<R> {
    pub fn new(renderer: R, config: Pie3dChartConfig, dataset: PieDataset) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            config,
            dataset,
            entities: EntityCollection::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &Pie3dChartConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &PieDataset {
        &self.dataset
    }

    pub fn set_dataset(&mut self, dataset: PieDataset) {
        self.dataset = dataset;
    }

    /// Sections in dataset order, each starting where the previous one ended.
    ///
    /// Keys with zero, negative or non-finite values get no section.
    #[must_use]
    pub fn layout(&self) -> PieLayout {
        let plot_area = self.config.viewport.inset(self.config.inset);
        let depth = plot_area.height * self.config.depth_factor;
        let top_frame = Rect::new(
            plot_area.x,
            plot_area.y,
            plot_area.width,
            plot_area.height - depth,
        );

        let total = self.dataset.total();
        let direction = if self.config.clockwise { -1.0 } else { 1.0 };
        let mut angle = self.config.start_angle_deg;
        let mut sections = Vec::new();
        if total > 0.0 {
            for (index, (key, value)) in self.dataset.iter().enumerate() {
                if !value.is_finite() || value <= 0.0 {
                    continue;
                }
                let extent = direction * value / total * 360.0;
                sections.push(PieSectionLayout {
                    key: key.to_owned(),
                    value,
                    arc: PieArc::new(top_frame, angle, extent),
                    paint: self.config.palette.color(index),
                });
                angle += extent;
            }
        } else if !self.dataset.is_empty() {
            warn!(keys = self.dataset.len(), "pie dataset has no positive values");
        }

        PieLayout {
            plot_area,
            top_frame,
            depth,
            sections,
        }
    }

    /// Paints back sides, then front sides, then the top faces.
    pub fn build_render_frame(&mut self) -> ChartResult<RenderFrame> {
        let layout = self.layout();
        let mut frame = RenderFrame::new(self.config.viewport);
        frame.fill_rect(self.config.viewport.bounds(), self.config.background);

        let sides = PieSideRegions::new(layout.top_frame, layout.depth);
        let painter = PieSidePainter::new(self.config.darker_sides);
        let outline = self.config.section_outline;

        for selection in [SideSelection::BACK, SideSelection::FRONT] {
            for section in &layout.sections {
                painter.draw_side(
                    &mut frame,
                    layout.plot_area,
                    section.arc,
                    &sides,
                    section.paint,
                    outline,
                    selection,
                );
            }
        }

        self.entities.clear();
        let total = self.dataset.total();
        for section in &layout.sections {
            let wedge = section.arc.wedge_polygon(WEDGE_STEP_DEG);
            frame.fill_polygon(&wedge, section.paint);
            frame.stroke_polygon(&wedge, outline);

            let tooltip = self.config.tool_tips.then(|| {
                format!(
                    "{}: ({}, {:.0}%)",
                    section.key,
                    section.value,
                    section.value / total * 100.0
                )
            });
            self.entities.add(ChartEntity {
                area: EntityArea::Region(Region::from_polygon(wedge)),
                kind: EntityKind::PieSection {
                    key: section.key.clone(),
                },
                tooltip,
            });
        }

        debug!(
            sections = layout.sections.len(),
            commands = frame.commands.len(),
            "built 3d pie frame"
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
