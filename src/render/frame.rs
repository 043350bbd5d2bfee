use crate::core::{Point, Polygon, Rect, Region, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawCommand, StrokeStyle, TextPrimitive};

/// Backend-agnostic scene for one chart draw pass.
///
/// Commands are kept in paint order; later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

/// Number of commands of each kind in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameCounts {
    pub fills: usize,
    pub strokes: usize,
    pub lines: usize,
    pub texts: usize,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::StrokeRect { rect, stroke });
    }

    /// Fills a polygon, skipping polygons that enclose nothing.
    pub fn fill_polygon(&mut self, polygon: &Polygon, color: Color) {
        if polygon.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::FillPolygon {
            polygon: polygon.clone(),
            color,
        });
    }

    pub fn stroke_polygon(&mut self, polygon: &Polygon, stroke: StrokeStyle) {
        if polygon.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::StrokePolygon {
            polygon: polygon.clone(),
            stroke,
        });
    }

    pub fn fill_region(&mut self, region: &Region, color: Color) {
        for polygon in region.polygons() {
            self.fill_polygon(polygon, color);
        }
    }

    pub fn stroke_region(&mut self, region: &Region, stroke: StrokeStyle) {
        for polygon in region.polygons() {
            self.stroke_polygon(polygon, stroke);
        }
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    pub fn text(&mut self, text: TextPrimitive) {
        self.commands.push(DrawCommand::Text(text));
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for command in &self.commands {
            command.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> FrameCounts {
        let mut counts = FrameCounts::default();
        for command in &self.commands {
            match command {
                DrawCommand::FillRect { .. } | DrawCommand::FillPolygon { .. } => counts.fills += 1,
                DrawCommand::StrokeRect { .. } | DrawCommand::StrokePolygon { .. } => {
                    counts.strokes += 1;
                }
                DrawCommand::Line { .. } => counts.lines += 1,
                DrawCommand::Text(_) => counts.texts += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::{Point, Polygon, Rect, Region, Viewport};
    use crate::render::{Color, StrokeStyle};

    #[test]
    fn empty_polygons_are_not_recorded() {
        let mut frame = RenderFrame::new(Viewport::new(10, 10));
        frame.fill_polygon(
            &Polygon::from_points([Point::new(0.0, 0.0), Point::new(5.0, 5.0)]),
            Color::BLACK,
        );
        frame.fill_region(&Region::new(), Color::BLACK);
        assert!(frame.is_empty());
    }

    #[test]
    fn counts_follow_command_kinds() {
        let mut frame = RenderFrame::new(Viewport::new(10, 10));
        let rect = Rect::new(1.0, 1.0, 4.0, 4.0);
        frame.fill_rect(rect, Color::WHITE);
        frame.fill_region(&Region::from_rect(rect), Color::BLACK);
        frame.stroke_rect(rect, StrokeStyle::new(1.0, Color::BLACK));
        let counts = frame.counts();
        assert_eq!(counts.fills, 2);
        assert_eq!(counts.strokes, 1);
        frame.validate().expect("valid frame");
    }
}
