use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::{Polygon, Rect};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawCommand, RenderFrame, Renderer, StrokeStyle, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub fills_drawn: usize,
    pub strokes_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the offscreen surface as PNG.
    pub fn write_png(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let mut file = File::create(path.as_ref()).map_err(|err| {
            ChartError::InvalidData(format!(
                "failed to create png file `{}`: {err}",
                path.as_ref().display()
            ))
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| ChartError::InvalidData(format!("failed to write png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for command in &frame.commands {
            match command {
                DrawCommand::FillRect { rect, color } => {
                    append_rect_path(context, *rect);
                    apply_color(context, *color);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                    stats.fills_drawn += 1;
                }
                DrawCommand::StrokeRect { rect, stroke } => {
                    append_rect_path(context, *rect);
                    apply_stroke(context, *stroke);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke rectangle", err))?;
                    stats.strokes_drawn += 1;
                }
                DrawCommand::FillPolygon { polygon, color } => {
                    append_polygon_path(context, polygon);
                    apply_color(context, *color);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill polygon", err))?;
                    stats.fills_drawn += 1;
                }
                DrawCommand::StrokePolygon { polygon, stroke } => {
                    append_polygon_path(context, polygon);
                    apply_stroke(context, *stroke);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke polygon", err))?;
                    stats.strokes_drawn += 1;
                }
                DrawCommand::Line { from, to, stroke } => {
                    apply_stroke(context, *stroke);
                    context.move_to(from.x, from.y);
                    context.line_to(to.x, to.y);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                    stats.lines_drawn += 1;
                }
                DrawCommand::Text(text) => {
                    let layout = pangocairo::functions::create_layout(context);
                    let font_description =
                        FontDescription::from_string(&format!("Sans {}", text.font_size_px));
                    layout.set_font_description(Some(&font_description));
                    layout.set_text(&text.text);

                    let (text_width, text_height) = layout.pixel_size();
                    let x = match text.h_align {
                        TextHAlign::Left => text.x,
                        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                        TextHAlign::Right => text.x - f64::from(text_width),
                    };

                    apply_color(context, text.color);
                    context.move_to(x, text.y - f64::from(text_height) / 2.0);
                    pangocairo::functions::show_layout(context, &layout);
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_stroke(context: &Context, stroke: StrokeStyle) {
    apply_color(context, stroke.color);
    context.set_line_width(stroke.width);
}

fn append_rect_path(context: &Context, rect: Rect) {
    context.new_path();
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
}

fn append_polygon_path(context: &Context, polygon: &Polygon) {
    context.new_path();
    let mut points = polygon.points().iter();
    if let Some(first) = points.next() {
        context.move_to(first.x, first.y);
        for point in points {
            context.line_to(point.x, point.y);
        }
        context.close_path();
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
