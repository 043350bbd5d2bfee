use serde::{Deserialize, Serialize};

use crate::core::{Point, Polygon, Rect};
use crate::error::{ChartError, ChartResult};

const DARKER_FACTOR: f64 = 0.7;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Scales the color channels down, keeping alpha, for shaded faces.
    #[must_use]
    pub fn darker(self) -> Self {
        Self {
            red: self.red * DARKER_FACTOR,
            green: self.green * DARKER_FACTOR,
            blue: self.blue * DARKER_FACTOR,
            alpha: self.alpha,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Outline pen: width in pixels plus color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
}

impl StrokeStyle {
    #[must_use]
    pub const fn new(width: f64, color: Color) -> Self {
        Self { width, color }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One paint operation. A frame replays its commands in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        stroke: StrokeStyle,
    },
    FillPolygon {
        polygon: Polygon,
        color: Color,
    },
    StrokePolygon {
        polygon: Polygon,
        stroke: StrokeStyle,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            DrawCommand::FillRect { rect, color } => {
                validate_rect(*rect)?;
                color.validate()
            }
            DrawCommand::StrokeRect { rect, stroke } => {
                validate_rect(*rect)?;
                stroke.validate()
            }
            DrawCommand::FillPolygon { polygon, color } => {
                validate_polygon(polygon)?;
                color.validate()
            }
            DrawCommand::StrokePolygon { polygon, stroke } => {
                validate_polygon(polygon)?;
                stroke.validate()
            }
            DrawCommand::Line { from, to, stroke } => {
                if !from.is_finite() || !to.is_finite() {
                    return Err(ChartError::InvalidData(
                        "line coordinates must be finite".to_owned(),
                    ));
                }
                stroke.validate()
            }
            DrawCommand::Text(text) => text.validate(),
        }
    }
}

fn validate_rect(rect: Rect) -> ChartResult<()> {
    if !rect.is_finite() || rect.width < 0.0 || rect.height < 0.0 {
        return Err(ChartError::InvalidData(
            "rectangle must be finite with non-negative size".to_owned(),
        ));
    }
    Ok(())
}

fn validate_polygon(polygon: &Polygon) -> ChartResult<()> {
    if polygon.len() < 3 {
        return Err(ChartError::InvalidData(
            "polygon needs at least three vertices".to_owned(),
        ));
    }
    if !polygon.is_finite() {
        return Err(ChartError::InvalidData(
            "polygon vertices must be finite".to_owned(),
        ));
    }
    Ok(())
}
