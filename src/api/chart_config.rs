use serde::{Deserialize, Serialize};

use crate::core::{CategoryAxis, PlotOrientation, Range, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::painters::{GanttStyle, Palette};
use crate::render::{Color, StrokeStyle};

fn default_inset() -> f64 {
    8.0
}

fn default_background() -> Color {
    Color::WHITE
}

fn default_range_margin() -> f64 {
    0.05
}

fn default_gantt_orientation() -> PlotOrientation {
    PlotOrientation::Horizontal
}

fn default_true() -> bool {
    true
}

fn default_start_angle() -> f64 {
    90.0
}

fn default_depth_factor() -> f64 {
    0.12
}

fn default_section_outline() -> StrokeStyle {
    StrokeStyle::new(0.5, Color::GRAY)
}

fn validate_viewport(viewport: Viewport) -> ChartResult<()> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}

fn validate_fraction(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ChartError::InvalidData(format!(
            "`{name}` must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}

/// Stacked XY area chart setup.
///
/// Axis ranges left as `None` are derived from the dataset on every build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedAreaChartConfig {
    pub viewport: Viewport,
    #[serde(default = "default_inset")]
    pub inset: f64,
    #[serde(default)]
    pub orientation: PlotOrientation,
    #[serde(default)]
    pub domain_range: Option<Range>,
    #[serde(default)]
    pub range_range: Option<Range>,
    /// Fraction of the stacked range added above and below auto ranges.
    #[serde(default = "default_range_margin")]
    pub range_margin: f64,
    #[serde(default)]
    pub range_axis_inverted: bool,
    #[serde(default)]
    pub round_x_coordinates: bool,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_true")]
    pub tool_tips: bool,
}

impl StackedAreaChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            inset: default_inset(),
            orientation: PlotOrientation::default(),
            domain_range: None,
            range_range: None,
            range_margin: default_range_margin(),
            range_axis_inverted: false,
            round_x_coordinates: false,
            palette: Palette::default(),
            background: default_background(),
            tool_tips: true,
        }
    }

    #[must_use]
    pub fn with_inset(mut self, inset: f64) -> Self {
        self.inset = inset;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: PlotOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_domain_range(mut self, range: Range) -> Self {
        self.domain_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_range_range(mut self, range: Range) -> Self {
        self.range_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_range_axis_inverted(mut self, inverted: bool) -> Self {
        self.range_axis_inverted = inverted;
        self
    }

    #[must_use]
    pub fn with_round_x_coordinates(mut self, round: bool) -> Self {
        self.round_x_coordinates = round;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_tool_tips(mut self, enabled: bool) -> Self {
        self.tool_tips = enabled;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        if !self.range_margin.is_finite() || self.range_margin < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "range margin must be finite and >= 0, got {}",
                self.range_margin
            )));
        }
        self.background.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize stacked area config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse stacked area config: {e}"))
        })
    }
}

/// Gantt chart setup. Tasks run along the range axis, which is a time axis in
/// epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttChartConfig {
    pub viewport: Viewport,
    #[serde(default = "default_inset")]
    pub inset: f64,
    #[serde(default = "default_gantt_orientation")]
    pub orientation: PlotOrientation,
    #[serde(default)]
    pub category_axis: CategoryAxis,
    #[serde(default)]
    pub time_range: Option<Range>,
    #[serde(default = "default_range_margin")]
    pub range_margin: f64,
    #[serde(default)]
    pub style: GanttStyle,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_true")]
    pub tool_tips: bool,
    /// Crosshair snaps to task values rather than only to the nearest task.
    #[serde(default = "default_true")]
    pub crosshair_locked_on_data: bool,
}

impl GanttChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            inset: default_inset(),
            orientation: default_gantt_orientation(),
            category_axis: CategoryAxis::default(),
            time_range: None,
            range_margin: default_range_margin(),
            style: GanttStyle::default(),
            background: default_background(),
            tool_tips: true,
            crosshair_locked_on_data: true,
        }
    }

    #[must_use]
    pub fn with_inset(mut self, inset: f64) -> Self {
        self.inset = inset;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: PlotOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_category_axis(mut self, axis: CategoryAxis) -> Self {
        self.category_axis = axis;
        self
    }

    #[must_use]
    pub fn with_time_range(mut self, range: Range) -> Self {
        self.time_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: GanttStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_tool_tips(mut self, enabled: bool) -> Self {
        self.tool_tips = enabled;
        self
    }

    #[must_use]
    pub fn with_crosshair_locked_on_data(mut self, locked: bool) -> Self {
        self.crosshair_locked_on_data = locked;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        validate_fraction("category_axis.lower_margin", self.category_axis.lower_margin)?;
        validate_fraction("category_axis.upper_margin", self.category_axis.upper_margin)?;
        validate_fraction("category_axis.category_margin", self.category_axis.category_margin)?;
        if !self.range_margin.is_finite() || self.range_margin < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "range margin must be finite and >= 0, got {}",
                self.range_margin
            )));
        }
        self.style.validate()?;
        self.background.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize gantt config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse gantt config: {e}")))
    }
}

/// 3D pie chart setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pie3dChartConfig {
    pub viewport: Viewport,
    #[serde(default = "default_inset")]
    pub inset: f64,
    /// Angle of the first section's leading edge; 0° is 3 o'clock.
    #[serde(default = "default_start_angle")]
    pub start_angle_deg: f64,
    #[serde(default = "default_true")]
    pub clockwise: bool,
    /// Pie depth as a fraction of the plot height.
    #[serde(default = "default_depth_factor")]
    pub depth_factor: f64,
    #[serde(default)]
    pub darker_sides: bool,
    #[serde(default = "default_section_outline")]
    pub section_outline: StrokeStyle,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_true")]
    pub tool_tips: bool,
}

impl Pie3dChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            inset: default_inset(),
            start_angle_deg: default_start_angle(),
            clockwise: true,
            depth_factor: default_depth_factor(),
            darker_sides: false,
            section_outline: default_section_outline(),
            palette: Palette::default(),
            background: default_background(),
            tool_tips: true,
        }
    }

    #[must_use]
    pub fn with_inset(mut self, inset: f64) -> Self {
        self.inset = inset;
        self
    }

    #[must_use]
    pub fn with_start_angle(mut self, degrees: f64) -> Self {
        self.start_angle_deg = degrees;
        self
    }

    #[must_use]
    pub fn with_clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    #[must_use]
    pub fn with_depth_factor(mut self, factor: f64) -> Self {
        self.depth_factor = factor;
        self
    }

    #[must_use]
    pub fn with_darker_sides(mut self, darker: bool) -> Self {
        self.darker_sides = darker;
        self
    }

    #[must_use]
    pub fn with_section_outline(mut self, outline: StrokeStyle) -> Self {
        self.section_outline = outline;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_tool_tips(mut self, enabled: bool) -> Self {
        self.tool_tips = enabled;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        if !self.start_angle_deg.is_finite() {
            return Err(ChartError::InvalidData(
                "pie start angle must be finite".to_owned(),
            ));
        }
        if !self.depth_factor.is_finite() || !(0.0..1.0).contains(&self.depth_factor) {
            return Err(ChartError::InvalidData(format!(
                "pie depth factor must be in [0, 1), got {}",
                self.depth_factor
            )));
        }
        self.section_outline.validate()?;
        self.background.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize pie config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse pie config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{GanttChartConfig, Pie3dChartConfig, StackedAreaChartConfig};
    use crate::core::{PlotOrientation, Viewport};

    #[test]
    fn missing_fields_take_defaults() {
        let config = GanttChartConfig::from_json_str(r#"{"viewport":{"width":640,"height":480}}"#)
            .expect("parse");
        assert_eq!(config, GanttChartConfig::new(Viewport::new(640, 480)));
        assert_eq!(config.orientation, PlotOrientation::Horizontal);
    }

    #[test]
    fn zero_viewport_is_rejected() {
        assert!(StackedAreaChartConfig::new(Viewport::new(0, 10)).validate().is_err());
        assert!(
            Pie3dChartConfig::new(Viewport::new(100, 100))
                .with_depth_factor(1.5)
                .validate()
                .is_err()
        );
    }
}
