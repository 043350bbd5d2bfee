use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::geometry::Rect;
use super::orientation::RectangleEdge;

/// Closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub lower: f64,
    pub upper: f64,
}

impl Range {
    pub fn new(lower: f64, upper: f64) -> ChartResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(ChartError::InvalidData(format!(
                "range bounds must be finite and ordered: lower={lower}, upper={upper}"
            )));
        }
        Ok(Self { lower, upper })
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    #[must_use]
    pub fn expand_to_include(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        Self {
            lower: self.lower.min(value),
            upper: self.upper.max(value),
        }
    }

    #[must_use]
    pub fn combine(a: Option<Range>, b: Option<Range>) -> Option<Range> {
        match (a, b) {
            (Some(a), Some(b)) => Some(Range {
                lower: a.lower.min(b.lower),
                upper: a.upper.max(b.upper),
            }),
            (Some(range), None) | (None, Some(range)) => Some(range),
            (None, None) => None,
        }
    }

    /// Widens the range by fractions of its length on each side.
    ///
    /// Zero-length ranges are widened by one unit so they stay mappable.
    #[must_use]
    pub fn with_margins(self, lower_margin: f64, upper_margin: f64) -> Self {
        let length = self.length();
        if length <= 0.0 {
            return Self {
                lower: self.lower - 0.5,
                upper: self.upper + 0.5,
            };
        }
        Self {
            lower: self.lower - length * lower_margin,
            upper: self.upper + length * upper_margin,
        }
    }
}

/// Linear numeric axis translating data values into pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAxis {
    range: Range,
    inverted: bool,
}

impl ValueAxis {
    pub fn new(range: Range) -> ChartResult<Self> {
        if range.length() <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis range must have a non-zero length".to_owned(),
            ));
        }
        Ok(Self {
            range,
            inverted: false,
        })
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn range(self) -> Range {
        self.range
    }

    #[must_use]
    pub fn is_inverted(self) -> bool {
        self.inverted
    }

    /// Maps `value` onto `area` along the axis located at `edge`.
    ///
    /// Horizontal axes grow to the right, vertical axes grow upwards.
    #[must_use]
    pub fn value_to_pixel(self, value: f64, area: Rect, edge: RectangleEdge) -> f64 {
        let ratio = (value - self.range.lower) / self.range.length();
        if edge.is_top_or_bottom() {
            if self.inverted {
                area.max_x() - ratio * area.width
            } else {
                area.min_x() + ratio * area.width
            }
        } else if self.inverted {
            area.min_y() + ratio * area.height
        } else {
            area.max_y() - ratio * area.height
        }
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64, area: Rect, edge: RectangleEdge) -> f64 {
        let (min, max) = if edge.is_top_or_bottom() {
            (area.min_x(), area.max_x())
        } else {
            (area.max_y(), area.min_y())
        };
        let (min, max) = if self.inverted { (max, min) } else { (min, max) };
        let ratio = (pixel - min) / (max - min);
        self.range.lower + ratio * self.range.length()
    }
}

#[cfg(test)]
mod tests {
    use super::{Range, ValueAxis};
    use crate::core::{Rect, RectangleEdge};
    use approx::assert_relative_eq;

    #[test]
    fn horizontal_and_vertical_edges_map_in_opposite_screen_directions() {
        let axis = ValueAxis::new(Range::new(0.0, 10.0).expect("range")).expect("axis");
        let area = Rect::new(10.0, 20.0, 100.0, 200.0);
        assert_relative_eq!(axis.value_to_pixel(2.5, area, RectangleEdge::Bottom), 35.0);
        assert_relative_eq!(axis.value_to_pixel(2.5, area, RectangleEdge::Left), 170.0);
        assert_relative_eq!(axis.pixel_to_value(170.0, area, RectangleEdge::Left), 2.5);
    }

    #[test]
    fn inverted_axis_flips_mapping() {
        let axis = ValueAxis::new(Range::new(0.0, 10.0).expect("range"))
            .expect("axis")
            .with_inverted(true);
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_relative_eq!(axis.value_to_pixel(0.0, area, RectangleEdge::Bottom), 100.0);
        assert_relative_eq!(axis.value_to_pixel(0.0, area, RectangleEdge::Left), 0.0);
        assert_relative_eq!(axis.pixel_to_value(25.0, area, RectangleEdge::Top), 7.5);
    }

    #[test]
    fn zero_length_range_is_rejected() {
        assert!(ValueAxis::new(Range::new(3.0, 3.0).expect("range")).is_err());
        assert!(Range::new(2.0, 1.0).is_err());
    }
}
