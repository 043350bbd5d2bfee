use serde::{Deserialize, Serialize};

use super::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlotOrientation {
    /// Domain runs left-to-right, values grow upwards.
    #[default]
    Vertical,
    /// Domain runs top-to-bottom, values grow to the right.
    Horizontal,
}

impl PlotOrientation {
    #[must_use]
    pub fn domain_axis_edge(self) -> RectangleEdge {
        match self {
            PlotOrientation::Vertical => RectangleEdge::Bottom,
            PlotOrientation::Horizontal => RectangleEdge::Left,
        }
    }

    #[must_use]
    pub fn range_axis_edge(self) -> RectangleEdge {
        match self {
            PlotOrientation::Vertical => RectangleEdge::Left,
            PlotOrientation::Horizontal => RectangleEdge::Bottom,
        }
    }

    /// Builds a screen point from translated domain/range coordinates.
    #[must_use]
    pub fn point(self, domain_px: f64, range_px: f64) -> Point {
        match self {
            PlotOrientation::Vertical => Point::new(domain_px, range_px),
            PlotOrientation::Horizontal => Point::new(range_px, domain_px),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectangleEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl RectangleEdge {
    #[must_use]
    pub fn is_top_or_bottom(self) -> bool {
        matches!(self, RectangleEdge::Top | RectangleEdge::Bottom)
    }

    #[must_use]
    pub fn is_left_or_right(self) -> bool {
        !self.is_top_or_bottom()
    }
}
