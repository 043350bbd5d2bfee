use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::orientation::RectangleEdge;

/// Axis that divides its length into equally sized category slots.
///
/// Margins are fractions of the available length: `lower_margin` and
/// `upper_margin` pad the axis ends, `category_margin` is shared between the
/// gaps separating categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxis {
    #[serde(default = "default_end_margin")]
    pub lower_margin: f64,
    #[serde(default = "default_end_margin")]
    pub upper_margin: f64,
    #[serde(default = "default_category_margin")]
    pub category_margin: f64,
}

impl Default for CategoryAxis {
    fn default() -> Self {
        Self {
            lower_margin: default_end_margin(),
            upper_margin: default_end_margin(),
            category_margin: default_category_margin(),
        }
    }
}

fn default_end_margin() -> f64 {
    0.05
}

fn default_category_margin() -> f64 {
    0.2
}

impl CategoryAxis {
    fn available(area: Rect, edge: RectangleEdge) -> f64 {
        if edge.is_top_or_bottom() {
            area.width
        } else {
            area.height
        }
    }

    #[must_use]
    pub fn category_size(self, category_count: usize, area: Rect, edge: RectangleEdge) -> f64 {
        let available = Self::available(area, edge);
        let count = category_count.max(1) as f64;
        if category_count > 1 {
            available * (1.0 - self.lower_margin - self.upper_margin - self.category_margin)
                / count
        } else {
            available * (1.0 - self.lower_margin - self.upper_margin)
        }
    }

    #[must_use]
    pub fn category_gap(self, category_count: usize, area: Rect, edge: RectangleEdge) -> f64 {
        if category_count > 1 {
            Self::available(area, edge) * self.category_margin / (category_count - 1) as f64
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn category_start(
        self,
        category: usize,
        category_count: usize,
        area: Rect,
        edge: RectangleEdge,
    ) -> f64 {
        let origin = if edge.is_top_or_bottom() {
            area.min_x()
        } else {
            area.min_y()
        };
        let size = self.category_size(category_count, area, edge);
        let gap = self.category_gap(category_count, area, edge);
        origin
            + self.lower_margin * Self::available(area, edge)
            + category as f64 * (size + gap)
    }

    #[must_use]
    pub fn category_middle(
        self,
        category: usize,
        category_count: usize,
        area: Rect,
        edge: RectangleEdge,
    ) -> f64 {
        self.category_start(category, category_count, area, edge)
            + self.category_size(category_count, area, edge) / 2.0
    }

    #[must_use]
    pub fn category_end(
        self,
        category: usize,
        category_count: usize,
        area: Rect,
        edge: RectangleEdge,
    ) -> f64 {
        self.category_start(category, category_count, area, edge)
            + self.category_size(category_count, area, edge)
    }

    /// Middle of one series' slot inside a category, where `item_margin` is the
    /// fraction of the category width spent on gaps between series.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn category_series_middle(
        self,
        category: usize,
        category_count: usize,
        series: usize,
        series_count: usize,
        item_margin: f64,
        area: Rect,
        edge: RectangleEdge,
    ) -> f64 {
        let start = self.category_start(category, category_count, area, edge);
        let width = self.category_size(category_count, area, edge);
        if series_count <= 1 {
            return start + width / 2.0;
        }
        let gap = width * item_margin / (series_count - 1) as f64;
        let series_width = width * (1.0 - item_margin) / series_count as f64;
        start + series as f64 * (series_width + gap) + series_width / 2.0
    }
}
