use serde::{Deserialize, Serialize};

use crate::core::{Point, PlotOrientation};

/// Tracks the category data item nearest to a crosshair anchor.
///
/// Painters submit every drawn item as a candidate; the state keeps the one
/// with the smallest distance to the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCrosshairState {
    pub anchor: Option<Point>,
    pub distance: f64,
    pub row_key: Option<String>,
    pub column_key: Option<String>,
    pub crosshair_y: Option<f64>,
    pub dataset_index: usize,
    /// Snap to the nearest data value instead of only the nearest category.
    #[serde(default = "default_locked_on_data")]
    pub locked_on_data: bool,
}

fn default_locked_on_data() -> bool {
    true
}

impl Default for CategoryCrosshairState {
    fn default() -> Self {
        Self {
            anchor: None,
            distance: f64::INFINITY,
            row_key: None,
            column_key: None,
            crosshair_y: None,
            dataset_index: 0,
            locked_on_data: default_locked_on_data(),
        }
    }
}

impl CategoryCrosshairState {
    #[must_use]
    pub fn with_anchor(anchor: Point) -> Self {
        Self {
            anchor: Some(anchor),
            ..Self::default()
        }
    }

    /// Anchor expressed in (domain, range) pixel order for `orientation`.
    fn anchor_in_plot_space(&self, orientation: PlotOrientation) -> Option<(f64, f64)> {
        let anchor = self.anchor?;
        Some(match orientation {
            PlotOrientation::Vertical => (anchor.x, anchor.y),
            PlotOrientation::Horizontal => (anchor.y, anchor.x),
        })
    }

    /// Considers a candidate at `(trans_x, trans_y)`, given as domain and range
    /// pixel positions. Replaces the current pick when strictly nearer.
    #[allow(clippy::too_many_arguments)]
    pub fn update_crosshair_point(
        &mut self,
        row_key: &str,
        column_key: &str,
        value: f64,
        dataset_index: usize,
        trans_x: f64,
        trans_y: f64,
        orientation: PlotOrientation,
    ) {
        let Some((xx, yy)) = self.anchor_in_plot_space(orientation) else {
            return;
        };
        let d = (trans_x - xx).powi(2) + (trans_y - yy).powi(2);
        if d < self.distance {
            self.row_key = Some(row_key.to_owned());
            self.column_key = Some(column_key.to_owned());
            self.crosshair_y = Some(value);
            self.dataset_index = dataset_index;
            self.distance = d;
        }
    }

    /// Considers a candidate by its domain position only.
    pub fn update_crosshair_x(
        &mut self,
        row_key: &str,
        column_key: &str,
        dataset_index: usize,
        trans_x: f64,
        orientation: PlotOrientation,
    ) {
        let Some((xx, _)) = self.anchor_in_plot_space(orientation) else {
            return;
        };
        let d = (trans_x - xx).abs();
        if d < self.distance {
            self.row_key = Some(row_key.to_owned());
            self.column_key = Some(column_key.to_owned());
            self.dataset_index = dataset_index;
            self.distance = d;
        }
    }

    /// Dispatches on `locked_on_data`.
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        &mut self,
        row_key: &str,
        column_key: &str,
        value: f64,
        dataset_index: usize,
        trans_x: f64,
        trans_y: f64,
        orientation: PlotOrientation,
    ) {
        if self.locked_on_data {
            self.update_crosshair_point(
                row_key,
                column_key,
                value,
                dataset_index,
                trans_x,
                trans_y,
                orientation,
            );
        } else {
            self.update_crosshair_x(row_key, column_key, dataset_index, trans_x, orientation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CategoryCrosshairState;
    use crate::core::{PlotOrientation, Point};

    #[test]
    fn nearest_candidate_wins() {
        let mut state = CategoryCrosshairState::with_anchor(Point::new(100.0, 50.0));
        state.submit("r", "far", 1.0, 0, 10.0, 10.0, PlotOrientation::Vertical);
        state.submit("r", "near", 2.0, 0, 98.0, 52.0, PlotOrientation::Vertical);
        state.submit("r", "later", 3.0, 0, 90.0, 90.0, PlotOrientation::Vertical);
        assert_eq!(state.column_key.as_deref(), Some("near"));
        assert_eq!(state.crosshair_y, Some(2.0));
        assert_eq!(state.distance, 8.0);
    }

    #[test]
    fn horizontal_plots_swap_anchor_axes() {
        let mut state = CategoryCrosshairState::with_anchor(Point::new(300.0, 40.0));
        // Domain runs vertically: candidate at domain 40, range 300 is exact.
        state.submit("r", "c", 7.0, 1, 40.0, 300.0, PlotOrientation::Horizontal);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.dataset_index, 1);
    }

    #[test]
    fn unlocked_state_only_tracks_domain_distance() {
        let mut state = CategoryCrosshairState::with_anchor(Point::new(100.0, 0.0));
        state.locked_on_data = false;
        state.submit("r", "c", 5.0, 0, 97.0, 500.0, PlotOrientation::Vertical);
        assert_eq!(state.distance, 3.0);
        assert_eq!(state.crosshair_y, None);
    }

    #[test]
    fn no_anchor_means_no_update() {
        let mut state = CategoryCrosshairState::default();
        state.submit("r", "c", 5.0, 0, 1.0, 1.0, PlotOrientation::Vertical);
        assert!(state.row_key.is_none());
    }
}
