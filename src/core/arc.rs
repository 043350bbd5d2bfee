use serde::{Deserialize, Serialize};

use super::geometry::{Point, Polygon, Rect};

/// Elliptical arc described by its framing rectangle and angles in degrees.
///
/// Angles follow screen convention for pie charts: 0° points to 3 o'clock and
/// positive extents run anticlockwise, so 90° is the top of the ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieArc {
    pub frame: Rect,
    pub start_deg: f64,
    pub extent_deg: f64,
}

impl PieArc {
    #[must_use]
    pub const fn new(frame: Rect, start_deg: f64, extent_deg: f64) -> Self {
        Self {
            frame,
            start_deg,
            extent_deg,
        }
    }

    #[must_use]
    pub fn end_deg(self) -> f64 {
        self.start_deg + self.extent_deg
    }

    #[must_use]
    pub fn point_at(self, angle_deg: f64) -> Point {
        let center = self.frame.center();
        let radians = angle_deg.to_radians();
        Point::new(
            center.x + radians.cos() * self.frame.width / 2.0,
            center.y - radians.sin() * self.frame.height / 2.0,
        )
    }

    #[must_use]
    pub fn start_point(self) -> Point {
        self.point_at(self.start_deg)
    }

    #[must_use]
    pub fn end_point(self) -> Point {
        self.point_at(self.end_deg())
    }

    /// Same arc translated vertically, used for the lower face of a 3D pie.
    #[must_use]
    pub fn offset_y(self, dy: f64) -> Self {
        let mut frame = self.frame;
        frame.y += dy;
        Self { frame, ..self }
    }

    /// Points along the arc from start to end, at most `max_step_deg` apart.
    #[must_use]
    pub fn sample_points(self, max_step_deg: f64) -> Vec<Point> {
        let step = if max_step_deg.is_finite() && max_step_deg > 0.0 {
            max_step_deg
        } else {
            1.0
        };
        let segments = (self.extent_deg.abs() / step).ceil().max(1.0) as usize;
        (0..=segments)
            .map(|i| self.point_at(self.start_deg + self.extent_deg * i as f64 / segments as f64))
            .collect()
    }

    /// Closed pie wedge: center followed by the sampled arc.
    #[must_use]
    pub fn wedge_polygon(self, max_step_deg: f64) -> Polygon {
        let mut polygon = Polygon::new();
        polygon.push(self.frame.center());
        for point in self.sample_points(max_step_deg) {
            polygon.push(point);
        }
        polygon
    }
}

/// Lower half of the ellipse, facing the viewer.
#[must_use]
pub fn is_angle_at_front(angle_deg: f64) -> bool {
    angle_deg.to_radians().sin() < 0.0
}

/// Upper half of the ellipse, hidden behind the pie's top face.
#[must_use]
pub fn is_angle_at_back(angle_deg: f64) -> bool {
    angle_deg.to_radians().sin() > 0.0
}
