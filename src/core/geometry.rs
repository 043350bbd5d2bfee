use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in pixel space.
///
/// Width or height may be negative when computed from unordered coordinates;
/// such rectangles are treated as empty rather than normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[must_use]
    pub fn min_x(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn min_y(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn max_x(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn max_y(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.is_finite() || self.width <= 0.0 || self.height <= 0.0
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Returns the overlap of two rectangles, or `None` when they do not overlap.
    #[must_use]
    pub fn intersection(self, other: Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let left = self.min_x().max(other.min_x());
        let top = self.min_y().max(other.min_y());
        let right = self.max_x().min(other.max_x());
        let bottom = self.max_y().min(other.max_y());
        let rect = Rect::new(left, top, right - left, bottom - top);
        (!rect.is_empty()).then_some(rect)
    }

    /// Vertical strip spanning `area`'s full height between two x positions.
    ///
    /// The strip keeps the signed width `x_end - x_start`, so reversed inputs
    /// produce an empty strip.
    #[must_use]
    pub fn vertical_strip(area: Rect, x_start: f64, x_end: f64) -> Self {
        Self::new(x_start, area.y, x_end - x_start, area.height)
    }

    #[must_use]
    pub fn to_polygon(self) -> Polygon {
        Polygon::from_points([
            Point::new(self.min_x(), self.min_y()),
            Point::new(self.max_x(), self.min_y()),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.min_x(), self.max_y()),
        ])
    }
}

/// Implicitly closed polygon.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    points: SmallVec<[Point; 8]>,
}

impl Polygon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Shoelace area; positive for clockwise winding in screen space (y down).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum / 2.0
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// A polygon encloses nothing when it has fewer than three vertices or
    /// all of them are collinear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.len() < 3 || self.area() <= f64::EPSILON
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|point| point.is_finite())
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in &self.points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Even-odd point containment.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        let n = self.points.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Clips this polygon against an axis-aligned rectangle.
    ///
    /// The clip region is convex, so the subject may be any simple polygon.
    /// Returns an empty polygon when nothing remains.
    #[must_use]
    pub fn clip_to_rect(&self, rect: Rect) -> Polygon {
        if rect.is_empty() || self.points.len() < 3 {
            return Polygon::new();
        }

        let mut output: SmallVec<[Point; 8]> = self.points.clone();
        for edge in ClipEdge::ALL {
            if output.is_empty() {
                break;
            }
            let input = std::mem::take(&mut output);
            let mut previous = input[input.len() - 1];
            for &current in &input {
                let current_inside = edge.inside(current, rect);
                let previous_inside = edge.inside(previous, rect);
                if current_inside {
                    if !previous_inside {
                        output.push(edge.intersect(previous, current, rect));
                    }
                    output.push(current);
                } else if previous_inside {
                    output.push(edge.intersect(previous, current, rect));
                }
                previous = current;
            }
        }

        let clipped = Polygon { points: output };
        if clipped.is_empty() {
            Polygon::new()
        } else {
            clipped
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ClipEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl ClipEdge {
    const ALL: [ClipEdge; 4] = [
        ClipEdge::Left,
        ClipEdge::Right,
        ClipEdge::Top,
        ClipEdge::Bottom,
    ];

    fn inside(self, point: Point, rect: Rect) -> bool {
        match self {
            ClipEdge::Left => point.x >= rect.min_x(),
            ClipEdge::Right => point.x <= rect.max_x(),
            ClipEdge::Top => point.y >= rect.min_y(),
            ClipEdge::Bottom => point.y <= rect.max_y(),
        }
    }

    fn intersect(self, a: Point, b: Point, rect: Rect) -> Point {
        match self {
            ClipEdge::Left | ClipEdge::Right => {
                let x = if matches!(self, ClipEdge::Left) {
                    rect.min_x()
                } else {
                    rect.max_x()
                };
                let t = (x - a.x) / (b.x - a.x);
                Point::new(x, a.y + t * (b.y - a.y))
            }
            ClipEdge::Top | ClipEdge::Bottom => {
                let y = if matches!(self, ClipEdge::Top) {
                    rect.min_y()
                } else {
                    rect.max_y()
                };
                let t = (y - a.y) / (b.y - a.y);
                Point::new(a.x + t * (b.x - a.x), y)
            }
        }
    }
}

/// Union of polygons, used wherever a painter needs an arbitrary filled area.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    polygons: Vec<Polygon>,
}

impl Region {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_polygon(polygon: Polygon) -> Self {
        let mut region = Self::new();
        region.push(polygon);
        region
    }

    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        if rect.is_empty() {
            return Self::new();
        }
        Self::from_polygon(rect.to_polygon())
    }

    /// Adds a member polygon; empty polygons are dropped.
    pub fn push(&mut self, polygon: Polygon) {
        if !polygon.is_empty() {
            self.polygons.push(polygon);
        }
    }

    #[must_use]
    pub fn union(mut self, other: Region) -> Self {
        self.polygons.extend(other.polygons);
        self
    }

    #[must_use]
    pub fn intersect_rect(&self, rect: Rect) -> Region {
        let mut out = Region::new();
        for polygon in &self.polygons {
            out.push(polygon.clip_to_rect(rect));
        }
        out
    }

    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(Polygon::is_empty)
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.polygons.iter().any(|polygon| polygon.contains(point))
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.polygons
            .iter()
            .filter_map(Polygon::bounds)
            .reduce(|a, b| {
                let left = a.min_x().min(b.min_x());
                let top = a.min_y().min(b.min_y());
                let right = a.max_x().max(b.max_x());
                let bottom = a.max_y().max(b.max_y());
                Rect::new(left, top, right - left, bottom - top)
            })
    }
}
