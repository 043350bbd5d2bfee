pub mod arc;
pub mod category_axis;
pub mod geometry;
pub mod orientation;
pub mod types;
pub mod value_axis;

pub use arc::{PieArc, is_angle_at_back, is_angle_at_front};
pub use category_axis::CategoryAxis;
pub use geometry::{Point, Polygon, Rect, Region};
pub use orientation::{PlotOrientation, RectangleEdge};
pub use types::Viewport;
pub use value_axis::{Range, ValueAxis};
