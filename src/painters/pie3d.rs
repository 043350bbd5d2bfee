use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PieArc, Polygon, Rect, Region, is_angle_at_back, is_angle_at_front};
use crate::render::{Color, RenderFrame, StrokeStyle};

/// Angular resolution used when tracing ellipse outlines into polygons.
const ELLIPSE_STEP_DEG: f64 = 2.0;

/// Side band of a 3D pie, split into the half facing the viewer and the half
/// hidden behind the top face.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieSideRegions {
    pub front: Region,
    pub back: Region,
}

impl PieSideRegions {
    /// Builds the side bands for a pie whose top face is framed by
    /// `top_frame` and whose bottom face sits `depth` pixels lower.
    #[must_use]
    pub fn new(top_frame: Rect, depth: f64) -> Self {
        let top = PieArc::new(top_frame, 0.0, 0.0);
        let bottom = top.offset_y(depth.max(0.0));
        Self {
            front: Region::from_polygon(band(top, bottom, 180.0, 360.0)),
            back: Region::from_polygon(band(top, bottom, 0.0, 180.0)),
        }
    }
}

/// Closed band between the same angular span on two stacked ellipses.
fn band(top: PieArc, bottom: PieArc, from_deg: f64, to_deg: f64) -> Polygon {
    let upper =
        PieArc::new(top.frame, from_deg, to_deg - from_deg).sample_points(ELLIPSE_STEP_DEG);
    let lower =
        PieArc::new(bottom.frame, to_deg, from_deg - to_deg).sample_points(ELLIPSE_STEP_DEG);
    Polygon::from_points(upper.into_iter().chain(lower))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideFace {
    Front,
    Back,
}

impl SideFace {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            SideFace::Front => SideFace::Back,
            SideFace::Back => SideFace::Front,
        }
    }
}

/// Which side bands a call is allowed to paint.
///
/// 3D pies paint every back side first and every front side afterwards so
/// front faces end up on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSelection {
    pub front: bool,
    pub back: bool,
}

impl SideSelection {
    pub const FRONT: SideSelection = SideSelection {
        front: true,
        back: false,
    };
    pub const BACK: SideSelection = SideSelection {
        front: false,
        back: true,
    };
    pub const BOTH: SideSelection = SideSelection {
        front: true,
        back: true,
    };

    #[must_use]
    pub fn includes(self, face: SideFace) -> bool {
        match face {
            SideFace::Front => self.front,
            SideFace::Back => self.back,
        }
    }
}

/// Clip strips (full plot height) selected for one wedge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SideLayout {
    /// Zero extent: nothing visible.
    Empty,
    /// Wedge stays on one face.
    Single { face: SideFace, strip: Rect },
    /// Wedge crosses from one face to the other; back is painted first.
    Split { back_strip: Rect, front_strip: Rect },
    /// Wedge wraps around the opposite face, which is painted whole.
    Wrap { face: SideFace, strips: [Rect; 2] },
}

impl SideLayout {
    /// Selects clip strips from the wedge's direction and where its start and
    /// end angles fall.
    #[must_use]
    pub fn for_arc(plot_area: Rect, arc: PieArc) -> Self {
        let start = arc.start_deg;
        let extent = arc.extent_deg;
        let end = start + extent;
        let sx = arc.start_point().x;
        let ex = arc.end_point().x;
        let min_x = plot_area.min_x();
        let max_x = plot_area.max_x();
        let strip = |from: f64, to: f64| Rect::vertical_strip(plot_area, from, to);

        if extent < 0.0 {
            // Clockwise.
            if is_angle_at_front(start) {
                if !is_angle_at_back(end) {
                    if extent > -180.0 {
                        SideLayout::Single {
                            face: SideFace::Front,
                            strip: strip(ex, sx),
                        }
                    } else {
                        SideLayout::Wrap {
                            face: SideFace::Front,
                            strips: [strip(min_x, sx), strip(ex, max_x)],
                        }
                    }
                } else {
                    SideLayout::Split {
                        back_strip: strip(min_x, ex),
                        front_strip: strip(min_x, sx),
                    }
                }
            } else if !is_angle_at_front(end) {
                if extent > -180.0 {
                    SideLayout::Single {
                        face: SideFace::Back,
                        strip: strip(sx, ex),
                    }
                } else {
                    SideLayout::Wrap {
                        face: SideFace::Back,
                        strips: [strip(sx, max_x), strip(min_x, ex)],
                    }
                }
            } else {
                SideLayout::Split {
                    back_strip: strip(sx, max_x),
                    front_strip: strip(ex, max_x),
                }
            }
        } else if extent > 0.0 {
            // Anticlockwise.
            if is_angle_at_front(start) {
                if !is_angle_at_back(end) {
                    if extent < 180.0 {
                        SideLayout::Single {
                            face: SideFace::Front,
                            strip: strip(sx, ex),
                        }
                    } else {
                        SideLayout::Wrap {
                            face: SideFace::Front,
                            strips: [strip(sx, max_x), strip(min_x, ex)],
                        }
                    }
                } else {
                    SideLayout::Split {
                        back_strip: strip(ex, max_x),
                        front_strip: strip(sx, max_x),
                    }
                }
            } else if !is_angle_at_front(end) {
                if extent < 180.0 {
                    SideLayout::Single {
                        face: SideFace::Back,
                        strip: strip(ex, sx),
                    }
                } else {
                    SideLayout::Wrap {
                        face: SideFace::Back,
                        strips: [strip(min_x, sx), strip(ex, max_x)],
                    }
                }
            } else {
                SideLayout::Split {
                    back_strip: strip(min_x, sx),
                    front_strip: strip(min_x, ex),
                }
            }
        } else {
            SideLayout::Empty
        }
    }
}

/// Paints the depth faces of 3D pie wedges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PieSidePainter {
    /// Shade sides darker than the wedge's top face.
    #[serde(default)]
    pub darker_sides: bool,
}

impl PieSidePainter {
    #[must_use]
    pub fn new(darker_sides: bool) -> Self {
        Self { darker_sides }
    }

    /// Draws the visible side of one wedge.
    ///
    /// Side shapes are vertical strips of `plot_area` clipped to the front or
    /// back band of `sides`. Each side is filled then outlined; wrapping
    /// wedges fill every shape before outlining any.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_side(
        &self,
        frame: &mut RenderFrame,
        plot_area: Rect,
        arc: PieArc,
        sides: &PieSideRegions,
        paint: Color,
        outline: StrokeStyle,
        selection: SideSelection,
    ) {
        let paint = if self.darker_sides {
            paint.darker()
        } else {
            paint
        };
        let region_for = |face: SideFace| match face {
            SideFace::Front => &sides.front,
            SideFace::Back => &sides.back,
        };

        let layout = SideLayout::for_arc(plot_area, arc);
        trace!(
            start = arc.start_deg,
            extent = arc.extent_deg,
            ?layout,
            "draw pie side"
        );

        match layout {
            SideLayout::Empty => {}
            SideLayout::Single { face, strip } => {
                if selection.includes(face) {
                    let side = region_for(face).intersect_rect(strip);
                    frame.fill_region(&side, paint);
                    frame.stroke_region(&side, outline);
                }
            }
            SideLayout::Split {
                back_strip,
                front_strip,
            } => {
                if selection.back {
                    let side = sides.back.intersect_rect(back_strip);
                    frame.fill_region(&side, paint);
                    frame.stroke_region(&side, outline);
                }
                if selection.front {
                    let side = sides.front.intersect_rect(front_strip);
                    frame.fill_region(&side, paint);
                    frame.stroke_region(&side, outline);
                }
            }
            SideLayout::Wrap { face, strips } => {
                let region = region_for(face);
                let side1 = region.intersect_rect(strips[0]);
                let side2 = region.intersect_rect(strips[1]);
                let opposite = face.opposite();

                if selection.includes(face) {
                    frame.fill_region(&side1, paint);
                    frame.fill_region(&side2, paint);
                }
                if selection.includes(opposite) {
                    frame.fill_region(region_for(opposite), paint);
                }

                if selection.includes(face) {
                    frame.stroke_region(&side1, outline);
                    frame.stroke_region(&side2, outline);
                }
                if selection.includes(opposite) {
                    frame.stroke_region(region_for(opposite), outline);
                }
            }
        }
    }
}
