use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Rect, RectangleEdge};
use crate::render::{Color, RenderFrame};

/// Paints bar bodies and their drop shadows.
pub trait BarPainter: fmt::Debug {
    fn paint_bar(&self, frame: &mut RenderFrame, bar: Rect, base: RectangleEdge, paint: Color);

    /// `peg_shadow` keeps the shadow flush with the bar's base edge.
    fn paint_bar_shadow(
        &self,
        frame: &mut RenderFrame,
        bar: Rect,
        base: RectangleEdge,
        item_paint: Color,
        peg_shadow: bool,
    );
}

/// Flat fill with an offset shadow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardBarPainter {
    pub shadow_color: Color,
    pub shadow_x_offset: f64,
    pub shadow_y_offset: f64,
}

impl Default for StandardBarPainter {
    fn default() -> Self {
        Self {
            shadow_color: Color::GRAY,
            shadow_x_offset: 4.0,
            shadow_y_offset: 4.0,
        }
    }
}

impl StandardBarPainter {
    #[must_use]
    pub fn shadow_rect(&self, bar: Rect, base: RectangleEdge, peg_shadow: bool) -> Rect {
        let (dx, dy) = (self.shadow_x_offset, self.shadow_y_offset);
        let (mut x0, mut x1) = (bar.min_x(), bar.max_x());
        let (mut y0, mut y1) = (bar.min_y(), bar.max_y());
        match base {
            RectangleEdge::Top => {
                x0 += dx;
                x1 += dx;
                if !peg_shadow {
                    y0 += dy;
                }
                y1 += dy;
            }
            RectangleEdge::Bottom => {
                x0 += dx;
                x1 += dx;
                y0 += dy;
                if !peg_shadow {
                    y1 += dy;
                }
            }
            RectangleEdge::Left => {
                if !peg_shadow {
                    x0 += dx;
                }
                x1 += dx;
                y0 += dy;
                y1 += dy;
            }
            RectangleEdge::Right => {
                x0 += dx;
                if !peg_shadow {
                    x1 += dx;
                }
                y0 += dy;
                y1 += dy;
            }
        }
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

impl BarPainter for StandardBarPainter {
    fn paint_bar(&self, frame: &mut RenderFrame, bar: Rect, _base: RectangleEdge, paint: Color) {
        frame.fill_rect(bar, paint);
    }

    fn paint_bar_shadow(
        &self,
        frame: &mut RenderFrame,
        bar: Rect,
        base: RectangleEdge,
        item_paint: Color,
        peg_shadow: bool,
    ) {
        // Invisible bars cast no shadow.
        if item_paint.alpha == 0.0 {
            return;
        }
        frame.fill_rect(self.shadow_rect(bar, base, peg_shadow), self.shadow_color);
    }
}
