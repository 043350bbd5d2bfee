use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Output surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Viewport bounds shrunk by a uniform inset, clamped to stay non-negative.
    #[must_use]
    pub fn inset(self, inset: f64) -> Rect {
        let bounds = self.bounds();
        let inset = inset.max(0.0).min(bounds.width / 2.0).min(bounds.height / 2.0);
        Rect::new(
            inset,
            inset,
            bounds.width - 2.0 * inset,
            bounds.height - 2.0 * inset,
        )
    }
}
