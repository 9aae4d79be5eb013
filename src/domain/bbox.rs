use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel coordinates, `(x1, y1)` top-left and `(x2, y2)`
/// bottom-right, exclusive on the far edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl BBox {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Twice the vertical center, kept integral so ties stay exact.
    pub fn center_y2(&self) -> u64 {
        u64::from(self.y1) + u64::from(self.y2)
    }

    /// Length of the intersection of `[y1, y2)` with `[top, bottom)`.
    pub fn vertical_overlap(&self, top: u32, bottom: u32) -> u32 {
        let start = self.y1.max(top);
        let end = self.y2.min(bottom);
        end.saturating_sub(start)
    }

    /// Clips the box to the horizontal span `[top, bottom)` and shifts it so
    /// that `top` becomes row zero.
    pub fn to_local(&self, top: u32, bottom: u32) -> Self {
        let y1 = self.y1.clamp(top, bottom) - top;
        let y2 = self.y2.clamp(top, bottom) - top;
        Self::new(self.x1, y1, self.x2, y2)
    }
}
