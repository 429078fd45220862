//! Viewport camera that keeps the character in view
//!
//! The offset is the top-left corner of the visible window in map units.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The visible window into the map, positioned by a clamped offset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left corner of the visible window, map units
    pub offset: Vec2,
    /// Window extents, map units
    pub size: Vec2,
    /// Map extents, map units
    pub map_size: Vec2,
}

impl Viewport {
    pub fn new(size: Vec2, map_size: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            size,
            map_size,
        }
    }

    /// Center the view on `subject`, clamped so the window never leaves the
    /// map. A map smaller than the window pins the offset to zero on that
    /// axis. No smoothing: recomputed from scratch every tick.
    pub fn follow(&mut self, subject: Vec2) {
        let target = subject - self.size * 0.5;
        let max = (self.map_size - self.size).max(Vec2::ZERO);
        self.offset = target.clamp(Vec2::ZERO, max);
    }
}
