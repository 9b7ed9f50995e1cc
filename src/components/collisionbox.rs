//! Axis-aligned collision box relative to an entity's position.
//!
//! The player's [`MapPosition`](super::mapposition::MapPosition) is the
//! top-left corner of its sprite cell; the box describes the solid part of
//! the picture inside that cell. Tile probes are fired from the box edges.

use bevy_ecs::prelude::Component;

/// Inset used so that probes along an edge stay inside the box's own row or
/// column (a box resting exactly on a tile boundary must not touch it).
pub const PROBE_INSET: f32 = 1.0;

/// Largest gap between two probes along one edge: one tile, so a box taller
/// or wider than a tile cannot straddle a whole row or column unseen.
pub const PROBE_STEP: f32 = 16.0;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CollisionBox {
    /// Left edge, relative to the position.
    pub offset_x: f32,
    /// Top edge, relative to the position.
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for CollisionBox {
    /// Box for the 33x32 fox sprite: 14 wide, 20 high, feet at the cell bottom.
    fn default() -> Self {
        Self::new(10.0, 12.0, 14.0, 20.0)
    }
}

impl CollisionBox {
    pub fn new(offset_x: f32, offset_y: f32, width: f32, height: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            width,
            height,
        }
    }

    pub fn left(&self, x: f32) -> f32 {
        x + self.offset_x
    }

    pub fn right(&self, x: f32) -> f32 {
        x + self.offset_x + self.width
    }

    pub fn top(&self, y: f32) -> f32 {
        y + self.offset_y
    }

    pub fn bottom(&self, y: f32) -> f32 {
        y + self.offset_y + self.height
    }

    /// The x coordinates vertical probes are fired from, left to right.
    pub fn vertical_probe_xs(&self, x: f32) -> Vec<f32> {
        probe_points(self.left(x), self.right(x) - PROBE_INSET)
    }

    /// The y coordinates horizontal probes are fired from, top to bottom.
    pub fn horizontal_probe_ys(&self, y: f32) -> Vec<f32> {
        probe_points(self.top(y), self.bottom(y) - PROBE_INSET)
    }
}

/// Points from `first` to `last` inclusive, at most [`PROBE_STEP`] apart.
fn probe_points(first: f32, last: f32) -> Vec<f32> {
    let mut points = Vec::with_capacity(2);
    let mut p = first;
    while p < last {
        points.push(p);
        p += PROBE_STEP;
    }
    points.push(last);
    points
}
