//! Viewport size resource.
//!
//! Size of the visible area in world units (window pixels divided by the
//! backend's pixel scale). The render system culls tiles against it.

use bevy_ecs::prelude::Resource;

/// Visible area in world units.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in world units.
    pub w: i32,
    /// Height in world units.
    pub h: i32,
}

impl ScreenSize {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}
