//! Draw order for background layers.
//!
//! Parallax layers are separate entities; the render system sorts them by
//! [`ZIndex`] so the farthest layer is painted first.

use bevy_ecs::prelude::Component;

/// Higher values are drawn later (on top).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
