//! Parallax scrolling system.
use bevy_ecs::prelude::*;

use crate::components::parallax::Parallax;
use crate::resources::camera::Camera;

/// Scroll every parallax layer by the negated camera position.
pub fn parallax_scroll(camera: Res<Camera>, mut query: Query<&mut Parallax>) {
    for mut layer in query.iter_mut() {
        layer.scroll(-camera.x(), -camera.y());
    }
}
