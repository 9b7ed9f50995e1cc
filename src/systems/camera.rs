//! Camera systems.
//!
//! [`camera_follow`] aims the camera at the player before drawing;
//! [`camera_pan`] moves it one step toward that aim after drawing, so a frame
//! is always rendered from the position reached at the end of the previous
//! one.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::camera::{Camera, CameraFollow};

pub fn camera_follow(
    mut camera: ResMut<Camera>,
    follow: Res<CameraFollow>,
    query: Query<&MapPosition, With<Player>>,
) {
    if let Some(pos) = query.iter().next() {
        camera.target(pos.x - follow.offset.x, pos.y - follow.offset.y);
    }
}

pub fn camera_pan(mut camera: ResMut<Camera>) {
    camera.pan();
}
