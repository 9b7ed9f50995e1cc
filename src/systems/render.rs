//! Frame composition for the gameplay scene.
//!
//! Builds the frame as a list of [`DrawCmd`]s in painter's order:
//! parallax layers (sorted by [`ZIndex`]), the tile layers offset by the
//! camera, then the player. The scene flushes the queue into the graphics
//! backend after the schedule has run.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::parallax::Parallax;
use crate::components::player::Player;
use crate::components::zindex::ZIndex;
use crate::resources::camera::Camera;
use crate::resources::renderqueue::RenderQueue;
use crate::resources::screensize::ScreenSize;
use crate::resources::tilemap::Tilemap;
use crate::resources::worldtime::WorldTime;

pub fn render(
    mut queue: ResMut<RenderQueue>,
    map: Res<Tilemap>,
    camera: Res<Camera>,
    screen: Res<ScreenSize>,
    time: Res<WorldTime>,
    layers: Query<(&Parallax, &ZIndex)>,
    mut players: Query<(&MapPosition, &mut Player)>,
) {
    let mut backgrounds: Vec<(&Parallax, ZIndex)> = layers.iter().map(|(p, z)| (p, *z)).collect();
    backgrounds.sort_by_key(|(_, z)| *z);
    for (layer, _) in backgrounds {
        queue.push(layer.draw());
    }

    let (cam_x, cam_y) = (camera.x(), camera.y());
    let mut tiles = Vec::new();
    map.draw(-cam_x, -cam_y, Some((screen.w, screen.h)), &mut tiles);
    queue.extend(tiles);

    for (pos, mut player) in players.iter_mut() {
        let cmd = player.draw(time.delta, pos.x as i32 - cam_x, pos.y as i32 - cam_y);
        queue.push(cmd);
    }
}
