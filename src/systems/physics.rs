//! Player movement against the tile grid.
//!
//! [`step_player`] runs one frame of the player's movement: it resolves
//! contacts for the speeds about to be applied, integrates, and returns the
//! visual state the player should show. [`player_physics`] is the ECS system
//! wrapping it.
//!
//! Probes are fired from points at most one tile apart along each box edge
//! (see [`CollisionBox`]); a hit on any of them counts. Snapped probe coordinates are
//! converted back into the entity position through the box offsets.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::collisionbox::CollisionBox;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerState};
use crate::components::playerphysics::PlayerPhysics;
use crate::resources::screensize::ScreenSize;
use crate::resources::tilemap::Tilemap;

/// Distance below the feet checked for support while standing still.
const SUPPORT_PROBE: f32 = 1.0;

/// Resolve tile contacts for this frame's speeds.
///
/// Vertical contacts are handled before horizontal ones. On landing the
/// position is snapped onto the floor before integration.
pub fn resolve_collisions(
    map: &Tilemap,
    body: &CollisionBox,
    pos: &mut MapPosition,
    physics: &mut PlayerPhysics,
) {
    let y_speed = physics.y_speed();
    if y_speed > 0.0 {
        for x in body.vertical_probe_xs(pos.x) {
            let mut bottom = body.bottom(pos.y);
            if map.collision_down(x, &mut bottom, y_speed) {
                pos.y = bottom - body.offset_y - body.height;
                physics.hit_floor();
                debug!("Landed at y={}", pos.y);
                break;
            }
        }
    } else if y_speed < 0.0 {
        for x in body.vertical_probe_xs(pos.x) {
            let mut top = body.top(pos.y);
            if map.collision_up(x, &mut top, y_speed) {
                pos.y = top - body.offset_y;
                physics.hit_ceiling();
                debug!("Bumped ceiling at y={}", pos.y);
                break;
            }
        }
    } else if physics.on_floor() {
        let supported = body.vertical_probe_xs(pos.x).into_iter().any(|x| {
            let mut bottom = body.bottom(pos.y);
            map.collision_down(x, &mut bottom, SUPPORT_PROBE)
        });
        if !supported {
            physics.fall();
            debug!("Walked off a ledge at x={}", pos.x);
        }
    }

    let x_speed = physics.x_speed();
    if x_speed > 0.0 {
        for y in body.horizontal_probe_ys(pos.y) {
            let mut right = body.right(pos.x);
            if map.collision_right(&mut right, y, x_speed) {
                pos.x = right - body.offset_x - body.width;
                physics.hit_right_wall();
                break;
            }
        }
    } else if x_speed < 0.0 {
        for y in body.horizontal_probe_ys(pos.y) {
            let mut left = body.left(pos.x);
            if map.collision_left(&mut left, y, x_speed) {
                pos.x = left - body.offset_x;
                physics.hit_left_wall();
                break;
            }
        }
    }
}

/// One frame of player movement. Returns the state to display.
pub fn step_player(
    map: &Tilemap,
    body: &CollisionBox,
    pos: &mut MapPosition,
    physics: &mut PlayerPhysics,
) -> PlayerState {
    resolve_collisions(map, body, pos, physics);
    physics.update(&mut pos.x, &mut pos.y);
    PlayerState::from_physics(physics)
}

/// Whether a position has dropped far enough below the map to be lost.
pub fn fell_out_of_map(map: &Tilemap, screen: &ScreenSize, pos: &MapPosition) -> bool {
    let (_, map_h) = map.pixel_size();
    pos.y > map_h + 2.0 * screen.h as f32
}

/// Move every player, sending lost ones back to the spawn point.
pub fn player_physics(
    map: Res<Tilemap>,
    screen: Res<ScreenSize>,
    mut query: Query<(
        &mut MapPosition,
        &mut PlayerPhysics,
        &CollisionBox,
        &mut Player,
    )>,
) {
    for (mut pos, mut physics, body, mut player) in query.iter_mut() {
        let state = step_player(&map, body, &mut pos, &mut physics);
        player.set_state(state);

        if fell_out_of_map(&map, &screen, &pos) {
            let (x, y) = map.player_spawn();
            info!("Player fell out of the map, respawning at ({}, {})", x, y);
            *pos = MapPosition::new(x, y);
            physics.reset();
            player.set_state(PlayerState::from_physics(&physics));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Image;
    use crate::resources::tilemap::Layer;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// 8x6 room: floor on row 5, ceiling on row 0, wall on column 7.
    fn room() -> Tilemap {
        let mut tiles = vec![0; 8 * 6];
        for x in 0..8 {
            tiles[x] = 1;
            tiles[5 * 8 + x] = 1;
        }
        for y in 0..6 {
            tiles[y * 8 + 7] = 1;
        }
        let solid = Layer::new("Foreground", 8, 6, tiles).unwrap();
        Tilemap::new(8, 6, vec![solid], Image::new("tiles.png", 160, 160))
    }

    /// 16x16 box with no offset so positions equal box corners.
    fn unit_box() -> CollisionBox {
        CollisionBox::new(0.0, 0.0, 16.0, 16.0)
    }

    #[test]
    fn test_landing_snaps_onto_floor() {
        let map = room();
        let body = unit_box();
        let mut pos = MapPosition::new(32.0, 62.0);
        let mut physics = PlayerPhysics::new();
        for _ in 0..40 {
            step_player(&map, &body, &mut pos, &mut physics);
        }
        assert!(physics.on_floor());
        assert!(approx_eq(pos.y, 64.0));
        assert_eq!(physics.y_speed(), 0.0);
    }

    #[test]
    fn test_floor_contact_is_idempotent() {
        let map = room();
        let body = unit_box();
        let mut pos = MapPosition::new(32.0, 64.0);
        let mut physics = PlayerPhysics::new();
        physics.hit_floor();
        for _ in 0..100 {
            let state = step_player(&map, &body, &mut pos, &mut physics);
            assert_eq!(state, PlayerState::Idle);
            assert_eq!(pos, MapPosition::new(32.0, 64.0));
            assert!(physics.on_floor());
        }
    }

    #[test]
    fn test_ceiling_bounces_down() {
        let map = room();
        let body = unit_box();
        let mut pos = MapPosition::new(32.0, 18.0);
        let mut physics = PlayerPhysics::new();
        physics.hit_floor();
        assert!(physics.jump());
        resolve_collisions(&map, &body, &mut pos, &mut physics);
        assert!(approx_eq(pos.y, 16.0));
        assert!(approx_eq(physics.y_speed(), 4.0));
    }

    #[test]
    fn test_right_wall_stops_and_snaps() {
        let map = room();
        let body = unit_box();
        let mut pos = MapPosition::new(95.5, 64.0);
        let mut physics = PlayerPhysics::new();
        physics.hit_floor();
        physics.right();
        resolve_collisions(&map, &body, &mut pos, &mut physics);
        assert_eq!(physics.x_speed(), 0.0);
        assert!(approx_eq(pos.x, 96.0));
    }

    #[test]
    fn test_tall_box_hits_block_between_its_corners() {
        // one block at tile (3, 6), spanning y 96..112
        let mut tiles = vec![0; 8 * 10];
        tiles[6 * 8 + 3] = 1;
        let solid = Layer::new("Foreground", 8, 10, tiles).unwrap();
        let map = Tilemap::new(8, 10, vec![solid], Image::new("tiles.png", 160, 160));
        let body = CollisionBox::default();
        // box spans y 94..114, right edge at 47
        let mut pos = MapPosition::new(23.0, 82.0);
        let mut physics = PlayerPhysics::new();
        physics.right();
        resolve_collisions(&map, &body, &mut pos, &mut physics);
        assert_eq!(physics.x_speed(), 0.0);
        assert!(approx_eq(body.right(pos.x), 48.0));
        physics.update(&mut pos.x, &mut pos.y);
        assert!(body.right(pos.x) <= 48.0);
    }

    #[test]
    fn test_left_probe_outside_map_is_open() {
        let map = room();
        let body = unit_box();
        let mut pos = MapPosition::new(0.5, 64.0);
        let mut physics = PlayerPhysics::new();
        physics.hit_floor();
        physics.left();
        resolve_collisions(&map, &body, &mut pos, &mut physics);
        assert_eq!(physics.x_speed(), -1.0);
        physics.update(&mut pos.x, &mut pos.y);
        assert!(approx_eq(pos.x, -0.5));
    }

    #[test]
    fn test_walking_off_ledge_falls() {
        let map = room();
        let body = unit_box();
        // outside the map to the left there is no floor
        let mut pos = MapPosition::new(-20.0, 64.0);
        let mut physics = PlayerPhysics::new();
        physics.hit_floor();
        let state = step_player(&map, &body, &mut pos, &mut physics);
        assert!(!physics.on_floor());
        assert_eq!(state, PlayerState::Fall);
    }

    #[test]
    fn test_fell_out_of_map() {
        let map = room();
        let screen = ScreenSize::new(320, 240);
        assert!(!fell_out_of_map(&map, &screen, &MapPosition::new(0.0, 500.0)));
        assert!(fell_out_of_map(&map, &screen, &MapPosition::new(0.0, 577.0)));
    }
}
