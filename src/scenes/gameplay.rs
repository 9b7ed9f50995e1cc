//! The playable level.
//!
//! All level state lives in a bevy [`World`]: the [`Tilemap`], [`Camera`],
//! [`WorldTime`], viewport and render queue as resources, the player as an
//! entity with position, physics, collision box and visual state, and each
//! parallax background as an entity with a [`ZIndex`].
//!
//! One [`Scene::update`] runs the frame schedule on a single thread, in
//! this order:
//!
//! 1. [`player_physics`] – collisions, integration, visual state
//! 2. [`camera_follow`] – aim the camera at the player
//! 3. [`parallax_scroll`] – scroll backgrounds by the camera
//! 4. [`render`] – queue the frame's draw commands
//! 5. [`camera_pan`] – move the camera one step toward its aim
//!
//! and then flushes the queued draws into the graphics capability.
//! Key events are triggered on the world and handled by
//! [`player_key_observer`].

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use log::info;

use crate::components::collisionbox::CollisionBox;
use crate::components::mapposition::MapPosition;
use crate::components::parallax::Parallax;
use crate::components::player::{Player, PlayerState};
use crate::components::playerphysics::PlayerPhysics;
use crate::components::zindex::ZIndex;
use crate::events::input::{InputEvent, KeyAction, KeyType};
use crate::platform::Gfx;
use crate::resources::camera::{Camera, CameraFollow};
use crate::resources::input::InputState;
use crate::resources::renderqueue::RenderQueue;
use crate::resources::screensize::ScreenSize;
use crate::resources::tilemap::Tilemap;
use crate::resources::worldtime::WorldTime;
use crate::scenes::Scene;
use crate::systems::camera::{camera_follow, camera_pan};
use crate::systems::input::player_key_observer;
use crate::systems::parallax::parallax_scroll;
use crate::systems::physics::player_physics;
use crate::systems::render::render;
use crate::systems::time::update_world_time;

pub struct Gameplay {
    world: World,
    schedule: Schedule,
    player: Entity,
}

impl Gameplay {
    /// Build the level world.
    ///
    /// `backgrounds` are drawn in the given order, farthest first. The player
    /// starts at the map's player spawn and the camera at its camera spawn.
    pub fn new(
        map: Tilemap,
        player: Player,
        backgrounds: Vec<Parallax>,
        screen: ScreenSize,
        follow: CameraFollow,
    ) -> Self {
        let mut world = World::new();

        let (spawn_x, spawn_y) = map.player_spawn();
        let (cam_x, cam_y) = map.camera_spawn();
        info!(
            "Building gameplay scene: {}x{} map, player at ({}, {}), camera at ({}, {})",
            map.width(),
            map.height(),
            spawn_x,
            spawn_y,
            cam_x,
            cam_y
        );

        world.insert_resource(map);
        world.insert_resource(Camera::new(cam_x, cam_y));
        world.insert_resource(follow);
        world.insert_resource(screen);
        world.insert_resource(WorldTime::default());
        world.insert_resource(RenderQueue::new());
        world.insert_resource(InputState::default());

        for (z, layer) in backgrounds.into_iter().enumerate() {
            world.spawn((layer, ZIndex(z as i32)));
        }

        let player = world
            .spawn((
                MapPosition::new(spawn_x, spawn_y),
                PlayerPhysics::new(),
                CollisionBox::default(),
                player,
            ))
            .id();

        world.spawn(Observer::new(player_key_observer));
        // Ensure the observer is registered before any key event is triggered.
        world.flush();

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                player_physics,
                camera_follow,
                parallax_scroll,
                render,
                camera_pan,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            player,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player_position(&self) -> MapPosition {
        self.world
            .get::<MapPosition>(self.player)
            .copied()
            .unwrap_or_default()
    }

    pub fn player_physics(&self) -> Option<&PlayerPhysics> {
        self.world.get::<PlayerPhysics>(self.player)
    }

    pub fn player_state(&self) -> PlayerState {
        self.world
            .get::<Player>(self.player)
            .map(|p| p.state())
            .unwrap_or_default()
    }

    pub fn player_facing_left(&self) -> bool {
        self.world
            .get::<Player>(self.player)
            .is_some_and(|p| p.facing_left())
    }

    pub fn camera(&self) -> &Camera {
        self.world.resource::<Camera>()
    }
}

impl Scene for Gameplay {
    fn update(&mut self, delta: i64, gfx: &mut dyn Gfx) {
        update_world_time(&mut self.world, delta);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
        self.world.resource_mut::<RenderQueue>().flush(gfx);
    }

    fn key_event(&mut self, key: KeyType, action: KeyAction) {
        self.world.trigger(InputEvent::Key { key, action });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::player::SpriteSet;
    use crate::components::sprite::Sprite;
    use crate::platform::Image;
    use crate::platform::testing::MockGfx;
    use crate::resources::tilemap::Layer;

    fn player() -> Player {
        let sprite = |name: &str| Sprite::new(Image::new(format!("{}.png", name), 66, 32), 33, 32);
        Player::new(SpriteSet {
            idle: sprite("idle"),
            walk: sprite("walk"),
            jump: sprite("jump"),
            fall: sprite("fall"),
            duck: sprite("duck"),
        })
    }

    /// 20x10 map with a floor on the last row and the player standing on it.
    fn level() -> Gameplay {
        let mut tiles = vec![0; 20 * 10];
        for x in 0..20 {
            tiles[9 * 20 + x] = 1;
        }
        let layer = Layer::new("Foreground", 20, 10, tiles).unwrap();
        // box bottom = y + 12 + 20 must sit on y = 144
        let map = Tilemap::new(20, 10, vec![layer], Image::new("tiles.png", 160, 160))
            .with_spawns((40.0, 112.0), (0.0, 0.0));
        let bg = Parallax::new(Image::new("bg.png", 384, 240), 6.0);
        Gameplay::new(
            map,
            player(),
            vec![bg],
            ScreenSize::new(320, 240),
            CameraFollow::default(),
        )
    }

    #[test]
    fn test_player_spawned_at_spawn_point() {
        let scene = level();
        assert_eq!(scene.player_position(), MapPosition::new(40.0, 112.0));
        assert_eq!(scene.world().resource::<Camera>().x(), 0);
    }

    #[test]
    fn test_key_events_reach_player() {
        let mut scene = level();
        let mut gfx = MockGfx::new();
        // settle onto the floor
        for _ in 0..3 {
            scene.update(16, &mut gfx);
        }
        scene.key_event(KeyType::Left, KeyAction::Press);
        assert!(scene.player_facing_left());
        assert_eq!(scene.player_state(), PlayerState::Walk);
        assert_eq!(scene.player_physics().unwrap().x_speed(), -1.0);
    }

    #[test]
    fn test_frame_draw_order() {
        let mut scene = level();
        let mut gfx = MockGfx::new();
        // first frame falls onto the floor, second stands on it
        scene.update(16, &mut gfx);
        gfx.clear_draws();
        scene.update(16, &mut gfx);
        assert_eq!(gfx.layers.len(), 1);
        assert_eq!(gfx.layers[0].name, "bg.png");
        // floor tiles in view, then the player on top
        let last = gfx.last_image().unwrap();
        assert_eq!(last.name, "idle.png");
        assert!(gfx.images[..gfx.images.len() - 1]
            .iter()
            .all(|d| d.name == "tiles.png"));
        assert_eq!(scene.world().resource::<WorldTime>().frame_count, 2);
    }

    #[test]
    fn test_camera_follows_player_with_offset() {
        let mut scene = level();
        let mut gfx = MockGfx::new();
        for _ in 0..400 {
            scene.update(16, &mut gfx);
        }
        let (tx, ty) = scene.camera().target_position();
        let pos = scene.player_position();
        assert_eq!((tx, ty), (pos.x - 100.0, pos.y - 100.0));
        let (cx, cy) = scene.camera().exact_position();
        assert!((cx - tx).abs() < 0.01);
        assert!((cy - ty).abs() < 0.01);
    }
}
