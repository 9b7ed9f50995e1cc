//! Scenes driven by the [`Engine`](crate::engine::Engine).
//!
//! A scene receives every key event synchronously while the engine pumps
//! input, then one [`Scene::update`] per frame with the elapsed time and the
//! graphics capability to draw with. A scene may ask to be replaced by
//! returning a [`SceneFactory`] from [`Scene::take_next_scene`]; the engine
//! runs the factory after the update and drops the old scene.
//!
//! - [`gameplay`] – the level: tilemap, player, camera and parallax in an ECS world
//! - [`title`] – the title screen shown before the level

use crate::error::EngineResult;
use crate::events::input::{KeyAction, KeyType};
use crate::platform::Gfx;

pub mod gameplay;
pub mod title;

/// Builds the next scene once the engine hands it the graphics capability.
pub type SceneFactory = Box<dyn FnOnce(&mut dyn Gfx) -> EngineResult<Box<dyn Scene>>>;

pub trait Scene {
    /// Advance by `delta` time units and draw the frame.
    fn update(&mut self, delta: i64, gfx: &mut dyn Gfx);

    fn key_event(&mut self, key: KeyType, action: KeyAction);

    /// Scene that should replace this one, if any. Called once per frame
    /// after [`Scene::update`].
    fn take_next_scene(&mut self) -> Option<SceneFactory> {
        None
    }
}
