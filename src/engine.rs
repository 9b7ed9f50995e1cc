//! The frame driver.
//!
//! [`Engine`] owns the four backend capabilities and the active scene. Each
//! [`Engine::update`] call runs exactly one frame:
//!
//! 1. present what the previous frame drew
//! 2. pump input, dispatching key events to the active scene as they arrive
//!    and latching a quit request
//! 3. update the scene with the time elapsed since the previous frame
//! 4. swap in the next scene if the active one asked for it
//! 5. sleep out the rest of the frame budget
//!
//! It also offers the asset constructors scenes are built from: they load
//! images through the graphics capability and wrap them in sprites,
//! parallax layers and tilemaps.

use std::path::Path;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::components::parallax::Parallax;
use crate::components::sprite::Sprite;
use crate::error::EngineResult;
use crate::events::input::InputEvent;
use crate::platform::{Gfx, Input, Sleeper, Time};
use crate::resources::mapdocument::MapDocument;
use crate::resources::spritesheet::SpriteSheet;
use crate::resources::tilemap::{Layer, Tilemap};
use crate::scenes::Scene;

pub struct Engine<G: Gfx, I: Input, T: Time, S: Sleeper> {
    gfx: G,
    input: I,
    time: T,
    sleeper: S,
    active_scene: Option<Box<dyn Scene>>,
    alive: bool,
    last_time: i64,
}

impl<G: Gfx, I: Input, T: Time, S: Sleeper> Engine<G, I, T, S> {
    /// New engine with no scene. The first delta is measured from time 0;
    /// call [`Engine::reset_time`] to start from the current time instead.
    pub fn new(gfx: G, input: I, time: T, sleeper: S) -> Self {
        Self {
            gfx,
            input,
            time,
            sleeper,
            active_scene: None,
            alive: true,
            last_time: 0,
        }
    }

    /// Run one frame. Returns `Ok(false)` once a quit was observed.
    ///
    /// The frame in which quit arrives still completes. An error means the
    /// next scene could not be built.
    pub fn update(&mut self) -> EngineResult<bool> {
        self.gfx.present();

        let scene = &mut self.active_scene;
        let alive = &mut self.alive;
        self.input.pump_events(&mut |event| match event {
            InputEvent::Key { key, action } => {
                if let Some(scene) = scene.as_mut() {
                    scene.key_event(key, action);
                }
            }
            InputEvent::Quit => {
                if *alive {
                    info!("Quit requested");
                }
                *alive = false;
            }
        });

        let now = self.time.now();
        let delta = now - self.last_time;
        if let Some(scene) = self.active_scene.as_mut() {
            scene.update(delta, &mut self.gfx);
        }
        self.last_time = now;

        let next = self
            .active_scene
            .as_mut()
            .and_then(|scene| scene.take_next_scene());
        if let Some(factory) = next {
            let scene = factory(&mut self.gfx)?;
            self.display_scene(scene);
        }

        self.sleeper.sleep_until_next_frame(self.time.now());

        Ok(self.alive)
    }

    /// Replace the active scene. The previous one is dropped.
    pub fn display_scene(&mut self, scene: Box<dyn Scene>) {
        debug!("Switching active scene");
        self.active_scene = Some(scene);
    }

    pub fn has_scene(&self) -> bool {
        self.active_scene.is_some()
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    /// Make the next frame's delta start from now.
    pub fn reset_time(&mut self) {
        self.last_time = self.time.now();
    }

    pub fn last_time(&self) -> i64 {
        self.last_time
    }

    pub fn gfx(&self) -> &G {
        &self.gfx
    }

    pub fn gfx_mut(&mut self) -> &mut G {
        &mut self.gfx
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut T {
        &mut self.time
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    pub fn create_sprite(&mut self, path: &str, cell_width: u32, cell_height: u32) -> EngineResult<Sprite> {
        create_sprite(&mut self.gfx, path, cell_width, cell_height)
    }

    pub fn create_parallax(&mut self, path: &str, travel_factor: f32) -> EngineResult<Parallax> {
        create_parallax(&mut self.gfx, path, travel_factor)
    }

    pub fn create_map(&mut self, document: &MapDocument, tileset_path: &str) -> EngineResult<Tilemap> {
        create_map(&mut self.gfx, document, tileset_path, None)
    }

    pub fn create_sprite_set(&mut self, sheet: &SpriteSheet) -> EngineResult<FxHashMap<String, Sprite>> {
        create_sprite_set(&mut self.gfx, sheet, None)
    }
}

fn resolve(base: Option<&Path>, path: &str) -> String {
    match base {
        Some(dir) => dir.join(path).to_string_lossy().into_owned(),
        None => path.to_string(),
    }
}

/// Load an image and slice it into `cell_width` x `cell_height` frames.
pub fn create_sprite(
    gfx: &mut dyn Gfx,
    path: &str,
    cell_width: u32,
    cell_height: u32,
) -> EngineResult<Sprite> {
    let image = gfx.load_image(path)?;
    let sprite = Sprite::new(image, cell_width, cell_height);
    debug!("Created sprite {} with {} frames", path, sprite.frame_count());
    Ok(sprite)
}

pub fn create_parallax(gfx: &mut dyn Gfx, path: &str, travel_factor: f32) -> EngineResult<Parallax> {
    let image = gfx.load_image(path)?;
    Ok(Parallax::new(image, travel_factor))
}

/// Build a [`Tilemap`] from a parsed document.
///
/// Background image paths found in the document's properties are resolved
/// against `base_dir` when given (usually the map file's directory).
pub fn create_map(
    gfx: &mut dyn Gfx,
    document: &MapDocument,
    tileset_path: &str,
    base_dir: Option<&Path>,
) -> EngineResult<Tilemap> {
    let tileset = gfx.load_image(tileset_path)?;

    let layers = document
        .tile_layers()
        .map(|layer| {
            Layer::new(
                layer.name.clone(),
                layer.width,
                layer.height,
                layer.data.clone().unwrap_or_default(),
            )
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let background = document
        .background()
        .map(|path| gfx.load_image(&resolve(base_dir, path)))
        .transpose()?;
    let middleground = document
        .middleground()
        .map(|path| gfx.load_image(&resolve(base_dir, path)))
        .transpose()?;

    let map = Tilemap::new(document.width, document.height, layers, tileset)
        .with_spawns(document.player_spawn(), document.camera_spawn())
        .with_backgrounds(background, middleground);
    info!(
        "Created {}x{} tilemap with {} layers",
        map.width(),
        map.height(),
        map.layer_count()
    );
    Ok(map)
}

/// Load every sprite a sheet lists, keyed by name.
pub fn create_sprite_set(
    gfx: &mut dyn Gfx,
    sheet: &SpriteSheet,
    base_dir: Option<&Path>,
) -> EngineResult<FxHashMap<String, Sprite>> {
    sheet
        .sprites
        .iter()
        .map(|entry| {
            let sprite = create_sprite(&mut *gfx, &resolve(base_dir, &entry.img), entry.cw, entry.ch)?;
            Ok((entry.name.clone(), sprite))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::platform::testing::MockGfx;

    #[test]
    fn test_create_sprite_frame_count() {
        let mut gfx = MockGfx::new();
        gfx.simulate_available_image("strip.png", 132, 32);
        let sprite = create_sprite(&mut gfx, "strip.png", 33, 32).unwrap();
        assert_eq!(sprite.frame_count(), 4);
    }

    #[test]
    fn test_missing_image_is_fatal() {
        let mut gfx = MockGfx::new();
        let err = create_parallax(&mut gfx, "nowhere.png", 2.0).unwrap_err();
        assert!(matches!(err, EngineError::ImageLoad { ref path, .. } if path == "nowhere.png"));
    }

    #[test]
    fn test_create_map_resolves_backgrounds() {
        let mut gfx = MockGfx::new();
        gfx.simulate_available_image("tiles.png", 160, 160);
        gfx.simulate_available_image("maps/back.png", 384, 240);
        let doc = MapDocument::from_json_str(
            r#"{"width": 1, "height": 1,
                "layers": [{"name": "Foreground", "width": 1, "height": 1, "data": [3]}],
                "properties": {"background": "back.png"}}"#,
        )
        .unwrap();
        let map = create_map(&mut gfx, &doc, "tiles.png", Some(Path::new("maps"))).unwrap();
        assert_eq!(map.background().unwrap().name(), "maps/back.png");
        assert!(map.middleground().is_none());
        assert_eq!(map.layer(0).tile(0, 0), 3);
    }

    #[test]
    fn test_create_map_rejects_short_layer() {
        let mut gfx = MockGfx::new();
        gfx.simulate_available_image("tiles.png", 160, 160);
        let doc = MapDocument::from_json_str(
            r#"{"width": 2, "height": 1,
                "layers": [{"name": "Foreground", "width": 2, "height": 1, "data": [3]}]}"#,
        )
        .unwrap();
        let err = create_map(&mut gfx, &doc, "tiles.png", None).unwrap_err();
        assert!(matches!(err, EngineError::InvalidLayerSize { .. }));
    }
}
