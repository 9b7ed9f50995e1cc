//! Scene assembly from configuration.
//!
//! Reads the documents named in [`GameConfig`], loads their images through
//! the graphics capability and builds the two scenes of the game: the title
//! screen, whose Jump hands off to the level built by
//! [`gameplay_factory`].

use std::path::Path;

use log::info;

use crate::components::parallax::Parallax;
use crate::components::player::{Player, SpriteSet};
use crate::engine::{create_map, create_parallax, create_sprite_set};
use crate::error::{EngineError, EngineResult};
use crate::platform::Gfx;
use crate::resources::camera::CameraFollow;
use crate::resources::gameconfig::GameConfig;
use crate::resources::mapdocument::MapDocument;
use crate::resources::spritesheet::SpriteSheet;
use crate::scenes::gameplay::Gameplay;
use crate::scenes::title::{BACKGROUND_FACTOR, MIDDLEGROUND_FACTOR, Title};
use crate::scenes::{Scene, SceneFactory};

/// Sprite used for the running fox on the title screen.
const TITLE_RUN_SPRITE: &str = "walk";

fn parent_dir(path: &str) -> Option<&Path> {
    Path::new(path).parent().filter(|p| !p.as_os_str().is_empty())
}

fn load_sprites(gfx: &mut dyn Gfx, config: &GameConfig) -> EngineResult<SpriteSet> {
    let sheet = SpriteSheet::load(&config.sprites_path)?;
    let named = create_sprite_set(gfx, &sheet, parent_dir(&config.sprites_path))?;
    SpriteSet::from_named(&named)
}

/// Build the level described by `config`.
pub fn build_gameplay(gfx: &mut dyn Gfx, config: &GameConfig) -> EngineResult<Gameplay> {
    let document = MapDocument::load(&config.map_path)?;
    let map = create_map(
        gfx,
        &document,
        &config.tileset_path,
        parent_dir(&config.map_path),
    )?;

    let mut backgrounds = Vec::new();
    if let Some(image) = map.background() {
        backgrounds.push(Parallax::new(image.clone(), config.background_factor));
    }
    if let Some(image) = map.middleground() {
        backgrounds.push(Parallax::new(image.clone(), config.middleground_factor));
    }

    let player = Player::new(load_sprites(gfx, config)?);
    Ok(Gameplay::new(
        map,
        player,
        backgrounds,
        config.viewport(),
        CameraFollow {
            offset: config.camera_offset,
        },
    ))
}

/// Deferred [`build_gameplay`] for scene hand-off.
pub fn gameplay_factory(config: GameConfig) -> SceneFactory {
    Box::new(move |gfx: &mut dyn Gfx| -> EngineResult<Box<dyn Scene>> {
        info!("Loading level {}", config.map_path);
        Ok(Box::new(build_gameplay(gfx, &config)?))
    })
}

/// Build the title screen; pressing Jump there loads the level.
pub fn build_title(gfx: &mut dyn Gfx, config: &GameConfig) -> EngineResult<Title> {
    let background = create_parallax(gfx, &config.title_background, BACKGROUND_FACTOR)?;
    let middleground = create_parallax(gfx, &config.title_middleground, MIDDLEGROUND_FACTOR)?;

    let sheet = SpriteSheet::load(&config.sprites_path)?;
    let mut named = create_sprite_set(gfx, &sheet, parent_dir(&config.sprites_path))?;
    let mut take = |name: &str| {
        named
            .remove(name)
            .ok_or_else(|| EngineError::MissingSprite(name.to_string()))
    };
    let idle = take("idle")?;
    let run = take(TITLE_RUN_SPRITE)?;

    Ok(Title::new(
        background,
        middleground,
        idle,
        run,
        gameplay_factory(config.clone()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("assets/fox.json"), Some(Path::new("assets")));
        assert_eq!(parent_dir("fox.json"), None);
    }
}
