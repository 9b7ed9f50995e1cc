//! Sprite sheet documents.
//!
//! A sheet lists named image strips and their cell size:
//!
//! ```json
//! {"sprites": [{"name": "idle", "img": "fox-idle.png", "cw": 33, "ch": 32}]}
//! ```
//!
//! Turning a sheet into [`Sprite`](crate::components::sprite::Sprite)s needs
//! the graphics capability to load the images; see
//! [`Engine::create_sprite_set`](crate::engine::Engine::create_sprite_set).

use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult, read_document};

/// One named strip.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpriteEntry {
    pub name: String,
    pub img: String,
    pub cw: u32,
    pub ch: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpriteSheet {
    #[serde(default)]
    pub sprites: Vec<SpriteEntry>,
}

impl SpriteSheet {
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|source| EngineError::Parse {
            what: "sprite sheet",
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let sheet = Self::from_json_str(&read_document(path)?)?;
        info!(
            "Loaded sprite sheet {} ({} sprites)",
            path.display(),
            sheet.sprites.len()
        );
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheet() {
        let sheet = SpriteSheet::from_json_str(
            r#"{"sprites": [
                {"name": "idle", "img": "fox-idle.png", "cw": 33, "ch": 32},
                {"name": "walk", "img": "fox-walk.png", "cw": 33, "ch": 32}
            ]}"#,
        )
        .unwrap();
        assert_eq!(sheet.sprites.len(), 2);
        let walk = &sheet.sprites[1];
        assert_eq!(walk.name, "walk");
        assert_eq!(walk.img, "fox-walk.png");
        assert_eq!((walk.cw, walk.ch), (33, 32));
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err = SpriteSheet::from_json_str(r#"{"sprites": [{"name": "idle"}]}"#).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parse {
                what: "sprite sheet",
                ..
            }
        ));
    }
}
