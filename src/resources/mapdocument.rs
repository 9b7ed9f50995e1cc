//! Tiled-style JSON map documents.
//!
//! Only the parts the game uses are modelled: map size, tile layers (CSV
//! `data` arrays), object layers for spawn points, and the `background` /
//! `middleground` string properties. Properties are accepted both in Tiled's
//! list form (`[{"name", "type", "value"}]`) and as a plain JSON object.
//!
//! Layers without a `type` are treated by content: a `data` array makes a
//! tile layer, an `objects` array an object layer.

use std::path::Path;

use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult, read_document};

/// Object name (or type) marking where the player starts.
pub const PLAYER_SPAWN: &str = "player_spawn";
/// Property holding the far background image path.
pub const BACKGROUND_PROPERTY: &str = "background";
/// Property holding the middle background image path.
pub const MIDDLEGROUND_PROPERTY: &str = "middleground";

/// Top-level map document.
#[derive(Debug, Clone, Deserialize)]
pub struct MapDocument {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    #[serde(default)]
    pub layers: Vec<LayerDocument>,
    #[serde(default)]
    pub properties: PropertiesDocument,
}

/// Any layer of the document.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerDocument {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// Row-major tile ids; present on tile layers.
    #[serde(default)]
    pub data: Option<Vec<u32>>,
    /// Placed objects; present on object layers.
    #[serde(default)]
    pub objects: Option<Vec<ObjectDocument>>,
}

impl LayerDocument {
    pub fn is_tile_layer(&self) -> bool {
        match self.kind.as_deref() {
            Some(kind) => kind == "tilelayer",
            None => self.data.is_some(),
        }
    }

    pub fn is_object_layer(&self) -> bool {
        match self.kind.as_deref() {
            Some(kind) => kind == "objectgroup",
            None => self.objects.is_some(),
        }
    }
}

/// An object placed on an object layer, in map pixels.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDocument {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", alias = "class", default)]
    pub kind: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl ObjectDocument {
    pub fn is_player_spawn(&self) -> bool {
        self.name == PLAYER_SPAWN || self.kind == PLAYER_SPAWN
    }
}

/// One entry of Tiled's property list.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDocument {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Custom properties in either of the two layouts Tiled has used.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PropertiesDocument {
    List(Vec<PropertyDocument>),
    Map(FxHashMap<String, serde_json::Value>),
}

impl Default for PropertiesDocument {
    fn default() -> Self {
        PropertiesDocument::List(Vec::new())
    }
}

impl PropertiesDocument {
    /// String value of a property, if present and a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self {
            PropertiesDocument::List(list) => list
                .iter()
                .find(|p| p.name == name)
                .and_then(|p| p.value.as_str()),
            PropertiesDocument::Map(map) => map.get(name).and_then(|v| v.as_str()),
        }
    }
}

impl MapDocument {
    /// Parse a map from JSON text.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|source| EngineError::Parse {
            what: "map",
            source,
        })
    }

    /// Read and parse a map file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let doc = Self::from_json_str(&read_document(path)?)?;
        info!(
            "Loaded map {} ({}x{} tiles, {} layers)",
            path.display(),
            doc.width,
            doc.height,
            doc.layers.len()
        );
        Ok(doc)
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = &LayerDocument> {
        self.layers.iter().filter(|l| l.is_tile_layer())
    }

    fn objects(&self) -> impl Iterator<Item = &ObjectDocument> {
        self.layers
            .iter()
            .filter(|l| l.is_object_layer())
            .flat_map(|l| l.objects.iter().flatten())
    }

    /// Player start position; origin when the map has none.
    pub fn player_spawn(&self) -> (f32, f32) {
        self.objects()
            .find(|o| o.is_player_spawn())
            .map(|o| (o.x, o.y))
            .unwrap_or((0.0, 0.0))
    }

    /// Camera start position: the first object that is not the player spawn.
    pub fn camera_spawn(&self) -> (f32, f32) {
        self.objects()
            .find(|o| !o.is_player_spawn())
            .map(|o| (o.x, o.y))
            .unwrap_or((0.0, 0.0))
    }

    pub fn background(&self) -> Option<&str> {
        self.properties.get_str(BACKGROUND_PROPERTY)
    }

    pub fn middleground(&self) -> Option<&str> {
        self.properties.get_str(MIDDLEGROUND_PROPERTY)
    }
}
