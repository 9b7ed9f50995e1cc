//! Tile grid, spawn points and collision probes.
//!
//! A [`Tilemap`] is built once per gameplay scene from a
//! [`MapDocument`](super::mapdocument::MapDocument) and stays immutable
//! afterwards. Tiles are 16x16 units; ids are 1-based indices into the
//! tileset image with 0 meaning empty.
//!
//! Collision is checked against a single *solid* layer: the last layer that
//! is not one of the decorative `Background` / `Middleground` layers. Each
//! probe looks at the tile a point would occupy after moving by this frame's
//! speed and, on contact, snaps the coordinate to the touching tile edge.
//! Probes outside the grid report no contact.

use bevy_ecs::prelude::Resource;

use crate::error::{EngineError, EngineResult};
use crate::platform::{Image, SourceRect};
use crate::resources::renderqueue::DrawCmd;

/// Edge length of a tile in world units.
pub const TILE_SIZE: i32 = 16;
const TILE_SIZE_F: f32 = TILE_SIZE as f32;

/// Layer names that never collide.
const DECORATIVE_LAYERS: [&str; 2] = ["background", "middleground"];

/// One grid of tile ids.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    width: u32,
    height: u32,
    tiles: Vec<u32>,
}

impl Layer {
    /// Fails when `tiles.len() != width * height`.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        tiles: Vec<u32>,
    ) -> EngineResult<Self> {
        let name = name.into();
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(EngineError::InvalidLayerSize {
                name,
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            name,
            width,
            height,
            tiles,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tile id at `(x, y)`; 0 outside the grid rather than wrapping rows.
    pub fn tile(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.tiles[(y * self.width + x) as usize]
    }

    /// Tile id at signed tile coordinates; 0 outside the grid.
    pub fn tile_at(&self, tx: i64, ty: i64) -> u32 {
        if tx < 0 || ty < 0 {
            return 0;
        }
        match (u32::try_from(tx), u32::try_from(ty)) {
            (Ok(x), Ok(y)) => self.tile(x, y),
            _ => 0,
        }
    }

    fn is_decorative(&self) -> bool {
        DECORATIVE_LAYERS
            .iter()
            .any(|d| self.name.eq_ignore_ascii_case(d))
    }

    /// Emit a draw command per non-empty tile with its top-left corner at
    /// `(x + tx*16, y + ty*16)`.
    ///
    /// When `viewport` is given, tiles that fall completely outside
    /// `[0, w) x [0, h)` are skipped.
    pub fn draw(
        &self,
        tileset: &Image,
        x: i32,
        y: i32,
        viewport: Option<(i32, i32)>,
        out: &mut Vec<DrawCmd>,
    ) {
        let columns = tileset.width() as i32 / TILE_SIZE;
        if columns <= 0 {
            return;
        }
        for ty in 0..self.height {
            let dy = y + ty as i32 * TILE_SIZE;
            if let Some((_, vh)) = viewport
                && (dy + TILE_SIZE <= 0 || dy >= vh)
            {
                continue;
            }
            for tx in 0..self.width {
                let dx = x + tx as i32 * TILE_SIZE;
                if let Some((vw, _)) = viewport
                    && (dx + TILE_SIZE <= 0 || dx >= vw)
                {
                    continue;
                }
                let id = self.tile(tx, ty);
                if id == 0 {
                    continue;
                }
                let index = (id - 1) as i32;
                out.push(DrawCmd::Image {
                    image: tileset.clone(),
                    x: dx,
                    y: dy,
                    src: SourceRect::new(
                        (index % columns) * TILE_SIZE,
                        (index / columns) * TILE_SIZE,
                        TILE_SIZE,
                        TILE_SIZE,
                    ),
                    flip_h: false,
                });
            }
        }
    }
}

/// Static level data shared by every gameplay system.
#[derive(Resource, Debug, Clone)]
pub struct Tilemap {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    solid: Option<usize>,
    tileset: Image,
    player_spawn: (f32, f32),
    camera_spawn: (f32, f32),
    background: Option<Image>,
    middleground: Option<Image>,
}

impl Tilemap {
    pub fn new(width: u32, height: u32, layers: Vec<Layer>, tileset: Image) -> Self {
        let solid = layers.iter().rposition(|l| !l.is_decorative());
        Self {
            width,
            height,
            layers,
            solid,
            tileset,
            player_spawn: (0.0, 0.0),
            camera_spawn: (0.0, 0.0),
            background: None,
            middleground: None,
        }
    }

    pub fn with_spawns(mut self, player: (f32, f32), camera: (f32, f32)) -> Self {
        self.player_spawn = player;
        self.camera_spawn = camera;
        self
    }

    pub fn with_backgrounds(mut self, background: Option<Image>, middleground: Option<Image>) -> Self {
        self.background = background;
        self.middleground = middleground;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map extent in world units.
    pub fn pixel_size(&self) -> (f32, f32) {
        (
            (self.width as i32 * TILE_SIZE) as f32,
            (self.height as i32 * TILE_SIZE) as f32,
        )
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Panics when `index` is out of range, like slice indexing.
    pub fn layer(&self, index: usize) -> &Layer {
        &self.layers[index]
    }

    pub fn solid_layer(&self) -> Option<&Layer> {
        self.solid.map(|i| &self.layers[i])
    }

    pub fn tileset(&self) -> &Image {
        &self.tileset
    }

    pub fn player_spawn(&self) -> (f32, f32) {
        self.player_spawn
    }

    pub fn camera_spawn(&self) -> (f32, f32) {
        self.camera_spawn
    }

    pub fn background(&self) -> Option<&Image> {
        self.background.as_ref()
    }

    pub fn middleground(&self) -> Option<&Image> {
        self.middleground.as_ref()
    }

    /// Whether the solid layer has a tile at the given tile coordinates.
    pub fn is_solid(&self, tx: i64, ty: i64) -> bool {
        self.solid_layer().is_some_and(|l| l.tile_at(tx, ty) != 0)
    }

    fn tile_coord(v: f32) -> i64 {
        (v / TILE_SIZE_F).floor() as i64
    }

    /// Probe below: on contact `y` snaps to the tile's top edge.
    pub fn collision_down(&self, x: f32, y: &mut f32, y_speed: f32) -> bool {
        let tx = Self::tile_coord(x);
        let ty = Self::tile_coord(*y + y_speed);
        if self.is_solid(tx, ty) {
            *y = (ty * TILE_SIZE as i64) as f32;
            return true;
        }
        false
    }

    /// Probe above: on contact `y` snaps to the tile's bottom edge.
    pub fn collision_up(&self, x: f32, y: &mut f32, y_speed: f32) -> bool {
        let tx = Self::tile_coord(x);
        let ty = Self::tile_coord(*y + y_speed);
        if self.is_solid(tx, ty) {
            *y = ((ty + 1) * TILE_SIZE as i64) as f32;
            return true;
        }
        false
    }

    /// Probe to the right: on contact `x` snaps to the tile's left edge.
    pub fn collision_right(&self, x: &mut f32, y: f32, x_speed: f32) -> bool {
        let tx = Self::tile_coord(*x + x_speed);
        let ty = Self::tile_coord(y);
        if self.is_solid(tx, ty) {
            *x = (tx * TILE_SIZE as i64) as f32;
            return true;
        }
        false
    }

    /// Probe to the left: on contact `x` snaps to the tile's right edge.
    pub fn collision_left(&self, x: &mut f32, y: f32, x_speed: f32) -> bool {
        let tx = Self::tile_coord(*x + x_speed);
        let ty = Self::tile_coord(y);
        if self.is_solid(tx, ty) {
            *x = ((tx + 1) * TILE_SIZE as i64) as f32;
            return true;
        }
        false
    }

    /// Draw every layer in order with the map origin at `(x, y)`.
    pub fn draw(&self, x: i32, y: i32, viewport: Option<(i32, i32)>, out: &mut Vec<DrawCmd>) {
        for layer in &self.layers {
            layer.draw(&self.tileset, x, y, viewport, out);
        }
    }
}
