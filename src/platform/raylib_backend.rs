//! raylib adapters for the graphics and input capabilities.
//!
//! Both adapters share one [`RaylibHandle`]. The graphics adapter also owns
//! the [`RaylibThread`] token, since loading textures and drawing need it.
//!
//! Draw calls are queued during the frame and replayed in a single raylib
//! drawing pass on [`Gfx::present`], scaled by the configured pixel scale.
//! Closing the drawing pass is also what makes raylib poll the keyboard, so
//! the input adapter sees fresh key state right after `present`.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use raylib::prelude::{
    Color, KeyboardKey, RaylibDraw, RaylibHandle, RaylibThread, Rectangle, Texture2D, Vector2,
};
use rustc_hash::FxHashMap;

use super::{Gfx, Image, Input, SourceRect};
use crate::components::parallax::background_layer_origins;
use crate::error::{EngineError, EngineResult};
use crate::events::input::{InputEvent, KeyType};
use crate::resources::gameconfig::GameConfig;

/// raylib handle shared by the graphics and input adapters.
pub type SharedHandle = Rc<RefCell<RaylibHandle>>;

const CLEAR_COLOR: Color = Color {
    r: 128,
    g: 128,
    b: 128,
    a: 255,
};

/// Physical key → logical key table used by [`RaylibInput::new`].
pub const DEFAULT_BINDINGS: [(KeyboardKey, KeyType); 5] = [
    (KeyboardKey::KEY_LEFT, KeyType::Left),
    (KeyboardKey::KEY_RIGHT, KeyType::Right),
    (KeyboardKey::KEY_DOWN, KeyType::Down),
    (KeyboardKey::KEY_UP, KeyType::Up),
    (KeyboardKey::KEY_SPACE, KeyType::Jump),
];

/// Open the game window described by `config`.
pub fn open_window(config: &GameConfig) -> (SharedHandle, RaylibThread) {
    let (rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title(&config.title)
        .build();
    info!(
        "Opened {}x{} window '{}'",
        config.window_width, config.window_height, config.title
    );
    (Rc::new(RefCell::new(rl)), thread)
}

enum QueuedDraw {
    Image {
        name: String,
        x: i32,
        y: i32,
        src: SourceRect,
        flip_h: bool,
    },
    Layer {
        name: String,
        offset_x: i32,
    },
}

pub struct RaylibGfx {
    rl: SharedHandle,
    thread: RaylibThread,
    scale: f32,
    textures: FxHashMap<String, Texture2D>,
    queue: Vec<QueuedDraw>,
}

impl RaylibGfx {
    pub fn new(rl: SharedHandle, thread: RaylibThread, scale: u32) -> Self {
        Self {
            rl,
            thread,
            scale: scale.max(1) as f32,
            textures: FxHashMap::default(),
            queue: Vec::new(),
        }
    }
}

impl Gfx for RaylibGfx {
    fn load_image(&mut self, path: &str) -> EngineResult<Image> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(Image::new(path, texture.width as u32, texture.height as u32));
        }
        let texture = self
            .rl
            .borrow_mut()
            .load_texture(&self.thread, path)
            .map_err(|e| EngineError::ImageLoad {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        let image = Image::new(path, texture.width as u32, texture.height as u32);
        info!("Loaded texture {} ({}x{})", path, image.width(), image.height());
        self.textures.insert(path.to_string(), texture);
        Ok(image)
    }

    fn draw_image(&mut self, image: &Image, x: i32, y: i32, src: SourceRect, flip_h: bool) {
        self.queue.push(QueuedDraw::Image {
            name: image.name().to_string(),
            x,
            y,
            src,
            flip_h,
        });
    }

    fn draw_background_layer(&mut self, image: &Image, offset_x: i32, _offset_y: i32) {
        // fitted to the window height, so only the horizontal offset applies
        self.queue.push(QueuedDraw::Layer {
            name: image.name().to_string(),
            offset_x,
        });
    }

    fn present(&mut self) {
        let mut rl = self.rl.borrow_mut();
        let screen_w = rl.get_screen_width();
        let screen_h = rl.get_screen_height();
        let scale = self.scale;

        let mut d = rl.begin_drawing(&self.thread);
        d.clear_background(CLEAR_COLOR);

        for cmd in self.queue.drain(..) {
            match cmd {
                QueuedDraw::Image {
                    name,
                    x,
                    y,
                    src,
                    flip_h,
                } => {
                    let Some(texture) = self.textures.get(&name) else {
                        debug!("Skipping draw of unloaded image {}", name);
                        continue;
                    };
                    let width = if flip_h { -src.w } else { src.w };
                    let source = Rectangle::new(src.x as f32, src.y as f32, width as f32, src.h as f32);
                    let dest = Rectangle::new(
                        x as f32 * scale,
                        y as f32 * scale,
                        src.w as f32 * scale,
                        src.h as f32 * scale,
                    );
                    d.draw_texture_pro(texture, source, dest, Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
                }
                QueuedDraw::Layer { name, offset_x } => {
                    let Some(texture) = self.textures.get(&name) else {
                        debug!("Skipping draw of unloaded layer {}", name);
                        continue;
                    };
                    if texture.height <= 0 {
                        continue;
                    }
                    // fit the picture to the window height, repeat horizontally
                    let fit = screen_h as f32 / texture.height as f32;
                    let width = (texture.width as f32 * fit) as i32;
                    let offset = (offset_x as f32 * scale) as i32;
                    for (x, y) in background_layer_origins(offset, width, screen_w) {
                        d.draw_texture_ex(
                            texture,
                            Vector2::new(x as f32, y as f32),
                            0.0,
                            fit,
                            Color::WHITE,
                        );
                    }
                }
            }
        }
    }
}

/// Keyboard adapter. The key table is fixed when the adapter is built.
pub struct RaylibInput {
    rl: SharedHandle,
    bindings: [(KeyboardKey, KeyType); 5],
}

impl RaylibInput {
    pub fn new(rl: SharedHandle) -> Self {
        Self::with_bindings(rl, DEFAULT_BINDINGS)
    }

    pub fn with_bindings(rl: SharedHandle, bindings: [(KeyboardKey, KeyType); 5]) -> Self {
        Self { rl, bindings }
    }
}

impl Input for RaylibInput {
    fn pump_events(&mut self, dispatch: &mut dyn FnMut(InputEvent)) {
        let rl = self.rl.borrow();
        for (physical, key) in self.bindings {
            if rl.is_key_pressed(physical) {
                dispatch(InputEvent::press(key));
            }
            if rl.is_key_released(physical) {
                dispatch(InputEvent::release(key));
            }
        }
        if rl.window_should_close() {
            dispatch(InputEvent::Quit);
        }
    }
}
