//! Backend capabilities consumed by the engine.
//!
//! The simulation never talks to a window, a keyboard or a clock directly.
//! It goes through four narrow traits so that every backend can be swapped
//! for a deterministic double in tests:
//!
//! - [`Gfx`] – image loading, blitting, background layers, frame flip
//! - [`Input`] – pumps buffered key/quit events into a dispatcher
//! - [`Time`] – monotonic milliseconds
//! - [`Sleeper`] – end-of-frame pacing
//!
//! Submodules
//! - [`raylib_backend`] – production graphics/input adapters (Linux and Windows)
//! - [`system`] – std-backed clock and pacing adapters
//! - [`testing`] – recording doubles for all four capabilities

use std::sync::Arc;

use crate::error::EngineResult;
use crate::events::input::InputEvent;

#[cfg(any(target_os = "linux", target_os = "windows"))]
pub mod raylib_backend;
pub mod system;
pub mod testing;

/// Immutable picture descriptor returned by [`Gfx::load_image`].
///
/// Identity is the name (the path it was loaded from). Cloning only bumps a
/// reference count, so sprites, layers and parallax backgrounds built from
/// the same file share one name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
    name: Arc<str>,
    width: u32,
    height: u32,
}

impl Image {
    pub fn new(name: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
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
}

/// Region of an image to copy, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SourceRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Graphics capability.
pub trait Gfx {
    /// Load (or fetch from cache) an image. Failure is fatal for the caller.
    fn load_image(&mut self, path: &str) -> EngineResult<Image>;

    /// Copy `src` from `image` to world pixel `(x, y)`, optionally mirrored.
    fn draw_image(&mut self, image: &Image, x: i32, y: i32, src: SourceRect, flip_h: bool);

    /// Fill the viewport with a horizontally repeating background.
    ///
    /// The picture is fitted to the viewport height; backends that do so keep
    /// it at the top edge and ignore `offset_y`.
    fn draw_background_layer(&mut self, image: &Image, offset_x: i32, offset_y: i32);

    /// Show what was drawn and clear for the next frame.
    fn present(&mut self);
}

/// Input capability.
///
/// `pump_events` drains everything the backend buffered since the last call
/// and hands each event to `dispatch` synchronously, in arrival order.
pub trait Input {
    fn pump_events(&mut self, dispatch: &mut dyn FnMut(InputEvent));
}

/// Monotonic clock in milliseconds.
pub trait Time {
    fn now(&self) -> i64;
}

/// Frame pacing capability.
pub trait Sleeper {
    /// Block until the frame budget measured from the previous call is spent.
    fn sleep_until_next_frame(&mut self, now: i64);
}

/// Frame budget in whole milliseconds for a target rate (60 → 16).
pub fn frame_budget_ms(target_fps: u32) -> i64 {
    1000 / i64::from(target_fps.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_clone_shares_identity() {
        let a = Image::new("fox.png", 198, 32);
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.name(), "fox.png");
        assert_eq!(b.width(), 198);
        assert_eq!(b.height(), 32);
    }

    #[test]
    fn test_frame_budget_ms() {
        assert_eq!(frame_budget_ms(60), 16);
        assert_eq!(frame_budget_ms(30), 33);
        assert_eq!(frame_budget_ms(0), 1000);
    }
}
