//! Deterministic doubles for the backend capabilities.
//!
//! Used by unit tests and by the integration tests under `tests/`. Each
//! double records what it was asked to do so assertions can inspect it, and
//! the input double replays events queued by the test.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use super::{Gfx, Image, Input, Sleeper, SourceRect, Time};
use crate::error::{EngineError, EngineResult};
use crate::events::input::InputEvent;

/// One recorded `draw_image` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnImage {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub src: SourceRect,
    pub flip_h: bool,
}

/// One recorded `draw_background_layer` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnLayer {
    pub name: String,
    pub offset_x: i32,
    pub offset_y: i32,
}

/// Graphics double with a table of "available" images.
#[derive(Debug, Default)]
pub struct MockGfx {
    available: FxHashMap<String, Image>,
    /// Every image draw since the last [`MockGfx::clear_draws`].
    pub images: Vec<DrawnImage>,
    /// Every background layer draw since the last [`MockGfx::clear_draws`].
    pub layers: Vec<DrawnLayer>,
    /// Number of `present` calls.
    pub presents: u32,
}

impl MockGfx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `path` loadable with the given dimensions.
    pub fn simulate_available_image(&mut self, path: &str, width: u32, height: u32) {
        self.available
            .insert(path.to_string(), Image::new(path, width, height));
    }

    pub fn last_image(&self) -> Option<&DrawnImage> {
        self.images.last()
    }

    pub fn last_layer(&self) -> Option<&DrawnLayer> {
        self.layers.last()
    }

    pub fn clear_draws(&mut self) {
        self.images.clear();
        self.layers.clear();
    }
}

impl Gfx for MockGfx {
    fn load_image(&mut self, path: &str) -> EngineResult<Image> {
        self.available
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::ImageLoad {
                path: path.to_string(),
                reason: "not available".to_string(),
            })
    }

    fn draw_image(&mut self, image: &Image, x: i32, y: i32, src: SourceRect, flip_h: bool) {
        self.images.push(DrawnImage {
            name: image.name().to_string(),
            x,
            y,
            src,
            flip_h,
        });
    }

    fn draw_background_layer(&mut self, image: &Image, offset_x: i32, offset_y: i32) {
        self.layers.push(DrawnLayer {
            name: image.name().to_string(),
            offset_x,
            offset_y,
        });
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}

/// Input double; queued events are delivered on the next pump.
#[derive(Debug, Default)]
pub struct MockInput {
    queued: VecDeque<InputEvent>,
    /// Number of `pump_events` calls.
    pub pumps: u32,
}

impl MockInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn simulate(&mut self, event: InputEvent) {
        self.queued.push_back(event);
    }

    pub fn simulate_quit(&mut self) {
        self.simulate(InputEvent::Quit);
    }
}

impl Input for MockInput {
    fn pump_events(&mut self, dispatch: &mut dyn FnMut(InputEvent)) {
        self.pumps += 1;
        while let Some(event) = self.queued.pop_front() {
            dispatch(event);
        }
    }
}

/// Clock double; time only moves when the test says so.
#[derive(Debug, Default)]
pub struct MockTime {
    pub current: i64,
}

impl MockTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn simulate_time(&mut self, now: i64) {
        self.current = now;
    }
}

impl Time for MockTime {
    fn now(&self) -> i64 {
        self.current
    }
}

/// Pacing double; remembers the time it was last invoked with.
#[derive(Debug, Default)]
pub struct MockSleeper {
    pub last_invoked: Option<i64>,
    pub calls: u32,
}

impl MockSleeper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sleeper for MockSleeper {
    fn sleep_until_next_frame(&mut self, now: i64) {
        self.last_invoked = Some(now);
        self.calls += 1;
    }
}
