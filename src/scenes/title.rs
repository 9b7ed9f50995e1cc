//! Title screen.
//!
//! Two parallax backgrounds and the fox standing at a fixed spot. Holding
//! Left or Right makes the fox run in place while the backgrounds scroll the
//! other way; Jump starts the game.

use log::info;

use crate::components::parallax::Parallax;
use crate::components::sprite::Sprite;
use crate::events::input::{KeyAction, KeyType};
use crate::platform::Gfx;
use crate::scenes::{Scene, SceneFactory};

/// Where the fox is drawn, in world units.
pub const FOX_POSITION: (i32, i32) = (100, 100);
/// Default travel factors of the two title backgrounds.
pub const BACKGROUND_FACTOR: f32 = 8.0;
pub const MIDDLEGROUND_FACTOR: f32 = 4.0;

pub struct Title {
    background: Parallax,
    middleground: Parallax,
    idle: Sprite,
    run: Sprite,
    running: bool,
    facing_left: bool,
    scroll_speed: i32,
    scroll_x: i32,
    start_requested: bool,
    next: Option<SceneFactory>,
}

impl Title {
    /// `next` builds the scene shown when the player presses Jump.
    pub fn new(
        background: Parallax,
        middleground: Parallax,
        idle: Sprite,
        run: Sprite,
        next: SceneFactory,
    ) -> Self {
        Self {
            background,
            middleground,
            idle,
            run,
            running: false,
            facing_left: false,
            scroll_speed: 0,
            scroll_x: 0,
            start_requested: false,
            next: Some(next),
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn facing_left(&self) -> bool {
        self.facing_left
    }

    /// Accumulated scroll offset handed to both backgrounds.
    pub fn scroll_x(&self) -> i32 {
        self.scroll_x
    }
}

impl Scene for Title {
    fn update(&mut self, delta: i64, gfx: &mut dyn Gfx) {
        self.scroll_x += self.scroll_speed;
        for layer in [&mut self.background, &mut self.middleground] {
            layer.scroll(self.scroll_x, 0);
            layer.draw().submit(gfx);
        }

        let sprite = if self.running {
            &mut self.run
        } else {
            &mut self.idle
        };
        sprite.update(delta);
        sprite
            .draw(FOX_POSITION.0, FOX_POSITION.1, self.facing_left)
            .submit(gfx);
    }

    fn key_event(&mut self, key: KeyType, action: KeyAction) {
        match (key, action) {
            (KeyType::Left | KeyType::Right, KeyAction::Press) => {
                self.running = true;
                self.facing_left = key == KeyType::Left;
                self.scroll_speed = if self.facing_left { 1 } else { -1 };
            }
            (KeyType::Left | KeyType::Right, KeyAction::Release) => {
                self.running = false;
                self.scroll_speed = 0;
            }
            (KeyType::Jump, KeyAction::Press) => {
                if !self.start_requested {
                    info!("Starting game from title screen");
                }
                self.start_requested = true;
            }
            _ => {}
        }
    }

    fn take_next_scene(&mut self) -> Option<SceneFactory> {
        if self.start_requested {
            self.next.take()
        } else {
            None
        }
    }
}
