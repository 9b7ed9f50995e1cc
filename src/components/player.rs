//! Player presentation: which sprite is shown and which way it faces.
//!
//! The [`Player`] component never looks at physics on its own. The owning
//! scene decides the [`PlayerState`] (usually through
//! [`PlayerState::from_physics`]) and sets it explicitly; facing is tracked
//! separately and survives state changes.

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;

use crate::components::playerphysics::PlayerPhysics;
use crate::components::sprite::Sprite;
use crate::error::{EngineError, EngineResult};
use crate::resources::renderqueue::DrawCmd;

/// Discrete visual states, one sprite each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Walk,
    Jump,
    Fall,
    Duck,
}

impl PlayerState {
    /// Sprite-set entry used for this state.
    pub fn sprite_name(self) -> &'static str {
        match self {
            PlayerState::Idle => "idle",
            PlayerState::Walk => "walk",
            PlayerState::Jump => "jump",
            PlayerState::Fall => "fall",
            PlayerState::Duck => "duck",
        }
    }

    /// State matching the current movement.
    ///
    /// Airborne: rising shows Jump, anything else Fall. On the floor: Duck
    /// wins over movement, then Walk while there is horizontal speed.
    pub fn from_physics(physics: &PlayerPhysics) -> Self {
        if !physics.on_floor() {
            if physics.y_speed() < 0.0 {
                PlayerState::Jump
            } else {
                PlayerState::Fall
            }
        } else if physics.ducking() {
            PlayerState::Duck
        } else if physics.x_speed() != 0.0 {
            PlayerState::Walk
        } else {
            PlayerState::Idle
        }
    }
}

/// The five sprites a player is built from.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub idle: Sprite,
    pub walk: Sprite,
    pub jump: Sprite,
    pub fall: Sprite,
    pub duck: Sprite,
}

impl SpriteSet {
    /// Names every player sprite sheet must provide.
    pub const REQUIRED: [&'static str; 5] = ["idle", "walk", "jump", "fall", "duck"];

    /// Pick the required entries out of a named sprite collection.
    ///
    /// Fails on the first missing name; a player cannot be built from a
    /// partial set.
    pub fn from_named(named: &FxHashMap<String, Sprite>) -> EngineResult<Self> {
        let take = |name: &str| {
            named
                .get(name)
                .cloned()
                .ok_or_else(|| EngineError::MissingSprite(name.to_string()))
        };
        Ok(Self {
            idle: take("idle")?,
            walk: take("walk")?,
            jump: take("jump")?,
            fall: take("fall")?,
            duck: take("duck")?,
        })
    }

    pub fn get(&self, state: PlayerState) -> &Sprite {
        match state {
            PlayerState::Idle => &self.idle,
            PlayerState::Walk => &self.walk,
            PlayerState::Jump => &self.jump,
            PlayerState::Fall => &self.fall,
            PlayerState::Duck => &self.duck,
        }
    }

    pub fn get_mut(&mut self, state: PlayerState) -> &mut Sprite {
        match state {
            PlayerState::Idle => &mut self.idle,
            PlayerState::Walk => &mut self.walk,
            PlayerState::Jump => &mut self.jump,
            PlayerState::Fall => &mut self.fall,
            PlayerState::Duck => &mut self.duck,
        }
    }
}

/// Visual state machine of the player entity.
#[derive(Component, Debug, Clone)]
pub struct Player {
    sprites: SpriteSet,
    state: PlayerState,
    facing_left: bool,
}

impl Player {
    pub fn new(sprites: SpriteSet) -> Self {
        Self {
            sprites,
            state: PlayerState::Idle,
            facing_left: false,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn set_state(&mut self, state: PlayerState) {
        self.state = state;
    }

    pub fn facing_left(&self) -> bool {
        self.facing_left
    }

    pub fn face_left(&mut self, facing_left: bool) {
        self.facing_left = facing_left;
    }

    pub fn active_sprite(&self) -> &Sprite {
        self.sprites.get(self.state)
    }

    /// Advance the active sprite by `delta` and draw it at `(x, y)`.
    pub fn draw(&mut self, delta: i64, x: i32, y: i32) -> DrawCmd {
        let flip = self.facing_left;
        let sprite = self.sprites.get_mut(self.state);
        sprite.update(delta);
        sprite.draw(x, y, flip)
    }
}
