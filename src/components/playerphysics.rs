//! Player velocity integrator.
//!
//! [`PlayerPhysics`] holds the per-axis speeds and the flags that drive the
//! platformer feel. Movement is frame-based: one [`PlayerPhysics::update`]
//! per frame, independent of wall-clock delta.
//!
//! Horizontal motion is an exponential ramp: `right()`/`left()` seed a speed
//! of 1 and an acceleration multiplier of 1.1, `idle()` switches the
//! multiplier to 0.8 so the speed decays. The speed is clamped to
//! [`MAX_X_SPEED`] and snapped to zero once it falls to [`X_SPEED_EPSILON`].
//!
//! Vertical motion is plain gravity while airborne. Landing zeroes the
//! vertical speed and gravity stays off until the player jumps or walks off
//! a ledge, which keeps a resting player perfectly still.

use bevy_ecs::prelude::Component;

/// Added to the vertical speed every airborne frame.
pub const GRAVITY: f32 = 0.1;
/// Vertical speed set by a jump (negative is up).
pub const JUMP_SPEED: f32 = -5.0;
/// Horizontal speed cap in either direction.
pub const MAX_X_SPEED: f32 = 3.0;
/// Horizontal speeds at or below this magnitude snap to zero.
pub const X_SPEED_EPSILON: f32 = 0.1;
/// Multiplier applied while a direction is held.
pub const X_ACCEL_RAMP: f32 = 1.1;
/// Multiplier applied once the direction is released.
pub const X_ACCEL_DECAY: f32 = 0.8;
/// Factor applied to vertical speed when bumping the ceiling.
pub const CEILING_BOUNCE: f32 = -0.8;

/// Speeds and movement flags of the player.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct PlayerPhysics {
    x_speed: f32,
    y_speed: f32,
    on_floor: bool,
    x_accel: f32,
    ducking: bool,
}

impl Default for PlayerPhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerPhysics {
    /// At rest, airborne (it will fall onto whatever is below the spawn).
    pub fn new() -> Self {
        Self {
            x_speed: 0.0,
            y_speed: 0.0,
            on_floor: false,
            x_accel: X_ACCEL_DECAY,
            ducking: false,
        }
    }

    pub fn x_speed(&self) -> f32 {
        self.x_speed
    }

    pub fn y_speed(&self) -> f32 {
        self.y_speed
    }

    pub fn on_floor(&self) -> bool {
        self.on_floor
    }

    pub fn x_accel(&self) -> f32 {
        self.x_accel
    }

    pub fn ducking(&self) -> bool {
        self.ducking
    }

    pub fn right(&mut self) {
        self.x_speed = 1.0;
        self.x_accel = X_ACCEL_RAMP;
    }

    pub fn left(&mut self) {
        self.x_speed = -1.0;
        self.x_accel = X_ACCEL_RAMP;
    }

    /// Let horizontal speed decay and stand up.
    pub fn idle(&mut self) {
        self.x_accel = X_ACCEL_DECAY;
        self.ducking = false;
    }

    /// Jump if standing on something. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.on_floor {
            return false;
        }
        self.y_speed = JUMP_SPEED;
        self.on_floor = false;
        true
    }

    pub fn duck(&mut self) {
        self.ducking = true;
    }

    /// Stop ducking without touching horizontal acceleration.
    pub fn stand(&mut self) {
        self.ducking = false;
    }

    /// Bounce back down from a ceiling.
    pub fn hit_ceiling(&mut self) {
        self.y_speed *= CEILING_BOUNCE;
    }

    pub fn hit_left_wall(&mut self) {
        self.x_speed = 0.0;
    }

    pub fn hit_right_wall(&mut self) {
        self.x_speed = 0.0;
    }

    pub fn hit_floor(&mut self) {
        self.on_floor = true;
        self.y_speed = 0.0;
    }

    /// Lost floor support without jumping (walked off a ledge).
    pub fn fall(&mut self) {
        self.on_floor = false;
    }

    /// Zero both speeds and drop back to the airborne default.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Move by the current speeds, then prepare next frame's speeds.
    ///
    /// Integration uses last frame's speeds; gravity and horizontal
    /// acceleration only affect the following frame.
    pub fn update(&mut self, x: &mut f32, y: &mut f32) {
        *x += self.x_speed;
        *y += self.y_speed;

        if !self.on_floor {
            self.y_speed += GRAVITY;
        }

        self.x_speed = (self.x_speed * self.x_accel).clamp(-MAX_X_SPEED, MAX_X_SPEED);
        if self.x_speed.abs() <= X_SPEED_EPSILON {
            self.x_speed = 0.0;
        }
    }
}
