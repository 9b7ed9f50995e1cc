//! Follow camera resource.
//!
//! The camera keeps a current position and a target. [`Camera::pan`] closes
//! one eighth of the remaining distance per call, giving an exponential
//! approach that never overshoots. Rendering uses the truncated integer
//! position from [`Camera::x`] / [`Camera::y`].

use bevy_ecs::prelude::Resource;

use crate::components::mapposition::MapPosition;

/// Divisor of the remaining distance covered by one pan step.
pub const PAN_DIVISOR: f32 = 8.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    x: f32,
    y: f32,
    target_x: f32,
    target_y: f32,
}

impl Camera {
    /// Camera resting at `(x, y)` with the target on the same spot.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            target_x: x,
            target_y: y,
        }
    }

    /// Hard-set the current position. The target is left alone.
    pub fn position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn target(&mut self, x: f32, y: f32) {
        self.target_x = x;
        self.target_y = y;
    }

    pub fn pan(&mut self) {
        self.x += (self.target_x - self.x) / PAN_DIVISOR;
        self.y += (self.target_y - self.y) / PAN_DIVISOR;
    }

    pub fn x(&self) -> i32 {
        self.x as i32
    }

    pub fn y(&self) -> i32 {
        self.y as i32
    }

    pub fn exact_position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn target_position(&self) -> (f32, f32) {
        (self.target_x, self.target_y)
    }
}

/// How far the camera's top-left corner trails the followed entity.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    pub offset: MapPosition,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            offset: MapPosition::new(100.0, 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_first_pan_step() {
        let mut cam = Camera::new(0.0, 0.0);
        cam.target(80.0, -16.0);
        cam.pan();
        let (x, y) = cam.exact_position();
        assert!(approx_eq(x, 10.0));
        assert!(approx_eq(y, -2.0));
    }

    #[test]
    fn test_pan_converges_without_overshoot() {
        let mut cam = Camera::new(0.0, 0.0);
        cam.target(100.0, 50.0);
        let mut prev = cam.exact_position();
        for _ in 0..200 {
            cam.pan();
            let cur = cam.exact_position();
            assert!(cur.0 >= prev.0 && cur.0 <= 100.0);
            assert!(cur.1 >= prev.1 && cur.1 <= 50.0);
            prev = cur;
        }
        assert!(approx_eq(prev.0, 100.0));
        assert!(approx_eq(prev.1, 50.0));
    }

    #[test]
    fn test_remaining_distance_decays_by_seven_eighths() {
        let mut cam = Camera::new(0.0, 0.0);
        cam.target(64.0, 0.0);
        let mut remaining = 64.0;
        for _ in 0..10 {
            cam.pan();
            remaining *= 7.0 / 8.0;
            assert!(approx_eq(64.0 - cam.exact_position().0, remaining));
        }
    }

    #[test]
    fn test_integer_position_truncates() {
        let mut cam = Camera::new(0.0, 0.0);
        cam.position(12.9, -3.7);
        assert_eq!(cam.x(), 12);
        assert_eq!(cam.y(), -3);
    }

    #[test]
    fn test_position_keeps_target() {
        let mut cam = Camera::new(5.0, 5.0);
        cam.target(40.0, 8.0);
        cam.position(0.0, 0.0);
        assert_eq!(cam.target_position(), (40.0, 8.0));
    }
}
