use bevy_ecs::prelude::Component;

/// World-space position in collision units (1 unit = 1 map pixel).
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
