//! Held-key state of the gameplay scene.
//!
//! Key events arrive one at a time; the scene needs to know what is still
//! held when a key is released (e.g. Right released while Left is down keeps
//! walking left). [`InputState`] records that from the event stream alone.
use bevy_ecs::prelude::*;

use crate::events::input::{KeyAction, KeyType};

/// Boolean key state updated from press/release events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the key is currently held.
    pub active: bool,
    /// Whether the last event for this key was a press.
    pub just_pressed: bool,
    /// Whether the last event for this key was a release.
    pub just_released: bool,
}

impl BoolState {
    pub fn apply(&mut self, action: KeyAction) {
        self.active = action == KeyAction::Press;
        self.just_pressed = action == KeyAction::Press;
        self.just_released = action == KeyAction::Release;
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub up: BoolState,
    pub down: BoolState,
    pub jump: BoolState,
}

impl InputState {
    pub fn key(&self, key: KeyType) -> &BoolState {
        match key {
            KeyType::Left => &self.left,
            KeyType::Right => &self.right,
            KeyType::Up => &self.up,
            KeyType::Down => &self.down,
            KeyType::Jump => &self.jump,
        }
    }

    pub fn key_mut(&mut self, key: KeyType) -> &mut BoolState {
        match key {
            KeyType::Left => &mut self.left,
            KeyType::Right => &mut self.right,
            KeyType::Up => &mut self.up,
            KeyType::Down => &mut self.down,
            KeyType::Jump => &mut self.jump,
        }
    }

    pub fn apply(&mut self, key: KeyType, action: KeyAction) {
        self.key_mut(key).apply(action);
    }

    pub fn is_held(&self, key: KeyType) -> bool {
        self.key(key).active
    }

    /// Whether either horizontal direction key is held.
    pub fn direction_held(&self) -> bool {
        self.left.active || self.right.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::default();
        input.apply(KeyType::Left, KeyAction::Press);
        assert!(input.is_held(KeyType::Left));
        assert!(input.left.just_pressed);

        input.apply(KeyType::Left, KeyAction::Release);
        assert!(!input.is_held(KeyType::Left));
        assert!(input.left.just_released);
        assert!(!input.left.just_pressed);
    }

    #[test]
    fn test_direction_held() {
        let mut input = InputState::default();
        assert!(!input.direction_held());
        input.apply(KeyType::Right, KeyAction::Press);
        assert!(input.direction_held());
        input.apply(KeyType::Left, KeyAction::Press);
        assert!(input.direction_held());
        input.apply(KeyType::Right, KeyAction::Release);
        input.apply(KeyType::Left, KeyAction::Release);
        assert!(!input.direction_held());
    }
}
