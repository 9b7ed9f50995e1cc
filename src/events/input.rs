//! Input events delivered by the input capability.
//!
//! The backend translates physical keys into the five logical [`KeyType`]s
//! the game understands and reports each press/release as an
//! [`InputEvent::Key`]. A window close request arrives as
//! [`InputEvent::Quit`].

use bevy_ecs::prelude::*;

/// Logical keys recognized by scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Left,
    Right,
    Up,
    Down,
    /// Default: Space.
    Jump,
}

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
}

/// One event produced while pumping the input backend.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A recognized key changed state.
    Key { key: KeyType, action: KeyAction },
    /// The user asked to close the game.
    Quit,
}

impl InputEvent {
    /// Shorthand for a key press event.
    pub fn press(key: KeyType) -> Self {
        InputEvent::Key {
            key,
            action: KeyAction::Press,
        }
    }

    /// Shorthand for a key release event.
    pub fn release(key: KeyType) -> Self {
        InputEvent::Key {
            key,
            action: KeyAction::Release,
        }
    }
}
