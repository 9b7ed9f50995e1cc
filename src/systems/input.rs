//! Key handling for the gameplay scene.
//!
//! [`player_key_observer`] reacts to each [`InputEvent`] triggered on the
//! world: it records the held keys in [`InputState`] and translates the
//! event into player physics calls and an immediate visual state.
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::player::{Player, PlayerState};
use crate::components::playerphysics::PlayerPhysics;
use crate::events::input::{InputEvent, KeyAction, KeyType};
use crate::resources::input::InputState;

/// Start moving in a horizontal direction.
fn walk(physics: &mut PlayerPhysics, player: &mut Player, key: KeyType) {
    if key == KeyType::Left {
        physics.left();
    } else {
        physics.right();
    }
    player.face_left(key == KeyType::Left);
    if physics.on_floor() {
        player.set_state(PlayerState::Walk);
    }
}

/// Apply one key event to a player, given the keys held after the event.
pub fn apply_key(
    input: &InputState,
    key: KeyType,
    action: KeyAction,
    physics: &mut PlayerPhysics,
    player: &mut Player,
) {
    match (key, action) {
        (KeyType::Left | KeyType::Right, KeyAction::Press) => walk(physics, player, key),
        (KeyType::Left | KeyType::Right, KeyAction::Release) => {
            let other = if key == KeyType::Left {
                KeyType::Right
            } else {
                KeyType::Left
            };
            if input.is_held(other) {
                walk(physics, player, other);
            } else {
                physics.idle();
                if physics.on_floor() {
                    player.set_state(PlayerState::Idle);
                }
            }
        }
        (KeyType::Jump | KeyType::Up, KeyAction::Press) => {
            if physics.jump() {
                player.set_state(PlayerState::Jump);
            }
        }
        (KeyType::Down, KeyAction::Press) => {
            physics.duck();
            if physics.on_floor() {
                player.set_state(PlayerState::Duck);
            }
        }
        (KeyType::Down, KeyAction::Release) => {
            if input.direction_held() {
                physics.stand();
            } else {
                physics.idle();
            }
            player.set_state(PlayerState::from_physics(physics));
        }
        (KeyType::Jump | KeyType::Up, KeyAction::Release) => {}
    }
}

pub fn player_key_observer(
    trigger: On<InputEvent>,
    mut input: ResMut<InputState>,
    mut query: Query<(&mut PlayerPhysics, &mut Player)>,
) {
    let InputEvent::Key { key, action } = *trigger.event() else {
        return;
    };
    input.apply(key, action);
    trace!("Key {:?} {:?}", key, action);

    for (mut physics, mut player) in query.iter_mut() {
        apply_key(&input, key, action, &mut physics, &mut player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::player::SpriteSet;
    use crate::components::sprite::Sprite;
    use crate::platform::Image;

    fn player() -> Player {
        let sprite = |name: &str| Sprite::new(Image::new(name.to_string(), 33, 32), 33, 32);
        Player::new(SpriteSet {
            idle: sprite("idle"),
            walk: sprite("walk"),
            jump: sprite("jump"),
            fall: sprite("fall"),
            duck: sprite("duck"),
        })
    }

    fn grounded() -> PlayerPhysics {
        let mut physics = PlayerPhysics::new();
        physics.hit_floor();
        physics
    }

    fn send(
        input: &mut InputState,
        key: KeyType,
        action: KeyAction,
        physics: &mut PlayerPhysics,
        player: &mut Player,
    ) {
        input.apply(key, action);
        apply_key(input, key, action, physics, player);
    }

    #[test]
    fn test_press_right_walks_and_faces_right() {
        let (mut input, mut physics, mut p) = (InputState::default(), grounded(), player());
        p.face_left(true);
        send(&mut input, KeyType::Right, KeyAction::Press, &mut physics, &mut p);
        assert_eq!(physics.x_speed(), 1.0);
        assert!(!p.facing_left());
        assert_eq!(p.state(), PlayerState::Walk);
    }

    #[test]
    fn test_release_with_opposite_held_reverses() {
        let (mut input, mut physics, mut p) = (InputState::default(), grounded(), player());
        send(&mut input, KeyType::Right, KeyAction::Press, &mut physics, &mut p);
        send(&mut input, KeyType::Left, KeyAction::Press, &mut physics, &mut p);
        send(&mut input, KeyType::Left, KeyAction::Release, &mut physics, &mut p);
        assert_eq!(physics.x_speed(), 1.0);
        assert!(!p.facing_left());
        assert_eq!(p.state(), PlayerState::Walk);
    }

    #[test]
    fn test_release_alone_goes_idle() {
        let (mut input, mut physics, mut p) = (InputState::default(), grounded(), player());
        send(&mut input, KeyType::Left, KeyAction::Press, &mut physics, &mut p);
        send(&mut input, KeyType::Left, KeyAction::Release, &mut physics, &mut p);
        assert_eq!(physics.x_accel(), 0.8);
        assert!(p.facing_left());
        assert_eq!(p.state(), PlayerState::Idle);
    }

    #[test]
    fn test_jump_only_from_floor() {
        let (mut input, mut physics, mut p) = (InputState::default(), grounded(), player());
        send(&mut input, KeyType::Jump, KeyAction::Press, &mut physics, &mut p);
        assert_eq!(p.state(), PlayerState::Jump);
        assert_eq!(physics.y_speed(), -5.0);

        p.set_state(PlayerState::Fall);
        send(&mut input, KeyType::Up, KeyAction::Press, &mut physics, &mut p);
        assert_eq!(p.state(), PlayerState::Fall);
    }

    #[test]
    fn test_duck_and_stand_while_walking() {
        let (mut input, mut physics, mut p) = (InputState::default(), grounded(), player());
        send(&mut input, KeyType::Right, KeyAction::Press, &mut physics, &mut p);
        send(&mut input, KeyType::Down, KeyAction::Press, &mut physics, &mut p);
        assert_eq!(p.state(), PlayerState::Duck);
        send(&mut input, KeyType::Down, KeyAction::Release, &mut physics, &mut p);
        assert!(!physics.ducking());
        assert_eq!(physics.x_accel(), 1.1);
        assert_eq!(p.state(), PlayerState::Walk);
    }

    #[test]
    fn test_stand_with_both_directions_held_keeps_walking() {
        let (mut input, mut physics, mut p) = (InputState::default(), grounded(), player());
        send(&mut input, KeyType::Left, KeyAction::Press, &mut physics, &mut p);
        send(&mut input, KeyType::Right, KeyAction::Press, &mut physics, &mut p);
        send(&mut input, KeyType::Down, KeyAction::Press, &mut physics, &mut p);
        send(&mut input, KeyType::Down, KeyAction::Release, &mut physics, &mut p);
        assert!(!physics.ducking());
        assert_eq!(physics.x_accel(), 1.1);
        assert_eq!(p.state(), PlayerState::Walk);
    }
}
