//! ECS components and the value types they are built from.
//!
//! Submodules overview:
//! - [`collisionbox`] – solid part of an entity relative to its position
//! - [`mapposition`] – world-space position of an entity
//! - [`parallax`] – scrolling background layer
//! - [`player`] – visual state machine over the five player sprites
//! - [`playerphysics`] – speed integration, gravity, acceleration
//! - [`sprite`] – animated image strip (not a component on its own)
//! - [`zindex`] – draw order of background layers

pub mod collisionbox;
pub mod mapposition;
pub mod parallax;
pub mod player;
pub mod playerphysics;
pub mod sprite;
pub mod zindex;
