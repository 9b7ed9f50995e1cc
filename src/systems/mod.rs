//! Gameplay systems.
//!
//! Submodules overview
//! - [`camera`] – aim the camera at the player and pan toward it
//! - [`input`] – key-event observer driving the player
//! - [`parallax`] – scroll backgrounds by the camera position
//! - [`physics`] – tile collisions and movement of the player
//! - [`render`] – queue the frame's draw commands
//! - [`time`] – update simulation time and delta

pub mod camera;
pub mod input;
pub mod parallax;
pub mod physics;
pub mod render;
pub mod time;
