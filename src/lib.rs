//! SunnyLand platformer core.
//!
//! The simulation of a side-scrolling 2D platformer: an engine loop driving
//! scenes, tile-grid collision and player physics, a player state machine,
//! and camera/parallax scrolling. Graphics, keyboard, clock and frame pacing
//! are reached only through the capability traits in [`platform`], so the
//! whole game runs headless against the doubles in [`platform::testing`].

pub mod components;
pub mod engine;
pub mod error;
pub mod events;
pub mod game;
pub mod platform;
pub mod resources;
pub mod scenes;
pub mod systems;
