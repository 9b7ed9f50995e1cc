//! ECS resources and the documents they are loaded from.
//!
//! Overview
//! - `camera` – follow camera and its offset from the player
//! - `gameconfig` – settings loaded from the INI configuration file
//! - `input` – keys currently held, built from key events
//! - `mapdocument` – Tiled-style JSON map documents
//! - `renderqueue` – draw commands queued by systems for the graphics backend
//! - `screensize` – visible area in world units
//! - `spritesheet` – JSON lists of named sprite strips
//! - `tilemap` – tile layers, spawn points and collision probes
//! - `worldtime` – simulation time and delta
pub mod camera;
pub mod gameconfig;
pub mod input;
pub mod mapdocument;
pub mod renderqueue;
pub mod screensize;
pub mod spritesheet;
pub mod tilemap;
pub mod worldtime;
