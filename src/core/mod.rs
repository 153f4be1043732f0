//! Core game types and logic (data, input, AI, world).
//!
//! Re-exports:
//! - `player`: Player data and movement
//! - `enemy`: Shadow steering and wall sliding
//! - `flashlight`: Timed beam and vision cone geometry
//! - `tilemap`: Map loading and grid queries
//! - `level`: Per-frame update and level rules
//! - `scene`: Level / completed screen switching
//! - `process_events`: Input sampling

pub mod enemy;
pub mod flashlight;
pub mod level;
pub mod player;
pub mod process_events;
pub mod scene;
pub mod tilemap;
