//! Candle Escape: a single-level 2D stealth chase on raylib.
//!
//! Modules:
//! - `core`: level rules, player, shadow enemy, flashlight, tile map, scenes
//! - `render`: framebuffer overlay, textures and 2D drawing
//! - `audio`: optional sound effects
//! - `cli`: command-line flags
//! - `config`: RON game configuration
//! - `logging`: tracing subscriber setup
//! - `error`: library error type

pub mod audio;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod render;

pub use config::GameConfig;
pub use error::GameError;
