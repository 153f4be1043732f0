//! Rendering utilities and the 2D renderer.
//!
//! Re-exports:
//! - `framebuffer`: CPU framebuffer with polygon fill
//! - `vision`: Flashlight darkness mask
//! - `textures`: Sprite and tileset textures
//! - `scene2d`: Tile map, sprites, HUD and completed screen

pub mod framebuffer;
pub mod scene2d;
pub mod textures;
pub mod vision;
