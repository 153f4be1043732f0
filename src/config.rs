//! Game configuration loaded from RON.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```ron
//! (
//!     flashlight: (radius: 180.0, duration: 4.0),
//!     spawns: (enemy: (500.0, 420.0)),
//! )
//! ```
use serde::Deserialize;
use std::path::Path;

use crate::error::GameError;

// Bounds the overlay framebuffer (side * side RGBA pixels).
const MAX_WINDOW_SIDE: i32 = 8192;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Candle Escape".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed_walk: f32,
    pub speed_sprint: f32,
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { speed_walk: 100.0, speed_sprint: 200.0, radius: 12.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Speed while lit, directly away from the player.
    pub speed_flee: f32,
    /// Homing speed with the flashlight off.
    pub speed_chase_dark: f32,
    /// Homing speed with the flashlight on but the enemy outside its radius.
    pub speed_chase_lit: f32,
    pub radius: f32,
    /// Route around walls with a grid BFS when the player is out of sight.
    pub pathfinding: bool,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed_flee: 80.0,
            speed_chase_dark: 120.0,
            speed_chase_lit: 60.0,
            radius: 12.0,
            pathfinding: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlashlightConfig {
    pub radius: f32,
    /// Full cone aperture in degrees.
    pub angle_deg: f32,
    /// Seconds the flashlight may stay on per activation.
    pub duration: f32,
    /// Seconds before it can be switched on again.
    pub cooldown: f32,
    /// Arc subdivisions of the cone fan.
    pub steps: u32,
    /// Darkness of the overlay outside the cone, 0..1.
    pub overlay_alpha: f32,
    /// Require the enemy to be inside the cone, not just the radius, to be lit.
    pub cone_hit_test: bool,
}

impl Default for FlashlightConfig {
    fn default() -> Self {
        Self {
            radius: 150.0,
            angle_deg: 70.0,
            duration: 5.0,
            cooldown: 1.0,
            steps: 30,
            overlay_alpha: 0.9,
            cone_hit_test: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub catch_distance: f32,
    pub item_radius: f32,
    pub exit_radius: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self { catch_distance: 30.0, item_radius: 18.0, exit_radius: 24.0 }
    }
}

/// Fallback spawn points, used when the map carries no markers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub player: (f32, f32),
    pub enemy: (f32, f32),
    pub candle: (f32, f32),
    pub exit: (f32, f32),
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            player: (100.0, 100.0),
            enemy: (400.0, 400.0),
            candle: (600.0, 150.0),
            exit: (700.0, 500.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub map: String,
    /// Tiled layer to use; first tile layer when unset.
    pub tile_layer: Option<String>,
    /// Tiled gids that block movement.
    pub solid_tiles: Vec<u32>,
    pub tileset: String,
    pub player: String,
    pub enemy: String,
    pub candle: String,
    pub exit: String,
    pub player_scale: f32,
    pub enemy_scale: f32,
    pub item_scale: f32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            map: "assets/level.txt".to_string(),
            tile_layer: None,
            solid_tiles: Vec::new(),
            tileset: "assets/tiles.png".to_string(),
            player: "assets/player.png".to_string(),
            enemy: "assets/shadow_enemy.png".to_string(),
            candle: "assets/candle.png".to_string(),
            exit: "assets/exit.png".to_string(),
            player_scale: 0.2,
            enemy_scale: 0.2,
            item_scale: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub flashlight: FlashlightConfig,
    pub rules: RulesConfig,
    pub spawns: SpawnConfig,
    pub assets: AssetConfig,
}

impl GameConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, GameError> {
        let cfg: Self = ron::from_str(s).map_err(|e| GameError::Parse(format!("config: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), GameError> {
        let (w, h) = (self.window.width, self.window.height);
        if !(1..=MAX_WINDOW_SIDE).contains(&w) || !(1..=MAX_WINDOW_SIDE).contains(&h) {
            return Err(GameError::Parse(format!(
                "config: window size {}x{} outside 1..={}",
                w, h, MAX_WINDOW_SIDE
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Missing file means defaults; a present but broken file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, GameError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let cfg = Self::load(path)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }
}
