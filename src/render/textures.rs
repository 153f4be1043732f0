use raylib::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::AssetConfig;
use crate::core::tilemap::TileMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Player,
    Enemy,
    Candle,
    Exit,
    Tileset,
}

/// GPU textures by key. Anything that failed to load is simply absent and the
/// renderer draws a flat shape instead.
pub struct TextureManager {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl TextureManager {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        assets: &AssetConfig,
        map: &TileMap,
        map_path: &Path,
    ) -> Self {
        let mut tm = Self { textures: HashMap::new() };

        // tileset image is relative to the map file when the map names one
        let tileset_path = map
            .tileset
            .as_ref()
            .and_then(|ts| ts.image.as_ref())
            .map(|img| map_path.parent().unwrap_or(Path::new(".")).join(img))
            .unwrap_or_else(|| PathBuf::from(&assets.tileset));

        let candidates: [(SpriteKey, PathBuf); 5] = [
            (SpriteKey::Player, PathBuf::from(&assets.player)),
            (SpriteKey::Enemy, PathBuf::from(&assets.enemy)),
            (SpriteKey::Candle, PathBuf::from(&assets.candle)),
            (SpriteKey::Exit, PathBuf::from(&assets.exit)),
            (SpriteKey::Tileset, tileset_path),
        ];

        for (key, path) in candidates {
            let Some(path_str) = path.to_str() else { continue };
            if !path.exists() {
                warn!(?key, path = path_str, "texture missing, using fallback shape");
                continue;
            }
            match rl.load_texture(thread, path_str) {
                Ok(tex) => {
                    info!(?key, path = path_str, "loaded texture");
                    tm.textures.insert(key, tex);
                }
                Err(e) => warn!(?key, path = path_str, error = %e, "texture failed to load"),
            }
        }
        tm
    }

    pub fn get(&self, key: SpriteKey) -> Option<&Texture2D> {
        self.textures.get(&key)
    }
}
