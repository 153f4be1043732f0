// main.rs
use anyhow::{Context, Result};
use raylib::prelude::*;
use std::path::PathBuf;
use tracing::{info, warn};

use candle_escape::audio::AudioManager;
use candle_escape::cli::parse_args;
use candle_escape::config::GameConfig;
use candle_escape::core::level::Level;
use candle_escape::core::process_events::process_events;
use candle_escape::core::scene::{Game, Scene};
use candle_escape::core::tilemap::TileMap;
use candle_escape::logging;
use candle_escape::render::scene2d::{
    draw_debug, draw_entities, draw_hud, draw_level_completed, draw_tilemap, SpriteScales,
};
use candle_escape::render::textures::TextureManager;
use candle_escape::render::vision::VisionOverlay;

// Tile size in world units for text maps
pub const BLOCK: f32 = 32.0;

// Longest step the simulation takes; window drags and hitches get clamped
const MAX_DT: f32 = 0.1;

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    let cfg = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;

    let map_path = cli.map.clone().unwrap_or_else(|| PathBuf::from(&cfg.assets.map));
    let map = if map_path.exists() {
        TileMap::load(&map_path, BLOCK, cfg.assets.tile_layer.as_deref(), &cfg.assets.solid_tiles)
            .with_context(|| format!("loading map {}", map_path.display()))?
    } else {
        warn!(path = %map_path.display(), "map not found, playing on an open field");
        TileMap::open_field(cfg.window.width as f32, cfg.window.height as f32, BLOCK)
    };

    let (mut window, raylib_thread) = raylib::init()
        .size(cfg.window.width, cfg.window.height)
        .title(&cfg.window.title)
        .build();
    window.set_target_fps(cfg.window.target_fps);

    let texman = TextureManager::new(&mut window, &raylib_thread, &cfg.assets, &map, &map_path);
    let mut overlay = VisionOverlay::new(
        &mut window,
        &raylib_thread,
        cfg.window.width as u32,
        cfg.window.height as u32,
        cfg.flashlight.overlay_alpha,
    )?;

    let mut audio = AudioManager::new();
    if let Some(a) = audio.as_mut() {
        a.load_sfx_auto();
        a.play_music_loop_auto();
    }

    let scales = SpriteScales {
        player: cfg.assets.player_scale,
        enemy: cfg.assets.enemy_scale,
        item: cfg.assets.item_scale,
    };
    let mut game = Game::new(Level::new(map, &cfg));
    let mut debug_view = false;
    info!("level ready");

    while !window.window_should_close() {
        if window.is_key_pressed(KeyboardKey::KEY_F3) {
            debug_view = !debug_view;
        }

        let dt = window.get_frame_time().min(MAX_DT);
        let input = process_events(&window);
        let events = game.update(&input, dt);
        if let Some(a) = audio.as_ref() {
            a.handle_events(&events);
        }

        if game.scene == Scene::Level {
            overlay.update(&game.level.flashlight, game.level.player.pos, game.level.pointer);
        }

        let fps_now = window.get_fps();
        let mut d = window.begin_drawing(&raylib_thread);
        match game.scene {
            Scene::Level => {
                d.clear_background(Color::BLACK);
                draw_tilemap(&mut d, &game.level.map, &texman);
                draw_entities(&mut d, &game.level, &texman, &scales);
                overlay.draw(&mut d);
                if debug_view {
                    draw_debug(&mut d, &game.level, cfg.rules.catch_distance);
                }
                draw_hud(&mut d, &game.level, fps_now);
            }
            Scene::LevelCompleted => draw_level_completed(&mut d, game.escapes),
        }
    }

    info!(escapes = game.escapes, attempts = game.level.attempts, "bye");
    Ok(())
}
