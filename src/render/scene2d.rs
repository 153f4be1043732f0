//! Top-down drawing of the level, HUD and completed screen.
use raylib::prelude::*;

use crate::core::enemy::EnemyMode;
use crate::core::level::Level;
use crate::core::tilemap::{TileMap, WALL_GID};
use crate::render::textures::{SpriteKey, TextureManager};

const FLOOR_FILL: Color = Color::new(38, 34, 44, 255);
const WALL_FILL: Color = Color::new(84, 78, 96, 255);
const PLAYER_FILL: Color = Color::new(240, 220, 150, 255);
const SHADOW_FILL: Color = Color::new(90, 20, 120, 255);
const CANDLE_FILL: Color = Color::new(255, 200, 60, 255);
const EXIT_FILL: Color = Color::new(40, 190, 90, 255);

pub fn draw_tilemap(d: &mut RaylibDrawHandle, map: &TileMap, texman: &TextureManager) {
    let tileset = texman.get(SpriteKey::Tileset);
    let first_gid = map.tileset.as_ref().map(|t| t.first_gid).unwrap_or(1);
    for j in 0..map.height {
        for i in 0..map.width {
            let gid = map.gid(i, j);
            if gid == 0 {
                continue;
            }
            let x = i as f32 * map.tile_w;
            let y = j as f32 * map.tile_h;
            match tileset {
                Some(tex) if gid >= first_gid => {
                    let cols = map
                        .tileset
                        .as_ref()
                        .and_then(|t| t.columns)
                        .unwrap_or((tex.width as f32 / map.tile_w).max(1.0) as u32)
                        .max(1);
                    let local = gid - first_gid;
                    let src = Rectangle::new(
                        (local % cols) as f32 * map.tile_w,
                        (local / cols) as f32 * map.tile_h,
                        map.tile_w,
                        map.tile_h,
                    );
                    d.draw_texture_rec(tex, src, Vector2::new(x, y), Color::WHITE);
                }
                _ => {
                    let fill = if map.is_cell_free(i, j) && gid != WALL_GID { FLOOR_FILL } else { WALL_FILL };
                    d.draw_rectangle(x as i32, y as i32, map.tile_w.ceil() as i32, map.tile_h.ceil() as i32, fill);
                }
            }
        }
    }
}

/// Sprite centred on `pos`, or a filled circle when the texture is missing.
fn draw_sprite(
    d: &mut RaylibDrawHandle,
    texman: &TextureManager,
    key: SpriteKey,
    pos: Vector2,
    scale: f32,
    fallback_radius: f32,
    fallback: Color,
) {
    match texman.get(key) {
        Some(tex) => {
            let w = tex.width as f32 * scale;
            let h = tex.height as f32 * scale;
            d.draw_texture_ex(tex, Vector2::new(pos.x - w * 0.5, pos.y - h * 0.5), 0.0, scale, Color::WHITE);
        }
        None => d.draw_circle_v(pos, fallback_radius, fallback),
    }
}

pub struct SpriteScales {
    pub player: f32,
    pub enemy: f32,
    pub item: f32,
}

pub fn draw_entities(d: &mut RaylibDrawHandle, level: &Level, texman: &TextureManager, scales: &SpriteScales) {
    draw_sprite(d, texman, SpriteKey::Exit, level.exit.pos, scales.item, level.exit.radius, EXIT_FILL);
    if let Some(candle) = level.candle {
        draw_sprite(d, texman, SpriteKey::Candle, candle.pos, scales.item, candle.radius * 0.6, CANDLE_FILL);
    }
    draw_sprite(d, texman, SpriteKey::Enemy, level.enemy.pos, scales.enemy, level.enemy.radius, SHADOW_FILL);
    draw_sprite(d, texman, SpriteKey::Player, level.player.pos, scales.player, level.player.radius, PLAYER_FILL);
}

/// Collision shapes, like the engine's physics debug view.
pub fn draw_debug(d: &mut RaylibDrawHandle, level: &Level, catch_distance: f32) {
    let p = level.player.pos;
    let e = level.enemy.pos;
    d.draw_circle_lines(p.x as i32, p.y as i32, level.player.radius, Color::GREEN);
    d.draw_circle_lines(p.x as i32, p.y as i32, catch_distance, Color::RED);
    d.draw_circle_lines(p.x as i32, p.y as i32, level.flashlight.radius, Color::YELLOW);
    d.draw_circle_lines(e.x as i32, e.y as i32, level.enemy.radius, Color::MAGENTA);
    if let Some(c) = level.candle {
        d.draw_circle_lines(c.pos.x as i32, c.pos.y as i32, c.radius, Color::ORANGE);
    }
    d.draw_circle_lines(level.exit.pos.x as i32, level.exit.pos.y as i32, level.exit.radius, Color::LIME);
    d.draw_line_v(e, Vector2::new(e.x + level.enemy.vel.x * 0.5, e.y + level.enemy.vel.y * 0.5), Color::SKYBLUE);
    let mode = match level.enemy.mode {
        EnemyMode::Chase => "CHASE",
        EnemyMode::Flee => "FLEE",
    };
    d.draw_text(mode, e.x as i32 - 20, e.y as i32 - 30, 10, Color::WHITE);
}

pub fn draw_hud(d: &mut RaylibDrawHandle, level: &Level, fps: u32) {
    d.draw_text(&format!("FPS: {}", fps), 10, 10, 20, Color::WHITE);

    let light = &level.flashlight;
    let (label, color) = match light.session_remaining() {
        Some(left) if light.is_active() => (format!("FLASHLIGHT: ON {:.1}s", left.max(0.0)), Color::YELLOW),
        Some(left) => (format!("FLASHLIGHT: OFF {:.1}s", left.max(0.0)), Color::GOLD),
        None if light.is_cooling_down() => ("FLASHLIGHT: RECHARGING".to_string(), Color::GRAY),
        None => ("FLASHLIGHT: READY [F]".to_string(), Color::LIGHTGRAY),
    };
    d.draw_text(&label, 10, 36, 20, color);

    let candle = if level.candle_collected { "CANDLE: YES" } else { "CANDLE: NO" };
    d.draw_text(candle, 10, 62, 20, if level.candle_collected { CANDLE_FILL } else { Color::LIGHTGRAY });

    if level.player.sprinting {
        d.draw_text("SPRINT", 10, 88, 20, Color::RED);
    }
    d.draw_text(&format!("ATTEMPT {}", level.attempts), 10, 114, 20, Color::LIGHTGRAY);
}

pub fn draw_level_completed(d: &mut RaylibDrawHandle, escapes: u32) {
    d.clear_background(Color::BLACK);
    d.draw_text("You escaped this floor!", 200, 250, 32, Color::WHITE);
    d.draw_text("Press SPACE to play again", 230, 300, 20, Color::LIGHTGRAY);
    d.draw_text(&format!("Escapes: {}", escapes), 230, 330, 20, Color::GRAY);
}
