//! Integration tests for the level loop

use candle_escape::config::GameConfig;
use candle_escape::core::flashlight::FlashlightEvent;
use candle_escape::core::level::{Level, LevelEvent};
use candle_escape::core::process_events::FrameInput;
use candle_escape::core::scene::{Game, Scene};
use candle_escape::core::tilemap::TileMap;
use raylib::prelude::Vector2;
use std::path::Path;

const DT: f32 = 1.0 / 60.0;

fn steer_toward(from: Vector2, to: Vector2, sprint: bool) -> FrameInput {
    FrameInput {
        left: to.x < from.x - 2.0,
        right: to.x > from.x + 2.0,
        up: to.y < from.y - 2.0,
        down: to.y > from.y + 2.0,
        sprint,
        pointer: to,
        ..Default::default()
    }
}

#[test]
fn test_shipped_config_and_map_load() {
    let cfg = GameConfig::load(Path::new("config.ron")).unwrap();
    assert_eq!(cfg.flashlight.radius, 150.0);
    assert_eq!(cfg.assets.map, "assets/level.txt");

    let map = TileMap::load(Path::new(&cfg.assets.map), 32.0, None, &[]).unwrap();
    assert_eq!((map.width, map.height), (25, 19));
    let level = Level::new(map, &cfg);
    assert_eq!(level.player.pos, Vector2::new(3.5 * 32.0, 3.5 * 32.0));
    assert!(level.candle.is_some());
}

#[test]
fn test_full_escape_on_open_field() {
    let mut cfg = GameConfig::default();
    // shadow parked far away and slowed to a crawl
    cfg.spawns.enemy = (780.0, 20.0);
    cfg.enemy.speed_chase_dark = 1.0;
    cfg.enemy.speed_chase_lit = 1.0;
    let mut game = Game::new(Level::new(TileMap::open_field(800.0, 600.0, 32.0), &cfg));

    let mut collected = false;
    for _ in 0..600 {
        let p = game.level.player.pos;
        let target = if game.level.candle_collected { game.level.exit.pos } else { Vector2::new(600.0, 150.0) };
        let events = game.update(&steer_toward(p, target, true), DT);
        collected |= events.contains(&LevelEvent::CandleCollected);
        if game.scene == Scene::LevelCompleted {
            break;
        }
    }
    assert!(collected);
    assert_eq!(game.scene, Scene::LevelCompleted);
    assert_eq!(game.escapes, 1);
}

#[test]
fn test_standing_still_gets_caught_and_restarts() {
    let cfg = GameConfig::default();
    let mut level = Level::new(TileMap::open_field(800.0, 600.0, 32.0), &cfg);
    // 424px at 120px/s
    let mut caught_at = None;
    for frame in 0..600 {
        let events = level.update(&FrameInput::default(), DT);
        if events.contains(&LevelEvent::Caught) {
            caught_at = Some(frame);
            break;
        }
    }
    let frame = caught_at.expect("the shadow should reach an idle player");
    assert!((180..=240).contains(&frame), "caught at frame {}", frame);
    assert_eq!(level.attempts, 2);
    assert_eq!(level.enemy.pos, Vector2::new(400.0, 400.0));
}

#[test]
fn test_shadow_reaches_an_idle_player_from_every_free_cell() {
    let cfg = GameConfig::default();
    let map = TileMap::load(Path::new("assets/level.txt"), 32.0, None, &[]).unwrap();
    let mut stuck = Vec::new();
    for j in 0..map.height {
        for i in 0..map.width {
            if !map.is_cell_free(i, j) {
                continue;
            }
            let mut level = Level::new(map.clone(), &cfg);
            level.enemy.pos = map.cell_centre(i, j);
            // 30 s is well over the longest detour on this floor
            let caught = (0..1800).any(|_| {
                level.update(&FrameInput::default(), DT).contains(&LevelEvent::Caught)
            });
            if !caught {
                stuck.push(((i, j), level.enemy.pos));
            }
        }
    }
    assert!(stuck.is_empty(), "shadow never arrived from {:?}", stuck);
}

#[test]
fn test_flashlight_holds_the_shadow_back_then_runs_out() {
    let cfg = GameConfig::default();
    let mut level = Level::new(TileMap::open_field(800.0, 600.0, 32.0), &cfg);
    level.enemy.pos = Vector2::new(200.0, 100.0);
    let aim = Vector2::new(300.0, 100.0);

    let on = FrameInput { toggle_flashlight: true, pointer: aim, ..Default::default() };
    let hold = FrameInput { pointer: aim, ..Default::default() };

    let events = level.update(&on, DT);
    assert!(events.contains(&LevelEvent::Flashlight(FlashlightEvent::SwitchedOn)));

    // the lit shadow backs off to the edge of the beam and hovers there
    let mut min_dist = f32::MAX;
    let mut exhausted = false;
    for _ in 0..320 {
        let events = level.update(&hold, DT);
        assert!(!events.contains(&LevelEvent::Caught));
        min_dist = min_dist.min(level.enemy.distance_to(level.player.pos));
        if events.contains(&LevelEvent::Flashlight(FlashlightEvent::Exhausted)) {
            exhausted = true;
            break;
        }
    }
    assert!(exhausted, "five second session should end");
    assert!(min_dist > 90.0);
    assert!(level.flashlight.is_cooling_down());

    // toggle during cooldown does nothing
    level.update(&on, DT);
    assert!(!level.flashlight.is_active());
}

#[test]
fn test_walls_stop_the_player() {
    let map = TileMap::parse_text("#####\n#P..#\n#####", 32.0).unwrap();
    let mut cfg = GameConfig::default();
    cfg.spawns.enemy = (10_000.0, 10_000.0);
    let mut level = Level::new(map, &cfg);
    let up = FrameInput { up: true, ..Default::default() };
    for _ in 0..60 {
        level.update(&up, DT);
    }
    // corridor row 1 spans y 32..64, radius 12 keeps the centre at >= 44
    assert!(level.player.pos.y >= 44.0);
    assert!(level.player.pos.y <= 48.0);
}
