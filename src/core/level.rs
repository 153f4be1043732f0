//! One playable level: spawns, per-frame update and win/lose rules.
use raylib::prelude::Vector2;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::enemy::Enemy;
use crate::core::flashlight::{Flashlight, FlashlightEvent};
use crate::core::player::Player;
use crate::core::process_events::FrameInput;
use crate::core::tilemap::TileMap;

/// A round pickup or trigger zone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Item {
    pub pos: Vector2,
    pub radius: f32,
}

impl Item {
    fn touches(&self, p: Vector2, r: f32) -> bool {
        (self.pos.x - p.x).hypot(self.pos.y - p.y) < self.radius + r
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LevelEvent {
    CandleCollected,
    /// Enemy reached the player; the level has already been reset.
    Caught,
    /// Player reached the exit holding the candle.
    Escaped,
    Flashlight(FlashlightEvent),
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Spawns {
    player: Vector2,
    enemy: Vector2,
    candle: Vector2,
    exit: Vector2,
}

pub struct Level {
    pub map: TileMap,
    cfg: GameConfig,
    spawns: Spawns,
    pub player: Player,
    pub enemy: Enemy,
    /// `None` once collected.
    pub candle: Option<Item>,
    pub exit: Item,
    pub flashlight: Flashlight,
    pub candle_collected: bool,
    /// Last pointer position, where the beam aims.
    pub pointer: Vector2,
    pub enemy_lit: bool,
    pub attempts: u32,
}

impl Level {
    /// Spawn points come from map markers, falling back to the config.
    pub fn new(map: TileMap, cfg: &GameConfig) -> Self {
        let v = |(x, y): (f32, f32)| Vector2::new(x, y);
        let spawns = Spawns {
            player: map.markers.player.unwrap_or_else(|| v(cfg.spawns.player)),
            enemy: map.markers.enemy.unwrap_or_else(|| v(cfg.spawns.enemy)),
            candle: map.markers.candle.unwrap_or_else(|| v(cfg.spawns.candle)),
            exit: map.markers.exit.unwrap_or_else(|| v(cfg.spawns.exit)),
        };
        let mut level = Self {
            map,
            cfg: cfg.clone(),
            spawns,
            player: Player::new(spawns.player, &cfg.player),
            enemy: Enemy::new(spawns.enemy, &cfg.enemy),
            candle: None,
            exit: Item { pos: spawns.exit, radius: cfg.rules.exit_radius },
            flashlight: Flashlight::new(&cfg.flashlight),
            candle_collected: false,
            pointer: spawns.player,
            enemy_lit: false,
            attempts: 0,
        };
        level.reset();
        level
    }

    /// Back to the spawn state; every mutable field is rebuilt.
    pub fn reset(&mut self) {
        self.player = Player::new(self.spawns.player, &self.cfg.player);
        self.enemy = Enemy::new(self.spawns.enemy, &self.cfg.enemy);
        self.candle = Some(Item { pos: self.spawns.candle, radius: self.cfg.rules.item_radius });
        self.exit = Item { pos: self.spawns.exit, radius: self.cfg.rules.exit_radius };
        self.flashlight = Flashlight::new(&self.cfg.flashlight);
        self.candle_collected = false;
        self.enemy_lit = false;
        self.attempts += 1;
        debug!(attempt = self.attempts, "level reset");
    }

    pub fn update(&mut self, input: &FrameInput, dt: f32) -> Vec<LevelEvent> {
        let mut events = Vec::new();
        self.pointer = input.pointer;

        self.player.apply_input(input);

        if let Some(ev) = self.flashlight.tick(dt) {
            debug!(?ev, "flashlight timer");
            events.push(LevelEvent::Flashlight(ev));
        }
        if input.toggle_flashlight {
            if let Some(ev) = self.flashlight.toggle() {
                debug!(?ev, "flashlight toggled");
                events.push(LevelEvent::Flashlight(ev));
            }
        }

        self.enemy_lit = self.flashlight.lights(
            self.player.pos,
            self.pointer,
            self.enemy.pos,
            self.cfg.flashlight.cone_hit_test,
        );
        self.enemy.steer(
            self.player.pos,
            self.enemy_lit,
            self.flashlight.is_active(),
            &self.map,
            dt,
        );

        let map = &self.map;
        let r = self.player.radius;
        self.player.integrate(dt, |x, y| map.is_free_with_radius(x, y, r));
        if !self.enemy.integrate(&self.map, dt) {
            debug!(pos = ?self.enemy.pos, "shadow blocked, detouring over the grid");
        }

        if let Some(candle) = self.candle {
            if candle.touches(self.player.pos, self.player.radius) {
                self.candle = None;
                self.candle_collected = true;
                info!("candle collected");
                events.push(LevelEvent::CandleCollected);
            }
        }

        if self.candle_collected && self.exit.touches(self.player.pos, self.player.radius) {
            info!(attempts = self.attempts, "escaped");
            events.push(LevelEvent::Escaped);
            return events;
        }

        if self.enemy.distance_to(self.player.pos) < self.cfg.rules.catch_distance {
            info!(attempt = self.attempts, "caught by the shadow, restarting");
            self.reset();
            events.push(LevelEvent::Caught);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> Level {
        Level::new(TileMap::open_field(800.0, 600.0, 32.0), &GameConfig::default())
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn starts_from_config_spawns_without_markers() {
        let l = level();
        assert_eq!(l.player.pos, Vector2::new(100.0, 100.0));
        assert_eq!(l.enemy.pos, Vector2::new(400.0, 400.0));
        assert_eq!(l.candle.map(|c| c.pos), Some(Vector2::new(600.0, 150.0)));
        assert_eq!(l.exit.pos, Vector2::new(700.0, 500.0));
        assert!(!l.candle_collected);
        assert_eq!(l.attempts, 1);
    }

    #[test]
    fn map_markers_override_spawns() {
        let map = TileMap::parse_text("#####\n#P.E#\n#C.X#\n#####", 32.0).unwrap();
        let l = Level::new(map, &GameConfig::default());
        assert_eq!(l.player.pos, Vector2::new(48.0, 48.0));
        assert_eq!(l.enemy.pos, Vector2::new(112.0, 48.0));
    }

    #[test]
    fn touching_the_candle_collects_and_removes_it() {
        let mut l = level();
        l.player.pos = Vector2::new(595.0, 150.0);
        let events = l.update(&idle(), 0.016);
        assert!(events.contains(&LevelEvent::CandleCollected));
        assert!(l.candle.is_none());
        assert!(l.candle_collected);
        // second frame does not collect again
        let events = l.update(&idle(), 0.016);
        assert!(!events.contains(&LevelEvent::CandleCollected));
    }

    #[test]
    fn exit_without_candle_does_nothing() {
        let mut l = level();
        l.player.pos = Vector2::new(700.0, 500.0);
        l.enemy.pos = Vector2::new(100.0, 100.0);
        let events = l.update(&idle(), 0.016);
        assert!(!events.contains(&LevelEvent::Escaped));
    }

    #[test]
    fn exit_with_candle_escapes() {
        let mut l = level();
        l.candle = None;
        l.candle_collected = true;
        l.player.pos = Vector2::new(700.0, 500.0);
        l.enemy.pos = Vector2::new(100.0, 100.0);
        let events = l.update(&idle(), 0.016);
        assert_eq!(events, vec![LevelEvent::Escaped]);
    }

    #[test]
    fn caught_restarts_everything() {
        let mut l = level();
        l.candle = None;
        l.candle_collected = true;
        l.flashlight.toggle();
        l.player.pos = Vector2::new(300.0, 300.0);
        l.enemy.pos = Vector2::new(320.0, 300.0);
        // point away so the enemy is not lit and keeps coming
        let input = FrameInput { pointer: Vector2::new(0.0, 300.0), ..Default::default() };
        l.cfg.flashlight.cone_hit_test = true;
        let events = l.update(&input, 0.016);
        assert!(events.contains(&LevelEvent::Caught));
        assert_eq!(l.player.pos, Vector2::new(100.0, 100.0));
        assert_eq!(l.enemy.pos, Vector2::new(400.0, 400.0));
        assert!(l.candle.is_some());
        assert!(!l.candle_collected);
        assert!(!l.flashlight.is_active());
        assert_eq!(l.attempts, 2);
    }

    #[test]
    fn lit_enemy_backs_off() {
        let mut l = level();
        l.enemy.pos = Vector2::new(200.0, 100.0);
        let input = FrameInput {
            toggle_flashlight: true,
            pointer: Vector2::new(300.0, 100.0),
            ..Default::default()
        };
        let events = l.update(&input, 0.1);
        assert!(events.contains(&LevelEvent::Flashlight(FlashlightEvent::SwitchedOn)));
        assert!(l.enemy_lit);
        assert!(l.enemy.pos.x > 200.0);
    }

    #[test]
    fn dark_enemy_closes_in() {
        let mut l = level();
        let before = l.enemy.distance_to(l.player.pos);
        l.update(&idle(), 0.1);
        let after = l.enemy.distance_to(l.player.pos);
        assert!((before - after - 12.0).abs() < 0.1);
    }

    #[test]
    fn flashlight_toggle_is_ignored_while_cooling_down() {
        let mut l = level();
        let on = FrameInput { toggle_flashlight: true, ..Default::default() };
        l.update(&on, 0.016);
        assert!(l.flashlight.is_active());
        // keep the enemy far away for the whole session
        l.cfg.rules.catch_distance = 0.0;
        let events = l.update(&idle(), 5.0);
        assert!(events.contains(&LevelEvent::Flashlight(FlashlightEvent::Exhausted)));
        let events = l.update(&on, 0.016);
        assert!(!events.iter().any(|e| matches!(e, LevelEvent::Flashlight(_))));
        assert!(!l.flashlight.is_active());
    }
}
