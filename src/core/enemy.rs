//! Shadow enemy steering: flee from the beam, otherwise home in on the player.
use raylib::prelude::Vector2;

use crate::config::EnemyConfig;
use crate::core::tilemap::TileMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnemyMode {
    Chase,
    Flee,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vector2,
    pub vel: Vector2,
    pub radius: f32,
    pub mode: EnemyMode,
    speed_flee: f32,
    speed_chase_dark: f32,
    speed_chase_lit: f32,
    pathfinding: bool,
    // grid waypoint while the player is out of sight
    waypoint: Option<Vector2>,
    path_recalc_timer: f32,
    // while > 0 the chase follows the grid even with the player in view
    detour_timer: f32,
}

const PATH_RECALC_SECS: f32 = 0.25;
const DETOUR_SECS: f32 = 0.5;

impl Enemy {
    pub fn new(pos: Vector2, cfg: &EnemyConfig) -> Self {
        Self {
            pos,
            vel: Vector2::new(0.0, 0.0),
            radius: cfg.radius,
            mode: EnemyMode::Chase,
            speed_flee: cfg.speed_flee,
            speed_chase_dark: cfg.speed_chase_dark,
            speed_chase_lit: cfg.speed_chase_lit,
            pathfinding: cfg.pathfinding,
            waypoint: None,
            path_recalc_timer: 0.0,
            detour_timer: 0.0,
        }
    }

    pub fn distance_to(&self, p: Vector2) -> f32 {
        (self.pos.x - p.x).hypot(self.pos.y - p.y)
    }

    /// Chooses this frame's velocity.
    ///
    /// `lit`: the beam is on and reaches the enemy. `flashlight_on`: the beam
    /// is on at all, which slows the chase even when the enemy is outside it.
    pub fn steer(&mut self, player: Vector2, lit: bool, flashlight_on: bool, map: &TileMap, dt: f32) {
        self.detour_timer = (self.detour_timer - dt).max(0.0);
        if lit {
            self.mode = EnemyMode::Flee;
            self.waypoint = None;
            self.vel = scaled_direction(self.pos, player, -self.speed_flee);
            return;
        }

        self.mode = EnemyMode::Chase;
        let speed = if flashlight_on { self.speed_chase_lit } else { self.speed_chase_dark };
        let target = self.chase_target(player, map, dt);
        self.vel = scaled_direction(self.pos, target, speed);
    }

    /// Straight at the player while the whole body fits along the line,
    /// otherwise the next BFS cell. A cell that cannot be reached in a
    /// straight line is approached via the centre of the current cell.
    fn chase_target(&mut self, player: Vector2, map: &TileMap, dt: f32) -> Vector2 {
        if !self.pathfinding
            || (self.detour_timer <= 0.0 && map.sweep_clear(self.pos, player, self.radius))
        {
            self.waypoint = None;
            return player;
        }
        self.path_recalc_timer -= dt;
        if self.waypoint.is_none() || self.path_recalc_timer <= 0.0 {
            self.path_recalc_timer = PATH_RECALC_SECS;
            self.waypoint = map.next_step_towards(self.pos, player);
        }
        match self.waypoint {
            Some(wp) if map.sweep_clear(self.pos, wp, self.radius) => wp,
            Some(_) => match map.cell_of(self.pos.x, self.pos.y) {
                Some((i, j)) => map.cell_centre(i, j),
                None => player,
            },
            None => player,
        }
    }

    /// Applies velocity with per-axis wall sliding. Returns false when walls
    /// ate most of the step; the chase then detours over the grid for a while.
    pub fn integrate(&mut self, map: &TileMap, dt: f32) -> bool {
        let start = self.pos;
        let nx = self.pos.x + self.vel.x * dt;
        if map.is_free_with_radius(nx, self.pos.y, self.radius) {
            self.pos.x = nx;
        }
        let ny = self.pos.y + self.vel.y * dt;
        if map.is_free_with_radius(self.pos.x, ny, self.radius) {
            self.pos.y = ny;
        }
        if let Some(wp) = self.waypoint {
            // reached the cell centre, ask for the next one
            if self.distance_to(wp) < self.radius {
                self.waypoint = None;
            }
        }

        let wanted = self.vel.x.hypot(self.vel.y) * dt;
        let moved = (self.pos.x - start.x).hypot(self.pos.y - start.y);
        let progressed = wanted <= f32::EPSILON || moved >= wanted * 0.5;
        if !progressed && self.pathfinding {
            self.detour_timer = DETOUR_SECS;
            self.waypoint = None;
        }
        progressed
    }
}

/// `speed` along from→to; negative speed points away. Zero when the points coincide.
fn scaled_direction(from: Vector2, to: Vector2, speed: f32) -> Vector2 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let dist = dx.hypot(dy);
    if dist <= f32::EPSILON {
        return Vector2::new(0.0, 0.0);
    }
    Vector2::new(dx / dist * speed, dy / dist * speed)
}
