//! Player data and movement.
use raylib::prelude::Vector2;

use crate::config::PlayerConfig;
use crate::core::process_events::FrameInput;

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vector2,
    pub vel: Vector2,
    pub radius: f32,
    pub speed_walk: f32,
    pub speed_sprint: f32,
    pub sprinting: bool,
}

impl Player {
    pub fn new(pos: Vector2, cfg: &PlayerConfig) -> Self {
        Self {
            pos,
            vel: Vector2::new(0.0, 0.0),
            radius: cfg.radius,
            speed_walk: cfg.speed_walk,
            speed_sprint: cfg.speed_sprint,
            sprinting: false,
        }
    }

    /// Velocity starts at zero each frame and each held key overwrites its axis,
    /// so right beats left and down beats up. Diagonals are not normalised.
    pub fn apply_input(&mut self, input: &FrameInput) {
        self.sprinting = input.sprint;
        let speed = if input.sprint { self.speed_sprint } else { self.speed_walk };
        self.vel = Vector2::new(0.0, 0.0);
        if input.left {
            self.vel.x = -speed;
        }
        if input.right {
            self.vel.x = speed;
        }
        if input.up {
            self.vel.y = -speed;
        }
        if input.down {
            self.vel.y = speed;
        }
    }

    /// Moves by `vel * dt`, one axis at a time so walls slide instead of stick.
    pub fn integrate<F: Fn(f32, f32) -> bool>(&mut self, dt: f32, is_free: F) {
        let nx = self.pos.x + self.vel.x * dt;
        if is_free(nx, self.pos.y) {
            self.pos.x = nx;
        }
        let ny = self.pos.y + self.vel.y * dt;
        if is_free(self.pos.x, ny) {
            self.pos.y = ny;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Vector2::new(100.0, 100.0), &PlayerConfig::default())
    }

    #[test]
    fn no_keys_means_standing_still() {
        let mut p = player();
        p.vel = Vector2::new(50.0, 50.0);
        p.apply_input(&FrameInput::default());
        assert_eq!(p.vel, Vector2::new(0.0, 0.0));
    }

    #[test]
    fn opposite_keys_resolve_to_the_later_axis() {
        let mut p = player();
        p.apply_input(&FrameInput { left: true, right: true, up: true, down: true, ..Default::default() });
        assert_eq!(p.vel, Vector2::new(100.0, 100.0));
    }

    #[test]
    fn sprint_doubles_speed_and_diagonals_stay_unnormalised() {
        let mut p = player();
        p.apply_input(&FrameInput { left: true, up: true, sprint: true, ..Default::default() });
        assert_eq!(p.vel, Vector2::new(-200.0, -200.0));
        assert!(p.sprinting);
    }

    #[test]
    fn blocked_axis_slides_along_the_other() {
        let mut p = player();
        p.vel = Vector2::new(100.0, 100.0);
        // wall at x > 105
        p.integrate(0.5, |x, _y| x <= 105.0);
        assert_eq!(p.pos, Vector2::new(100.0, 150.0));
    }
}
