//! Time-boxed flashlight and its vision cone.
//!
//! One activation opens a session of `duration` seconds. Inside a session the
//! beam may be switched off and on again, but the session clock keeps running
//! and re-activating does not extend it. When the session ends the beam is
//! forced off and a cooldown starts, during which the toggle is ignored.
use raylib::prelude::Vector2;

use crate::config::FlashlightConfig;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlashlightState {
    Idle,
    Session { remaining: f32, lit: bool },
    Cooldown { remaining: f32 },
}

/// What changed on a tick or toggle, for sound and logging.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlashlightEvent {
    SwitchedOn,
    SwitchedOff,
    /// Session ran out, cooldown began.
    Exhausted,
    /// Cooldown finished.
    Ready,
}

#[derive(Clone, Debug)]
pub struct Flashlight {
    pub state: FlashlightState,
    pub radius: f32,
    /// Full aperture in radians.
    pub angle: f32,
    pub duration: f32,
    pub cooldown: f32,
    pub steps: u32,
}

impl Flashlight {
    pub fn new(cfg: &FlashlightConfig) -> Self {
        Self {
            state: FlashlightState::Idle,
            radius: cfg.radius,
            angle: cfg.angle_deg.to_radians(),
            duration: cfg.duration,
            cooldown: cfg.cooldown,
            steps: cfg.steps.max(1),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, FlashlightState::Session { lit: true, .. })
    }

    pub fn is_cooling_down(&self) -> bool {
        matches!(self.state, FlashlightState::Cooldown { .. })
    }

    /// Seconds left in the current session, if one is running.
    pub fn session_remaining(&self) -> Option<f32> {
        match self.state {
            FlashlightState::Session { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    /// Toggle key pressed. Ignored during cooldown.
    pub fn toggle(&mut self) -> Option<FlashlightEvent> {
        match self.state {
            FlashlightState::Idle => {
                self.state = FlashlightState::Session { remaining: self.duration, lit: true };
                Some(FlashlightEvent::SwitchedOn)
            }
            FlashlightState::Session { remaining, lit } => {
                self.state = FlashlightState::Session { remaining, lit: !lit };
                Some(if lit { FlashlightEvent::SwitchedOff } else { FlashlightEvent::SwitchedOn })
            }
            FlashlightState::Cooldown { .. } => None,
        }
    }

    /// Advance the session or cooldown clock by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Option<FlashlightEvent> {
        match self.state {
            FlashlightState::Idle => None,
            FlashlightState::Session { remaining, lit } => {
                let left = remaining - dt;
                if left <= 0.0 {
                    // leftover time counts against the cooldown
                    let cd = self.cooldown + left;
                    self.state = if cd > 0.0 {
                        FlashlightState::Cooldown { remaining: cd }
                    } else {
                        FlashlightState::Idle
                    };
                    Some(FlashlightEvent::Exhausted)
                } else {
                    self.state = FlashlightState::Session { remaining: left, lit };
                    None
                }
            }
            FlashlightState::Cooldown { remaining } => {
                let left = remaining - dt;
                if left <= 0.0 {
                    self.state = FlashlightState::Idle;
                    Some(FlashlightEvent::Ready)
                } else {
                    self.state = FlashlightState::Cooldown { remaining: left };
                    None
                }
            }
        }
    }

    /// Enemy counts as lit: beam on and within the radius, optionally also inside the cone.
    pub fn lights(&self, origin: Vector2, pointer: Vector2, target: Vector2, require_cone: bool) -> bool {
        if !self.is_active() {
            return false;
        }
        let dist = (target.x - origin.x).hypot(target.y - origin.y);
        if dist >= self.radius {
            return false;
        }
        !require_cone || self.cone_contains(origin, pointer, target)
    }

    /// Angle test against the cone aimed from `origin` at `pointer`.
    pub fn cone_contains(&self, origin: Vector2, pointer: Vector2, p: Vector2) -> bool {
        let dx = p.x - origin.x;
        let dy = p.y - origin.y;
        if dx.hypot(dy) > self.radius {
            return false;
        }
        if dx == 0.0 && dy == 0.0 {
            return true;
        }
        let aim = (pointer.y - origin.y).atan2(pointer.x - origin.x);
        normalize_angle(dy.atan2(dx) - aim).abs() <= self.angle * 0.5
    }

    /// Closed fan polygon: origin followed by `steps + 1` points on the arc,
    /// sweeping from `aim - angle/2` to `aim + angle/2`.
    pub fn cone_polygon(&self, origin: Vector2, pointer: Vector2) -> Vec<Vector2> {
        cone_fan(origin, pointer, self.radius, self.angle, self.steps)
    }
}

pub fn cone_fan(origin: Vector2, pointer: Vector2, radius: f32, angle: f32, steps: u32) -> Vec<Vector2> {
    let aim = (pointer.y - origin.y).atan2(pointer.x - origin.x);
    let left = aim - angle / 2.0;
    let right = aim + angle / 2.0;
    let mut pts = Vec::with_capacity(steps as usize + 2);
    pts.push(origin);
    for i in 0..=steps {
        let a = left + (i as f32 / steps as f32) * (right - left);
        pts.push(Vector2::new(origin.x + radius * a.cos(), origin.y + radius * a.sin()));
    }
    pts
}

/// Wraps an angle into [-pi, pi].
#[inline]
pub fn normalize_angle(mut a: f32) -> f32 {
    while a > std::f32::consts::PI {
        a -= std::f32::consts::TAU;
    }
    while a < -std::f32::consts::PI {
        a += std::f32::consts::TAU;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> Flashlight {
        Flashlight::new(&FlashlightConfig::default())
    }

    #[test]
    fn toggle_turns_on_then_off_within_session() {
        let mut f = light();
        assert!(!f.is_active());
        assert_eq!(f.toggle(), Some(FlashlightEvent::SwitchedOn));
        assert!(f.is_active());
        f.tick(1.0);
        assert_eq!(f.toggle(), Some(FlashlightEvent::SwitchedOff));
        assert!(!f.is_active());
        assert!((f.session_remaining().unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn session_clock_is_not_extended_by_reactivation() {
        let mut f = light();
        f.toggle();
        f.tick(3.0);
        f.toggle();
        f.toggle();
        assert!(f.is_active());
        assert_eq!(f.tick(1.9), None);
        assert_eq!(f.tick(0.2), Some(FlashlightEvent::Exhausted));
        assert!(!f.is_active());
        assert!(f.is_cooling_down());
    }

    #[test]
    fn cooldown_ignores_toggle_then_expires() {
        let mut f = light();
        f.toggle();
        f.tick(5.0);
        assert!(f.is_cooling_down());
        assert_eq!(f.toggle(), None);
        assert!(!f.is_active());
        assert_eq!(f.tick(0.5), None);
        assert_eq!(f.tick(0.6), Some(FlashlightEvent::Ready));
        assert_eq!(f.state, FlashlightState::Idle);
        assert_eq!(f.toggle(), Some(FlashlightEvent::SwitchedOn));
    }

    #[test]
    fn huge_frame_skips_cooldown_entirely() {
        let mut f = light();
        f.toggle();
        assert_eq!(f.tick(10.0), Some(FlashlightEvent::Exhausted));
        assert_eq!(f.state, FlashlightState::Idle);
    }

    #[test]
    fn lit_uses_radius_strictly() {
        let mut f = light();
        let o = Vector2::new(0.0, 0.0);
        let aim = Vector2::new(-10.0, 0.0);
        let near = Vector2::new(149.0, 0.0);
        let edge = Vector2::new(150.0, 0.0);
        assert!(!f.lights(o, aim, near, false));
        f.toggle();
        // behind the cone but inside the radius still counts without the cone test
        assert!(f.lights(o, aim, near, false));
        assert!(!f.lights(o, aim, near, true));
        assert!(!f.lights(o, aim, edge, false));
    }

    #[test]
    fn cone_polygon_shape() {
        let f = light();
        let o = Vector2::new(100.0, 100.0);
        let pts = f.cone_polygon(o, Vector2::new(200.0, 100.0));
        assert_eq!(pts.len(), 32);
        assert_eq!(pts[0], o);
        for p in &pts[1..] {
            let r = (p.x - o.x).hypot(p.y - o.y);
            assert!((r - 150.0).abs() < 1e-3);
        }
        // symmetric about the +x aim
        let first = pts[1];
        let last = pts[31];
        assert!((first.x - last.x).abs() < 1e-3);
        assert!((first.y - 100.0 + (last.y - 100.0)).abs() < 1e-3);
        assert!(first.y < 100.0);
        // middle ray points straight at the pointer
        assert!((pts[16].x - 250.0).abs() < 1e-3);
        assert!((pts[16].y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn cone_contains_respects_half_angle() {
        let f = light();
        let o = Vector2::new(0.0, 0.0);
        let aim = Vector2::new(1.0, 0.0);
        let at = |deg: f32| Vector2::new(100.0 * deg.to_radians().cos(), 100.0 * deg.to_radians().sin());
        assert!(f.cone_contains(o, aim, at(34.0)));
        assert!(f.cone_contains(o, aim, at(-34.0)));
        assert!(!f.cone_contains(o, aim, at(36.0)));
        assert!(!f.cone_contains(o, aim, Vector2::new(160.0, 0.0)));
    }

    #[test]
    fn normalize_wraps_into_pi_range() {
        assert!((normalize_angle(2.5 * std::f32::consts::PI) - 0.5 * std::f32::consts::PI).abs() < 1e-4);
        assert!((normalize_angle(-1.5 * std::f32::consts::PI) - 0.5 * std::f32::consts::PI).abs() < 1e-4);
    }
}
