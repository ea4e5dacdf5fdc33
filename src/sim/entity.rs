//! Melon entities
//!
//! Whole melons ([`Projectile`]) fly until they are cut or fall out of view.
//! Cut melons become two fading halves ([`Split`]).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Shared kinematic state (positions in screen units, velocities per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cosmetic rotation (radians)
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, rotation: f32, rotation_speed: f32) -> Self {
        Self {
            pos,
            vel,
            rotation,
            rotation_speed,
        }
    }

    /// One explicit Euler step: move, then accelerate downward
    #[inline]
    pub fn integrate(&mut self, gravity: f32) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.rotation += self.rotation_speed;
    }
}

/// Common behaviour of everything that falls through the viewport
pub trait Simulate {
    fn body(&self) -> &Body;
    fn radius(&self) -> f32;

    /// Advance one tick
    fn update(&mut self, gravity: f32);

    /// Fully below the bottom edge (screen y grows downward)
    fn is_off_screen(&self, viewport_height: f32) -> bool {
        self.body().pos.y > viewport_height + self.radius()
    }
}

/// A whole melon in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
    pub radius: f32,
    /// Set once when cut; a sliced melon leaves the live set that same tick
    pub sliced: bool,
}

impl Projectile {
    pub fn new(id: u32, body: Body, radius: f32) -> Self {
        Self {
            id,
            body,
            radius,
            sliced: false,
        }
    }

    /// Cut the melon into its two halves. No-op on an already cut melon.
    pub fn slice(&mut self, tuning: &Tuning) -> Option<[Split; 2]> {
        if self.sliced {
            return None;
        }
        self.sliced = true;
        Some([
            Split::from_parent(self, true, tuning),
            Split::from_parent(self, false, tuning),
        ])
    }
}

impl Simulate for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, gravity: f32) {
        self.body.integrate(gravity);
    }
}

/// One fading half of a cut melon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Split {
    /// Id of the melon this half came from
    pub parent_id: u32,
    pub body: Body,
    pub radius: f32,
    pub is_left: bool,
    /// Opacity in [0, 1]
    pub alpha: f32,
    fade: f32,
}

impl Split {
    /// Left halves kick left and spin counter-clockwise, right halves mirror
    pub fn from_parent(parent: &Projectile, is_left: bool, tuning: &Tuning) -> Self {
        let side = if is_left { -1.0 } else { 1.0 };
        let vel = Vec2::new(
            parent.body.vel.x + side * tuning.split_kick_x,
            parent.body.vel.y - tuning.split_kick_y,
        );
        Self {
            parent_id: parent.id,
            body: Body::new(
                parent.body.pos,
                vel,
                parent.body.rotation,
                side * tuning.split_spin,
            ),
            radius: parent.radius,
            is_left,
            alpha: 1.0,
            fade: tuning.split_fade,
        }
    }

    /// Faded out or fallen out of view
    pub fn is_finished(&self, viewport_height: f32) -> bool {
        self.alpha <= 0.0 || self.is_off_screen(viewport_height)
    }
}

impl Simulate for Split {
    fn body(&self) -> &Body {
        &self.body
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, gravity: f32) {
        self.body.integrate(gravity);
        self.alpha = (self.alpha - self.fade).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn melon() -> Projectile {
        Projectile::new(
            7,
            Body::new(Vec2::new(100.0, 500.0), Vec2::new(1.5, -12.0), 0.7, 0.05),
            40.0,
        )
    }

    #[test]
    fn test_projectile_update_integrates() {
        let mut m = melon();
        m.update(0.5);
        assert_eq!(m.body.pos, Vec2::new(101.5, 488.0));
        assert_eq!(m.body.vel, Vec2::new(1.5, -11.5));
        assert!((m.body.rotation - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_off_screen_threshold() {
        let mut m = melon();
        m.body.pos.y = 600.0 + 40.0;
        assert!(!m.is_off_screen(600.0));
        m.body.pos.y = 600.0 + 40.0 + 1.0;
        assert!(m.is_off_screen(600.0));
    }

    #[test]
    fn test_slice_produces_two_halves() {
        let tuning = Tuning::default();
        let mut m = melon();
        let [left, right] = m.slice(&tuning).unwrap();
        assert!(m.sliced);

        assert!(left.is_left);
        assert!(!right.is_left);
        assert_eq!(left.body.vel, Vec2::new(1.5 - 3.0, -12.0 - 2.0));
        assert_eq!(right.body.vel, Vec2::new(1.5 + 3.0, -12.0 - 2.0));
        assert_eq!(left.body.rotation_speed, -0.2);
        assert_eq!(right.body.rotation_speed, 0.2);
        assert_eq!(left.body.rotation, 0.7);
        assert_eq!(left.body.pos, m.body.pos);
        assert_eq!(left.parent_id, 7);
        assert_eq!(left.alpha, 1.0);
    }

    #[test]
    fn test_slice_twice_is_noop() {
        let tuning = Tuning::default();
        let mut m = melon();
        assert!(m.slice(&tuning).is_some());
        assert!(m.slice(&tuning).is_none());
    }

    #[test]
    fn test_split_fades_out() {
        let tuning = Tuning::default();
        let mut m = melon();
        // Keep it on screen while fading
        m.body.vel = Vec2::ZERO;
        let [mut half, _] = m.slice(&tuning).unwrap();
        let mut ticks = 0;
        while !half.is_finished(1.0e9) {
            half.update(0.0);
            ticks += 1;
            assert!(half.alpha >= 0.0);
        }
        // 1.0 / 0.02 = 50, allow one tick of float slack
        assert!((50..=51).contains(&ticks), "faded after {ticks} ticks");
    }

    #[test]
    fn test_split_finished_when_off_screen() {
        let tuning = Tuning::default();
        let mut m = melon();
        let [mut half, _] = m.slice(&tuning).unwrap();
        half.body.pos.y = 800.0 + 41.0;
        assert!(half.is_finished(800.0));
    }
}
