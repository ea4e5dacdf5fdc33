//! Spawn pacing and difficulty
//!
//! Melons are launched on a timer whose interval shrinks every time the
//! score lands exactly on a multiple of the difficulty step (every fifth
//! slice with the default 10/50 balance).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Projectile};
use crate::tuning::{Tuning, Viewport};

/// Decides when to launch the next melon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnController {
    /// Frame-clock time of the last launch (ms)
    pub last_spawn_ms: f64,
    /// Current gap between launches (ms), never below the tuned minimum
    pub current_interval_ms: f64,
    min_interval_ms: f64,
    initial_interval_ms: f64,
    step_ms: f64,
    score_step: u64,
}

impl SpawnController {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            last_spawn_ms: 0.0,
            current_interval_ms: tuning.spawn_interval_ms,
            min_interval_ms: tuning.min_spawn_interval_ms,
            initial_interval_ms: tuning.spawn_interval_ms,
            step_ms: tuning.spawn_interval_step_ms,
            score_step: tuning.difficulty_score_step,
        }
    }

    /// Back to the opening pace with the timer at zero
    pub fn reset(&mut self) {
        self.last_spawn_ms = 0.0;
        self.current_interval_ms = self.initial_interval_ms;
    }

    /// Returns true (and restarts the timer) once more than the current
    /// interval has elapsed since the last launch
    pub fn should_spawn(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_spawn_ms > self.current_interval_ms {
            self.last_spawn_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Difficulty hook, called with the score right after a slice.
    /// Returns the new interval if it changed.
    pub fn on_slice(&mut self, score: u64) -> Option<f64> {
        if score % self.score_step != 0 || self.current_interval_ms <= self.min_interval_ms {
            return None;
        }
        self.current_interval_ms = (self.current_interval_ms - self.step_ms).max(self.min_interval_ms);
        Some(self.current_interval_ms)
    }
}

/// Launch a melon from just below the bottom edge with a randomised upward
/// velocity
pub fn launch_projectile<R: Rng>(
    id: u32,
    rng: &mut R,
    viewport: Viewport,
    tuning: &Tuning,
) -> Projectile {
    let margin = tuning.spawn_margin;
    let x = rng.random_range(margin..=viewport.width - margin);
    let y = viewport.height + tuning.melon_radius;

    let vx = rng.random_range(-tuning.launch_jitter_x..=tuning.launch_jitter_x);
    let vy = tuning.launch_velocity_y
        + rng.random_range(-tuning.launch_jitter_y..=tuning.launch_jitter_y);

    let rotation = rng.random_range(0.0..std::f32::consts::TAU);
    let rotation_speed = rng.random_range(-tuning.melon_spin_range..=tuning.melon_spin_range);

    Projectile::new(
        id,
        Body::new(Vec2::new(x, y), Vec2::new(vx, vy), rotation, rotation_speed),
        tuning.melon_radius,
    )
}
