//! Demo AI
//!
//! Plays the game by swiping through the most urgent falling melon. Used by
//! the headless native run and by tests; it only produces pointer events, so
//! it goes through exactly the same input path as a player.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::Simulate;
use super::state::{GamePhase, GameState};
use super::tick::PointerEvent;

/// Half-length of a swipe, in melon radii
const SWIPE_REACH: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks to wait after a swipe before the next one
    pub reaction_ticks: u32,
    /// Chance in [0, 1] that a swipe is on target
    pub accuracy: f32,
    cooldown: u32,
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64, reaction_ticks: u32, accuracy: f32) -> Self {
        Self {
            reaction_ticks,
            accuracy: accuracy.clamp(0.0, 1.0),
            cooldown: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pointer events to feed before the next tick
    pub fn plan(&mut self, state: &GameState) -> Vec<PointerEvent> {
        if state.phase != GamePhase::Playing {
            return Vec::new();
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Vec::new();
        }

        // Lowest falling melon that is still visible
        let bottom = state.viewport.height;
        let target = state
            .projectiles
            .iter()
            .filter(|m| !m.sliced && m.body.vel.y > 0.0 && m.body.pos.y < bottom)
            .max_by(|a, b| {
                a.body
                    .pos
                    .y
                    .partial_cmp(&b.body.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(melon) = target else {
            return Vec::new();
        };

        // Aim where the melon will be after its next update
        let mut aim = melon.body.pos + melon.body.vel;
        if self.rng.random::<f32>() >= self.accuracy {
            // Whiff: swipe well above it
            aim.y -= melon.radius() * 3.0;
        }

        let reach = Vec2::new(melon.radius() * SWIPE_REACH, 0.0);
        self.cooldown = self.reaction_ticks;
        vec![
            PointerEvent::Press(aim - reach),
            PointerEvent::Move(aim + reach),
            PointerEvent::Release,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::entity::{Body, Projectile};
    use crate::sim::tick::{handle_pointer, tick};
    use crate::tuning::{Tuning, Viewport};

    fn playing_state() -> GameState {
        let mut state =
            GameState::new(7, Viewport::new(800.0, 600.0).unwrap(), Tuning::default()).unwrap();
        state.start();
        state
    }

    #[test]
    fn test_idle_outside_playing() {
        let state =
            GameState::new(7, Viewport::new(800.0, 600.0).unwrap(), Tuning::default()).unwrap();
        let mut pilot = Autopilot::new(1, 0, 1.0);
        assert!(pilot.plan(&state).is_empty());
    }

    #[test]
    fn test_perfect_pilot_slices_falling_melon() {
        let mut state = playing_state();
        state.spawn.last_spawn_ms = 0.0;
        state.projectiles.push(Projectile::new(
            99,
            Body::new(Vec2::new(300.0, 200.0), Vec2::new(1.0, 3.0), 0.0, 0.0),
            40.0,
        ));

        let mut pilot = Autopilot::new(1, 5, 1.0);
        for event in pilot.plan(&state) {
            handle_pointer(&mut state, event, FRAME_MS);
        }
        tick(&mut state, FRAME_MS);
        assert_eq!(state.score, 10);

        // Cooling down
        assert!(pilot.plan(&state).is_empty());
    }

    #[test]
    fn test_ignores_rising_melons() {
        let mut state = playing_state();
        state.projectiles.push(Projectile::new(
            1,
            Body::new(Vec2::new(300.0, 400.0), Vec2::new(0.0, -10.0), 0.0, 0.0),
            40.0,
        ));
        let mut pilot = Autopilot::new(1, 0, 1.0);
        assert!(pilot.plan(&state).is_empty());
    }

    #[test]
    fn test_clumsy_pilot_eventually_loses() {
        let mut state = playing_state();
        let mut pilot = Autopilot::new(3, 30, 0.2);
        for frame in 1..=60_000u32 {
            let now = frame as f64 * FRAME_MS;
            for event in pilot.plan(&state) {
                handle_pointer(&mut state, event, now);
            }
            tick(&mut state, now);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.final_score, Some(state.score));
    }
}
