//! Per-frame simulation step
//!
//! Core game loop that advances the session by one tick, plus the pointer
//! input boundary that feeds the trail between ticks.

use glam::Vec2;

use super::collision::projectile_hits_trail;
use super::entity::Simulate;
use super::state::{GameEvent, GamePhase, GameState};

/// Normalised pointer/touch signal in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Vec2),
    Move(Vec2),
    Release,
    Leave,
}

/// Feed one pointer signal into the trail. Press and move only count while
/// playing; release and leave always apply.
pub fn handle_pointer(state: &mut GameState, event: PointerEvent, now_ms: f64) {
    let playing = state.phase == GamePhase::Playing;
    match event {
        PointerEvent::Press(point) if playing => state.trail.begin(point),
        PointerEvent::Move(point) if playing => state.trail.extend(point),
        PointerEvent::Release => {
            state.trail.end(now_ms);
        }
        PointerEvent::Leave => state.trail.cancel(),
        _ => {}
    }
}

/// Advance the session by one frame. `now_ms` is the frame clock. No-op
/// unless playing.
pub fn tick(state: &mut GameState, now_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.trail.poll(now_ms);

    if state.spawn.should_spawn(now_ms) {
        state.spawn_projectile();
    }

    let mut run_over = false;
    {
        let GameState {
            tuning,
            viewport,
            score,
            lives,
            projectiles,
            splits,
            trail,
            spawn,
            events,
            ..
        } = &mut *state;

        projectiles.retain_mut(|melon| {
            // The run ended earlier in this tick: leave the rest untouched
            if run_over {
                return true;
            }

            melon.update(tuning.gravity);

            if projectile_hits_trail(melon, trail) {
                if let Some(halves) = melon.slice(tuning) {
                    *score += tuning.points_per_slice;
                    events.push(GameEvent::Sliced {
                        id: melon.id,
                        score: *score,
                    });
                    log::trace!("Sliced melon {} (score {})", melon.id, score);

                    if let Some(interval_ms) = spawn.on_slice(*score) {
                        log::debug!("Spawn interval now {interval_ms} ms");
                        events.push(GameEvent::DifficultyIncreased { interval_ms });
                    }
                    splits.extend(halves);
                }
            }

            // Cut melons leave right away, wherever they are
            if melon.sliced {
                return false;
            }

            if melon.is_off_screen(viewport.height) {
                *lives = lives.saturating_sub(1);
                events.push(GameEvent::Missed {
                    id: melon.id,
                    lives: *lives,
                });
                log::debug!("Missed melon {} ({} lives left)", melon.id, lives);
                run_over = *lives == 0;
                return false;
            }

            true
        });

        if !run_over {
            splits.retain_mut(|half| {
                half.update(tuning.gravity);
                !half.is_finished(viewport.height)
            });
        }
    }

    if run_over {
        state.end_run();
    }
}
