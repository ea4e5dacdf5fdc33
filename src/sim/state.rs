//! Game state and session lifecycle
//!
//! One [`GameState`] is one game session: every collection, counter and the
//! RNG live here. The per-frame update lives in [`super::tick`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Projectile, Split};
use super::spawn::{SpawnController, launch_projectile};
use super::trail::Trail;
use crate::error::ConfigError;
use crate::tuning::{Tuning, Viewport};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, simulation frozen until restart
    GameOver,
}

/// Things the host may want to react to (HUD, logging). Never fed back into
/// the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned { id: u32 },
    Sliced { id: u32, score: u64 },
    DifficultyIncreased { interval_ms: f64 },
    Missed { id: u32, lives: u32 },
    GameOver { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Score at the moment the run ended
    pub final_score: Option<u64>,
    /// Simulation tick counter (ticks while playing)
    pub time_ticks: u64,
    /// Whole melons in flight
    pub projectiles: Vec<Projectile>,
    /// Fading halves
    pub splits: Vec<Split>,
    pub trail: Trail,
    pub spawn: SpawnController,
    pub(crate) events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a session in the Start phase. Fails fast on invalid tuning or
    /// a viewport too small to spawn into.
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        tuning.check_viewport(viewport)?;

        Ok(Self {
            viewport,
            seed,
            phase: GamePhase::Start,
            score: 0,
            lives: tuning.initial_lives,
            final_score: None,
            time_ticks: 0,
            projectiles: Vec::new(),
            splits: Vec::new(),
            trail: Trail::new(tuning.trail_max_len, tuning.trail_release_grace_ms),
            spawn: SpawnController::new(&tuning),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        })
    }

    /// Begin a run from Start or GameOver. Restarting mid-run is the same
    /// full reset.
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = self.tuning.initial_lives;
        self.final_score = None;
        self.time_ticks = 0;
        self.projectiles.clear();
        self.splits.clear();
        self.trail.reset();
        self.spawn.reset();
        self.events.push(GameEvent::Started);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Identical to [`GameState::start`]
    pub fn restart(&mut self) {
        self.start();
    }

    /// Follow a surface resize. Invalid sizes are rejected and the current
    /// viewport is kept.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let viewport = Viewport::new(width, height)?;
        self.tuning.check_viewport(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Launch one melon from below the bottom edge
    pub fn spawn_projectile(&mut self) -> u32 {
        let id = self.next_entity_id();
        let melon = launch_projectile(id, &mut self.rng, self.viewport, &self.tuning);
        log::trace!(
            "Spawned melon {} at x={:.0} vel=({:.2}, {:.2})",
            id,
            melon.body.pos.x,
            melon.body.vel.x,
            melon.body.vel.y
        );
        self.projectiles.push(melon);
        self.events.push(GameEvent::Spawned { id });
        id
    }

    /// Freeze the run and record the final score
    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.final_score = Some(self.score);
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!("Game over - final score {}", self.score);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives
    }

    pub fn final_score(&self) -> Option<u64> {
        self.final_score
    }

    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawn.current_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(12345, Viewport::new(800.0, 600.0).unwrap(), Tuning::default()).unwrap()
    }

    #[test]
    fn test_new_state_waits_for_start() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.lives_remaining(), 3);
        assert_eq!(state.score(), 0);
        assert!(state.final_score().is_none());
        assert_eq!(state.spawn_interval_ms(), 1500.0);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let viewport = Viewport::new(90.0, 600.0).unwrap();
        assert!(GameState::new(1, viewport, Tuning::default()).is_err());

        let tuning = Tuning {
            trail_max_len: 0,
            ..Default::default()
        };
        assert!(GameState::new(1, Viewport::default(), tuning).is_err());
    }

    #[test]
    fn test_new_rejects_unchecked_viewport() {
        let negative = Viewport {
            width: 800.0,
            height: -10.0,
        };
        assert!(matches!(
            GameState::new(1, negative, Tuning::default()),
            Err(ConfigError::InvalidViewport { .. })
        ));

        let nan = Viewport {
            width: 800.0,
            height: f32::NAN,
        };
        assert!(GameState::new(1, nan, Tuning::default()).is_err());
    }

    #[test]
    fn test_start_resets_everything() {
        let mut state = new_state();
        state.start();
        state.spawn_projectile();
        state.score = 120;
        state.lives = 1;
        state.spawn.on_slice(50);
        state.spawn.last_spawn_ms = 4000.0;
        state.trail.begin(Vec2::ZERO);
        state.trail.extend(Vec2::ONE);
        state.trail.end(4000.0);
        state.end_run();

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(state.final_score.is_none());
        assert!(state.projectiles.is_empty());
        assert!(state.splits.is_empty());
        assert!(state.trail.is_empty());
        assert!(state.trail.pending_clear().is_none());
        assert_eq!(state.spawn.current_interval_ms, 1500.0);
        assert_eq!(state.spawn.last_spawn_ms, 0.0);
    }

    #[test]
    fn test_set_viewport_keeps_old_on_error() {
        let mut state = new_state();
        assert!(state.set_viewport(-5.0, 600.0).is_err());
        assert_eq!(state.viewport.width, 800.0);
        assert!(state.set_viewport(1024.0, 700.0).is_ok());
        assert_eq!(state.viewport.height, 700.0);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = new_state();
        let a = state.spawn_projectile();
        let b = state.spawn_projectile();
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut s1 = new_state();
        let mut s2 = new_state();
        for _ in 0..10 {
            s1.spawn_projectile();
            s2.spawn_projectile();
        }
        for (a, b) in s1.projectiles.iter().zip(&s2.projectiles) {
            assert_eq!(a.body, b.body);
        }
    }

    #[test]
    fn test_drain_events() {
        let mut state = new_state();
        state.start();
        let id = state.spawn_projectile();
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Started, GameEvent::Spawned { id }]
        );
        assert!(state.drain_events().is_empty());
    }
}
