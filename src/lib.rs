//! Melon Slice - A watermelon slicing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, trail collision, game state)
//! - `renderer`: Render adapter boundary (read-only frame snapshots)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::{Tuning, Viewport};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frame clock used by headless runs (the browser drives ticks from rAF)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Default viewport (landscape cap of the web host)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1200.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

    /// Player lives at the start of a run
    pub const INITIAL_LIVES: u32 = 3;
    /// Points awarded per sliced melon
    pub const POINTS_PER_SLICE: u64 = 10;

    /// Spawn pacing (milliseconds)
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 600.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 50.0;
    /// Difficulty rises whenever the score lands on a multiple of this
    pub const DIFFICULTY_SCORE_STEP: u64 = 50;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Launch velocity (units/tick, negative is up)
    pub const LAUNCH_VELOCITY_Y: f32 = -15.0;
    pub const LAUNCH_JITTER_Y: f32 = 2.0;
    pub const LAUNCH_JITTER_X: f32 = 2.0;
    /// Horizontal keep-out from the viewport edges when spawning
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Melon radius (constant for every melon)
    pub const MELON_RADIUS: f32 = 40.0;
    /// Max absolute spin of a whole melon (radians/tick)
    pub const MELON_SPIN_RANGE: f32 = 0.075;

    /// Halves fly apart with this kick
    pub const SPLIT_KICK_X: f32 = 3.0;
    pub const SPLIT_KICK_Y: f32 = 2.0;
    pub const SPLIT_SPIN: f32 = 0.2;
    /// Alpha lost per tick (~50 ticks to vanish)
    pub const SPLIT_FADE: f32 = 0.02;

    /// Trail capacity (points)
    pub const TRAIL_MAX_LEN: usize = 20;
    /// Largest trail capacity a tuning file may ask for
    pub const TRAIL_LEN_LIMIT: usize = 1024;
    /// Grace delay before a released trail is cleared
    pub const TRAIL_RELEASE_GRACE_MS: f64 = 100.0;
}

/// Squared distance helper used by the hit tests
#[inline]
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}
