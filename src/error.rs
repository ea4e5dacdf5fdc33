//! Configuration errors.
//!
//! The simulation itself cannot fail: ticking outside play, re-slicing and
//! short trails are all no-ops. Only bad construction parameters are errors,
//! and they are rejected before a session exists.

/// Rejected tuning or viewport values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("viewport must be finite and positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("viewport width {width} leaves no room between the {margin} spawn margins")]
    ViewportTooNarrow { width: f32, margin: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("trail capacity must hold at least 2 points, got {0}")]
    TrailTooShort(usize),

    #[error("trail capacity {len} exceeds the limit of {limit} points")]
    TrailTooLong { len: usize, limit: usize },

    #[error("minimum spawn interval {min} ms exceeds the initial interval {initial} ms")]
    SpawnIntervalOrder { min: f64, initial: f64 },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
