//! Game balance and viewport configuration
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults mirror
//! [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Drawing surface size in screen-space units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport, rejecting empty, negative or non-finite sizes
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let viewport = Self { width, height };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Both sides must be finite and positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(ConfigError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Run ===
    pub initial_lives: u32,
    pub points_per_slice: u64,

    // === Spawning / difficulty ===
    pub spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub spawn_interval_step_ms: f64,
    /// Interval shrinks when the score lands exactly on a multiple of this
    pub difficulty_score_step: u64,

    // === Physics ===
    pub gravity: f32,
    pub launch_velocity_y: f32,
    pub launch_jitter_y: f32,
    pub launch_jitter_x: f32,
    pub spawn_margin: f32,

    // === Melons ===
    pub melon_radius: f32,
    pub melon_spin_range: f32,
    pub split_kick_x: f32,
    pub split_kick_y: f32,
    pub split_spin: f32,
    pub split_fade: f32,

    // === Trail ===
    pub trail_max_len: usize,
    pub trail_release_grace_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_lives: INITIAL_LIVES,
            points_per_slice: POINTS_PER_SLICE,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            difficulty_score_step: DIFFICULTY_SCORE_STEP,

            gravity: GRAVITY,
            launch_velocity_y: LAUNCH_VELOCITY_Y,
            launch_jitter_y: LAUNCH_JITTER_Y,
            launch_jitter_x: LAUNCH_JITTER_X,
            spawn_margin: SPAWN_MARGIN,

            melon_radius: MELON_RADIUS,
            melon_spin_range: MELON_SPIN_RANGE,
            split_kick_x: SPLIT_KICK_X,
            split_kick_y: SPLIT_KICK_Y,
            split_spin: SPLIT_SPIN,
            split_fade: SPLIT_FADE,

            trail_max_len: TRAIL_MAX_LEN,
            trail_release_grace_ms: TRAIL_RELEASE_GRACE_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check internal consistency of the balance values
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("melon_radius", self.melon_radius as f64)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("min_spawn_interval_ms", self.min_spawn_interval_ms)?;
        positive("difficulty_score_step", self.difficulty_score_step as f64)?;
        positive("initial_lives", self.initial_lives as f64)?;
        positive("split_fade", self.split_fade as f64)?;

        non_negative("gravity", self.gravity as f64)?;
        non_negative("spawn_interval_step_ms", self.spawn_interval_step_ms)?;
        non_negative("launch_jitter_x", self.launch_jitter_x as f64)?;
        non_negative("launch_jitter_y", self.launch_jitter_y as f64)?;
        non_negative("spawn_margin", self.spawn_margin as f64)?;
        non_negative("melon_spin_range", self.melon_spin_range as f64)?;
        non_negative("trail_release_grace_ms", self.trail_release_grace_ms)?;

        if self.trail_max_len < 2 {
            return Err(ConfigError::TrailTooShort(self.trail_max_len));
        }
        if self.trail_max_len > TRAIL_LEN_LIMIT {
            return Err(ConfigError::TrailTooLong {
                len: self.trail_max_len,
                limit: TRAIL_LEN_LIMIT,
            });
        }
        if self.min_spawn_interval_ms > self.spawn_interval_ms {
            return Err(ConfigError::SpawnIntervalOrder {
                min: self.min_spawn_interval_ms,
                initial: self.spawn_interval_ms,
            });
        }
        Ok(())
    }

    /// Check that the viewport is usable and melons can spawn inside it
    pub fn check_viewport(&self, viewport: Viewport) -> Result<(), ConfigError> {
        viewport.validate()?;
        if viewport.width <= 2.0 * self.spawn_margin {
            return Err(ConfigError::ViewportTooNarrow {
                width: viewport.width,
                margin: self.spawn_margin,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert!(tuning.check_viewport(Viewport::default()).is_ok());
        assert_eq!(tuning.melon_radius, 40.0);
        assert_eq!(tuning.trail_max_len, 20);
    }

    #[test]
    fn test_viewport_rejects_bad_sizes() {
        assert!(Viewport::new(800.0, 600.0).is_ok());
        assert!(Viewport::new(-1.0, 600.0).is_err());
        assert!(Viewport::new(800.0, 0.0).is_err());
        assert!(Viewport::new(f32::NAN, 600.0).is_err());
        assert!(Viewport::new(800.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_narrow_viewport_rejected() {
        let tuning = Tuning::default();
        let narrow = Viewport::new(100.0, 600.0).unwrap();
        assert!(matches!(
            tuning.check_viewport(narrow),
            Err(ConfigError::ViewportTooNarrow { .. })
        ));
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "initial_lives": 5, "gravity": 0.25 }"#).unwrap();
        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.gravity, 0.25);
        // Untouched fields keep their defaults
        assert_eq!(tuning.spawn_interval_ms, 1500.0);
    }

    #[test]
    fn test_invalid_json_values_rejected() {
        assert!(matches!(
            Tuning::from_json(r#"{ "trail_max_len": 1 }"#),
            Err(ConfigError::TrailTooShort(1))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "min_spawn_interval_ms": 2000.0 }"#),
            Err(ConfigError::SpawnIntervalOrder { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "melon_radius": 0.0 }"#),
            Err(ConfigError::NonPositive { .. })
        ));
        assert!(matches!(Tuning::from_json("{ nope"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_struct_literal_viewport_checked() {
        let tuning = Tuning::default();
        let cases = [
            Viewport { width: 800.0, height: -10.0 },
            Viewport { width: 800.0, height: f32::NAN },
            Viewport { width: f32::NAN, height: 600.0 },
            Viewport { width: f32::INFINITY, height: 600.0 },
        ];
        for viewport in cases {
            assert!(matches!(
                tuning.check_viewport(viewport),
                Err(ConfigError::InvalidViewport { .. })
            ));
        }
    }

    #[test]
    fn test_trail_length_bounded() {
        let json = format!(r#"{{ "trail_max_len": {} }}"#, usize::MAX);
        assert!(matches!(
            Tuning::from_json(&json),
            Err(ConfigError::TrailTooLong { .. })
        ));
        let json = format!(r#"{{ "trail_max_len": {} }}"#, TRAIL_LEN_LIMIT);
        assert!(Tuning::from_json(&json).is_ok());
    }

    #[test]
    fn test_split_fade_must_be_positive() {
        assert!(matches!(
            Tuning::from_json(r#"{ "split_fade": 0.0, "gravity": 0.0 }"#),
            Err(ConfigError::NonPositive { name: "split_fade", .. })
        ));
    }
}
