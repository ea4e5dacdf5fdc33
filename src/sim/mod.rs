//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, driven by the host's frame clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trail;

pub use autopilot::Autopilot;
pub use collision::{circle_hits_segments, point_segment_distance, projectile_hits_trail};
pub use entity::{Body, Projectile, Simulate, Split};
pub use spawn::{SpawnController, launch_projectile};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{PointerEvent, handle_pointer, tick};
pub use trail::{ClearToken, Trail};
