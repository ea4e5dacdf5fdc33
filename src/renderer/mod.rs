//! Render adapter boundary
//!
//! The simulation hands a read-only [`Frame`] to whatever draws it. The web
//! build draws with Canvas 2D (`canvas` module); tests and headless runs can
//! plug in their own adapter.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{GamePhase, GameState, Projectile, Split, Trail};
use crate::tuning::Viewport;

/// Read-only snapshot of everything visible this tick
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub viewport: Viewport,
    pub projectiles: &'a [Projectile],
    pub splits: &'a [Split],
    pub trail: &'a Trail,
    pub score: u64,
    pub lives: u32,
}

impl<'a> Frame<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            viewport: state.viewport,
            projectiles: &state.projectiles,
            splits: &state.splits,
            trail: &state.trail,
            score: state.score,
            lives: state.lives,
        }
    }
}

/// Something that can draw a frame
pub trait RenderAdapter {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Capture the current state and draw it
pub fn render(state: &GameState, adapter: &mut impl RenderAdapter) {
    adapter.draw(&Frame::capture(state));
}
