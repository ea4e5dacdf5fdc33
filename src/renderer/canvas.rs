//! Canvas 2D render adapter (web only)

use std::f64::consts::{FRAC_PI_2, TAU};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::{Frame, RenderAdapter};
use crate::sim::{Projectile, Split, Trail};

const SKIN: &str = "#2d5016";
const STRIPE: &str = "#1a3d0f";
const SKIN_LIGHT: &str = "#3d7018";
const FLESH: &str = "#ff4757";
const RIND: &str = "#f1f2f6";
const SEED: &str = "#2d3436";
const TRAIL: &str = "rgba(255, 255, 255, 0.8)";
const TRAIL_GLOW: &str = "rgba(255, 255, 255, 0.5)";

/// Stripes drawn across a whole melon
const STRIPE_COUNT: u32 = 8;

/// Seed layout on a cut face, as fractions of the radius (x, y, tilt)
const SEEDS: [(f64, f64, f64); 3] = [(-0.12, -0.15, 0.4), (0.08, 0.05, 2.1), (-0.05, 0.2, 1.2)];

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn draw_frame(&self, frame: &Frame<'_>) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            frame.viewport.width as f64,
            frame.viewport.height as f64,
        );

        for melon in frame.projectiles {
            self.draw_melon(melon)?;
        }
        for half in frame.splits {
            self.draw_half(half)?;
        }
        self.draw_trail(frame.trail);
        Ok(())
    }

    fn draw_melon(&self, melon: &Projectile) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let r = melon.radius as f64;

        ctx.save();
        ctx.translate(melon.body.pos.x as f64, melon.body.pos.y as f64)?;
        ctx.rotate(melon.body.rotation as f64)?;

        ctx.set_fill_style_str(SKIN);
        ctx.begin_path();
        ctx.arc(0.0, 0.0, r, 0.0, TAU)?;
        ctx.fill();

        ctx.set_stroke_style_str(STRIPE);
        ctx.set_line_width(3.0);
        for i in 0..STRIPE_COUNT {
            let angle = TAU / STRIPE_COUNT as f64 * i as f64;
            ctx.begin_path();
            ctx.move_to(0.0, 0.0);
            ctx.line_to(angle.cos() * r, angle.sin() * r);
            ctx.stroke();
        }

        ctx.set_fill_style_str(SKIN_LIGHT);
        ctx.begin_path();
        ctx.arc(0.0, 0.0, r * 0.85, 0.0, TAU)?;
        ctx.fill();

        ctx.restore();
        Ok(())
    }

    fn draw_half(&self, half: &Split) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let r = half.radius as f64;
        // Left halves are the left semicircle
        let (start, end) = if half.is_left {
            (FRAC_PI_2, -FRAC_PI_2)
        } else {
            (-FRAC_PI_2, FRAC_PI_2)
        };

        ctx.save();
        ctx.set_global_alpha(half.alpha as f64);
        ctx.translate(half.body.pos.x as f64, half.body.pos.y as f64)?;
        ctx.rotate(half.body.rotation as f64)?;

        ctx.begin_path();
        ctx.arc(0.0, 0.0, r, start, end)?;
        ctx.close_path();
        ctx.set_fill_style_str(SKIN);
        ctx.fill();

        ctx.set_fill_style_str(FLESH);
        ctx.begin_path();
        ctx.arc(0.0, 0.0, r * 0.8, start, end)?;
        ctx.close_path();
        ctx.fill();

        ctx.set_stroke_style_str(RIND);
        ctx.set_line_width(6.0);
        ctx.begin_path();
        ctx.arc(0.0, 0.0, r * 0.85, start, end)?;
        ctx.stroke();

        ctx.set_fill_style_str(SEED);
        let side = if half.is_left { -1.0 } else { 1.0 };
        for (sx, sy, tilt) in SEEDS {
            ctx.begin_path();
            ctx.ellipse(side * sx.abs() * r, sy * r, 3.0, 5.0, tilt, 0.0, TAU)?;
            ctx.fill();
        }

        ctx.restore();
        Ok(())
    }

    fn draw_trail(&self, trail: &Trail) {
        if !trail.can_slice() {
            return;
        }
        let ctx = &self.ctx;

        ctx.set_stroke_style_str(TRAIL);
        ctx.set_line_width(3.0);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        ctx.set_shadow_color(TRAIL_GLOW);
        ctx.set_shadow_blur(10.0);

        ctx.begin_path();
        let mut points = trail.points();
        if let Some(first) = points.next() {
            ctx.move_to(first.x as f64, first.y as f64);
        }
        for p in points {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.stroke();

        ctx.set_shadow_blur(0.0);
    }
}

impl RenderAdapter for CanvasRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        if let Err(e) = self.draw_frame(frame) {
            log::warn!("Render error: {:?}", e);
        }
    }
}
