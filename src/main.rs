//! Melon Slice entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use melon_slice::renderer::{CanvasRenderer, render};
    use melon_slice::sim::{GameEvent, GamePhase, GameState, PointerEvent, handle_pointer, tick};
    use melon_slice::{Tuning, Viewport};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        /// A frame callback is scheduled
        running: bool,
    }

    impl Game {
        /// Apply one tick and hand the frame to the renderer
        fn update(&mut self, time: f64) {
            tick(&mut self.state, time);
            for event in self.state.drain_events() {
                if let GameEvent::GameOver { final_score } = event {
                    log::info!("Final score: {}", final_score);
                }
            }
            self.draw();
        }

        fn draw(&mut self) {
            render(&self.state, &mut self.renderer);
        }

        /// Surface-local pointer position
        fn local_point(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            Vec2::new(
                (client_x as f64 - rect.left()) as f32,
                (client_y as f64 - rect.top()) as f32,
            )
        }

        fn pointer(&mut self, event: PointerEvent) {
            handle_pointer(&mut self.state, event, now_ms());
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("lives") {
                let hearts = "❤️".repeat(self.state.lives_remaining() as usize);
                el.set_text_content(Some(&hearts));
            }

            let game_over = self.state.phase == GamePhase::GameOver;
            if let Some(el) = document.get_element_by_id("gameOverMenu") {
                set_hidden(&el, !game_over);
            }
            if game_over {
                if let (Some(el), Some(score)) = (
                    document.get_element_by_id("finalScore"),
                    self.state.final_score(),
                ) {
                    el.set_text_content(Some(&score.to_string()));
                }
            }
        }
    }

    fn set_hidden(el: &web_sys::Element, hidden: bool) {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }

    /// Same clock as the requestAnimationFrame timestamp
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Canvas size: 90% of a landscape window capped at 1200x800, or the
    /// full window in portrait
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (canvas.width() as f32, canvas.height() as f32);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);

        let (width, height) = if w > h {
            ((w * 0.9).min(1200.0), (h * 0.9).min(800.0))
        } else {
            (w, h)
        };
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        (canvas.width() as f32, canvas.height() as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Melon Slice starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let (width, height) = fit_canvas(&canvas);
        let viewport =
            Viewport::new(width, height).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, viewport, Tuning::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer: CanvasRenderer::new(ctx),
            canvas: canvas.clone(),
            running: false,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_start_buttons(game.clone());
        setup_resize(game.clone());

        // Empty first frame behind the start menu
        {
            let mut g = game.borrow_mut();
            g.draw();
            g.update_hud();
        }

        log::info!("Melon Slice ready");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse press / move / release / leave
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let p = g.local_point(event.client_x(), event.client_y());
                g.pointer(PointerEvent::Press(p));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let p = g.local_point(event.client_x(), event.client_y());
                g.pointer(PointerEvent::Move(p));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pointer(PointerEvent::Release);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pointer(PointerEvent::Leave);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move / end (a touch move is always a pressed move)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let p = g.local_point(touch.client_x(), touch.client_y());
                    g.pointer(PointerEvent::Press(p));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let p = g.local_point(touch.client_x(), touch.client_y());
                    g.pointer(PointerEvent::Move(p));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().pointer(PointerEvent::Release);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["startButton", "restartButton"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    start_game(game.clone());
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let (width, height) = fit_canvas(&g.canvas);
            if let Err(e) = g.state.set_viewport(width, height) {
                log::warn!("Ignoring resize: {}", e);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start and restart are the same command
    fn start_game(game: Rc<RefCell<Game>>) {
        let schedule = {
            let mut g = game.borrow_mut();
            g.state.start();
            g.update_hud();

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                for id in ["startMenu", "gameOverMenu"] {
                    if let Some(el) = document.get_element_by_id(id) {
                        set_hidden(&el, true);
                    }
                }
            }

            // One frame loop at a time
            let schedule = !g.running;
            g.running = true;
            schedule
        };

        if schedule {
            request_animation_frame(game);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.update_hud();

            // Stop the loop on game over; restart re-arms it
            let playing = g.state.is_playing();
            g.running = playing;
            playing
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot plays one run at a steady 60 Hz frame clock
#[cfg(not(target_arch = "wasm32"))]
mod native {
    use serde::Serialize;

    use melon_slice::consts::FRAME_MS;
    use melon_slice::sim::{Autopilot, GameEvent, GameState, handle_pointer, tick};
    use melon_slice::{ConfigError, Tuning, Viewport};

    /// Give up after ten minutes of game time
    const MAX_TICKS: u64 = 60 * 60 * 10;

    #[derive(Debug, Default, Serialize)]
    pub(crate) struct RunSummary {
        pub(crate) seed: u64,
        pub(crate) ticks: u64,
        pub(crate) score: u64,
        pub(crate) final_score: Option<u64>,
        pub(crate) spawned: u32,
        pub(crate) sliced: u32,
        pub(crate) missed: u32,
        pub(crate) spawn_interval_ms: f64,
    }

    /// Usage: `melon-slice [seed] [tuning.json]`
    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => 42,
        };
        let tuning = match args.next() {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };

        let summary = play(seed, tuning)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

    pub(crate) fn play(seed: u64, tuning: Tuning) -> Result<RunSummary, ConfigError> {
        log::info!("Melon Slice (headless) starting with seed {}", seed);

        let mut state = GameState::new(seed, Viewport::default(), tuning)?;
        let mut pilot = Autopilot::new(seed ^ 0x5EED, 12, 0.85);
        let mut summary = RunSummary {
            seed,
            ..Default::default()
        };

        state.start();
        for frame in 1..=MAX_TICKS {
            let now = frame as f64 * FRAME_MS;
            for event in pilot.plan(&state) {
                handle_pointer(&mut state, event, now);
            }
            tick(&mut state, now);

            for event in state.drain_events() {
                match event {
                    GameEvent::Spawned { .. } => summary.spawned += 1,
                    GameEvent::Sliced { .. } => summary.sliced += 1,
                    GameEvent::Missed { .. } => summary.missed += 1,
                    GameEvent::DifficultyIncreased { interval_ms } => {
                        log::info!("Difficulty up: spawning every {} ms", interval_ms);
                    }
                    GameEvent::Started | GameEvent::GameOver { .. } => {}
                }
            }

            if !state.is_playing() {
                break;
            }
        }

        summary.ticks = state.time_ticks;
        summary.score = state.score();
        summary.final_score = state.final_score();
        summary.spawn_interval_ms = state.spawn_interval_ms();
        Ok(summary)
    }
}
