//! Hill Roller entry point
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
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use hill_roller::renderer::CanvasSurface;
    use hill_roller::sim::KeyState;
    use hill_roller::{Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        keys: KeyState,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Current window size in pixels, resizing the canvas to match
        fn sync_viewport(&self) -> Vec2 {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return self.session.camera.viewport(),
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.canvas.width() as f64) as u32;
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.canvas.height() as f64) as u32;

            if self.canvas.width() != width || self.canvas.height() != height {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
                log::debug!("Canvas resized to {}x{}", width, height);
            }
            Vec2::new(width as f32, height as f32)
        }

        fn frame(&mut self, time: f64) {
            let viewport = self.sync_viewport();
            self.session.stats.record_frame_time(time);
            self.session.frame(&self.keys, viewport, &mut self.surface);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Hill Roller starting...");

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

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let viewport = Vec2::new(canvas.width() as f32, canvas.height() as f32);

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(settings, seed, viewport),
            keys: KeyState::new(),
            surface: CanvasSurface::new(ctx),
            canvas,
        }));

        setup_input_handlers(&window, game.clone());

        request_animation_frame(game);

        log::info!("Hill Roller running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.default_prevented() {
                    return;
                }
                let mut g = game.borrow_mut();
                let code = event.code();
                if g.keys.set_key_code(&code, pressed) {
                    event.prevent_default();
                } else if pressed && code == "KeyR" {
                    let seed = js_sys::Date::now() as u64;
                    g.session.restart(seed);
                    log::info!("Restarted with seed: {}", seed);
                } else if pressed && code == "KeyF" {
                    let on = g.session.toggle_show_fps();
                    g.session.settings().save();
                    log::info!("FPS logging {}", if on { "on" } else { "off" });
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released while unfocused would otherwise stay held
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
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
    log::info!("Hill Roller (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    run_headless(600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate a number of frames against a recording surface and report
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(frames: u64) {
    use glam::Vec2;
    use hill_roller::renderer::Recorder;
    use hill_roller::sim::{Action, KeyState};
    use hill_roller::{Session, Settings};

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);
    let viewport = Vec2::new(1280.0, 720.0);
    let mut session = Session::new(settings, seed, viewport);

    let mut keys = KeyState::new();
    let mut surface = Recorder::new();
    let mut grounded_frames = 0u64;

    for frame in 0..frames {
        // Dive for a while every few seconds
        keys.set(Action::Boost, frame % 240 < 60);
        surface.reset();
        session.frame(&keys, viewport, &mut surface);
        if session.player.grounded {
            grounded_frames += 1;
        }
    }

    let cache = session.terrain.noise().cache_stats();
    log::info!(
        "Simulated {} frames: grounded {} frames, final zoom {:.2}, noise cache {} gradients / {} samples",
        frames,
        grounded_frames,
        session.camera.zoom(),
        cache.gradients,
        cache.samples
    );
    log::info!("Draw calls in last frame: {}", surface.commands.len());

    match serde_json::to_string_pretty(&session.player) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize player state: {}", e),
    }
}
