//! Rock Drift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use rock_drift::renderer::canvas::CanvasSurface;
    use rock_drift::sim::{Field, Scene};
    use rock_drift::{ControlInput, FrameClock, Settings};

    struct Game {
        scene: Scene,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        input: ControlInput,
        clock: FrameClock,
    }

    impl Game {
        /// Run one frame; false once the loop has been ended
        fn frame(&mut self, time: f64) -> bool {
            let Some(dt) = self.clock.tick(time) else {
                return false;
            };
            self.scene.update(dt, &mut self.input);
            self.scene.render(&mut self.surface);
            true
        }

        fn fit_to_window(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            if width <= 0.0 || height <= 0.0 {
                return;
            }
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.scene.resize(width as f32, height as f32);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rock Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let mut settings = Settings::load();
        settings.save();
        if settings.seed.is_none() {
            settings.seed = Some(js_sys::Date::now() as u64);
        }

        let field = Field::new(canvas.width() as f32, canvas.height() as f32);
        let mut scene = Scene::new(field, settings);
        scene.populate();

        let game = Rc::new(RefCell::new(Game {
            scene,
            surface: CanvasSurface::new(ctx),
            canvas: canvas.clone(),
            input: ControlInput::new(),
            clock: FrameClock::new(),
        }));
        game.borrow_mut().fit_to_window();

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());

        play(game);
    }

    /// Start the frame loop unless it is already running
    fn play(game: Rc<RefCell<Game>>) {
        let started = game.borrow_mut().clock.play();
        if started {
            log::info!("Rock Drift running!");
            request_animation_frame(game);
        }
    }

    /// Stop requesting frames; the scene stays as it is
    fn end(game: &Rc<RefCell<Game>>) {
        game.borrow_mut().clock.end();
        log::info!("Rock Drift stopped");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                match key.as_str() {
                    "Escape" => end(&game),
                    "Enter" => play(game.clone()),
                    " " | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" => {
                        event.prevent_default();
                        game.borrow_mut().input.key_down(&key);
                    }
                    _ => game.borrow_mut().input.key_down(&key),
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer position in canvas coordinates
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .input
                    .pointer_moved(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: steer toward the pointer and fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_enter();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_leave();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_to_window();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = game.borrow_mut().frame(time);
        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless run: simulate a fixed number of 60 Hz frames into a recording
/// surface and log what happened.
///
/// Usage: `rock-drift [frames] [low|medium|high]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rock_drift::renderer::Recorder;
    use rock_drift::sim::{Field, Scene};
    use rock_drift::{ControlInput, QualityPreset, Settings};

    const DEFAULT_FRAMES: u64 = 600;
    const DT: f32 = 1.0 / 60.0;

    env_logger::init();
    log::info!("Rock Drift (native) starting...");

    let frames = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(n) => n,
            Err(e) => {
                log::warn!("Ignoring frame count {:?}: {}", arg, e);
                DEFAULT_FRAMES
            }
        },
        None => DEFAULT_FRAMES,
    };

    let mut settings = Settings::load();
    if let Some(arg) = std::env::args().nth(2) {
        match QualityPreset::from_str(&arg) {
            Some(quality) => settings.quality = quality,
            None => log::warn!("Unknown quality {:?}, keeping {}", arg, settings.quality.as_str()),
        }
    }

    let mut scene = Scene::new(Field::default(), settings);
    scene.populate();

    // Alternate half-second bursts of thrust and fire
    let mut input = ControlInput::new();
    let mut surface = Recorder::new();
    for frame in 0..frames {
        match frame % 60 {
            0 => {
                input.key_up(" ");
                input.key_down("w");
            }
            30 => {
                input.key_up("w");
                input.key_down(" ");
            }
            _ => {}
        }
        scene.update(DT, &mut input);

        surface.clear();
        scene.render(&mut surface);
    }

    let stats = scene.stats();
    log::info!(
        "{} frames: {} shots, {} rocks destroyed, {} crashes, {} rocks left, {} draw calls in last frame",
        stats.frames,
        stats.bullets_fired,
        stats.rocks_destroyed,
        stats.crashes,
        scene.rocks().len(),
        surface.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
