//! Moto Trails entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use moto_trails::audio::{AudioManager, SoundEffect};
    use moto_trails::renderer::Renderer;
    use moto_trails::sim::{RaceState, TickInput, update};
    use moto_trails::{Settings, ui};

    /// Game instance holding all state
    struct Game {
        state: RaceState,
        input: TickInput,
        renderer: Renderer,
        audio: AudioManager,
    }

    impl Game {
        fn new(width: f32, height: f32, settings: &Settings, renderer: Renderer) -> Self {
            Self {
                state: RaceState::with_viewport(width, height, settings),
                input: TickInput::new(),
                renderer,
                audio: AudioManager::new(),
            }
        }

        /// One frame: advance the simulation, play cues, redraw
        fn frame(&mut self, time: f64) {
            let events = update(&mut self.state, &self.input, time);
            for event in events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }
            if let Err(e) = self.renderer.draw(&self.state, time) {
                log::warn!("Render error: {e:?}");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Moto Trails starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("view")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let width = canvas.width() as f32;
        let height = canvas.height() as f32;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context")
            .expect("2d context missing")
            .dyn_into()
            .expect("not a 2d context");
        let renderer = Renderer::new(ctx, width as f64, height as f64);

        // Settings menu: stored values into the inputs, save on change
        let settings = Settings::load();
        ui::hydrate_inputs(&settings);
        ui::bind_inputs();

        let game = Rc::new(RefCell::new(Game::new(width, height, &settings, renderer)));

        setup_key_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Moto Trails running!");
    }

    /// Maintain the pressed-key set from keydown/keyup
    fn setup_key_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.press(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.release(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Moto Trails (native) starting...");
    log::info!("Run with `trunk serve` for the browser version");

    // Headless smoke run: start the countdown, race everyone into the first
    // curve, confirm the race reaches a terminal state.
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use moto_trails::Settings;
    use moto_trails::sim::{RaceState, TickInput, update};

    let mut state = RaceState::new(&Settings::default());
    let mut input = TickInput::new();
    input.press("Enter");

    let mut t = 0.0;
    for _ in 0..30_000 {
        t += 16.0;
        update(&mut state, &input, t);
        if state.finished_at.is_some() {
            break;
        }
    }

    assert!(state.finished_at.is_some(), "race should reach a terminal state");
    println!("✓ Smoke run finished after {:.1}s simulated", t / 1000.0);
}
