//! Hold Steady entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::MouseEvent;

    use hold_steady::Tuning;
    use hold_steady::audio::AudioManager;
    use hold_steady::platform::dom::CONTAINER_ID;
    use hold_steady::platform::pointer::{self, LOCK_CHANGE_EVENTS, LOCK_ERROR_EVENTS};
    use hold_steady::platform::{Dom, MotionListener};
    use hold_steady::sim::{GameEvent, GameState};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        dom: Dom,
        audio: AudioManager,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, dom: Dom, tuning: Tuning) -> Self {
            let state = GameState::new(seed, dom.layout(), tuning);
            Self {
                state,
                dom,
                audio: AudioManager::new(),
                last_time: 0.0,
            }
        }

        /// Advance the simulation to the frame timestamp
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            self.state.set_layout(self.dom.layout());
            self.state.advance(dt);
            self.flush();
        }

        /// Relative motion from the captured pointer
        fn on_motion(&mut self, dx: f32, dy: f32) {
            self.state.set_layout(self.dom.layout());
            if self.state.on_relative_motion(dx, dy).is_some() {
                self.flush();
            }
        }

        /// Apply pending side effects, then redraw
        fn flush(&mut self) {
            for event in self.state.drain_events() {
                self.audio.handle(event);
                match event {
                    GameEvent::ShowOverlay => self.dom.set_overlay_visible(true),
                    GameEvent::HideOverlay => self.dom.set_overlay_visible(false),
                    GameEvent::Restarted { restarts } => {
                        log::info!("Back in the game (restart #{})", restarts);
                    }
                    _ => {}
                }
            }
            self.dom.render(&self.state);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Hold Steady starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let tuning = Tuning::load();
        let dom = Dom::attach(&window)?;

        let game = Rc::new(RefCell::new(Game::new(
            js_sys::Date::now() as u64,
            dom,
            tuning,
        )));
        log::info!("Game initialized with seed: {}", game.borrow().state.seed);

        // Ambient start + overlay hide from the initial reset
        game.borrow_mut().flush();

        setup_pointer_capture(game.clone())?;

        request_animation_frame(game);

        log::info!("Hold Steady running!");
        Ok(())
    }

    fn setup_pointer_capture(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = game.borrow().dom.document().clone();

        // Motion: only subscribed while captured
        let motion = {
            let game = game.clone();
            Rc::new(MotionListener::new(document.clone(), move |event: MouseEvent| {
                game.borrow_mut()
                    .on_motion(event.movement_x() as f32, event.movement_y() as f32);
            }))
        };

        // Capture changes (all vendor variants)
        {
            let game = game.clone();
            let motion = motion.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let locked = pointer::is_captured(CONTAINER_ID);
                if locked {
                    log::info!("Pointer lock ACQUIRED");
                } else {
                    log::info!("Pointer lock RELEASED");
                }
                game.borrow_mut().state.set_pointer_captured(locked);
                motion.set_attached(locked);
            });
            for name in LOCK_CHANGE_EVENTS {
                document
                    .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            }
            closure.forget();
        }

        // Capture denied: motion input simply stays inert
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::warn!("Pointer lock error");
            });
            for name in LOCK_ERROR_EVENTS {
                document
                    .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            }
            closure.forget();
        }

        // Click: engage capture and unblock audio
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow().audio.resume();
                if !motion.is_attached() {
                    pointer::request_capture(CONTAINER_ID);
                }
            });
            document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Lost window; game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed; game loop stopped");
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hold Steady (native) starting...");
    log::info!("Native mode has no window; running a headless session");

    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive one session with a simple lagging player and report how it went
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use glam::Vec2;
    use hold_steady::Tuning;
    use hold_steady::sim::{Circle, GameState, Layout};
    use std::time::{SystemTime, UNIX_EPOCH};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const RUN_MS: f64 = 45_000.0;
    /// Fraction of the remaining distance the player corrects per frame
    const PLAYER_GAIN: f32 = 0.08;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let layout = Layout::new(
        Vec2::new(1000.0, 800.0),
        Vec2::new(20.0, 20.0),
        Circle::new(Vec2::new(500.0, 400.0), 50.0),
    );
    let mut state = GameState::new(seed, layout, Tuning::load());
    state.set_pointer_captured(true);
    log::info!("Headless session with seed: {}", state.seed);

    let mut lowest = state.health.value();
    while state.clock_ms < RUN_MS {
        let error = state.layout.target.center - state.marker_center();
        let step = error * PLAYER_GAIN;
        state.on_relative_motion(step.x, step.y);
        state.advance(FRAME_MS);
        lowest = lowest.min(state.health.value());

        for event in state.drain_events() {
            log::info!("[{:>7.0} ms] {:?}", state.clock_ms, event);
        }
        if state.restarts > 0 {
            break;
        }
    }

    println!(
        "Session ended at {:.1} s: health {}/{} (lowest {}), restarts {}",
        state.clock_ms / 1000.0,
        state.health.value(),
        state.health.max(),
        lowest,
        state.restarts
    );
}
