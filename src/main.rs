//! Galaxy Defender entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use galaxy_defender::hud::{HudSink, HudState};
    use galaxy_defender::persistence::LocalStorage;
    use galaxy_defender::platform::{KeyAction, Keyboard, new_seed};
    use galaxy_defender::sim::{GameEvent, GamePhase};
    use galaxy_defender::{App, Tuning, Variant};

    /// Writes HUD snapshots into the page
    struct DomHud {
        document: web_sys::Document,
        variant: Variant,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_disabled(&self, id: &str, disabled: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                if disabled {
                    let _ = el.set_attribute("disabled", "");
                } else {
                    let _ = el.remove_attribute("disabled");
                }
            }
        }
    }

    impl HudSink for DomHud {
        fn push(&mut self, hud: &HudState) {
            self.set_text("score", &hud.score.to_string());
            self.set_text("level", &hud.level.to_string());
            self.set_text("enemies", &hud.enemies_remaining.to_string());
            self.set_text("highscore", &hud.high_score.to_string());

            let health = match self.variant {
                Variant::Wave => "❤️".repeat(hud.health.max(0) as usize),
                Variant::Stream => format!("{}/{}", hud.health, hud.max_health),
            };
            self.set_text("lives", &health);

            // Combo only shows for an actual chain
            if let Some(el) = self.document.get_element_by_id("combo") {
                if hud.combo_visible {
                    let _ = el.set_attribute("class", "hud-item pop");
                    el.set_text_content(Some(&format!(
                        "{} combo x{}",
                        hud.combo_count, hud.combo_multiplier
                    )));
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            let (start, pause, restart) = match hud.phase {
                GamePhase::NotStarted => (false, true, true),
                GamePhase::Running | GamePhase::Paused | GamePhase::LevelClear => {
                    (true, false, false)
                }
                GamePhase::GameOver => (true, true, false),
            };
            self.set_disabled("startBtn", start);
            self.set_disabled("pauseBtn", pause);
            self.set_disabled("restartBtn", restart);
            self.set_text(
                "pauseBtn",
                if hud.phase == GamePhase::Paused {
                    "RESUME"
                } else {
                    "PAUSE"
                },
            );
        }
    }

    /// Game instance holding all state
    struct Game {
        app: App<LocalStorage>,
        keyboard: Keyboard,
        hud: DomHud,
        last_time: f64,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                galaxy_defender::consts::SIM_DT
            };
            self.last_time = time;

            for event in self.app.update(dt, &mut self.hud) {
                match event {
                    GameEvent::WaveCleared { level } => {
                        self.hud.set_text("message", &format!("Level {} Complete!", level));
                    }
                    GameEvent::WaveSpawned { .. } => self.hud.set_text("message", ""),
                    GameEvent::GameOver { score, .. } => {
                        self.hud
                            .set_text("message", &format!("GAME OVER! Final Score: {}", score));
                    }
                    _ => {}
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Galaxy Defender starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let variant = document
            .get_element_by_id("game-container")
            .and_then(|el| el.get_attribute("data-variant"))
            .and_then(|v| Variant::from_str(&v))
            .unwrap_or_default();

        // Optional balance overrides as a JSON tuning sheet
        let tuning = match document
            .get_element_by_id("game-container")
            .and_then(|el| el.get_attribute("data-tuning"))
        {
            Some(json) => Tuning::from_json_for(&json, variant).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid data-tuning: {}", e);
                Tuning::for_variant(variant)
            }),
            None => Tuning::for_variant(variant),
        };
        let variant = tuning.variant;

        let seed = new_seed();
        let app = App::new(tuning, seed, LocalStorage);
        let mut hud = DomHud {
            document: document.clone(),
            variant,
        };
        hud.push(&HudState::from_state(&app.state));

        let game = Rc::new(RefCell::new(Game {
            app,
            keyboard: Keyboard::new(),
            hud,
            last_time: 0.0,
        }));
        log::info!("{} game initialized with seed: {}", variant.as_str(), seed);

        setup_keyboard(&window, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        request_animation_frame(game);
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let Some(action) = KeyAction::from_key(&event.key()) else {
                    return;
                };
                // Keep space/arrows from scrolling the page
                event.prevent_default();
                let mut g = game.borrow_mut();
                let g = &mut *g;
                g.keyboard.key_down(action, &mut g.app.input);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(action) = KeyAction::from_key(&event.key()) {
                    let mut g = game.borrow_mut();
                    let g = &mut *g;
                    g.keyboard.key_up(action, &mut g.app.input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let buttons: [(&str, fn(&mut App<LocalStorage>)); 3] = [
            ("startBtn", App::request_start),
            ("pauseBtn", App::request_pause),
            ("restartBtn", App::request_restart),
        ];

        for (id, action) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                action(&mut game.borrow_mut().app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.app.state.phase == GamePhase::Running {
                        g.app.request_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur: drop held keys so the ship doesn't drift
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let g = &mut *g;
                g.keyboard.release_all(&mut g.app.input);
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use galaxy_defender::{Tuning, Variant};

    env_logger::init();
    log::info!("Galaxy Defender (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build for the real game");

    let mut args = std::env::args().skip(1);
    let variant = args
        .next()
        .and_then(|arg| Variant::from_str(&arg))
        .unwrap_or_default();

    // Optional second argument: path to a JSON tuning sheet
    let tuning = match args.next() {
        Some(path) => match load_tuning(&path, variant) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Failed to load tuning from {}: {}", path, e);
                Tuning::for_variant(variant)
            }
        },
        None => Tuning::for_variant(variant),
    };
    run_headless(tuning);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(
    path: &str,
    variant: galaxy_defender::Variant,
) -> Result<galaxy_defender::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(galaxy_defender::Tuning::from_json_for(&json, variant)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one run with a simple sweeping autopilot and report the result
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(tuning: galaxy_defender::Tuning) {
    use galaxy_defender::hud::LogHud;
    use galaxy_defender::platform::new_seed;
    use galaxy_defender::sim::{GameEvent, GamePhase};
    use galaxy_defender::{App, MemoryStore};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 180;

    let variant = tuning.variant;
    let seed = new_seed();
    let mut app = App::new(tuning, seed, MemoryStore::new());
    let mut hud = LogHud;
    app.request_start();

    for frame in 0..MAX_FRAMES {
        // Sweep across the field every two seconds, firing constantly
        let sweep = (frame / 120) % 2 == 0;
        app.input.move_x = if sweep { 1.0 } else { -1.0 };
        app.input.fire_held = true;
        app.input.fire = frame % 8 == 0;

        for event in app.update(FRAME_DT, &mut hud) {
            match event {
                GameEvent::LevelUp { level } => log::info!("Reached level {}", level),
                GameEvent::PowerUpCollected(kind) => log::info!("Picked up {:?}", kind),
                _ => {}
            }
        }
        if app.state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "{} run (seed {}): score {}, level {}, best {}",
        variant.as_str(),
        seed,
        app.state.score,
        app.state.level,
        app.high_score()
    );
}
