//! Flappy Mario entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use flappy_mario::audio::{AudioManager, SoundEffect};
    use flappy_mario::renderer::{CanvasPainter, draw_list};
    use flappy_mario::sim::GameEvent;
    use flappy_mario::{Game, Tuning, Variant};

    /// Page state holding the controller and its outputs
    struct App {
        game: Game,
        painter: CanvasPainter,
        audio: AudioManager,
        last_time: f64,
    }

    impl App {
        /// Advance timers, react to events, paint
        fn frame(&mut self, time: f64, document: &Document) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            self.game.update(dt);
            for event in self.game.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                update_screens(document, &event);
            }

            if let Err(e) = self.painter.paint(&draw_list(&self.game)) {
                log::warn!("Paint error: {:?}", e);
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// Toggle the start and game-over overlays
    fn update_screens(document: &Document, event: &GameEvent) {
        match event {
            GameEvent::Started => {
                set_hidden(document, "startScreen", true);
                set_hidden(document, "gameOverScreen", true);
            }
            GameEvent::Ended { score, .. } => {
                if let Some(el) = document.get_element_by_id("finalScore") {
                    el.set_text_content(Some(&score.to_string()));
                }
                set_hidden(document, "gameOverScreen", false);
            }
            GameEvent::Flapped | GameEvent::Scored { .. } => {}
        }
    }

    /// Variant from `?variant=` in the page URL
    fn variant_from_url() -> Variant {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.strip_prefix("variant="))
            .find_map(Variant::from_str)
            .unwrap_or_default()
    }

    /// Preset tuning sized to the canvas, or the untouched preset if that
    /// canvas can't fit the gap
    fn tuning_for(canvas: &HtmlCanvasElement, variant: Variant) -> Tuning {
        let preset = variant.tuning();
        let sized = Tuning {
            viewport_width: canvas.width() as f32,
            viewport_height: canvas.height() as f32,
            ..preset.clone()
        };
        match sized.validate() {
            Ok(()) => sized,
            Err(e) => {
                log::error!("Canvas unusable ({}), resizing to preset", e);
                canvas.set_width(preset.viewport_width as u32);
                canvas.set_height(preset.viewport_height as u32);
                preset
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Mario starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let variant = variant_from_url();
        let tuning = tuning_for(&canvas, variant);
        let seed = js_sys::Date::now() as u64;
        log::info!("Variant {} with seed {}", variant.as_str(), seed);

        let painter = CanvasPainter::new(&canvas).expect("Failed to create painter");
        let app = Rc::new(RefCell::new(App {
            game: Game::new(tuning, seed),
            painter,
            audio: AudioManager::new(),
            last_time: 0.0,
        }));

        set_hidden(&document, "startScreen", false);
        set_hidden(&document, "gameOverScreen", true);

        setup_keyboard(app.clone());
        setup_restart_button(&document, app.clone());

        request_animation_frame(app);
        log::info!("Flappy Mario running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut app = app.borrow_mut();
            match event.code().as_str() {
                "Space" => {
                    event.prevent_default();
                    app.game.press_action();
                }
                "KeyI" => {
                    let enabled = !app.game.autopilot();
                    app.game.set_autopilot(enabled);
                }
                "KeyM" => {
                    let muted = !app.audio.is_muted();
                    app.audio.set_muted(muted);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            app.borrow_mut().frame(time, &document);
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot demo: `flappy-mario [variant] [tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_mario::consts::TICK_MS;
    use flappy_mario::sim::GameEvent;
    use flappy_mario::{Game, RunState, Tuning, Variant};

    env_logger::init();
    log::info!("Flappy Mario (native) starting...");
    log::info!("Browser build: run with `trunk serve`; this binary plays a headless demo");

    let mut args = std::env::args().skip(1);
    let variant = args
        .next()
        .map(|name| {
            Variant::from_str(&name).unwrap_or_else(|| {
                log::warn!("Unknown variant {:?}, using Classic", name);
                Variant::Classic
            })
        })
        .unwrap_or_default();

    let tuning = match args.next() {
        Some(path) => match Tuning::from_path(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Cannot use tuning file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => variant.tuning(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut game = Game::new(tuning, seed);
    game.set_autopilot(true);
    game.press_action();

    // Two simulated minutes at most
    let max_ms = 120_000.0;
    let mut elapsed = 0.0;
    while game.run_state() == RunState::Running && elapsed < max_ms {
        game.update(TICK_MS);
        elapsed += TICK_MS;
        for event in game.drain_events() {
            if let GameEvent::Scored { score } = event {
                log::debug!("Score {} at {:.1}s", score, elapsed / 1000.0);
            }
        }
    }

    match game.last_end() {
        Some(reason) => println!(
            "{} demo ended ({}) after {:.1}s with score {}",
            variant.as_str(),
            reason.as_str(),
            elapsed / 1000.0,
            game.score()
        ),
        None => println!(
            "{} demo survived {:.0}s with score {}",
            variant.as_str(),
            elapsed / 1000.0,
            game.score()
        ),
    }
}
