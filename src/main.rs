//! Pizza Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use pizza_catch::persistence::LocalStorageStore;
    use pizza_catch::platform::{FrameClock, try_with};
    use pizza_catch::platform::web::DomPresenter;
    use pizza_catch::sim::{CatchAttempt, GamePhase, GameSession};
    use pizza_catch::{Presenter, Settings};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        presenter: DomPresenter,
        clock: FrameClock,
    }

    impl Game {
        fn start(&mut self) {
            self.clock.reset();
            self.session.start(&mut self.presenter);
        }

        fn continue_game(&mut self) {
            self.clock.reset();
            self.session.continue_game(&mut self.presenter);
        }

        fn quit(&mut self) {
            self.session.quit(&mut self.presenter);
        }

        fn catch(&mut self, attempt: CatchAttempt) {
            self.session.catch_attempt(attempt, &mut self.presenter);
        }

        /// Run the simulation up to the frame timestamp
        fn update(&mut self, time: f64) {
            let elapsed = self.clock.tick(time);
            if elapsed > 0 {
                self.session.advance(elapsed, &mut self.presenter);
            }
        }

        fn auto_pause(&mut self, reason: &str) {
            if self.presenter.settings().pause_on_blur && self.session.pause() {
                log::info!("Auto-paused ({})", reason);
            }
        }

        fn auto_resume(&mut self) {
            if self.session.resume() {
                self.clock.reset();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Pizza Catch starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let session = GameSession::with_seed(seed, Box::new(LocalStorageStore::new()));
        let mut presenter = DomPresenter::new(document.clone(), settings, seed);
        presenter.update_hud(&session.hud());

        let game = Rc::new(RefCell::new(Game {
            session,
            presenter,
            clock: FrameClock::new(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        on_click(&document, "start-btn", &game, Game::start);
        on_click(&document, "continue-btn", &game, Game::continue_game);
        on_click(&document, "quit-btn", &game, Game::quit);
        on_click(&document, "pizza", &game, |g| g.catch(CatchAttempt::pointer()));
        on_click(&document, "rules-btn", &game, |g| g.presenter.show_rules(true));
        on_click(&document, "close-rules", &game, |g| g.presenter.show_rules(false));

        setup_document_handlers(&document, game.clone());
        setup_auto_pause(&document, game.clone());

        request_animation_frame(game);

        log::info!("Pizza Catch running!");
    }

    fn on_click(
        document: &Document,
        id: &str,
        game: &Rc<RefCell<Game>>,
        mut handler: impl FnMut(&mut Game) + 'static,
    ) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing element #{}", id);
            return;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            try_with(&game, &mut handler);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_document_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Keyboard: arrows and 0 catch the pizza in the matching slot
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                try_with(&game, |g| {
                    if g.session.phase() != GamePhase::Running {
                        return;
                    }
                    if let Some(attempt) = CatchAttempt::from_key(&event.key()) {
                        event.prevent_default();
                        g.catch(attempt);
                    }
                });
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Any click: unlock audio, optional ambient click sound
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                try_with(&game, |g| g.presenter.on_document_click());
            });
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                try_with(&game, |g| {
                    if hidden {
                        g.auto_pause("tab hidden");
                    } else {
                        g.auto_resume();
                    }
                });
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                try_with(&game, |g| g.auto_pause("window blur"));
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus back
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                try_with(&game, Game::auto_resume);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
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
        try_with(&game, |g| g.update(time));
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless autoplay demo
#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "pizza-catch", version, about = "Pizza Catch headless autoplay demo")]
struct Args {
    /// Levels for the bot to play
    #[arg(long, default_value_t = 3)]
    levels: u32,
    /// RNG seed for pizza positions and the bot
    #[arg(long, default_value_t = 0x9122A)]
    seed: u64,
    /// JSON file overriding the game balance
    #[arg(long)]
    tuning: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), pizza_catch::TuningError> {
    use clap::Parser;

    env_logger::init();
    let args = Args::parse();
    log::info!("Pizza Catch (native) starting...");
    log::info!("Native mode plays a headless demo - run with `trunk serve` for the web version");

    let tuning = match &args.tuning {
        Some(path) => pizza_catch::Tuning::from_file(path)?,
        None => pizza_catch::Tuning::default(),
    };

    let (score, level) = demo::autoplay(tuning, args.levels, args.seed);
    println!("Demo finished: score {} after level {}", score, level);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autoplay: a bot with a random reaction time plays a few levels
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use pizza_catch::consts::DEMO_STEP_MS;
    use pizza_catch::sim::{CatchAttempt, GamePhase, GameSession, SchedulerState};
    use pizza_catch::{LogPresenter, MemoryStore, Tuning};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Chance the bot goes for a given pizza
    const CATCH_CHANCE: f64 = 0.85;

    /// Play `levels` levels; returns (final score, last level played)
    pub fn autoplay(tuning: Tuning, levels: u32, seed: u64) -> (u64, u32) {
        let mut session = GameSession::new(
            tuning,
            Pcg32::seed_from_u64(seed),
            Box::new(MemoryStore::new()),
        );
        let mut presenter = LogPresenter;
        let mut bot = Pcg32::seed_from_u64(seed.wrapping_add(1));

        // (level, appearance index, catch time)
        let mut plan: Option<(u32, u32, Option<u64>)> = None;
        let mut result = (0, 1);

        session.start(&mut presenter);
        loop {
            match session.phase() {
                GamePhase::Running => {
                    session.advance(DEMO_STEP_MS, &mut presenter);
                    if session.scheduler().state() != SchedulerState::Showing {
                        continue;
                    }
                    let Some(current) = session.scheduler().current().copied() else {
                        continue;
                    };
                    let now = session.scheduler().now_ms();
                    let key = (session.level(), current.index);

                    if plan.map(|(l, i, _)| (l, i)) != Some(key) {
                        let catch_at = bot
                            .random_bool(CATCH_CHANCE)
                            .then(|| now + bot.random_range(180..450));
                        plan = Some((key.0, key.1, catch_at));
                    }
                    if let Some((_, _, Some(at))) = plan {
                        if now >= at {
                            // Alternate between keyboard and mouse catches
                            let attempt = if current.index % 2 == 0 {
                                CatchAttempt::key(current.position.name)
                            } else {
                                CatchAttempt::pointer()
                            };
                            session.catch_attempt(attempt, &mut presenter);
                        }
                    }
                }
                GamePhase::AwaitingContinue => {
                    result = (session.score().score(), session.level());
                    if session.level() >= levels {
                        session.quit(&mut presenter);
                    } else {
                        session.continue_game(&mut presenter);
                    }
                }
                GamePhase::Menu => break,
            }
        }

        result
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["pizza-catch"]).unwrap();
        assert_eq!(args.levels, 3);
        assert_eq!(args.seed, 0x9122A);
        assert!(args.tuning.is_none());
    }

    #[test]
    fn test_args_flags() {
        let args = Args::try_parse_from(["pizza-catch", "--levels", "5", "--seed", "42"]).unwrap();
        assert_eq!(args.levels, 5);
        assert_eq!(args.seed, 42);
    }

    #[test]
    fn test_bad_args_are_rejected() {
        assert!(Args::try_parse_from(["pizza-catch", "--levels", "5x"]).is_err());
        assert!(Args::try_parse_from(["pizza-catch", "5"]).is_err());
    }

    #[test]
    fn test_autoplay_plays_requested_levels() {
        let tuning = pizza_catch::Tuning {
            appearances_per_level: 3,
            ..Default::default()
        };
        let (_, level) = demo::autoplay(tuning, 5, 1);
        assert_eq!(level, 5);
    }
}
