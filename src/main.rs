//! Snake Grid entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PageTransitionEvent, TouchEvent,
    };

    use snake_grid::audio::{AudioManager, SoundEffect, stops_music};
    use snake_grid::consts::MAX_FRAME_DELTA_MS;
    use snake_grid::input::{SwipeTracker, direction_for_key, is_pause_key};
    use snake_grid::sim::{GameEvent, GamePhase, TickInput};
    use snake_grid::{FrameLoop, GameConfig, HighScores, Scoreboard, Session, Settings};

    type SharedBoard = Rc<RefCell<Scoreboard>>;

    /// Game instance holding all state
    struct Game {
        session: Session<SharedBoard>,
        /// Same store the session writes to; read by the HUD
        board: SharedBoard,
        ctx: CanvasRenderingContext2d,
        config: GameConfig,
        settings: Settings,
        high_scores: HighScores,
        audio: AudioManager,
        input: TickInput,
        swipe: SwipeTracker,
        last_time: f64,
        /// Stopped on page teardown, restored on back/forward cache return
        frames: FrameLoop,
        /// Focus was lost; applied at the start of the next frame
        auto_pause: bool,
        /// Rank earned by the last finished game
        last_rank: Option<usize>,
    }

    impl Game {
        fn new(ctx: CanvasRenderingContext2d, config: GameConfig, seed: u64) -> Self {
            let settings = Settings::load();
            let high_scores = HighScores::load();
            let board = Rc::new(RefCell::new(Scoreboard::new()));
            board.borrow_mut().best = high_scores.top_score().unwrap_or(0);

            let session = Session::new(config.clone(), settings.difficulty, seed, board.clone());
            let mut audio = AudioManager::new(&settings);
            audio.start_music();

            Self {
                session,
                board,
                ctx,
                config,
                settings,
                high_scores,
                audio,
                input: TickInput::default(),
                swipe: SwipeTracker::default(),
                last_time: 0.0,
                frames: FrameLoop::default(),
                auto_pause: false,
                last_rank: None,
            }
        }

        /// Feed one frame into the session and dispatch its events
        fn update(&mut self, dt_ms: f64) {
            let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_DELTA_MS);
            if std::mem::take(&mut self.auto_pause) {
                // Losing focus overrides a resume requested in the same frame
                self.input.pause = false;
                if self.session.pause() {
                    log::info!("Auto-paused");
                }
            }
            let events = self.session.tick(&self.input, dt_ms);
            self.input.clear();

            for event in &events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
                if stops_music(event) {
                    self.audio.stop_music();
                }
                if let GameEvent::GameOver { score } = event {
                    self.record_score(*score);
                }
            }
            self.audio.update_music();
        }

        fn record_score(&mut self, score: u32) {
            let length = self.session.state().snake.len();
            self.last_rank = self.high_scores.add_score(
                score,
                self.session.difficulty(),
                length,
                js_sys::Date::now(),
            );
            if let Some(rank) = self.last_rank {
                log::info!("New high score #{}: {}", rank, score);
                self.high_scores.save();
            }
        }

        /// Start a new session with the current difficulty preference
        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.session.restart_with(self.settings.difficulty, seed);
            self.input = TickInput::default();
            self.swipe.cancel();
            self.last_rank = None;
            self.audio.start_music();
            log::info!("Game restarted with seed: {}", seed);
        }

        /// Draw the grid, food and snake
        fn render(&self) {
            let cell = self.config.cell_size as f64;
            let (w, h) = self.config.canvas_size();
            let ctx = &self.ctx;
            let snap = self.session.snapshot();

            ctx.set_fill_style_str("#101418");
            ctx.fill_rect(0.0, 0.0, w as f64, h as f64);

            if self.settings.show_grid {
                ctx.set_fill_style_str("#1a2026");
                for x in 0..self.config.grid.width {
                    ctx.fill_rect(x as f64 * cell, 0.0, 1.0, h as f64);
                }
                for y in 0..self.config.grid.height {
                    ctx.fill_rect(0.0, y as f64 * cell, w as f64, 1.0);
                }
            }

            ctx.set_fill_style_str("#e84a5f");
            ctx.fill_rect(
                snap.food.x as f64 * cell + 2.0,
                snap.food.y as f64 * cell + 2.0,
                cell - 4.0,
                cell - 4.0,
            );

            for (i, segment) in snap.body.iter().enumerate() {
                ctx.set_fill_style_str(if i == 0 { "#b8f28b" } else { "#5fbf4a" });
                ctx.fill_rect(
                    segment.x as f64 * cell + 1.0,
                    segment.y as f64 * cell + 1.0,
                    cell - 2.0,
                    cell - 2.0,
                );
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let board = self.board.borrow();

            set_text(&document, "#hud-score .hud-value", &board.score.to_string());
            set_text(&document, "#hud-best .hud-value", &board.best.to_string());
            set_text(
                &document,
                "#hud-length .hud-value",
                &self.session.state().snake.len().to_string(),
            );
            set_text(
                &document,
                "#hud-level .hud-value",
                &(self.session.state().level() + 1).to_string(),
            );
            set_text(
                &document,
                "#hud-difficulty .hud-value",
                self.session.difficulty().as_str(),
            );

            set_visible(&document, "pause-menu", board.phase == GamePhase::Paused);
            set_visible(&document, "game-over", board.phase == GamePhase::GameOver);
            if board.phase == GamePhase::GameOver {
                set_text(&document, "#final-score", &board.score.to_string());
                let rank = self
                    .last_rank
                    .map(|r| format!("New high score #{}", r))
                    .unwrap_or_default();
                set_text(&document, "#final-rank", &rank);
            }
        }
    }

    fn set_text(document: &web_sys::Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&format!("Failed to init logger: {e}")))?;

        log::info!("Snake Grid starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = GameConfig::default();
        let (width, height) = config.canvas_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(ctx, config, seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());
        setup_teardown(&window, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Snake Grid running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let key = event.key();
                if let Some(direction) = direction_for_key(&key) {
                    event.prevent_default();
                    g.input.push_direction(direction);
                } else if g.session.phase() == GamePhase::GameOver {
                    if key == "Enter" || key == " " {
                        g.restart();
                    }
                } else if is_pause_key(&key) {
                    event.prevent_default();
                    g.input.pause = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - begin swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.swipe.begin(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - finish swipe
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut g = game.borrow_mut();
                    let (x, y) = (touch.client_x() as f32, touch.client_y() as f32);
                    if let Some(direction) = g.swipe.end(x, y) {
                        g.input.push_direction(direction);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        game.borrow_mut().frames.schedule();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if !g.frames.begin_frame() {
                log::info!("Frame loop stopped");
                return;
            }

            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt_ms);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        for id in ["restart-btn", "play-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().restart();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.pause = true; // Toggle back to playing
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Difficulty applies to the next game only
        for difficulty in snake_grid::sim::Difficulty::ALL {
            let id = format!("difficulty-{}", difficulty.as_str().to_lowercase());
            if let Some(btn) = document.get_element_by_id(&id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let mut g = game.borrow_mut();
                    g.settings.difficulty = difficulty;
                    g.settings.save();
                    log::info!("Difficulty for next game: {}", difficulty.as_str());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.muted = !g.settings.muted;
                g.settings.save();
                let settings = g.settings.clone();
                g.audio.apply_settings(&settings);
                log::info!("Muted: {}", settings.muted);
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
                    log::debug!("Tab hidden");
                    game.borrow_mut().auto_pause = true;
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                log::debug!("Window blur");
                game.borrow_mut().auto_pause = true;
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the frame loop when the page goes away so no tick runs against
    /// a discarded session. A page restored from the back/forward cache
    /// gets its loop back on `pageshow`.
    fn setup_teardown(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                let mut g = game.borrow_mut();
                g.frames.stop();
                g.auto_pause = true;
                g.audio.stop_music();
                log::info!("Page hidden (persisted: {})", event.persisted());
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if !event.persisted() {
                    return;
                }
                let needs_frame = {
                    let mut g = game.borrow_mut();
                    g.last_time = 0.0;
                    if g.session.phase() != GamePhase::GameOver {
                        g.audio.start_music();
                    }
                    g.frames.restore()
                };
                log::info!("Page restored from cache");
                if needs_frame {
                    request_animation_frame(game.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
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
    log::info!("Snake Grid (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: an autopilot plays one session at a fixed 60 fps frame rate
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use snake_grid::sim::{Direction, GameEvent, GamePhase, GameState, TickInput};
    use snake_grid::{GameConfig, Scoreboard, Session};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn run(seed: u64) {
        let mut session = Session::new(
            GameConfig::default(),
            snake_grid::sim::Difficulty::Medium,
            seed,
            Scoreboard::new(),
        );

        let mut frames = 0;
        while session.phase() == GamePhase::Playing && frames < MAX_FRAMES {
            let input = TickInput {
                direction: autopilot(session.state()),
                pause: false,
            };
            for event in session.tick(&input, FRAME_MS) {
                match event {
                    GameEvent::AteFood { score } => log::debug!("Ate food, score {}", score),
                    GameEvent::LeveledUp { level } => log::info!("Reached level {}", level + 1),
                    other => log::info!("{:?}", other),
                }
            }
            frames += 1;
        }

        let state = session.state();
        println!(
            "seed {}: score {} length {} steps {} ({})",
            seed,
            state.score,
            state.snake.len(),
            state.steps,
            state.phase.as_str()
        );
    }

    /// Greedy: step toward the food along any direction whose next cell is
    /// free, preferring the one that closes the most distance
    fn autopilot(state: &GameState) -> Option<Direction> {
        let head = state.snake.head();
        let food = state.food.position();
        let grid = state.config.grid;
        let current = state.snake.direction();
        let body = state.snake.body();
        // The tail cell frees up on a normal step
        let blocking = &body[..body.len().saturating_sub(1)];

        Direction::ALL
            .into_iter()
            .filter(|&d| d != current.opposite())
            .map(|d| (d, head + d.vector()))
            .filter(|&(_, next)| grid.contains(next) && !blocking.contains(&next))
            .min_by_key(|&(_, next)| (next - food).abs().element_sum())
            .map(|(d, _)| d)
    }
}
