//! Swan Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use swan_dash::app::{BrowserPrompt, Game, Services};
    use swan_dash::audio::AudioManager;
    use swan_dash::persistence::{FirestoreStore, MemoryScoreStore, ScoreStore};
    use swan_dash::platform::WasmSpawner;
    use swan_dash::renderer::Surface;
    use swan_dash::renderer::canvas::CanvasSurface;
    use swan_dash::{Leaderboard, Settings};

    /// Session plus the page it draws into
    struct Page {
        game: Game,
        surface: CanvasSurface,
        /// Leaderboard revision currently shown in `#rankingList`
        shown_revision: Option<u64>,
    }

    impl Page {
        fn frame(&mut self, time: f64) {
            let frame = self.game.frame(time);
            self.surface.present(&frame);
            self.update_ranking();
        }

        /// Redraw the ranking list when the board changed
        fn update_ranking(&mut self) {
            let board = self.game.leaderboard();
            let board = board.borrow();
            if self.shown_revision == Some(board.revision()) {
                return;
            }
            self.shown_revision = Some(board.revision());

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(list) = document.get_element_by_id("rankingList") else {
                return;
            };
            list.set_inner_html("");
            for line in board.lines() {
                if let Ok(item) = document.create_element("li") {
                    item.set_text_content(Some(&line));
                    let _ = list.append_child(&item);
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Swan Dash starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No #gameCanvas element");
                return;
            }
        };
        let Some(surface) = CanvasSurface::new(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let store: Rc<dyn ScoreStore> = match FirestoreStore::from_window() {
            Some(store) => Rc::new(store),
            None => {
                log::warn!("No SWAN_STORE configured, scores stay in memory");
                Rc::new(MemoryScoreStore::new())
            }
        };

        let settings = Settings::load();
        let services = Services {
            store,
            audio: Box::new(AudioManager::new(&settings)),
            prompt: Box::new(BrowserPrompt),
            spawner: Box::new(WasmSpawner),
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, settings, Leaderboard::load(), services);
        game.refresh_leaderboard();

        let page = Rc::new(RefCell::new(Page {
            game,
            surface,
            shown_revision: None,
        }));

        setup_input_handlers(&window, page.clone());

        // Start game loop
        request_animation_frame(page);

        log::info!("Swan Dash running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, page: Rc<RefCell<Page>>) {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                // Keep the page from scrolling under the game
                if matches!(code.as_str(), "Space" | "ArrowUp" | "ArrowDown") {
                    event.prevent_default();
                }
                // Auto-repeat would re-trigger jumps and duck cues
                if pressed && event.repeat() {
                    return;
                }
                // Busy while a modal dialog is open mid-frame
                if let Ok(mut page) = page.try_borrow_mut() {
                    page.game.push_key(&code, pressed);
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(page: Rc<RefCell<Page>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(page, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(page: Rc<RefCell<Page>>, time: f64) {
        page.borrow_mut().frame(time);
        request_animation_frame(page);
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
    log::info!("Swan Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play in the browser");

    autopilot::run(3);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a bot that jumps whatever is ahead, at a fixed 60 Hz
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use std::rc::Rc;

    use swan_dash::app::{FixedName, Game, Services};
    use swan_dash::audio::NullAudio;
    use swan_dash::consts::*;
    use swan_dash::persistence::MemoryScoreStore;
    use swan_dash::platform::InlineSpawner;
    use swan_dash::sim::{Command, GamePhase, Obstacle};
    use swan_dash::{Leaderboard, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a run that survives this long
    const MAX_FRAMES_PER_RUN: u32 = 60 * 120;
    /// Jump when an obstacle's left edge is this close
    const LOOKAHEAD: f32 = 70.0;

    pub fn run(runs: u32) {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let store = MemoryScoreStore::new();
        let mut game = Game::new(
            seed,
            Settings::default(),
            Leaderboard::new(),
            Services {
                store: Rc::new(store.clone()),
                audio: Box::new(NullAudio),
                prompt: Box::new(FixedName::new("autopilot")),
                spawner: Box::new(InlineSpawner),
            },
        );
        game.refresh_leaderboard();

        let mut time = 0.0;
        for _ in 0..runs {
            game.push_command(Command::Start);
            let mut frames = 0;
            loop {
                if let Some(command) = decide(&game) {
                    game.push_command(command);
                }
                game.frame(time);
                time += FRAME_MS;
                frames += 1;

                if game.state.phase == GamePhase::GameOver {
                    break;
                }
                if frames >= MAX_FRAMES_PER_RUN {
                    log::info!("Run {} survived, stopping it", game.state.runs);
                    break;
                }
            }
            log::info!(
                "Run {}: {} points after {:.1}s (speed {:.1})",
                game.state.runs,
                game.state.score.floored(),
                game.state.elapsed,
                game.state.difficulty.speed
            );
        }

        log::info!("{} scores submitted", store.submitted().len());
        for line in game.leaderboard().borrow().lines() {
            log::info!("{}", line);
        }
    }

    /// Jump over plants, duck under birds
    fn decide(game: &Game) -> Option<Command> {
        let player = &game.state.player;
        let ahead = game.state.obstacles.iter().find(|o| {
            let x = o.pos().x;
            x + o.size().x > PLAYER_X && x - (PLAYER_X + PLAYER_WIDTH) < LOOKAHEAD
        });

        match ahead {
            Some(Obstacle::LowFlyer(_)) => {
                (!player.ducking && !player.airborne).then_some(Command::Duck(true))
            }
            Some(_) => {
                if player.ducking {
                    Some(Command::Duck(false))
                } else {
                    (!player.airborne).then_some(Command::Jump)
                }
            }
            None => player.ducking.then_some(Command::Duck(false)),
        }
    }
}
