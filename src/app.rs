//! Game session
//!
//! Owns the simulation plus every side-effecting collaborator. One call to
//! [`Game::frame`] per animation frame: measure dt, drain queued input, tick,
//! react to the events the tick produced, and compose the frame to draw.

use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::{AudioSink, Cue};
use crate::consts::LEADERBOARD_SIZE;
use crate::highscores::Leaderboard;
use crate::persistence::ScoreStore;
use crate::platform::{FrameClock, InputQueue, Spawn};
use crate::renderer::{Frame, View, compose_frame};
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GameState, TickInput, tick};

/// Asks the player for a nickname once a run is over
pub trait NamePrompt {
    /// `None` (or a blank answer) means the score is not submitted
    fn on_run_end(&mut self, score: u32) -> Option<String>;
}

/// Answers every prompt with the same name
#[derive(Debug, Clone, Default)]
pub struct FixedName(pub Option<String>);

impl FixedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }
}

impl NamePrompt for FixedName {
    fn on_run_end(&mut self, _score: u32) -> Option<String> {
        self.0.clone()
    }
}

/// `window.prompt` dialog
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserPrompt;

#[cfg(target_arch = "wasm32")]
impl NamePrompt for BrowserPrompt {
    fn on_run_end(&mut self, score: u32) -> Option<String> {
        let window = web_sys::window()?;
        let message = format!("Game over! {} points. Enter a nickname:", score);
        window.prompt_with_message(&message).ok().flatten()
    }
}

/// Side-effecting collaborators handed to the session
pub struct Services {
    pub store: Rc<dyn ScoreStore>,
    pub audio: Box<dyn AudioSink>,
    pub prompt: Box<dyn NamePrompt>,
    pub spawner: Box<dyn Spawn>,
}

/// A play session: one simulation plus its collaborators
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    clock: FrameClock,
    input: InputQueue,
    leaderboard: Rc<RefCell<Leaderboard>>,
    store: Rc<dyn ScoreStore>,
    audio: Box<dyn AudioSink>,
    prompt: Box<dyn NamePrompt>,
    spawner: Box<dyn Spawn>,
}

impl Game {
    pub fn new(
        seed: u64,
        settings: Settings,
        leaderboard: Leaderboard,
        services: Services,
    ) -> Self {
        log::info!("Session seed: {}", seed);
        Self {
            state: GameState::new(seed),
            settings,
            clock: FrameClock::new(),
            input: InputQueue::new(),
            leaderboard: Rc::new(RefCell::new(leaderboard)),
            store: services.store,
            audio: services.audio,
            prompt: services.prompt,
            spawner: services.spawner,
        }
    }

    /// Queue a keyboard event (`KeyboardEvent.code`)
    pub fn push_key(&mut self, code: &str, pressed: bool) -> bool {
        self.input.push_key(code, pressed)
    }

    pub fn push_command(&mut self, command: Command) {
        self.input.push(command);
    }

    /// Shared handle to the leaderboard (updated by background fetches)
    pub fn leaderboard(&self) -> Rc<RefCell<Leaderboard>> {
        self.leaderboard.clone()
    }

    /// Fetch the remote top 10 in the background
    pub fn refresh_leaderboard(&self) {
        let store = self.store.clone();
        let board = self.leaderboard.clone();
        self.spawner.spawn(Box::pin(fetch_leaderboard(store, board)));
    }

    /// Advance one animation frame and return what to draw
    pub fn frame(&mut self, timestamp_ms: f64) -> Frame {
        let dt = self.clock.advance(timestamp_ms);

        let mut commands = Vec::new();
        for command in self.input.drain() {
            match command {
                Command::ToggleHitboxes => {
                    let shown = self.settings.toggle_hitboxes();
                    log::info!("Hitboxes {}", if shown { "shown" } else { "hidden" });
                    self.settings.save();
                }
                Command::ToggleMute => self.toggle_music(),
                other => commands.push(other),
            }
        }

        tick(&mut self.state, &TickInput::new(commands), dt);

        for event in self.state.drain_events() {
            self.handle_event(event);
        }

        compose_frame(&self.state, &self.view())
    }

    /// Presentation toggles for the current frame
    pub fn view(&self) -> View {
        View {
            show_hitboxes: self.settings.show_hitboxes,
            music_enabled: self.settings.music_enabled,
            inverted: self
                .settings
                .effective_inversion(self.state.difficulty.inverted),
        }
    }

    fn toggle_music(&mut self) {
        let enabled = self.settings.toggle_music();
        log::info!("Music {}", if enabled { "on" } else { "off" });
        if enabled && self.state.is_playing() {
            self.audio.resume_music();
        } else {
            self.audio.stop_music();
        }
        self.settings.save();
    }

    fn handle_event(&mut self, event: GameEvent) {
        if let Some(cue) = Cue::for_event(&event) {
            self.audio.play(cue);
        }

        match event {
            GameEvent::RunStarted { .. } => {
                if self.settings.music_enabled {
                    self.audio.start_music();
                }
            }
            GameEvent::RunEnded { score } => {
                self.audio.stop_music();
                // Keys still held when the dialog opens never see their keyup
                self.input.drain();
                self.clock.reset();
                match self.prompt.on_run_end(score) {
                    Some(name) if !name.trim().is_empty() => self.submit_score(name, score),
                    _ => log::info!("No nickname given, score {} not submitted", score),
                }
            }
            GameEvent::Jumped { .. } | GameEvent::Ducked | GameEvent::ThemeInverted { .. } => {}
        }
    }

    fn submit_score(&self, name: String, score: u32) {
        let store = self.store.clone();
        let board = self.leaderboard.clone();
        self.spawner.spawn(Box::pin(async move {
            match store.submit(&name, score).await {
                Ok(()) => {
                    log::info!("Submitted score {} for '{}'", score, name.trim());
                    fetch_leaderboard(store, board).await;
                }
                Err(e) => log::error!("Score submission failed: {}", e),
            }
        }));
    }
}

async fn fetch_leaderboard(store: Rc<dyn ScoreStore>, board: Rc<RefCell<Leaderboard>>) {
    match store.fetch_top(LEADERBOARD_SIZE).await {
        Ok(entries) => {
            let mut board = board.borrow_mut();
            board.replace(entries);
            board.save();
            log::info!("Leaderboard refreshed ({} entries)", board.entries.len());
        }
        Err(e) => log::warn!("Leaderboard fetch failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::highscores::ScoreEntry;
    use crate::persistence::MemoryScoreStore;
    use crate::platform::InlineSpawner;
    use crate::sim::{GamePhase, Obstacle};

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Recorder {
        fn log(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.borrow_mut().push(format!("{:?}", cue));
        }

        fn start_music(&mut self) {
            self.0.borrow_mut().push("start".to_string());
        }

        fn resume_music(&mut self) {
            self.0.borrow_mut().push("resume".to_string());
        }

        fn stop_music(&mut self) {
            self.0.borrow_mut().push("stop".to_string());
        }
    }

    fn game_with(store: &MemoryScoreStore, audio: &Recorder, name: Option<&str>) -> Game {
        Game::new(
            7,
            Settings::default(),
            Leaderboard::new(),
            Services {
                store: Rc::new(store.clone()),
                audio: Box::new(audio.clone()),
                prompt: Box::new(FixedName(name.map(str::to_string))),
                spawner: Box::new(InlineSpawner),
            },
        )
    }

    /// Start a run and put a plant right on top of the swan
    fn crash(game: &mut Game, score: f32) {
        game.push_command(Command::Start);
        game.frame(0.0);
        game.state.score = crate::sim::Score::new(score);
        game.state.obstacles.clear();
        game.state
            .obstacles
            .push(Obstacle::ground_plant(PLAYER_X, crate::sim::PlantVariant::new(3)));
        game.frame(16.0);
    }

    #[test]
    fn test_forced_collision_submits_once() {
        let store = MemoryScoreStore::new();
        let audio = Recorder::default();
        let mut game = game_with(&store, &audio, Some("swan"));

        crash(&mut game, 123.7);
        assert_eq!(game.state.phase, GamePhase::GameOver);
        assert_eq!(store.submitted(), vec![ScoreEntry::new("swan", 123)]);

        // Frozen until the next start
        let player = game.state.player.clone();
        let obstacles = game.state.obstacles.clone();
        for i in 0..10 {
            game.frame(32.0 + i as f64 * 16.0);
        }
        assert_eq!(game.state.player, player);
        assert_eq!(game.state.obstacles.len(), obstacles.len());
        assert_eq!(store.submitted().len(), 1);

        let log = audio.log();
        assert_eq!(log.iter().filter(|s| *s == "Hit").count(), 1);
        assert!(log.contains(&"start".to_string()));
        assert!(log.contains(&"stop".to_string()));
    }

    #[test]
    fn test_leaderboard_refreshes_after_submit() {
        let store = MemoryScoreStore::new();
        let audio = Recorder::default();
        let mut game = game_with(&store, &audio, Some("swan"));

        crash(&mut game, 50.0);
        let board = game.leaderboard();
        assert_eq!(board.borrow().entries, vec![ScoreEntry::new("swan", 50)]);
        assert_eq!(board.borrow().revision(), 1);
    }

    #[test]
    fn test_blank_name_skips_submission() {
        for name in [None, Some(""), Some("   ")] {
            let store = MemoryScoreStore::new();
            let mut game = game_with(&store, &Recorder::default(), name);
            crash(&mut game, 80.0);
            assert_eq!(game.state.phase, GamePhase::GameOver);
            assert!(store.submitted().is_empty());
        }
    }

    #[test]
    fn test_failed_submission_does_not_stall() {
        let store = MemoryScoreStore::new();
        let mut game = game_with(&store, &Recorder::default(), Some("swan"));

        store.fail_next();
        crash(&mut game, 80.0);
        assert!(store.submitted().is_empty());
        assert_eq!(game.leaderboard().borrow().revision(), 0);

        // Next run plays and submits normally
        game.push_command(Command::Start);
        game.frame(100.0);
        assert_eq!(game.state.phase, GamePhase::Playing);
        game.frame(116.0);
        assert!(game.state.score.value() > 0.0);
    }

    #[test]
    fn test_refresh_at_startup() {
        let store = MemoryScoreStore::new();
        pollster::block_on(store.submit("old", 900)).unwrap();
        let game = game_with(&store, &Recorder::default(), None);
        game.refresh_leaderboard();
        assert_eq!(game.leaderboard().borrow().top_score(), Some(900));
    }

    #[test]
    fn test_keys_drive_the_run() {
        let store = MemoryScoreStore::new();
        let audio = Recorder::default();
        let mut game = game_with(&store, &audio, None);

        assert!(game.push_key("Space", false));
        game.frame(0.0);
        assert!(game.state.is_playing());

        game.push_key("Space", true);
        game.frame(16.0);
        assert!(game.state.player.airborne);
        assert!(audio.log().contains(&"Jump".to_string()));

        assert!(!game.push_key("KeyQ", true));
    }

    #[test]
    fn test_toggles_handled_by_session() {
        let store = MemoryScoreStore::new();
        let audio = Recorder::default();
        let mut game = game_with(&store, &audio, None);

        game.push_key("KeyH", false);
        game.frame(0.0);
        assert!(game.view().show_hitboxes);

        // Muting before a run only pauses
        game.push_key("KeyM", false);
        game.frame(16.0);
        assert!(!game.view().music_enabled);
        assert_eq!(audio.log(), vec!["stop"]);

        // Starting with music off stays silent
        game.push_command(Command::Start);
        game.frame(32.0);
        assert!(!audio.log().contains(&"start".to_string()));

        // Unmuting mid-run resumes
        game.push_key("KeyM", false);
        game.frame(48.0);
        assert_eq!(audio.log().last().map(String::as_str), Some("resume"));
    }

    #[test]
    fn test_reduced_motion_hides_inversion() {
        let store = MemoryScoreStore::new();
        let mut game = game_with(&store, &Recorder::default(), None);
        game.state.difficulty.inverted = true;
        assert!(game.view().inverted);
        game.settings.reduced_motion = true;
        assert!(!game.view().inverted);
    }
}
