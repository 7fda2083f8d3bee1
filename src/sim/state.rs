//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::{Difficulty, Score};
use super::obstacle::{ObstacleField, Spawner};
use super::player::Player;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start input
    Idle,
    /// Active run
    Playing,
    /// Run ended by a collision; the next start input begins a new run
    GameOver,
}

/// Things that happened during a tick, drained by the session each frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted { run: u32 },
    /// Successful jump; `double` for the second jump before landing
    Jumped { double: bool },
    Ducked,
    /// Score milestone reached; palette is now `inverted`
    ThemeInverted { inverted: bool },
    /// Collision ended the run with this final (floored) score
    RunEnded { score: u32 },
}

/// Complete run state, owned by the session and passed into every update
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub spawner: Spawner,
    pub difficulty: Difficulty,
    pub score: Score,
    /// Seconds since the run started
    pub elapsed: f32,
    /// Parallax offsets (presentation only)
    pub background_x: f32,
    pub ground_x: f32,
    /// Runs started this session
    pub runs: u32,
    /// Pending events (drained by the session)
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            player: Player::default(),
            obstacles: ObstacleField::new(),
            spawner: Spawner::default(),
            difficulty: Difficulty::default(),
            score: Score::default(),
            elapsed: 0.0,
            background_x: 0.0,
            ground_x: 0.0,
            runs: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset every per-run field and enter Playing
    pub fn start_run(&mut self) {
        self.player = Player::default();
        self.obstacles.clear();
        self.spawner = Spawner::default();
        self.difficulty = Difficulty::default();
        self.score = Score::default();
        self.elapsed = 0.0;
        self.background_x = 0.0;
        self.ground_x = 0.0;
        self.runs += 1;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RunStarted { run: self.runs });
        log::info!("Run {} started", self.runs);
    }

    /// Freeze the run after a collision. Only the first call per run has an effect.
    pub fn end_run(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.player.ducking = false;
        let score = self.score.floored();
        self.events.push(GameEvent::RunEnded { score });
        log::info!("Run {} over with score {}", self.runs, score);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// RNG for spawning (split borrow from the rest of the state)
    pub(crate) fn spawn_parts(&mut self) -> (&mut Spawner, &mut ObstacleField, &mut Pcg32) {
        (&mut self.spawner, &mut self.obstacles, &mut self.rng)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
