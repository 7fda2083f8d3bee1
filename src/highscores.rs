//! High score leaderboard
//!
//! Local copy of the remote top 10. Cached in LocalStorage so the board can be
//! shown before the first fetch from the score store completes.

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_SIZE;
use crate::platform::storage;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Nickname given at game over
    pub name: String,
    /// Floored final score
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
    /// Bumped on every change so the page knows when to redraw the list
    #[serde(skip)]
    revision: u64,
}

impl Leaderboard {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "swan_dash_leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the board with a fresh fetch from the score store
    pub fn replace(&mut self, mut entries: Vec<ScoreEntry>) {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(LEADERBOARD_SIZE);
        self.entries = entries;
        self.revision += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Display lines: "1. name - score"
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {} - {}", i + 1, e.name, e.score))
            .collect()
    }

    /// Load the cached board from LocalStorage
    pub fn load() -> Self {
        match storage::load_json::<Leaderboard>(Self::STORAGE_KEY) {
            Some(mut board) => {
                log::info!("Loaded {} cached high scores", board.entries.len());
                let entries = std::mem::take(&mut board.entries);
                board.replace(entries);
                board
            }
            None => Self::new(),
        }
    }

    pub fn save(&self) {
        storage::save_json(Self::STORAGE_KEY, self);
    }
}
