//! In-process score store

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{ScoreStore, StoreError, StoreFuture, validate_name};
use crate::highscores::ScoreEntry;

/// Score store kept in memory. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    entries: Rc<RefCell<Vec<ScoreEntry>>>,
    fail_next: Rc<Cell<bool>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every entry ever submitted, in submission order
    pub fn submitted(&self) -> Vec<ScoreEntry> {
        self.entries.borrow().clone()
    }

    /// Make the next operation fail with a transport error
    pub fn fail_next(&self) {
        self.fail_next.set(true);
    }

    fn take_failure(&self) -> Option<StoreError> {
        self.fail_next
            .replace(false)
            .then(|| StoreError::Transport("simulated outage".to_string()))
    }
}

impl ScoreStore for MemoryScoreStore {
    fn submit(&self, name: &str, score: u32) -> StoreFuture<()> {
        let result = match self.take_failure() {
            Some(err) => Err(err),
            None => validate_name(name).map(|name| {
                self.entries.borrow_mut().push(ScoreEntry::new(name, score));
            }),
        };
        Box::pin(std::future::ready(result))
    }

    fn fetch_top(&self, n: usize) -> StoreFuture<Vec<ScoreEntry>> {
        let result = match self.take_failure() {
            Some(err) => Err(err),
            None => {
                let mut entries = self.entries.borrow().clone();
                // Stable: ties keep submission order
                entries.sort_by(|a, b| b.score.cmp(&a.score));
                entries.truncate(n);
                Ok(entries)
            }
        };
        Box::pin(std::future::ready(result))
    }
}
