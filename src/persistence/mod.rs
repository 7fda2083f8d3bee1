//! Remote score store
//!
//! Features:
//! - `ScoreStore` seam consumed by the session (submit + top-N fetch)
//! - In-memory store for native runs and tests
//! - Firestore REST store in the browser

pub mod firestore;
pub mod memory;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::highscores::ScoreEntry;

pub use firestore::StoreConfig;
#[cfg(target_arch = "wasm32")]
pub use firestore::FirestoreStore;
pub use memory::MemoryScoreStore;

/// Failure talking to a score store. Always transient from the game's point of
/// view: logged and dropped.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("store answered with HTTP {status}")]
    Status { status: u16 },
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("rejected entry: {0}")]
    Rejected(String),
}

/// Future returned by store operations (single-threaded, not `Send`)
pub type StoreFuture<T> = Pin<Box<dyn Future<Output = Result<T, StoreError>>>>;

/// Remote high score board
pub trait ScoreStore {
    /// Record a finished run
    fn submit(&self, name: &str, score: u32) -> StoreFuture<()>;

    /// Best `n` entries, highest score first
    fn fetch_top(&self, n: usize) -> StoreFuture<Vec<ScoreEntry>>;
}

/// Check a nickname before it is sent anywhere; returns the trimmed name
pub fn validate_name(name: &str) -> Result<String, StoreError> {
    const MAX_NAME_CHARS: usize = 24;

    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Rejected("empty name".to_string()));
    }
    Ok(name.chars().take(MAX_NAME_CHARS).collect())
}
