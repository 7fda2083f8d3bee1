//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//! - Storage (LocalStorage on web)
//! - Running fire-and-forget tasks

pub mod input;
pub mod storage;
pub mod time;

use std::future::Future;
use std::pin::Pin;

pub use input::{InputQueue, bind_key};
pub use time::FrameClock;

/// A boxed future run to completion on the local thread
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Executor for background work (score submission, leaderboard fetches)
pub trait Spawn {
    fn spawn(&self, task: LocalTask);
}

/// Browser executor: hands the task to the JS microtask queue
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct WasmSpawner;

#[cfg(target_arch = "wasm32")]
impl Spawn for WasmSpawner {
    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Native executor: drives the task to completion on the spot.
///
/// Only suitable for futures that complete without an external reactor, like
/// the in-memory score store.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineSpawner;

#[cfg(not(target_arch = "wasm32"))]
impl Spawn for InlineSpawner {
    fn spawn(&self, task: LocalTask) {
        pollster::block_on(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_inline_spawner_runs_task() {
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        InlineSpawner.spawn(Box::pin(async move { flag.set(true) }));
        assert!(ran.get());
    }
}
