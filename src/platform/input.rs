//! Keyboard bindings and the per-frame command queue
//!
//! Event handlers never touch game state directly: they push commands here and
//! the session drains the queue once at the start of each frame.

use std::collections::VecDeque;

use crate::sim::Command;

/// Map a physical key (`KeyboardEvent.code`) and its direction to a command
pub fn bind_key(code: &str, pressed: bool) -> Option<Command> {
    match (code, pressed) {
        ("Space" | "ArrowUp", true) => Some(Command::Jump),
        ("Space" | "ArrowUp", false) => Some(Command::Start),
        ("ArrowDown", true) => Some(Command::Duck(true)),
        ("ArrowDown", false) => Some(Command::Duck(false)),
        ("KeyH", false) => Some(Command::ToggleHitboxes),
        ("KeyM", false) => Some(Command::ToggleMute),
        _ => None,
    }
}

/// FIFO of commands waiting for the next frame
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Command>,
}

impl InputQueue {
    /// Upper bound on queued commands (held keys auto-repeat)
    pub const CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command; the oldest is dropped when full
    pub fn push(&mut self, command: Command) {
        if self.pending.len() >= Self::CAPACITY {
            self.pending.pop_front();
        }
        self.pending.push_back(command);
    }

    /// Queue the command bound to a key, if any
    pub fn push_key(&mut self, code: &str, pressed: bool) -> bool {
        match bind_key(code, pressed) {
            Some(command) => {
                self.push(command);
                true
            }
            None => false,
        }
    }

    /// Take everything queued, in arrival order
    pub fn drain(&mut self) -> Vec<Command> {
        self.pending.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(bind_key("Space", true), Some(Command::Jump));
        assert_eq!(bind_key("ArrowUp", false), Some(Command::Start));
        assert_eq!(bind_key("ArrowDown", true), Some(Command::Duck(true)));
        assert_eq!(bind_key("ArrowDown", false), Some(Command::Duck(false)));
        assert_eq!(bind_key("KeyH", false), Some(Command::ToggleHitboxes));
        assert_eq!(bind_key("KeyM", false), Some(Command::ToggleMute));
        assert_eq!(bind_key("KeyH", true), None);
        assert_eq!(bind_key("KeyQ", true), None);
    }

    #[test]
    fn test_queue_order_and_drain() {
        let mut queue = InputQueue::new();
        assert!(queue.push_key("Space", false));
        assert!(queue.push_key("Space", true));
        assert!(!queue.push_key("Tab", true));
        assert_eq!(queue.drain(), vec![Command::Start, Command::Jump]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_queue_bounded() {
        let mut queue = InputQueue::new();
        for _ in 0..InputQueue::CAPACITY {
            queue.push(Command::Duck(true));
        }
        queue.push(Command::Jump);
        let drained = queue.drain();
        assert_eq!(drained.len(), InputQueue::CAPACITY);
        assert_eq!(drained.last(), Some(&Command::Jump));
    }
}
