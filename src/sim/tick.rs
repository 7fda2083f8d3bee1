//! Per-frame simulation tick
//!
//! Core game loop that advances the run by a variable delta-time.

use super::collision::first_hit;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// A logical input command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a run (ignored while playing)
    Start,
    Jump,
    /// Hold (true) or release (false) the duck pose
    Duck(bool),
    /// Debug hitbox overlay, handled by the session
    ToggleHitboxes,
    /// Background music on/off, handled by the session
    ToggleMute,
}

/// Input commands for a single tick, applied in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }
}

/// Apply one command to the state machine. Commands outside their valid
/// window are ignored.
pub fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::Start => {
            if matches!(state.phase, GamePhase::Idle | GamePhase::GameOver) {
                state.start_run();
            }
        }
        Command::Jump => {
            if !state.is_playing() {
                return;
            }
            if state.player.jump() {
                let double = state.player.jump_count > 1;
                state.events.push(GameEvent::Jumped { double });
            }
        }
        Command::Duck(on) => {
            let playing = state.is_playing();
            if state.player.duck(on, playing) {
                state.events.push(GameEvent::Ducked);
            }
        }
        Command::ToggleHitboxes | Command::ToggleMute => {}
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for &command in &input.commands {
        apply_command(state, command);
    }

    // Idle and GameOver are frozen
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.elapsed += dt;

    // Difficulty
    state.difficulty.ramp(dt);
    let distance = state.difficulty.scroll_distance(dt);

    // Player physics
    state.player.integrate(dt);

    // Spawning and scrolling
    let anim_frame = ((state.elapsed / ANIM_FRAME_SECS) as u32 % 2) as u8;
    let (spawner, obstacles, rng) = state.spawn_parts();
    if let Some(obstacle) = spawner.update(dt, rng) {
        obstacles.push(obstacle);
    }
    obstacles.advance(distance, anim_frame);
    obstacles.prune();

    state.background_x = (state.background_x - distance * 0.5) % VIEW_WIDTH;
    state.ground_x = (state.ground_x - distance) % VIEW_WIDTH;

    // Collision ends the frame
    if first_hit(&state.player, &state.obstacles).is_some() {
        state.end_run();
        return;
    }

    // Score and milestones
    let prev_score = state.score;
    state.score.accumulate(dt);
    if state.difficulty.apply_milestones(&prev_score, &state.score) > 0 {
        let inverted = state.difficulty.inverted;
        log::info!(
            "Milestone at {} points (inverted: {}, frequency: {})",
            state.score.floored(),
            inverted,
            state.difficulty.obstacle_frequency
        );
        state.events.push(GameEvent::ThemeInverted { inverted });
    }
}
