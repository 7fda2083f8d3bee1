//! Swan Dash - A side-scrolling swan runner
//!
//! Core modules:
//! - `sim`: Simulation (player physics, obstacles, collisions, run state)
//! - `app`: Per-frame session driving the simulation and its collaborators
//! - `renderer`: Draw command generation and the Canvas 2D surface
//! - `platform`: Browser/native platform abstraction (time, input, storage)
//! - `persistence`: Remote score store
//! - `audio`: Sound cues and background music

pub mod app;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{Game, NamePrompt};
pub use highscores::{Leaderboard, ScoreEntry};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (logical pixels)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 200.0;

    /// Movement is tuned in "pixels per frame at 60 Hz"; multiply by dt and this
    /// to keep the feel independent of the display refresh rate
    pub const FRAME_REFERENCE_RATE: f32 = 60.0;
    /// Largest delta-time handed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Swan defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const GROUND_Y: f32 = 120.0;
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    /// Upward velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -9.0;
    pub const GRAVITY: f32 = 0.5;
    /// Jumps allowed before landing (2 = double jump)
    pub const MAX_JUMPS: u8 = 2;
    /// Seconds per sprite animation frame
    pub const ANIM_FRAME_SECS: f32 = 0.15;

    /// Scroll speed
    pub const START_SPEED: f32 = 5.0;
    pub const MAX_SPEED: f32 = 15.0;
    /// Speed gained per second of play
    pub const SPEED_RAMP_RATE: f32 = 0.2;

    /// Score gained per second of play
    pub const SCORE_RATE: f32 = 6.0;
    /// Score interval between theme inversions
    pub const MILESTONE_INTERVAL: u32 = 750;

    /// Seconds between obstacle spawns
    pub const SPAWN_INTERVAL: f32 = 1.2;
    /// Chance that a spawn is a low flyer rather than a plant
    pub const LOW_FLYER_CHANCE: f32 = 0.3;
    pub const LOW_FLYER_WIDTH: f32 = 46.0;
    pub const LOW_FLYER_HEIGHT: f32 = 40.0;
    /// Flight altitudes (top edge): high flyers only catch a jumping swan,
    /// low flyers must be ducked or jumped
    pub const LOW_FLYER_ALTITUDES: [f32; 2] = [50.0, 100.0];

    /// Nominal spawn frequency, tightened at each milestone (not read by spawning)
    pub const START_OBSTACLE_FREQUENCY: u32 = 90;
    pub const MIN_OBSTACLE_FREQUENCY: u32 = 40;
    pub const OBSTACLE_FREQUENCY_STEP: u32 = 5;

    /// Leaderboard size fetched from the score store
    pub const LEADERBOARD_SIZE: usize = 10;
}
