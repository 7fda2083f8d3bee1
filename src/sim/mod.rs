//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Delta-time is handed in by the caller
//! - Seeded RNG only
//! - Input arrives as commands applied at the start of a tick

pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_hit, obstacle_hitbox, player_hitbox};
pub use difficulty::{Difficulty, Score};
pub use obstacle::{
    GroundPlant, LowFlyer, Obstacle, ObstacleField, PLANT_SIZES, PlantVariant, Spawner,
};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Command, TickInput, apply_command, tick};
