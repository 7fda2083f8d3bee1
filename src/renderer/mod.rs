//! Rendering module
//!
//! Each frame the game state is turned into a flat list of draw commands; a
//! [`Surface`] (the Canvas 2D context in the browser) executes them.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, Obstacle, Rect, obstacle_hitbox, player_hitbox};

/// Sprite images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Ground,
    Swan(u8),
    SwanDuck(u8),
    Bird(u8),
    Plant(usize),
}

impl Sprite {
    /// Every sprite, for preloading
    pub fn all() -> Vec<Sprite> {
        let mut sprites = vec![Sprite::Background, Sprite::Ground];
        for frame in 0..2 {
            sprites.push(Sprite::Swan(frame));
            sprites.push(Sprite::SwanDuck(frame));
            sprites.push(Sprite::Bird(frame));
        }
        sprites.extend((0..PLANT_IMAGES.len()).map(Sprite::Plant));
        sprites
    }

    /// Asset path
    pub fn path(self) -> &'static str {
        match self {
            Sprite::Background => "assets/bg.png",
            Sprite::Ground => "assets/ground.png",
            Sprite::Swan(frame) => ["assets/swan1.png", "assets/swan2.png"][frame as usize % 2],
            Sprite::SwanDuck(frame) => {
                ["assets/swan_duck1.png", "assets/swan_duck2.png"][frame as usize % 2]
            }
            Sprite::Bird(frame) => ["assets/bird1.png", "assets/bird2.png"][frame as usize % 2],
            Sprite::Plant(variant) => PLANT_IMAGES[variant % PLANT_IMAGES.len()],
        }
    }
}

/// Plant images, indexed like `sim::PLANT_SIZES`
const PLANT_IMAGES: [&str; 6] = [
    "assets/plant_small_1.png",
    "assets/plant_small_2.png",
    "assets/plant_small_3.png",
    "assets/plant_large_1.png",
    "assets/plant_large_2.png",
    "assets/plant_large_3.png",
];

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite { sprite: Sprite, rect: Rect },
    /// Debug hitbox outline
    StrokeRect { rect: Rect, color: &'static str },
    Text {
        text: String,
        pos: Vec2,
        font: &'static str,
        align: Align,
    },
}

/// Everything needed to present one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    /// Page-level colour inversion
    pub inverted: bool,
}

/// Presentation-only toggles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct View {
    pub show_hitboxes: bool,
    pub music_enabled: bool,
    pub inverted: bool,
}

/// Draw command sink
pub trait Surface {
    fn present(&mut self, frame: &Frame);
}

const FONT_LARGE: &str = "20px Arial";
const FONT_STATUS: &str = "9px Arial";
const FONT_CREDIT: &str = "10px 'Segoe UI', sans-serif";
const FONT_SCORE: &str = "16px Arial";
const PLAYER_HITBOX_COLOR: &str = "blue";
const OBSTACLE_HITBOX_COLOR: &str = "red";
/// Top of the ground strip
const GROUND_STRIP_Y: f32 = 176.0;
const CREDIT: &str = "madswanattack";

/// Build the draw list for the current state
pub fn compose_frame(state: &GameState, view: &View) -> Frame {
    let mut commands = Vec::with_capacity(16 + state.obstacles.len() * 2);

    // Parallax background and ground, each tiled twice
    for (sprite, offset, y, h) in [
        (Sprite::Background, state.background_x, 0.0, VIEW_HEIGHT),
        (
            Sprite::Ground,
            state.ground_x,
            GROUND_STRIP_Y,
            VIEW_HEIGHT - GROUND_STRIP_Y,
        ),
    ] {
        for tile in 0..2 {
            commands.push(DrawCommand::Sprite {
                sprite,
                rect: Rect::new(
                    Vec2::new(offset + tile as f32 * VIEW_WIDTH, y),
                    Vec2::new(VIEW_WIDTH, h),
                ),
            });
        }
    }

    // Swan
    let player = &state.player;
    let swan = if player.ducking {
        Sprite::SwanDuck(player.frame)
    } else {
        Sprite::Swan(player.frame)
    };
    commands.push(DrawCommand::Sprite {
        sprite: swan,
        rect: Rect::new(player.pos, player.size),
    });

    // Obstacles
    for obstacle in &state.obstacles {
        let sprite = match obstacle {
            Obstacle::LowFlyer(flyer) => Sprite::Bird(flyer.frame),
            Obstacle::GroundPlant(plant) => Sprite::Plant(plant.variant.index()),
        };
        commands.push(DrawCommand::Sprite {
            sprite,
            rect: obstacle.bounds(),
        });
    }

    if view.show_hitboxes {
        commands.push(DrawCommand::StrokeRect {
            rect: player_hitbox(player),
            color: PLAYER_HITBOX_COLOR,
        });
        for obstacle in &state.obstacles {
            commands.push(DrawCommand::StrokeRect {
                rect: obstacle_hitbox(obstacle),
                color: OBSTACLE_HITBOX_COLOR,
            });
        }
    }

    // HUD
    commands.push(text(
        format!("Score: {}", state.score.floored()),
        Vec2::new(VIEW_WIDTH - 10.0, 24.0),
        FONT_SCORE,
        Align::Right,
    ));
    commands.push(text(
        format!(
            "BGM: {} (M)",
            if view.music_enabled { "ON" } else { "OFF" }
        ),
        Vec2::new(5.0, 12.0),
        FONT_STATUS,
        Align::Left,
    ));
    commands.push(text(
        CREDIT.to_string(),
        Vec2::new(VIEW_WIDTH - 5.0, VIEW_HEIGHT - 5.0),
        FONT_CREDIT,
        Align::Right,
    ));

    let center = Vec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0);
    match state.phase {
        GamePhase::Idle => {
            commands.push(text(
                "Press Space or Up to start".to_string(),
                center - Vec2::new(0.0, 10.0),
                FONT_LARGE,
                Align::Center,
            ));
            commands.push(text(
                format!("Made by {}", CREDIT),
                center + Vec2::new(0.0, 20.0),
                FONT_LARGE,
                Align::Center,
            ));
        }
        GamePhase::GameOver => {
            commands.push(text(
                format!("Game over - {} points", state.score.floored()),
                center - Vec2::new(0.0, 10.0),
                FONT_LARGE,
                Align::Center,
            ));
            commands.push(text(
                "Press Space or Up to play again".to_string(),
                center + Vec2::new(0.0, 20.0),
                FONT_LARGE,
                Align::Center,
            ));
        }
        GamePhase::Playing => {}
    }

    Frame {
        commands,
        inverted: view.inverted,
    }
}

fn text(text: String, pos: Vec2, font: &'static str, align: Align) -> DrawCommand {
    DrawCommand::Text {
        text,
        pos,
        font,
        align,
    }
}
