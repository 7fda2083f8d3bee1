//! The swan: vertical physics and pose

use glam::Vec2;

use crate::consts::*;

/// The player's swan
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    /// Vertical velocity in pixels per reference frame (negative is up)
    pub vel_y: f32,
    pub size: Vec2,
    /// In the air after a jump, until landing
    pub airborne: bool,
    pub ducking: bool,
    /// Jumps used since the last landing
    pub jump_count: u8,
    /// Sprite animation frame (0 or 1)
    pub frame: u8,
    anim_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y),
            vel_y: 0.0,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            airborne: false,
            ducking: false,
            jump_count: 0,
            frame: 0,
            anim_timer: 0.0,
        }
    }
}

impl Player {
    /// Try to jump (or double jump). Returns false when the jump is not allowed.
    pub fn jump(&mut self) -> bool {
        if self.jump_count >= MAX_JUMPS || self.ducking {
            return false;
        }
        self.vel_y = JUMP_IMPULSE;
        self.jump_count += 1;
        self.airborne = true;
        true
    }

    /// Set the ducking pose.
    ///
    /// Ducking only starts while grounded during play; releasing always works.
    /// Returns true when the swan went from standing to ducking.
    pub fn duck(&mut self, on: bool, playing: bool) -> bool {
        if !on {
            self.ducking = false;
            return false;
        }
        if self.airborne || !playing || self.ducking {
            return false;
        }
        self.ducking = true;
        true
    }

    /// Apply gravity and move, landing on the ground line
    pub fn integrate(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let steps = dt * FRAME_REFERENCE_RATE;

        self.vel_y += GRAVITY * steps;
        self.pos.y += self.vel_y * steps;

        if !self.pos.y.is_finite() || !self.vel_y.is_finite() {
            log::warn!("Swan state went non-finite, snapping to ground");
            self.pos.y = GROUND_Y;
        }

        if self.pos.y >= GROUND_Y {
            self.land();
        }

        self.animate(dt);
    }

    /// Whether the swan is standing on the ground line
    pub fn grounded(&self) -> bool {
        !self.airborne && self.pos.y >= GROUND_Y
    }

    fn land(&mut self) {
        self.pos.y = GROUND_Y;
        self.vel_y = 0.0;
        self.airborne = false;
        self.jump_count = 0;
    }

    fn animate(&mut self, dt: f32) {
        self.anim_timer += dt;
        while self.anim_timer >= ANIM_FRAME_SECS {
            self.anim_timer -= ANIM_FRAME_SECS;
            self.frame ^= 1;
        }
    }
}
