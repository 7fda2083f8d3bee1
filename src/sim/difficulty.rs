//! Difficulty progression and score accumulation

use crate::consts::*;

/// Scroll speed and milestone-driven progression for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Difficulty {
    /// Scroll speed in pixels per reference frame
    pub speed: f32,
    /// Nominal spawn frequency. Tightened at milestones but not consumed by the
    /// spawner, which keeps a fixed interval.
    pub obstacle_frequency: u32,
    /// Presentation palette flip, toggled at each milestone
    pub inverted: bool,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            speed: START_SPEED,
            obstacle_frequency: START_OBSTACLE_FREQUENCY,
            inverted: false,
        }
    }
}

impl Difficulty {
    /// Ramp speed linearly in time, capped at [`MAX_SPEED`]
    pub fn ramp(&mut self, dt: f32) {
        self.speed = (self.speed + dt.max(0.0) * SPEED_RAMP_RATE).min(MAX_SPEED);
    }

    /// Distance everything scrolls this frame
    pub fn scroll_distance(&self, dt: f32) -> f32 {
        self.speed * dt.max(0.0) * FRAME_REFERENCE_RATE
    }

    /// Apply every milestone crossed between two score readings.
    ///
    /// Returns how many fired (almost always 0 or 1).
    pub fn apply_milestones(&mut self, prev_score: &Score, score: &Score) -> u32 {
        let crossed = milestone_index(score.floored())
            .saturating_sub(milestone_index(prev_score.floored()));
        for _ in 0..crossed {
            self.inverted = !self.inverted;
            self.obstacle_frequency = self
                .obstacle_frequency
                .saturating_sub(OBSTACLE_FREQUENCY_STEP)
                .max(MIN_OBSTACLE_FREQUENCY);
        }
        crossed
    }
}

fn milestone_index(floored: u32) -> u32 {
    floored / MILESTONE_INTERVAL
}

/// Time-integrated run score
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Score(f32);

impl Score {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Accumulate `SCORE_RATE` points per second; never decreases
    pub fn accumulate(&mut self, dt: f32) {
        self.0 += dt.max(0.0) * SCORE_RATE;
    }

    /// Whole points, as displayed and submitted
    pub fn floored(&self) -> u32 {
        self.0.floor() as u32
    }
}
