//! Frame timing

use crate::consts::MAX_FRAME_DT;

/// Turns absolute frame timestamps into per-frame delta-time
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta-time in seconds since the previous call.
    ///
    /// The first call returns 0 so the first frame does not jump. Steps are
    /// clamped to [0, MAX_FRAME_DT] (backgrounded tabs, clock adjustments).
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);

        if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        }
    }

    /// Forget the previous timestamp (next frame yields 0 again)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
