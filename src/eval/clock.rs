use std::f64::consts::TAU;

use crate::foundation::core::{Fps, FrameIndex};

/// Angular rate of the progress oscillation, in radians per second.
pub const PROGRESS_RATE: f64 = 0.5;

/// Fundamental period of [`progress_at`] in seconds (`2π / PROGRESS_RATE`).
pub fn progress_period_secs() -> f64 {
    TAU / PROGRESS_RATE
}

/// Scan position at `elapsed_secs`: a smooth oscillation over `[0, 1]`.
pub fn progress_at(elapsed_secs: f64) -> f64 {
    0.5 + 0.5 * (elapsed_secs * PROGRESS_RATE).sin()
}

/// Accumulated wall-clock time of the active render surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    elapsed_secs: f64,
}

impl FrameClock {
    /// A clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock positioned at the start of `frame` for an offline render at `fps`.
    pub fn at_frame(fps: Fps, frame: FrameIndex) -> Self {
        Self {
            elapsed_secs: fps.frame_time_secs(frame),
        }
    }

    /// A clock positioned at `elapsed_secs`.
    pub fn at_secs(elapsed_secs: f64) -> Self {
        Self { elapsed_secs }
    }

    /// Advance by `dt_secs`. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, dt_secs: f64) {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed_secs += dt_secs;
        }
    }

    /// Seconds since the clock started.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Scan position at the current time.
    pub fn progress(&self) -> f64 {
        progress_at(self.elapsed_secs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/clock.rs"]
mod tests;
