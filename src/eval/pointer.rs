use std::f64::consts::TAU;

use crate::foundation::core::Vec2;
use crate::foundation::error::{ScanError, ScanResult};

/// Where the pointer sits at a given time, for renders without a live cursor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPath {
    /// A fixed normalized position `[x, y]`.
    Fixed([f64; 2]),
    /// Counter-clockwise circle around the center.
    Orbit {
        /// Circle radius in normalized units.
        radius: f64,
        /// Seconds per revolution.
        period_secs: f64,
    },
}

impl Default for PointerPath {
    fn default() -> Self {
        Self::Fixed([0.0, 0.0])
    }
}

impl PointerPath {
    /// Reject non-finite values and non-positive orbit periods.
    pub fn validate(&self) -> ScanResult<()> {
        match *self {
            Self::Fixed([x, y]) => {
                if !x.is_finite() || !y.is_finite() {
                    return Err(ScanError::validation("pointer.fixed must be finite"));
                }
            }
            Self::Orbit {
                radius,
                period_secs,
            } => {
                if !radius.is_finite() {
                    return Err(ScanError::validation("pointer.orbit.radius must be finite"));
                }
                if !period_secs.is_finite() || period_secs <= 0.0 {
                    return Err(ScanError::validation(
                        "pointer.orbit.period_secs must be > 0",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Pointer position at `elapsed_secs`.
    pub fn sample(&self, elapsed_secs: f64) -> Vec2 {
        match *self {
            Self::Fixed([x, y]) => Vec2::new(x, y),
            Self::Orbit {
                radius,
                period_secs,
            } => {
                let angle = TAU * elapsed_secs / period_secs;
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            }
        }
    }
}

/// Normalize a cursor position in a `width x height` surface to `[-1, 1]²`, `+y` up.
///
/// Positions outside the surface map outside `[-1, 1]` and are not clamped.
pub fn pointer_from_pixel(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    let w = f64::from(width.max(1));
    let h = f64::from(height.max(1));
    Vec2::new((x / w) * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/pointer.rs"]
mod tests;
