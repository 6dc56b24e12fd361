use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{ScanError, ScanResult};

/// How the design aspect is fit into the viewport before scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fit {
    /// Fill the viewport, overflowing one axis.
    #[default]
    Cover,
    /// Fit inside the viewport, leaving bars on one axis.
    Contain,
}

/// Size and placement rules for the effect surface inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceLayout {
    /// Design width; only the ratio to `design_height` matters for placement.
    pub design_width: f64,
    /// Design height.
    pub design_height: f64,
    /// Fraction of the fitted size actually covered.
    pub scale: f64,
    /// Fit policy.
    pub fit: Fit,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            design_width: 300.0,
            design_height: 300.0,
            scale: 0.3,
            fit: Fit::Cover,
        }
    }
}

impl SurfaceLayout {
    /// Reject non-positive or non-finite sizes.
    pub fn validate(&self) -> ScanResult<()> {
        for (name, v) in [
            ("design_width", self.design_width),
            ("design_height", self.design_height),
            ("scale", self.scale),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScanError::validation(format!(
                    "surface.{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// `design_width / design_height`, the horizontal grid stretch of the effect.
    pub fn aspect(&self) -> f64 {
        self.design_width / self.design_height
    }

    /// Centered surface rectangle for `canvas`, in pixels.
    pub fn place(&self, canvas: Canvas) -> Placement {
        let vw = f64::from(canvas.width);
        let vh = f64::from(canvas.height);
        let sx = vw / self.design_width;
        let sy = vh / self.design_height;
        let s = match self.fit {
            Fit::Cover => sx.max(sy),
            Fit::Contain => sx.min(sy),
        } * self.scale;

        let w = self.design_width * s;
        let h = self.design_height * s;
        let x0 = (vw - w) * 0.5;
        let y0 = (vh - h) * 0.5;
        Placement {
            rect: Rect::new(x0, y0, x0 + w, y0 + h),
            canvas,
        }
    }
}

/// Effect surface rectangle resolved against a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Surface bounds in canvas pixels (may extend past the canvas).
    pub rect: Rect,
    /// Canvas the rectangle was resolved for.
    pub canvas: Canvas,
}

impl Placement {
    /// Surface UV at the center of pixel `(x, y)`, or `None` outside the surface.
    ///
    /// `v` grows upwards: the top edge of the surface is `v = 1`.
    pub fn uv_at(&self, x: u32, y: u32) -> Option<Point> {
        let cx = f64::from(x) + 0.5;
        let cy = f64::from(y) + 0.5;
        let r = self.rect;
        if cx < r.x0 || cx >= r.x1 || cy < r.y0 || cy >= r.y1 {
            return None;
        }
        Some(Point::new(
            (cx - r.x0) / r.width(),
            1.0 - (cy - r.y0) / r.height(),
        ))
    }

    /// Rows touched by the surface, clipped to the canvas: `start..end`.
    pub fn row_span(&self) -> std::ops::Range<u32> {
        clip_span(self.rect.y0, self.rect.y1, self.canvas.height)
    }

    /// Columns touched by the surface, clipped to the canvas: `start..end`.
    pub fn col_span(&self) -> std::ops::Range<u32> {
        clip_span(self.rect.x0, self.rect.x1, self.canvas.width)
    }
}

fn clip_span(lo: f64, hi: f64, len: u32) -> std::ops::Range<u32> {
    let start = lo.floor().clamp(0.0, f64::from(len)) as u32;
    let end = hi.ceil().clamp(0.0, f64::from(len)) as u32;
    start..end.max(start)
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
