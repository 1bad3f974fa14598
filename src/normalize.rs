//! Pixel space → centered Cartesian space.

use kurbo::{CubicBez, Point};

use crate::config::ScaleMode;
use crate::trace::TraceResult;

/// Maps pixel points (y down, origin top-left) to a Cartesian frame with
/// the origin at the image center and y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    width: f64,
    height: f64,
    scale: f64,
}

impl Normalizer {
    /// A zero or non-finite `scale` falls back to 1.
    pub fn new(width: u32, height: u32, scale: f64) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            scale: safe_scale(scale),
        }
    }

    /// Pick the scale for `trace` according to `mode`.
    pub fn for_trace(trace: &TraceResult, width: u32, height: u32, mode: ScaleMode) -> Self {
        let scale = match mode {
            ScaleMode::Identity => 1.0,
            ScaleMode::AverageExtent => average_extent_scale(trace, width, height),
        };
        Self::new(width, height, scale)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// `(x/s - w/2, h/2 - y/s)`.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x / self.scale - self.width / 2.0,
            self.height / 2.0 - p.y / self.scale,
        )
    }

    pub fn apply_cubic(&self, c: CubicBez) -> CubicBez {
        CubicBez::new(self.apply(c.p0), self.apply(c.p1), self.apply(c.p2), self.apply(c.p3))
    }
}

/// Mean of (max x / width, max y / height) over every traced point.
///
/// Degenerate results (empty trace, zero, NaN) give 1.
pub fn average_extent_scale(trace: &TraceResult, width: u32, height: u32) -> f64 {
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in trace.paths.iter().flat_map(|path| path.points()) {
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    if max_x == f64::NEG_INFINITY {
        return 1.0;
    }
    safe_scale((max_x / width as f64 + max_y / height as f64) / 2.0)
}

fn safe_scale(scale: f64) -> f64 {
    if scale == 0.0 || !scale.is_finite() {
        1.0
    } else {
        scale
    }
}
