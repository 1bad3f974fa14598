//! Polyline sampling of admitted curves for preview rendering.

use kurbo::{CubicBez, ParamCurve, Point};

/// Samples per curve in rendered previews.
pub const SAMPLE_COUNT: usize = 50;

/// An admitted curve's normalized control points, kept for sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewCurve(pub CubicBez);

/// Parallel coordinate arrays of a sampled curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Polyline {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.xs.iter().zip(&self.ys).map(|(&x, &y)| Point::new(x, y))
    }
}

impl PreviewCurve {
    /// Evaluate at `n` evenly spaced t in `[0, 1]`, both ends included.
    pub fn samples(&self, n: usize) -> Polyline {
        let mut line = Polyline {
            xs: Vec::with_capacity(n),
            ys: Vec::with_capacity(n),
        };
        for i in 0..n {
            let t = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            let p = self.0.eval(t);
            line.xs.push(p.x);
            line.ys.push(p.y);
        }
        line
    }

    /// [`SAMPLE_COUNT`] samples.
    pub fn polyline(&self) -> Polyline {
        self.samples(SAMPLE_COUNT)
    }
}
