//! Parametric equation strings for an expression-based plotter.
//!
//! Each admitted curve becomes
//!
//! ```text
//! ((1-t)^3*x0 + 3*(1-t)^2*t*x1 + 3*(1-t)*t^2*x2 + t^3*x3, <same for y>) \left\{0 \le t \le 1\right\}
//! ```

use std::fmt;

use kurbo::CubicBez;

use crate::config::NumberFormat;

/// Domain restriction appended to every curve, in the plotter's LaTeX syntax.
pub const DOMAIN: &str = r"\left\{0 \le t \le 1\right\}";

/// x(t) and y(t) of one cubic, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveExpression {
    pub x: String,
    pub y: String,
}

impl CurveExpression {
    /// Expand the cubic Bernstein basis over the four control points.
    pub fn from_cubic(c: &CubicBez, format: NumberFormat) -> Self {
        let pts = [c.p0, c.p1, c.p2, c.p3];
        Self {
            x: bernstein(pts.map(|p| p.x), format),
            y: bernstein(pts.map(|p| p.y), format),
        }
    }
}

impl fmt::Display for CurveExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, DOMAIN)
    }
}

fn bernstein(coords: [f64; 4], format: NumberFormat) -> String {
    let [a, b, c, d] = coords.map(|v| format_number(v, format));
    format!("(1-t)^3*{a} + 3*(1-t)^2*t*{b} + 3*(1-t)*t^2*{c} + t^3*{d}")
}

fn format_number(v: f64, format: NumberFormat) -> String {
    match format {
        NumberFormat::Shortest => format!("{}", v),
        NumberFormat::Fixed(digits) => format!("{:.*}", digits, v),
    }
}
