//! Corner/curve classification of polygon vertices.
//!
//! Each polygon vertex yields one segment running from the midpoint of
//! its incoming edge to the midpoint of its outgoing edge. Sharp vertices
//! (alpha >= alphamax) become corners through the vertex itself; the rest
//! become cubics whose handles lie on the two edges.

use kurbo::Point;

use super::{Segment, TracedPath};

/// Build a traced path from polygon vertices. `None` for fewer than 3.
pub fn classify(vertices: &[(f64, f64)], alphamax: f64) -> Option<TracedPath> {
    let m = vertices.len();
    if m < 3 {
        return None;
    }
    let v: Vec<Point> = vertices.iter().map(|&(x, y)| Point::new(x, y)).collect();

    let segments = (0..m)
        .map(|j| {
            let i = (j + m - 1) % m;
            let k = (j + 1) % m;
            let end = v[j].midpoint(v[k]);
            let alpha = compute_alpha(v[i], v[j], v[k]);
            if alpha >= alphamax {
                Segment::Corner { corner: v[j], end }
            } else {
                let lambda = 0.5 + 0.5 * alpha.clamp(0.55, 1.0);
                Segment::Cubic {
                    c1: v[i].lerp(v[j], lambda),
                    c2: v[k].lerp(v[j], lambda),
                    end,
                }
            }
        })
        .collect();

    Some(TracedPath {
        start: v[m - 1].midpoint(v[0]),
        segments,
    })
}

/// Potrace's alpha: how far `vj` sticks out of the line `vi`-`vk`,
/// relative to the L∞ unit box. Degenerate spans count as corners.
fn compute_alpha(vi: Point, vj: Point, vk: Point) -> f64 {
    // Cross product of (j-i, k-i) = twice signed area of triangle ijk.
    let dpara = (vj.x - vi.x) * (vk.y - vi.y) - (vj.y - vi.y) * (vk.x - vi.x);

    let (ox, oy) = dorth_infty(vi, vk);
    let ddenom = oy * (vk.x - vi.x) - ox * (vk.y - vi.y);

    if ddenom.abs() < 1e-10 {
        return 4.0 / 3.0;
    }

    let dd = (dpara / ddenom).abs();
    let alpha = if dd > 1.0 { 1.0 - 1.0 / dd } else { 0.0 };
    alpha / 0.75
}

/// 90-degree rotation of the direction p0 → p2, snapped to the axes.
fn dorth_infty(p0: Point, p2: Point) -> (f64, f64) {
    (-fsign(p2.y - p0.y), fsign(p2.x - p0.x))
}

fn fsign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
