//! Polygon approximation of a pixel-corner outline.
//!
//! 1. Collapse collinear runs of unit steps to their turning points.
//! 2. Ramer-Douglas-Peucker on the closed ring to straighten staircases.

use geo::{LineString, Simplify};

/// Reduce a closed outline to the vertices of an approximating polygon.
pub fn approximate(points: &[(i32, i32)], epsilon: f64) -> Vec<(f64, f64)> {
    let turns = turning_points(points);
    simplify_closed(&turns, epsilon)
}

/// Keep only points where the step direction changes.
fn turning_points(points: &[(i32, i32)]) -> Vec<(f64, f64)> {
    let n = points.len();
    if n < 3 {
        return points.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
    }
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            (cur.0 - prev.0, cur.1 - prev.1) != (next.0 - cur.0, next.1 - cur.1)
        })
        .map(|i| (points[i].0 as f64, points[i].1 as f64))
        .collect()
}

/// RDP on a closed ring.
///
/// The ring is cut at the vertex farthest from the first one and the two
/// open chains are simplified separately, so both cut points survive.
fn simplify_closed(ring: &[(f64, f64)], epsilon: f64) -> Vec<(f64, f64)> {
    let n = ring.len();
    if n <= 4 || epsilon <= 0.0 {
        return ring.to_vec();
    }

    let origin = ring[0];
    let far = (1..n)
        .max_by(|&a, &b| {
            dist2(origin, ring[a])
                .partial_cmp(&dist2(origin, ring[b]))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(n / 2);

    let first = rdp(&ring[..=far], epsilon);
    let mut second_chain = ring[far..].to_vec();
    second_chain.push(origin);
    let second = rdp(&second_chain, epsilon);

    let mut out = first;
    if second.len() > 2 {
        out.extend_from_slice(&second[1..second.len() - 1]);
    }
    if out.len() < 3 {
        // A thin stroke can flatten onto the origin-far chord. Keep the
        // widest point of each side so the outline still encloses area.
        out = vec![origin];
        out.extend(widest(&ring[1..far], origin, ring[far]));
        out.push(ring[far]);
        out.extend(widest(&ring[far + 1..], origin, ring[far]));
    }
    out
}

/// The point of `chain` farthest from the line through `a` and `b`.
fn widest(chain: &[(f64, f64)], a: (f64, f64), b: (f64, f64)) -> Option<(f64, f64)> {
    let offset = |p: (f64, f64)| ((b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)).abs();
    chain
        .iter()
        .copied()
        .max_by(|&p, &q| offset(p).partial_cmp(&offset(q)).unwrap_or(std::cmp::Ordering::Equal))
}

fn rdp(points: &[(f64, f64)], epsilon: f64) -> Vec<(f64, f64)> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    LineString::from(points.to_vec())
        .simplify(&epsilon)
        .into_inner()
        .into_iter()
        .map(|c| (c.x, c.y))
        .collect()
}

fn dist2(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle(w: i32, h: i32) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        for y in 0..h {
            points.push((0, y));
        }
        for x in 0..w {
            points.push((x, h));
        }
        for y in (1..=h).rev() {
            points.push((w, y));
        }
        for x in (1..=w).rev() {
            points.push((x, 0));
        }
        points
    }

    #[test]
    fn rectangle_collapses_to_four_vertices() {
        let poly = approximate(&rectangle(12, 5), 1.0);
        assert_eq!(poly.len(), 4);
        assert!(poly.contains(&(0.0, 0.0)));
        assert!(poly.contains(&(12.0, 5.0)));
    }

    #[test]
    fn staircase_straightens() {
        // Right triangle with a one-pixel staircase hypotenuse.
        let mut points = vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)];
        let mut x = 6;
        let mut y = 0;
        while x > 0 {
            y += 1;
            points.push((x, y));
            x -= 1;
            points.push((x, y));
        }
        for yy in (1..y).rev() {
            points.push((0, yy));
        }
        let poly = approximate(&points, 1.0);
        assert_eq!(poly.len(), 3);
    }

    #[test]
    fn thin_diagonal_keeps_a_polygon() {
        // Outline of a one-pixel-wide diagonal of 10 pixels.
        let mut points = Vec::new();
        for i in 0..10 {
            points.extend([(i, i), (i + 1, i)]);
        }
        for i in (0..10).rev() {
            points.extend([(i + 1, i + 1), (i, i + 1)]);
        }
        let poly = approximate(&points, 1.0);
        assert!(poly.len() >= 3, "{:?}", poly);
        assert!(poly.contains(&(0.0, 0.0)));
        assert!(poly.contains(&(10.0, 10.0)));
    }

    #[test]
    fn zero_epsilon_keeps_all_turns() {
        let points = vec![(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (0, 2), (0, 1)];
        let poly = approximate(&points, 0.0);
        assert_eq!(poly.len(), 6);
    }
}
