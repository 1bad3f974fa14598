//! Chord-length admission test.

use kurbo::CubicBez;

use crate::config::FilterCriteria;

/// Distance between the first and last control point. Cheaper than, and
/// not equal to, the arc length for curved segments.
pub fn chord_length(c: &CubicBez) -> f64 {
    c.p0.distance(c.p3)
}

impl FilterCriteria {
    /// `min_length <= chord <= max_length`, both ends inclusive.
    pub fn admits(&self, c: &CubicBez) -> bool {
        let length = chord_length(c);
        self.min_length <= length && length <= self.max_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn line(length: f64) -> CubicBez {
        CubicBez::new(
            Point::ZERO,
            Point::new(0.0, 50.0),
            Point::new(length, 50.0),
            Point::new(length, 0.0),
        )
    }

    #[test]
    fn chord_ignores_inner_points() {
        assert_eq!(chord_length(&line(3.0)), 3.0);
    }

    #[test]
    fn defaults_admit_everything() {
        let f = FilterCriteria::default();
        assert!(f.admits(&line(0.0)));
        assert!(f.admits(&line(1e12)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let f = FilterCriteria::new(2.0, 5.0);
        assert!(f.admits(&line(2.0)));
        assert!(f.admits(&line(5.0)));
        assert!(!f.admits(&line(1.999)));
        assert!(!f.admits(&line(5.001)));
    }

    #[test]
    fn nan_chord_is_rejected() {
        let c = CubicBez::new(Point::new(f64::NAN, 0.0), Point::ZERO, Point::ZERO, Point::ZERO);
        assert!(!FilterCriteria::default().admits(&c));
    }
}
