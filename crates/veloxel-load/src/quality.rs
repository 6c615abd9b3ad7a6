/// Stateless scorer mapping a three-axis spread measurement onto 0..=100.
///
/// The largest of the three axis spreads is normalized against the configured
/// bounds: at or below `q_min` the score is 100, at or above `q_max` it is 0,
/// linear in between. Deterministic and monotonically non-increasing in the
/// spread.
#[derive(Clone, Copy, Debug)]
pub struct QualityEstimator {
    q_min: f64,
    q_max: f64,
}

impl QualityEstimator {
    /// Bounds of the usable spread range; `q_max` must exceed `q_min`.
    #[must_use]
    pub fn new(q_min: f64, q_max: f64) -> Self {
        Self { q_min, q_max }
    }

    /// Score the spread of the three axes.
    #[must_use]
    pub fn score(&self, sx: f64, sy: f64, sz: f64) -> u8 {
        let spread = sx.max(sy).max(sz);
        let normalized = (spread - self.q_min) / (self.q_max - self.q_min);
        if normalized < 0.0 {
            100
        } else if normalized > 1.0 {
            0
        } else {
            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            // normalized is in [0, 1], so the score lands in 0..=100
            let score = (100.0 - (normalized * 100.0).round()) as u8;
            score
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(-0.3, 100)] // below the range
    #[case(0.0, 100)] // at q_min
    #[case(0.5, 50)] // midpoint
    #[case(0.9, 10)]
    #[case(1.0, 0)] // at q_max
    #[case(1.7, 0)] // above the range
    fn score_maps_spread_onto_unit_bounds(#[case] spread: f64, #[case] expected: u8) {
        let q = QualityEstimator::new(0.0, 1.0);
        assert_eq!(q.score(spread, spread, spread), expected);
    }

    #[test]
    fn largest_axis_dominates() {
        let q = QualityEstimator::new(0.0, 1.0);
        assert_eq!(q.score(0.2, 0.9, 0.4), 10);
        assert_eq!(q.score(0.9, 0.2, 0.4), 10);
        assert_eq!(q.score(0.4, 0.2, 0.9), 10);
    }

    #[test]
    fn nonzero_lower_bound_shifts_the_range() {
        let q = QualityEstimator::new(1.0, 3.0);
        assert_eq!(q.score(1.0, 0.0, 0.0), 100);
        assert_eq!(q.score(2.0, 0.0, 0.0), 50);
        assert_eq!(q.score(3.0, 0.0, 0.0), 0);
        assert_eq!(q.score(0.5, 0.0, 0.0), 100);
    }

    #[test]
    fn monotone_non_increasing_in_spread() {
        let q = QualityEstimator::new(0.0, 2.0);
        let mut last = u8::MAX;
        for step in 0..=100 {
            let spread = f64::from(step) * 0.025;
            let score = q.score(spread, 0.0, 0.0);
            assert!(score <= last, "score rose at spread {spread}");
            last = score;
        }
    }
}
