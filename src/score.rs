use rand::Rng;

/// Band for the per-call jitter applied to every score.
pub const MULTIPLIER_MIN: f64 = 0.9;
pub const MULTIPLIER_MAX: f64 = 1.1;

/// Display points for a classified action. Rolls a fresh multiplier on every
/// call, so the same row scores slightly differently on every read.
pub fn calculate_points(severity: i64, factor: i64) -> i64 {
    let multiplier = rand::rng().random_range(MULTIPLIER_MIN..MULTIPLIER_MAX);
    calculate_points_with(severity, factor, multiplier)
}

/// Deterministic core of the score. Severity at or below 6 pivots around the
/// neutral value 5; anything above 6 is charged at its full severity. Both the
/// branch boundary and the floor (round toward negative infinity) matter: they
/// decide the sign and magnitude the user sees.
pub fn calculate_points_with(severity: i64, factor: i64, multiplier: f64) -> i64 {
    let raw = if severity <= 6 {
        (5 - severity) as f64 * factor as f64 * multiplier
    } else {
        -(severity as f64) * factor as f64 * multiplier
    };
    raw.floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inclusive bounds for the score of a severity/factor pair over the whole
    /// multiplier band.
    fn band(severity: i64, factor: i64) -> (i64, i64) {
        let at_min = calculate_points_with(severity, factor, MULTIPLIER_MIN);
        let at_max = calculate_points_with(severity, factor, MULTIPLIER_MAX);
        (at_min.min(at_max), at_min.max(at_max))
    }

    #[test]
    fn neutral_severity_scores_zero_for_any_factor() {
        for factor in [1, 50, 1000] {
            assert_eq!(calculate_points(5, factor), 0);
        }
    }

    #[test]
    fn low_severity_is_positive() {
        for severity in 0..5 {
            assert!(calculate_points(severity, 100) > 0);
        }
    }

    #[test]
    fn severity_six_is_slightly_negative() {
        let points = calculate_points(6, 10);
        assert!(points < 0);
        let (lo, hi) = band(6, 10);
        assert_eq!((lo, hi), (-11, -9));
        assert!(points >= lo && points <= hi);
    }

    #[test]
    fn high_severity_is_strongly_negative() {
        for severity in 7..=10 {
            assert!(calculate_points(severity, 100) < 0);
        }
        // The branch switch at 6 -> 7 jumps from -(factor) to -(7 * factor).
        assert_eq!(calculate_points_with(6, 100, 1.0), -100);
        assert_eq!(calculate_points_with(7, 100, 1.0), -700);
    }

    #[test]
    fn floor_rounds_toward_negative_infinity() {
        // -2.85 floors to -3, not -2.
        assert_eq!(calculate_points_with(6, 3, 0.95), -3);
        assert_eq!(calculate_points_with(4, 3, 0.95), 2);
    }

    #[test]
    fn rolled_points_stay_inside_the_multiplier_band() {
        for (severity, factor) in [(0, 1000), (3, 77), (6, 500), (9, 123)] {
            let (lo, hi) = band(severity, factor);
            for _ in 0..200 {
                let points = calculate_points(severity, factor);
                assert!(
                    points >= lo && points <= hi,
                    "severity {severity} factor {factor}: {points} outside [{lo}, {hi}]"
                );
            }
        }
    }
}
