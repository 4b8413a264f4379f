//! Rational step timing
//!
//! Exact fractions of a cycle, so a hit's position inside a cycle never
//! drifts however the cycle is later scaled to seconds or beats.

use num_rational::Ratio;
use num_traits::ToPrimitive;

/// Position within a cycle, `0` = cycle start, `1` = next cycle start
pub type Time = Ratio<i64>;

/// Start of `cursor` when a cycle holds `length` steps.
/// Cursors past the cycle give times past 1.
#[inline]
pub fn step_time(cursor: i64, length: i64) -> Time {
    Ratio::new(cursor, length)
}

/// Duration of one step when a cycle holds `length` steps
#[inline]
pub fn step_duration(length: i64) -> Time {
    Ratio::new(1, length)
}

/// Convert to `f64` for schedulers working in floating point
pub fn to_f64(t: Time) -> f64 {
    t.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_time_reduces() {
        let t = step_time(2, 8);
        assert_eq!(*t.numer(), 1);
        assert_eq!(*t.denom(), 4);
    }

    #[test]
    fn test_step_duration_sums_to_cycle() {
        let total: Time = (0..12).map(|_| step_duration(12)).sum();
        assert_eq!(total, Ratio::from_integer(1));
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(step_time(3, 4)), 0.75);
        assert!((to_f64(step_time(1, 3)) - 0.333333).abs() < 0.0001);
    }
}
