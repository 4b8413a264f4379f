//! Cursor to pattern index mapping.

use num_traits::{PrimInt, Signed};

/// Floored modulo: the result lies in `[0, modulus)` for a positive
/// `modulus`, whatever the sign of `value`.
///
/// Rust's `%` truncates toward zero (`-1 % 4 == -1`), which would send
/// negative cursors and phases outside the pattern.
#[inline]
pub fn floor_mod<T: PrimInt + Signed>(value: T, modulus: T) -> T {
    debug_assert!(modulus > T::zero(), "modulus must be positive");
    let remainder = value % modulus;
    if remainder < T::zero() {
        remainder + modulus
    } else {
        remainder
    }
}

/// Index of `cursor` within a pattern of `length` rotated by `phase`.
///
/// The sum is taken in `i128` so the full `i64` range is accepted for both
/// `cursor` and `phase`. Result is in `[0, length)`.
#[inline]
pub fn map_index(cursor: i64, phase: i64, length: i64) -> i64 {
    floor_mod(cursor as i128 + phase as i128, length as i128) as i64
}
