//! Integer line rasterization.
//!
//! Walking the line `y = index * onsets / pulses` and flooring it yields a
//! staircase that rises exactly `onsets` times over `[0, pulses)`, each rise
//! being a single step. The rises are where the onsets go.

/// Floor of `index * onsets / pulses`.
///
/// Callers guarantee `pulses > 0` and `index >= 0`. The product is taken in
/// `i128`, so any `index < pulses` and `onsets <= pulses` fits.
#[inline]
pub fn rasterize(index: i64, onsets: i64, pulses: i64) -> i64 {
    debug_assert!(pulses > 0, "pulses must be positive");
    debug_assert!(index >= 0, "index must be non-negative");
    // Non-negative operands: truncating division is floor division.
    ((index as i128 * onsets as i128) / pulses as i128) as i64
}
