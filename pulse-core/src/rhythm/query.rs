//! Public per-cursor entry point.

use super::onset::is_onset;
use super::position::map_index;
use crate::error::{RhythmError, Violation};

/// Check `onsets`, `pulses` and `length` against the rhythm domain.
///
/// `phase` needs no check: any integer is folded into `[0, length)`.
pub fn validate(onsets: i64, pulses: i64, length: i64) -> Result<(), RhythmError> {
    if pulses <= 0 {
        return Err(Violation::NonPositivePulses(pulses).into());
    }
    if length <= 0 {
        return Err(Violation::NonPositiveLength(length).into());
    }
    if onsets < 0 {
        return Err(Violation::NegativeOnsets(onsets).into());
    }
    if onsets > pulses {
        return Err(Violation::OnsetsExceedPulses { onsets, pulses }.into());
    }
    Ok(())
}

/// Hit test for already validated parameters.
#[inline]
pub(crate) fn hit_unchecked(onsets: i64, pulses: i64, phase: i64, length: i64, cursor: i64) -> bool {
    let index = map_index(cursor, phase, length);
    // Positions past the base pulses are padding rests
    index < pulses && is_onset(index, onsets, pulses)
}

/// Whether `cursor` lands on a hit of `E(onsets, pulses)` rotated by `phase`
/// and read over `length` positions.
///
/// When `length > pulses` the positions past `pulses` are rests; when
/// `length < pulses` only the first `length` positions of the base pattern
/// are ever reached. Rotation is a clean cyclic shift only for
/// `length == pulses`; otherwise the phase moves the read window across the
/// padding boundary, e.g. `E(5,8)` with phase 8 over 12 reads
/// `....x.x.xx.x`.
///
/// Constant time, no allocation; `cursor` may be any integer in any order.
///
/// ```
/// use pulse_core::rhythm::query;
///
/// let hits: String = (0..8)
///     .map(|c| if query(3, 8, 0, 8, c).unwrap() { 'x' } else { '.' })
///     .collect();
/// assert_eq!(hits, "x..x..x.");
/// assert!(query(9, 8, 0, 8, 0).is_err());
/// ```
pub fn query(
    onsets: i64,
    pulses: i64,
    phase: i64,
    length: i64,
    cursor: i64,
) -> Result<bool, RhythmError> {
    validate(onsets, pulses, length)?;
    Ok(hit_unchecked(onsets, pulses, phase, length, cursor))
}
