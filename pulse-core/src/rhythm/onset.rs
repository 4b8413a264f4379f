//! Onset classification on top of the rasterized line.

use super::raster::rasterize;

/// Whether `index` of an unrotated `E(onsets, pulses)` carries an onset.
///
/// An onset sits wherever the rasterized value changes from the previous
/// index; index 0 compares against a `-1` sentinel. An empty rhythm has no
/// onsets at all, which the sentinel alone would get wrong at index 0.
#[inline]
pub fn is_onset(index: i64, onsets: i64, pulses: i64) -> bool {
    if onsets == 0 {
        return false;
    }
    let value = rasterize(index, onsets, pulses);
    let previous = if index == 0 {
        -1
    } else {
        rasterize(index - 1, onsets, pulses)
    };
    value != previous
}
