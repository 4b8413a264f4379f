//! Materializing a rhythm for display and verification.
//!
//! Nothing here is needed on the playback path; it is all layered on top of
//! the per-cursor hit test.

use super::euclid::Rhythm;
use crate::error::RhythmError;
use crate::time::{step_time, Time};

/// Lazy hit/rest sequence over cursors `[0, length)` of a rhythm.
///
/// Clone it (or call [`Rhythm::steps`] again) to start over.
#[derive(Debug, Clone)]
pub struct Steps {
    rhythm: Rhythm,
    front: i64,
    back: i64,
}

impl Iterator for Steps {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        let hit = self.rhythm.is_hit(self.front);
        self.front += 1;
        Some(hit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Lengths past usize::MAX (wasm32) cannot be reported exactly.
        match usize::try_from(self.back - self.front) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl DoubleEndedIterator for Steps {
    fn next_back(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.rhythm.is_hit(self.back))
    }
}

impl ExactSizeIterator for Steps {}

impl Rhythm {
    /// Hit/rest for each cursor in `[0, length)`
    pub fn steps(&self) -> Steps {
        Steps {
            rhythm: *self,
            front: 0,
            back: self.length(),
        }
    }

    /// Render with custom characters for hits and rests
    pub fn render_with(&self, hit: char, rest: char) -> String {
        self.steps().map(|h| if h { hit } else { rest }).collect()
    }

    /// Cursors in `[0, length)` that are hits
    pub fn hit_cursors(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.length()).filter(move |&c| self.is_hit(c))
    }

    /// Start time of each hit as a fraction of one pass over `length` steps
    pub fn onset_times(&self) -> impl Iterator<Item = Time> + '_ {
        let length = self.length();
        self.hit_cursors().map(move |c| step_time(c, length))
    }
}

/// Render `E(onsets, pulses)` with `phase` over `length` as `x`/`.`.
///
/// ```
/// assert_eq!(pulse_core::rhythm::render(5, 8, 0, 12).unwrap(), "x.x.xx.x....");
/// ```
pub fn render(onsets: i64, pulses: i64, phase: i64, length: i64) -> Result<String, RhythmError> {
    let rhythm = Rhythm::new(onsets, pulses)?
        .with_phase(phase)
        .with_length(length)?;
    Ok(rhythm.to_string())
}
