//! Validated Euclidean rhythm value.

use super::position::floor_mod;
use super::query::{hit_unchecked, validate};
use super::raster::rasterize;
use crate::error::RhythmError;
use crate::parser::ast::Expression;
use crate::parser::statement_parser::parse_expression;
use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// Raw rhythm parameters, as written by a user or read from the wire.
///
/// Convert into a [`Rhythm`] with `try_from` to get the domain checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RhythmSpec {
    pub onsets: i64,
    pub pulses: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub phase: i64,
    /// Defaults to `pulses` when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub length: Option<i64>,
}

/// A Euclidean rhythm `E(onsets, pulses)` rotated by `phase` and read over
/// `length` positions.
///
/// Always valid once constructed, so [`Rhythm::is_hit`] can skip the checks
/// that [`query`](super::query) performs on every call. Immutable: the
/// builder methods return new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RhythmSpec", into = "RhythmSpec")
)]
pub struct Rhythm {
    onsets: i64,
    pulses: i64,
    phase: i64,
    length: i64,
}

impl Rhythm {
    /// `E(onsets, pulses)` with no rotation and `length == pulses`
    pub fn new(onsets: i64, pulses: i64) -> Result<Self, RhythmError> {
        validate(onsets, pulses, pulses)?;
        Ok(Self {
            onsets,
            pulses,
            phase: 0,
            length: pulses,
        })
    }

    /// Same rhythm with the phase replaced. Any integer is accepted.
    pub fn with_phase(self, phase: i64) -> Self {
        Self { phase, ..self }
    }

    /// Same rhythm read over `length` positions (padding or truncation)
    pub fn with_length(self, length: i64) -> Result<Self, RhythmError> {
        validate(self.onsets, self.pulses, length)?;
        Ok(Self { length, ..self })
    }

    /// Shift the phase by `by` positions
    pub fn rotate(self, by: i64) -> Result<Self, RhythmError> {
        let phase = self
            .phase
            .checked_add(by)
            .ok_or(RhythmError::PhaseOverflow {
                phase: self.phase,
                by,
            })?;
        Ok(Self { phase, ..self })
    }

    pub fn onsets(&self) -> i64 {
        self.onsets
    }

    pub fn pulses(&self) -> i64 {
        self.pulses
    }

    /// Phase as given, not reduced
    pub fn phase(&self) -> i64 {
        self.phase
    }

    /// Phase folded into `[0, length)`
    pub fn normalized_phase(&self) -> i64 {
        floor_mod(self.phase, self.length)
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    /// Whether `cursor` is a hit. Constant time, no allocation.
    #[inline]
    pub fn is_hit(&self, cursor: i64) -> bool {
        hit_unchecked(self.onsets, self.pulses, self.phase, self.length, cursor)
    }

    /// Number of hits over cursors `[0, length)`, in constant time.
    ///
    /// Phase only permutes the indices visited, so this counts the onsets
    /// among pattern indices `[0, min(length, pulses))`; padding holds none.
    pub fn hit_count(&self) -> u64 {
        if self.onsets == 0 {
            return 0;
        }
        let window = self.length.min(self.pulses);
        // The staircase starts at 0 and each rise is one onset.
        (rasterize(window - 1, self.onsets, self.pulses) + 1) as u64
    }

    /// Build a rhythm from the integer arguments of `euclid(...)`:
    /// onsets, pulses, then optional phase and length.
    pub fn from_args(args: &[i64]) -> Result<Self> {
        match *args {
            [onsets, pulses] => Ok(Rhythm::new(onsets, pulses)?),
            [onsets, pulses, phase] => Ok(Rhythm::new(onsets, pulses)?.with_phase(phase)),
            [onsets, pulses, phase, length] => Ok(Rhythm::new(onsets, pulses)?
                .with_phase(phase)
                .with_length(length)?),
            _ => Err(anyhow!(
                "euclid expects 2 to 4 arguments (onsets, pulses, phase, length), got {}",
                args.len()
            )),
        }
    }
}

impl TryFrom<RhythmSpec> for Rhythm {
    type Error = RhythmError;

    fn try_from(spec: RhythmSpec) -> Result<Self, Self::Error> {
        let length = spec.length.unwrap_or(spec.pulses);
        validate(spec.onsets, spec.pulses, length)?;
        Ok(Rhythm {
            onsets: spec.onsets,
            pulses: spec.pulses,
            phase: spec.phase,
            length,
        })
    }
}

impl From<Rhythm> for RhythmSpec {
    fn from(rhythm: Rhythm) -> Self {
        RhythmSpec {
            onsets: rhythm.onsets,
            pulses: rhythm.pulses,
            phase: rhythm.phase,
            length: Some(rhythm.length),
        }
    }
}

impl fmt::Display for Rhythm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hit in self.steps() {
            f.write_str(if hit { "x" } else { "." })?;
        }
        Ok(())
    }
}

/// Parses `euclid(5, 8)`, `e(5, 8, 2, 12)` or the bare tuple `(3, 8)`.
impl FromStr for Rhythm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let expr = parse_expression(s)?;
        let args = match &expr {
            Expression::Call { name, args } if name == "euclid" || name == "e" => args,
            Expression::Tuple(args) => args,
            other => return Err(anyhow!("Not a rhythm literal: {}", other)),
        };
        let numbers = args
            .iter()
            .map(|arg| match arg {
                Expression::Number(n) => Ok(*n),
                other => Err(anyhow!("Expected an integer argument, found {}", other)),
            })
            .collect::<Result<Vec<i64>>>()?;
        Rhythm::from_args(&numbers)
    }
}
