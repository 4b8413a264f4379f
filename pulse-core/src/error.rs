use std::fmt;

/// Which domain constraint a set of rhythm parameters broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    NonPositivePulses(i64),
    NonPositiveLength(i64),
    NegativeOnsets(i64),
    OnsetsExceedPulses { onsets: i64, pulses: i64 },
}

/// Errors raised by the rhythm engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhythmError {
    /// Parameters the distribution is not defined for. Never clamped.
    InvalidDomain(Violation),
    /// Rotating would push the phase past the `i64` range
    PhaseOverflow { phase: i64, by: i64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NonPositivePulses(p) => write!(f, "pulses must be positive, got {}", p),
            Violation::NonPositiveLength(l) => write!(f, "length must be positive, got {}", l),
            Violation::NegativeOnsets(o) => write!(f, "onsets must not be negative, got {}", o),
            Violation::OnsetsExceedPulses { onsets, pulses } => write!(
                f,
                "onsets ({}) must not exceed pulses ({})",
                onsets, pulses
            ),
        }
    }
}

impl fmt::Display for RhythmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RhythmError::InvalidDomain(violation) => write!(f, "Invalid rhythm: {}", violation),
            RhythmError::PhaseOverflow { phase, by } => {
                write!(f, "Rotating phase {} by {} overflows", phase, by)
            }
        }
    }
}

impl std::error::Error for RhythmError {}

impl From<Violation> for RhythmError {
    fn from(violation: Violation) -> Self {
        RhythmError::InvalidDomain(violation)
    }
}
