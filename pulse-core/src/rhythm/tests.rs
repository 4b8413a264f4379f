//! Tests for the rhythm module.

use super::euclid::{Rhythm, RhythmSpec};
use super::onset::is_onset;
use super::position::map_index;
use super::query::query;
use super::render::render;
use crate::error::{RhythmError, Violation};
use crate::time::step_time;

fn pattern(onsets: i64, pulses: i64, phase: i64, length: i64) -> String {
    render(onsets, pulses, phase, length).unwrap()
}

fn rotated(onsets: i64, pulses: i64, phase: i64) -> String {
    pattern(onsets, pulses, phase, pulses)
}

fn resized(onsets: i64, pulses: i64, length: i64) -> String {
    pattern(onsets, pulses, 0, length)
}

#[test]
fn test_small_rhythms() {
    assert_eq!(pattern(1, 1, 0, 1), "x");
    assert_eq!(pattern(1, 2, 0, 2), "x.");
    assert_eq!(pattern(2, 2, 0, 2), "xx");
    assert_eq!(pattern(1, 3, 0, 3), "x..");
    assert_eq!(pattern(2, 3, 0, 3), "x.x");
    assert_eq!(pattern(3, 3, 0, 3), "xxx");
    assert_eq!(pattern(1, 4, 0, 4), "x...");
    assert_eq!(pattern(2, 4, 0, 4), "x.x.");
    assert_eq!(pattern(3, 4, 0, 4), "x.xx");
}

#[test]
fn test_classic_rhythms() {
    assert_eq!(pattern(3, 8, 0, 8), "x..x..x.");
    assert_eq!(pattern(5, 8, 0, 8), "x.x.xx.x");
    assert_eq!(pattern(13, 24, 0, 24), "x.x.x.x.x.x.xx.x.x.x.x.x");
}

#[test]
fn test_rotation() {
    assert_eq!(rotated(1, 4, 0), "x...");
    assert_eq!(rotated(1, 4, 1), "...x");
    assert_eq!(rotated(1, 4, 2), "..x.");
    assert_eq!(rotated(1, 4, 3), ".x..");
    assert_eq!(rotated(1, 4, 4), "x...");

    assert_eq!(rotated(5, 8, 0), "x.x.xx.x");
    assert_eq!(rotated(5, 8, 1), ".x.xx.xx");
    assert_eq!(rotated(5, 8, 2), "x.xx.xx.");
    assert_eq!(rotated(5, 8, 4), "xx.xx.x.");
    assert_eq!(rotated(5, 8, 7), "xx.x.xx.");
    assert_eq!(rotated(5, 8, 12), "xx.xx.x.");

    assert_eq!(rotated(13, 24, 10), "x.xx.x.x.x.x.xx.x.x.x.x.");
}

#[test]
fn test_negative_phase_matches_positive_equivalent() {
    assert_eq!(rotated(1, 4, -1), rotated(1, 4, 3));
    assert_eq!(rotated(5, 8, -1), rotated(5, 8, 7));
    assert_eq!(rotated(5, 8, -12), rotated(5, 8, 4));
    assert_eq!(pattern(5, 8, -4, 12), pattern(5, 8, 8, 12));
}

#[test]
fn test_negative_cursor_wraps() {
    let r = Rhythm::new(5, 8).unwrap();
    for cursor in -24..0 {
        assert_eq!(r.is_hit(cursor), r.is_hit(cursor + 24), "cursor {}", cursor);
    }
    assert!(query(1, 4, 0, 4, -4).unwrap());
    assert!(!query(1, 4, 0, 4, -1).unwrap());
}

#[test]
fn test_length_truncation_and_padding() {
    assert_eq!(resized(5, 8, 8), "x.x.xx.x");
    assert_eq!(resized(5, 8, 4), "x.x.");
    assert_eq!(resized(5, 8, 12), "x.x.xx.x....");
}

#[test]
fn test_phase_across_padding_boundary() {
    assert_eq!(pattern(5, 8, 8, 12), "....x.x.xx.x");
    // Truncated reads never reach base indices past the length
    assert_eq!(pattern(5, 8, 2, 4), "x.x.");
}

#[test]
fn test_cardinality() {
    for pulses in 1..=48 {
        for onsets in 0..=pulses {
            let count = (0..pulses).filter(|&i| is_onset(i, onsets, pulses)).count();
            assert_eq!(count as i64, onsets, "E({},{})", onsets, pulses);
        }
    }
}

#[test]
fn test_first_index_is_onset() {
    for pulses in 1..=32 {
        for onsets in 1..=pulses {
            assert!(is_onset(0, onsets, pulses), "E({},{})", onsets, pulses);
        }
    }
}

#[test]
fn test_zero_onsets_never_hit() {
    for pulses in 1..=12 {
        for length in 1..=16 {
            for phase in -5..5 {
                for cursor in -20..20 {
                    assert!(!query(0, pulses, phase, length, cursor).unwrap());
                }
            }
        }
    }
}

#[test]
fn test_full_onsets_hit_every_base_position() {
    for pulses in 1..=12 {
        for length in 1..=16 {
            for phase in -5..5 {
                for cursor in -20..20 {
                    let inside = map_index(cursor, phase, length) < pulses;
                    assert_eq!(query(pulses, pulses, phase, length, cursor).unwrap(), inside);
                }
            }
        }
    }
}

#[test]
fn test_full_period_rotation_is_identity() {
    for pulses in 1..=16 {
        for onsets in 0..=pulses {
            for phase in -pulses..pulses {
                for cursor in 0..pulses {
                    assert_eq!(
                        query(onsets, pulses, phase, pulses, cursor).unwrap(),
                        query(onsets, pulses, phase + pulses, pulses, cursor).unwrap()
                    );
                }
            }
        }
    }
}

#[test]
fn test_truncation_is_prefix() {
    for pulses in 1..=16 {
        for onsets in 0..=pulses {
            let full = resized(onsets, pulses, pulses);
            for length in 1..pulses {
                assert_eq!(resized(onsets, pulses, length), full[..length as usize]);
            }
        }
    }
}

#[test]
fn test_padding_is_rests() {
    for pulses in 1..=12 {
        for onsets in 0..=pulses {
            let full = resized(onsets, pulses, pulses);
            for length in pulses + 1..=pulses + 8 {
                let padded = resized(onsets, pulses, length);
                assert!(padded.starts_with(&full));
                assert!(padded[pulses as usize..].chars().all(|c| c == '.'));
            }
        }
    }
}

#[test]
fn test_query_rejects_invalid_domain() {
    assert_eq!(
        query(3, 0, 0, 8, 0),
        Err(RhythmError::InvalidDomain(Violation::NonPositivePulses(0)))
    );
    assert_eq!(
        query(3, 8, 0, 0, 0),
        Err(RhythmError::InvalidDomain(Violation::NonPositiveLength(0)))
    );
    assert_eq!(
        query(-1, 8, 0, 8, 0),
        Err(RhythmError::InvalidDomain(Violation::NegativeOnsets(-1)))
    );
    assert_eq!(
        query(9, 8, 0, 8, 0),
        Err(RhythmError::InvalidDomain(Violation::OnsetsExceedPulses {
            onsets: 9,
            pulses: 8
        }))
    );
    assert_eq!(
        render(9, 8, 0, 8),
        Err(RhythmError::InvalidDomain(Violation::OnsetsExceedPulses {
            onsets: 9,
            pulses: 8
        }))
    );
    assert_eq!(
        render(3, 8, 0, 0),
        Err(RhythmError::InvalidDomain(Violation::NonPositiveLength))
    );
}

#[test]
fn test_rhythm_matches_query() {
    let r = Rhythm::new(5, 8).unwrap().with_phase(-3).with_length(11).unwrap();
    for cursor in -30..30 {
        assert_eq!(r.is_hit(cursor), query(5, 8, -3, 11, cursor).unwrap());
    }
    assert_eq!(r.normalized_phase(), 8);
}

#[test]
fn test_rhythm_builders() {
    let r = Rhythm::new(3, 8).unwrap();
    assert_eq!(r.length(), 8);
    assert_eq!(r.phase(), 0);
    assert!(r.with_length(0).is_err());

    let r = r.rotate(2).unwrap().rotate(-5).unwrap();
    assert_eq!(r.phase(), -3);
    assert_eq!(
        r.with_phase(i64::MAX).rotate(1),
        Err(RhythmError::PhaseOverflow {
            phase: i64::MAX,
            by: 1
        })
    );
    assert!(Rhythm::new(4, 3).is_err());
}

#[test]
fn test_display_and_hit_count() {
    let r = Rhythm::new(5, 8).unwrap().with_length(12).unwrap();
    assert_eq!(r.to_string(), "x.x.xx.x....");
    assert_eq!(r.render_with('#', '-'), "#-#-##-#----");
    assert_eq!(r.hit_count(), 5);
    assert_eq!(Rhythm::new(5, 8).unwrap().with_length(4).unwrap().hit_count(), 2);
}

#[test]
fn test_hit_count_matches_steps() {
    for pulses in 1..=12 {
        for onsets in 0..=pulses {
            for length in 1..=pulses + 4 {
                for phase in [-5, 0, 3, 17] {
                    let r = Rhythm::new(onsets, pulses)
                        .unwrap()
                        .with_phase(phase)
                        .with_length(length)
                        .unwrap();
                    let counted = r.steps().filter(|&hit| hit).count() as u64;
                    assert_eq!(r.hit_count(), counted, "E({},{},{},{})", onsets, pulses, phase, length);
                }
            }
        }
    }
}

#[test]
fn test_hit_count_huge_length() {
    let r = Rhythm::new(1, 2).unwrap().with_length(9_000_000_000_000_000_000).unwrap();
    assert_eq!(r.hit_count(), 1);
    let r = Rhythm::new(5, 8).unwrap().with_phase(i64::MIN).with_length(i64::MAX).unwrap();
    assert_eq!(r.hit_count(), 5);
    let r = Rhythm::new(i64::MAX, i64::MAX).unwrap().with_length(3).unwrap();
    assert_eq!(r.hit_count(), 3);
}

#[test]
fn test_steps_restartable() {
    let r = Rhythm::new(3, 8).unwrap();
    let steps = r.steps();
    assert_eq!(steps.len(), 8);
    let first: Vec<bool> = steps.clone().collect();
    let second: Vec<bool> = steps.collect();
    assert_eq!(first, second);

    let reversed: String = r.steps().rev().map(|h| if h { 'x' } else { '.' }).collect();
    assert_eq!(reversed, ".x..x..x");
}

#[test]
fn test_steps_size_hint_huge_length() {
    let mut steps = Rhythm::new(1, 2).unwrap().with_length(i64::MAX).unwrap().steps();
    let expected = match usize::try_from(i64::MAX) {
        Ok(n) => (n, Some(n)),
        Err(_) => (usize::MAX, None),
    };
    assert_eq!(steps.size_hint(), expected);
    assert_eq!(steps.next(), Some(true));
    assert_eq!(steps.next_back(), Some(false));
}

#[test]
fn test_onset_times() {
    let r = Rhythm::new(3, 8).unwrap();
    let times: Vec<_> = r.onset_times().collect();
    assert_eq!(times, vec![step_time(0, 8), step_time(3, 8), step_time(6, 8)]);
    assert_eq!(r.hit_cursors().collect::<Vec<_>>(), vec![0, 3, 6]);
}

#[test]
fn test_from_str() {
    let r: Rhythm = "euclid(5, 8, 8, 12)".parse().unwrap();
    assert_eq!(r.to_string(), "....x.x.xx.x");
    let r: Rhythm = "(3,8)".parse().unwrap();
    assert_eq!(r.to_string(), "x..x..x.");
    let r: Rhythm = "e(1, 4, -1)".parse().unwrap();
    assert_eq!(r.to_string(), ".x..");

    assert!("euclid(9, 8)".parse::<Rhythm>().is_err());
    assert!("euclid(1)".parse::<Rhythm>().is_err());
    assert!("rotate(3, 8)".parse::<Rhythm>().is_err());
    assert!("(3, kick)".parse::<Rhythm>().is_err());
}

#[test]
fn test_spec_conversion() {
    let spec = RhythmSpec {
        onsets: 5,
        pulses: 8,
        phase: 2,
        length: None,
    };
    let r = Rhythm::try_from(spec).unwrap();
    assert_eq!(r.length(), 8);
    assert_eq!(RhythmSpec::from(r).length, Some(8));

    let bad = RhythmSpec {
        length: Some(-1),
        ..spec
    };
    assert!(Rhythm::try_from(bad).is_err());
}
