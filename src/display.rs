//! Terminal rendering of rhythms and values.

use crate::interpreter::Value;
use colored::*;
use pulse_core::Rhythm;

/// Steps shown before a rendering is cut short with `…(+K)`
pub const MAX_STEPS: usize = 64;

/// Display settings, set from CLI flags and the `style`/`color` commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub hit: char,
    pub rest: char,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hit: 'x',
            rest: '.',
            color: true,
        }
    }
}

impl DisplayConfig {
    /// Characters for hit and rest; they must differ and be printable
    pub fn set_style(&mut self, hit: char, rest: char) -> Result<(), String> {
        if hit == rest {
            return Err("Hit and rest characters must differ".to_string());
        }
        if !is_visible(hit) {
            return Err("Hit must be a visible character".to_string());
        }
        if !is_visible(rest) {
            return Err("Rest must be a visible character".to_string());
        }
        self.hit = hit;
        self.rest = rest;
        Ok(())
    }

    /// Apply the color setting process-wide
    pub fn apply_color(&self) {
        if self.color {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    /// Steps of a rhythm, hits highlighted and padding dimmed.
    ///
    /// At most [`MAX_STEPS`] steps are drawn; the rest are counted in a suffix.
    pub fn render(&self, rhythm: &Rhythm) -> String {
        if !self.color {
            return self.render_plain(rhythm);
        }
        let mut out = String::new();
        for hit in rhythm.steps().take(MAX_STEPS) {
            let step = if hit {
                self.hit.to_string().bright_yellow().bold()
            } else {
                self.rest.to_string().dimmed()
            };
            out.push_str(&step.to_string());
        }
        if let Some(suffix) = elided(rhythm) {
            out.push_str(&suffix.dimmed().to_string());
        }
        out
    }

    /// Plain rendering, no color codes
    pub fn render_plain(&self, rhythm: &Rhythm) -> String {
        let mut out: String = rhythm
            .steps()
            .take(MAX_STEPS)
            .map(|hit| if hit { self.hit } else { self.rest })
            .collect();
        if let Some(suffix) = elided(rhythm) {
            out.push_str(&suffix);
        }
        out
    }

    /// One-line description used by the REPL and `run`
    pub fn describe(&self, value: &Value) -> String {
        if !self.color {
            return match value {
                Value::Rhythm(r) => format!("{}  {}", self.render_plain(r), signature(r)),
                other => other.to_string(),
            };
        }
        match value {
            Value::Rhythm(r) => format!("{}  {}", self.render(r), signature(r).cyan()),
            Value::Number(n) => n.to_string(),
            Value::Step(true) => "hit".bright_yellow().to_string(),
            Value::Step(false) => "rest".dimmed().to_string(),
        }
    }
}

fn is_visible(c: char) -> bool {
    !c.is_control() && !c.is_whitespace()
}

/// `…(+K)` for the steps past [`MAX_STEPS`], if any
fn elided(rhythm: &Rhythm) -> Option<String> {
    let hidden = rhythm.length() - MAX_STEPS as i64;
    (hidden > 0).then(|| format!("…(+{})", hidden))
}

/// `E(5,8)`, with phase and length only when they differ from the defaults
pub fn signature(rhythm: &Rhythm) -> String {
    let mut sig = format!("E({},{}", rhythm.onsets(), rhythm.pulses());
    if rhythm.phase() != 0 || rhythm.length() != rhythm.pulses() {
        sig.push_str(&format!(",{}", rhythm.phase()));
    }
    if rhythm.length() != rhythm.pulses() {
        sig.push_str(&format!(",{}", rhythm.length()));
    }
    sig.push(')');
    sig
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature() {
        let r = Rhythm::new(5, 8).unwrap();
        assert_eq!(signature(&r), "E(5,8)");
        assert_eq!(signature(&r.with_phase(2)), "E(5,8,2)");
        assert_eq!(signature(&r.with_length(12).unwrap()), "E(5,8,0,12)");
    }

    #[test]
    fn test_describe_without_color() {
        let config = DisplayConfig {
            color: false,
            ..DisplayConfig::default()
        };
        let r = Rhythm::new(5, 8).unwrap().with_phase(1);
        assert_eq!(config.describe(&Value::Rhythm(r)), ".x.xx.xx  E(5,8,1)");
        assert_eq!(config.describe(&Value::Step(false)), "rest");
        assert_eq!(config.describe(&Value::Number(4)), "4");
    }

    #[test]
    fn test_set_style() {
        let mut config = DisplayConfig::default();
        assert!(config.set_style('#', '-').is_ok());
        let r = Rhythm::new(3, 8).unwrap();
        assert_eq!(config.render_plain(&r), "#--#--#-");
        assert!(config.set_style('o', 'o').is_err());
        assert_eq!(config.hit, '#');
    }

    #[test]
    fn test_set_style_rejects_invisible_rest() {
        let mut config = DisplayConfig::default();
        assert_eq!(
            config.set_style('x', ' '),
            Err("Rest must be a visible character".to_string())
        );
        assert_eq!(
            config.set_style('x', '\t'),
            Err("Rest must be a visible character".to_string())
        );
        assert_eq!(
            config.set_style('\n', '.'),
            Err("Hit must be a visible character".to_string())
        );
        assert_eq!((config.hit, config.rest), ('x', '.'));
    }

    #[test]
    fn test_long_rhythm_is_elided() {
        let config = DisplayConfig {
            color: false,
            ..DisplayConfig::default()
        };
        let r = Rhythm::new(1, 2)
            .unwrap()
            .with_length(9_000_000_000_000_000_000)
            .unwrap();
        let expected_steps = format!("x{}", ".".repeat(MAX_STEPS - 1));
        assert_eq!(
            config.render_plain(&r),
            format!("{}…(+{})", expected_steps, 9_000_000_000_000_000_000i64 - MAX_STEPS as i64)
        );
        let described = config.describe(&Value::Rhythm(r));
        assert!(described.ends_with("E(1,2,0,9000000000000000000)"));

        let exact = Rhythm::new(3, 8).unwrap().with_length(MAX_STEPS as i64).unwrap();
        assert!(!config.render_plain(&exact).contains('…'));
    }
}
