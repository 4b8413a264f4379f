//! Interpreter for pattern-language programs
//!
//! Binds names to rhythms and evaluates the built-in functions. Holds no
//! playback state; each expression is evaluated against the current
//! bindings.

use anyhow::{anyhow, bail, Result};
use pulse_core::parser::{Expression, Program, Statement};
use pulse_core::Rhythm;
use std::collections::BTreeMap;
use std::fmt;

/// Result of evaluating an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Rhythm(Rhythm),
    Number(i64),
    /// Outcome of `at(rhythm, cursor)`: hit (`true`) or rest
    Step(bool),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Rhythm(_) => "rhythm",
            Value::Number(_) => "number",
            Value::Step(_) => "step",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Rhythm(r) => write!(f, "{}", r),
            Value::Number(n) => write!(f, "{}", n),
            Value::Step(true) => write!(f, "hit"),
            Value::Step(false) => write!(f, "rest"),
        }
    }
}

/// Name bindings, kept sorted for listing
#[derive(Debug, Default)]
pub struct Environment {
    bindings: BTreeMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: String, value: Value) {
        self.bindings.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Names of the built-in functions, for help output and completion
pub const BUILTINS: &[(&str, &str)] = &[
    ("euclid(o, p[, phase[, length]])", "Euclidean rhythm, alias e(...) or (o, p, ...)"),
    ("rotate(r, n)", "Shift the phase by n steps"),
    ("resize(r, length)", "Read over a new length (pad or truncate)"),
    ("at(r, cursor)", "Hit or rest at a cursor"),
    ("hits(r)", "Number of hits over the length"),
    ("onsets(r)", "Onset count"),
    ("pulses(r)", "Pulse count"),
];

pub struct Interpreter {
    pub environment: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            environment: Environment::new(),
        }
    }

    /// Run a program, returning the value of its last bare expression
    pub fn run_program(&mut self, program: &Program) -> Result<Option<Value>> {
        let mut last_value = None;
        for stmt in &program.statements {
            last_value = self.run_statement(stmt)?;
        }
        Ok(last_value)
    }

    pub fn run_statement(&mut self, stmt: &Statement) -> Result<Option<Value>> {
        match stmt {
            Statement::Let { name, value } => {
                let val = self.eval(value)?;
                tracing::debug!(%name, value = %val, "bound");
                self.environment.define(name.clone(), val);
                Ok(None)
            }
            Statement::Expression(expr) => Ok(Some(self.eval(expr)?)),
        }
    }

    pub fn eval(&self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Number(n) => Ok(Value::Number(*n)),
            Expression::Identifier(name) => self
                .environment
                .get(name)
                .copied()
                .ok_or_else(|| anyhow!("Undefined name '{}'", name)),
            Expression::Tuple(items) => self.call("euclid", items),
            Expression::Call { name, args } => self.call(name, args),
        }
    }

    fn call(&self, name: &str, args: &[Expression]) -> Result<Value> {
        let values = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<_>>>()?;

        match (name, values.as_slice()) {
            ("euclid" | "e", _) => {
                let numbers = values
                    .iter()
                    .map(|v| expect_number(name, v))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Rhythm(Rhythm::from_args(&numbers)?))
            }
            ("rotate", [r, n]) => Ok(Value::Rhythm(
                expect_rhythm(name, r)?.rotate(expect_number(name, n)?)?,
            )),
            ("resize", [r, length]) => Ok(Value::Rhythm(
                expect_rhythm(name, r)?.with_length(expect_number(name, length)?)?,
            )),
            ("at", [r, cursor]) => Ok(Value::Step(
                expect_rhythm(name, r)?.is_hit(expect_number(name, cursor)?),
            )),
            ("hits", [r]) => Ok(Value::Number(expect_rhythm(name, r)?.hit_count() as i64)),
            ("onsets", [r]) => Ok(Value::Number(expect_rhythm(name, r)?.onsets())),
            ("pulses", [r]) => Ok(Value::Number(expect_rhythm(name, r)?.pulses())),
            ("rotate" | "resize" | "at", _) => {
                bail!("{}() takes 2 arguments, got {}", name, values.len())
            }
            ("hits" | "onsets" | "pulses", _) => {
                bail!("{}() takes 1 argument, got {}", name, values.len())
            }
            _ => bail!("Unknown function '{}'", name),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn expect_number(func: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => Ok(*n),
        other => bail!("{}() expects a number, got a {}", func, other.type_name()),
    }
}

fn expect_rhythm(func: &str, value: &Value) -> Result<Rhythm> {
    match value {
        Value::Rhythm(r) => Ok(*r),
        other => bail!("{}() expects a rhythm, got a {}", func, other.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::parser::parse_statements;

    fn run(interpreter: &mut Interpreter, input: &str) -> Result<Option<Value>> {
        let program = parse_statements(input)?;
        interpreter.run_program(&program)
    }

    fn eval_str(input: &str) -> Result<Option<Value>> {
        run(&mut Interpreter::new(), input)
    }

    #[test]
    fn test_let_and_lookup() {
        let mut interp = Interpreter::new();
        assert_eq!(run(&mut interp, "let kick = euclid(3, 8)").unwrap(), None);
        let value = run(&mut interp, "kick").unwrap().unwrap();
        assert_eq!(value.to_string(), "x..x..x.");
        assert_eq!(interp.environment.len(), 1);
    }

    #[test]
    fn test_tuple_shorthand_and_alias() {
        assert_eq!(
            eval_str("(5, 8, 8, 12)").unwrap().unwrap().to_string(),
            "....x.x.xx.x"
        );
        assert_eq!(eval_str("e(5, 8)").unwrap().unwrap().to_string(), "x.x.xx.x");
    }

    #[test]
    fn test_rotate_and_resize() {
        assert_eq!(
            eval_str("rotate((5, 8), 2)").unwrap().unwrap().to_string(),
            "x.xx.xx."
        );
        assert_eq!(
            eval_str("resize((5, 8), 12)").unwrap().unwrap().to_string(),
            "x.x.xx.x...."
        );
        assert_eq!(
            eval_str("rotate(resize((5, 8), 12), 8)")
                .unwrap()
                .unwrap()
                .to_string(),
            "....x.x.xx.x"
        );
    }

    #[test]
    fn test_at_and_counts() {
        assert_eq!(eval_str("at((3, 8), 3)").unwrap(), Some(Value::Step(true)));
        assert_eq!(eval_str("at((3, 8), -1)").unwrap(), Some(Value::Step(false)));
        assert_eq!(eval_str("hits(resize((5, 8), 4))").unwrap(), Some(Value::Number(2)));
        assert_eq!(
            eval_str("hits(resize((1, 2), 9000000000000000000))").unwrap(),
            Some(Value::Number(1))
        );
        assert_eq!(eval_str("onsets((5, 8))").unwrap(), Some(Value::Number(5)));
        assert_eq!(eval_str("pulses((5, 8))").unwrap(), Some(Value::Number(8)));
    }

    #[test]
    fn test_last_expression_wins() {
        let value = eval_str("let a = (1, 4); rotate(a, 1); a").unwrap().unwrap();
        assert_eq!(value.to_string(), "x...");
    }

    #[test]
    fn test_errors() {
        assert!(eval_str("kick").unwrap_err().to_string().contains("Undefined"));
        assert!(eval_str("euclid(9, 8)").unwrap_err().to_string().contains("exceed"));
        assert!(eval_str("resize((3, 8), 0)").is_err());
        assert!(eval_str("rotate((3, 8))").unwrap_err().to_string().contains("2 arguments"));
        assert!(eval_str("at(3, 8)").unwrap_err().to_string().contains("expects a rhythm"));
        assert!(eval_str("euclid((3, 8), 8)").is_err());
        assert!(eval_str("shuffle((3, 8))").unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_failed_statement_keeps_earlier_bindings() {
        let mut interp = Interpreter::new();
        assert!(run(&mut interp, "let a = (3, 8); let b = (9, 8)").is_err());
        assert!(interp.environment.get("a").is_some());
        assert!(interp.environment.get("b").is_none());
    }
}
