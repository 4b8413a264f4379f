use std::fmt;

/// Expressions of the pattern language
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal: `8`, `-3`
    Number(i64),

    /// Reference to a bound name: `kick`
    Identifier(String),

    /// Function call: `euclid(3, 8)`, `rotate(kick, 2)`
    Call { name: String, args: Vec<Expression> },

    /// Bare tuple, shorthand for `euclid(...)`: `(3, 8)`
    Tuple(Vec<Expression>),
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Call { name, args } => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            Expression::Tuple(items) => {
                write!(f, "(")?;
                write_list(f, items)?;
                write!(f, ")")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let name = expr`
    Let { name: String, value: Expression },
    /// A bare expression whose value is shown
    Expression(Expression),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {}", name, value),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

/// A sequence of statements (one REPL line or a whole file)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            statements: Vec::new(),
        }
    }

    pub fn push(&mut self, stmt: Statement) {
        self.statements.push(stmt);
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
