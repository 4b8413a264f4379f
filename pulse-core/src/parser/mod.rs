//! Front end of the pattern language: lexer, AST and statement parser.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod statement_parser;

pub use ast::{Expression, Program, Statement};
pub use error::ParseError;
pub use lexer::{Lexer, Span, SpannedToken, Token};
pub use statement_parser::{parse_expression, parse_statements, StatementParser};
