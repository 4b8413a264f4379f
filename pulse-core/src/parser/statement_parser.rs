//! Statement parser for the pattern language
//!
//! Parses lines like:
//! - `let kick = euclid(3, 8)`
//! - `let hat = rotate((5, 8), 2); at(hat, 13)`
//! - `(13, 24, 10)`

use crate::parser::ast::{Expression, Program, Statement};
use crate::parser::error::ParseError;
use crate::parser::lexer::{Lexer, Span, SpannedToken, Token};

pub struct StatementParser {
    tokens: Vec<SpannedToken>,
    position: usize,
}

impl StatementParser {
    pub fn new(input: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(StatementParser {
            tokens,
            position: 0,
        })
    }

    fn current(&self) -> &Token {
        self.tokens
            .get(self.position)
            .map(|st| &st.token)
            .unwrap_or(&Token::Eof)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.position)
            .map(|st| st.span)
            .unwrap_or_default()
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.position + 1)
            .map(|st| &st.token)
            .unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn check(&self, token: &Token) -> bool {
        self.current() == token
    }

    fn error(&self, message: String) -> ParseError {
        ParseError::new(message, self.current_span())
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if self.check(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("Expected '{}', found '{}'", expected, self.current())))
        }
    }

    fn skip_separators(&mut self) {
        while self.check(&Token::Semicolon) || self.check(&Token::Newline) {
            self.advance();
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        loop {
            self.skip_separators();
            if self.check(&Token::Eof) {
                break;
            }
            program.push(self.parse_statement()?);

            // Statements end at a separator or the end of input
            if !matches!(self.current(), Token::Semicolon | Token::Newline | Token::Eof) {
                return Err(self.error(format!("Unexpected '{}' after statement", self.current())));
            }
        }

        Ok(program)
    }

    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.check(&Token::Let) {
            self.advance();
            let name = match self.current().clone() {
                Token::Identifier(name) => name,
                other => return Err(self.error(format!("Expected a name after 'let', found '{}'", other))),
            };
            self.advance();
            self.expect(&Token::Equals)?;
            let value = self.parse_expression()?;
            return Ok(Statement::Let { name, value });
        }
        Ok(Statement::Expression(self.parse_expression()?))
    }

    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        match self.current().clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expression::Number(n))
            }
            Token::Identifier(name) => {
                if matches!(self.peek(), Token::LeftParen) {
                    self.advance();
                    let args = self.parse_arguments()?;
                    Ok(Expression::Call { name, args })
                } else {
                    self.advance();
                    Ok(Expression::Identifier(name))
                }
            }
            Token::LeftParen => {
                let items = self.parse_arguments()?;
                if items.len() < 2 {
                    return Err(self.error("A rhythm tuple needs at least onsets and pulses".to_string()));
                }
                Ok(Expression::Tuple(items))
            }
            other => Err(self.error(format!("Expected an expression, found '{}'", other))),
        }
    }

    /// `( [expr (, expr)*] )`, starting at the opening parenthesis
    fn parse_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.expect(&Token::LeftParen)?;
        let mut args = Vec::new();
        if self.check(&Token::RightParen) {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if self.check(&Token::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(&Token::RightParen)?;
        Ok(args)
    }
}

/// Parse a program of `;`- or newline-separated statements
pub fn parse_statements(input: &str) -> Result<Program, ParseError> {
    StatementParser::new(input)?.parse_program()
}

/// Parse exactly one expression, rejecting trailing input
pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    let mut parser = StatementParser::new(input)?;
    let expr = parser.parse_expression()?;
    if !parser.check(&Token::Eof) {
        return Err(parser.error(format!("Unexpected '{}' after expression", parser.current())));
    }
    Ok(expr)
}
