//! Tokenizer for the pattern language.

use crate::parser::error::ParseError;
use std::fmt;

/// Source position of a token (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub line: usize,
    pub column: usize,
    /// Char offset from the start of the source
    pub offset: usize,
}

impl Default for Span {
    fn default() -> Self {
        Span {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(i64),
    Identifier(String),
    Let,

    LeftParen,
    RightParen,
    Comma,
    Equals,
    Semicolon,
    Newline,

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Let => write!(f, "let"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Equals => write!(f, "="),
            Token::Semicolon => write!(f, ";"),
            Token::Newline => write!(f, "newline"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    current_char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Lexer {
            input: chars,
            position: 0,
            line: 1,
            column: 1,
            current_char,
        }
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }

    fn advance(&mut self) {
        if self.current_char == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Skip spaces, tabs and `//` comments, stopping at newlines
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char {
            if ch == '/' && self.peek() == Some('/') {
                while !matches!(self.current_char, None | Some('\n')) {
                    self.advance();
                }
            } else if ch.is_whitespace() && ch != '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, start: Span) -> Result<i64, ParseError> {
        let mut digits = String::new();

        if self.current_char == Some('-') {
            digits.push('-');
            self.advance();
        }
        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        digits
            .parse::<i64>()
            .map_err(|_| ParseError::new(format!("Number out of range: {}", digits), start))
    }

    fn read_identifier(&mut self) -> String {
        let mut name = String::new();
        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' {
                name.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    pub fn next_token(&mut self) -> Result<SpannedToken, ParseError> {
        self.skip_trivia();
        let span = self.span();

        let token = match self.current_char {
            None => Token::Eof,
            Some('\n') => {
                self.advance();
                Token::Newline
            }
            Some('(') => {
                self.advance();
                Token::LeftParen
            }
            Some(')') => {
                self.advance();
                Token::RightParen
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some('=') => {
                self.advance();
                Token::Equals
            }
            Some(';') => {
                self.advance();
                Token::Semicolon
            }
            Some('-') if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                Token::Number(self.read_number(span)?)
            }
            Some(ch) if ch.is_ascii_digit() => Token::Number(self.read_number(span)?),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let name = self.read_identifier();
                if name == "let" {
                    Token::Let
                } else {
                    Token::Identifier(name)
                }
            }
            Some(ch) => {
                return Err(ParseError::new(
                    format!("Unexpected character: '{}'", ch),
                    span,
                ))
            }
        };

        Ok(SpannedToken { token, span })
    }

    /// Tokenize the whole input; the last token is always `Eof`
    pub fn tokenize(&mut self) -> Result<Vec<SpannedToken>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token()?;
            let is_eof = spanned.token == Token::Eof;
            tokens.push(spanned);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}
