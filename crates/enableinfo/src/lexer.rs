//! Lexical scanner for enable-info source text

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{EnableInfoError, Result};
use crate::token::{Position, Token, TokenKind};

/// Single-pass scanner with one character of lookahead.
///
/// After the `EndOfFile` token has been produced, further calls keep
/// returning `EndOfFile`.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    offset: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            offset: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let start = Position::new(self.offset);

        let c = match self.bump() {
            Some(c) => c,
            None => return Ok(Token::new(TokenKind::EndOfFile, start)),
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '&' if self.eat('&') => TokenKind::And,
            '|' if self.eat('|') => TokenKind::Or,
            '=' if self.eat('=') => TokenKind::Equal,
            '!' if self.eat('=') => TokenKind::NotEqual,
            '!' => TokenKind::Not,
            '>' if self.eat('=') => TokenKind::GreaterEqual,
            '>' => TokenKind::Greater,
            '<' if self.eat('=') => TokenKind::LessEqual,
            '<' => TokenKind::Less,
            '"' => return self.string(start),
            c if c.is_ascii_digit() => return self.integer(c, start),
            c if c.is_ascii_alphabetic() || c == '_' => return Ok(self.identifier(c, start)),
            ch => {
                return Err(EnableInfoError::UnexpectedCharacter {
                    ch,
                    position: start,
                })
            }
        };

        Ok(Token::new(kind, start))
    }

    fn string(&mut self, start: Position) -> Result<Token> {
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(Token::with_text(TokenKind::StringLiteral, text, start)),
                Some(c) => text.push(c),
                None => return Err(EnableInfoError::UnterminatedString { position: start }),
            }
        }
    }

    fn integer(&mut self, first: char, start: Position) -> Result<Token> {
        let mut text = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.bump();
        }

        if text.parse::<i32>().is_err() {
            return Err(EnableInfoError::IntegerOverflow {
                literal: text,
                position: start,
            });
        }
        Ok(Token::with_text(TokenKind::IntegerLiteral, text, start))
    }

    fn identifier(&mut self, first: char, start: Position) -> Token {
        let mut text = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            text.push(c);
            self.bump();
        }

        let kind = if text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false") {
            TokenKind::BooleanLiteral
        } else {
            TokenKind::Identifier
        };
        Token::with_text(kind, text, start)
    }
}

/// Scan `source` into a token vector ending with exactly one `EndOfFile`.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::EndOfFile;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
