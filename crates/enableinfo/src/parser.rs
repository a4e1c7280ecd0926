//! Recursive-descent parser
//!
//! Grammar, lowest precedence first. All binary levels are left-associative.
//!
//! ```text
//! or         := and ( "||" and )*
//! and        := equality ( "&&" equality )*
//! equality   := relational ( ( "==" | "!=" ) relational )*
//! relational := additive ( ( "<" | "<=" | ">" | ">=" ) additive )*
//! additive   := term ( ( "+" | "-" ) term )*
//! term       := unary ( ( "*" | "/" ) unary )*
//! unary      := ( "!" | "-" | "+" ) unary | primary
//! primary    := INTEGER | BOOLEAN | STRING
//!             | IDENT [ "(" [ or ( "," or )* ] ")" ]
//!             | "(" or ")"
//! ```
//!
//! The parser does no type checking; that happens during evaluation.
//!
//! [`EvalContext::max_depth`] bounds both the parser's own recursion
//! (parens, unary chains, call arguments) and the depth of every tree it
//! builds, so long operator chains are rejected before evaluation or
//! printing has to walk them.

use crate::ast::{BinaryOp, Constant, Expression, LogicalOp, UnaryOp};
use crate::context::EvalContext;
use crate::error::{EnableInfoError, Result};
use crate::lexer::tokenize;
use crate::token::{Position, Token, TokenKind};

/// Parser over a fully scanned token stream.
pub struct Parser<'c> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    ctx: &'c EvalContext,
}

impl<'c> Parser<'c> {
    /// Create a parser over `tokens`.
    ///
    /// An `EndOfFile` token is appended if the stream lacks one.
    pub fn new(mut tokens: Vec<Token>, ctx: &'c EvalContext) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfFile) {
            let end = tokens
                .last()
                .map(|t| Position::new(t.position.offset + 1))
                .unwrap_or_default();
            tokens.push(Token::new(TokenKind::EndOfFile, end));
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            ctx,
        }
    }

    /// Parse the whole token stream into one expression.
    pub fn parse_expression(mut self) -> Result<Expression> {
        let expr = self.parse_or()?;
        let next = self.peek();
        if next.kind != TokenKind::EndOfFile {
            return Err(EnableInfoError::UnexpectedToken {
                found: next.kind,
                expected: "operator or end of input",
                position: next.position,
            });
        }
        Ok(expr)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token cursor
    // ═══════════════════════════════════════════════════════════════════

    fn peek(&self) -> &Token {
        // new() guarantees a trailing EndOfFile and advance() never moves
        // past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::EndOfFile {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token> {
        if self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> EnableInfoError {
        let token = self.peek();
        if token.kind == TokenKind::EndOfFile {
            EnableInfoError::UnexpectedEnd {
                expected,
                position: token.position,
            }
        } else {
            EnableInfoError::UnexpectedToken {
                found: token.kind,
                expected,
                position: token.position,
            }
        }
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        if self.depth > self.ctx.max_depth {
            return Err(EnableInfoError::NestingTooDeep {
                limit: self.ctx.max_depth,
                position: self.peek().position,
            });
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Reject a freshly built node whose tree is deeper than the limit.
    ///
    /// Children were checked when they were built, so `depth()` stays
    /// within `max_depth + 1` frames.
    fn bounded(&self, expr: Expression, position: Position) -> Result<Expression> {
        if expr.depth() > self.ctx.max_depth {
            return Err(EnableInfoError::NestingTooDeep {
                limit: self.ctx.max_depth,
                position,
            });
        }
        Ok(expr)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binary precedence levels
    // ═══════════════════════════════════════════════════════════════════

    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        while self.peek_kind() == TokenKind::Or {
            let position = self.advance().position;
            let right = self.parse_and()?;
            left = self.bounded(Expression::logical(LogicalOp::Or, left, right), position)?;
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_equality()?;
        while self.peek_kind() == TokenKind::And {
            let position = self.advance().position;
            let right = self.parse_equality()?;
            left = self.bounded(Expression::logical(LogicalOp::And, left, right), position)?;
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expression> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Equal => BinaryOp::Equal,
                TokenKind::NotEqual => BinaryOp::NotEqual,
                _ => return Ok(left),
            };
            let position = self.advance().position;
            let right = self.parse_relational()?;
            left = self.bounded(Expression::binary(op, left, right), position)?;
        }
    }

    fn parse_relational(&mut self) -> Result<Expression> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                _ => return Ok(left),
            };
            let position = self.advance().position;
            let right = self.parse_additive()?;
            left = self.bounded(Expression::binary(op, left, right), position)?;
        }
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => return Ok(left),
            };
            let position = self.advance().position;
            let right = self.parse_term()?;
            left = self.bounded(Expression::binary(op, left, right), position)?;
        }
    }

    fn parse_term(&mut self) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOp::Multiply,
                TokenKind::Slash => BinaryOp::Divide,
                _ => return Ok(left),
            };
            let position = self.advance().position;
            let right = self.parse_unary()?;
            left = self.bounded(Expression::binary(op, left, right), position)?;
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Unary and primary
    // ═══════════════════════════════════════════════════════════════════

    fn parse_unary(&mut self) -> Result<Expression> {
        let op = match self.peek_kind() {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Negate,
            TokenKind::Plus => UnaryOp::UnaryPlus,
            _ => return self.parse_primary(),
        };
        let position = self.advance().position;
        let operand = self.nested(Self::parse_unary)?;
        self.bounded(Expression::unary(op, operand), position)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        match self.peek_kind() {
            TokenKind::IntegerLiteral => {
                let token = self.advance();
                let value = token.text().parse::<i32>().map_err(|_| {
                    EnableInfoError::IntegerOverflow {
                        literal: token.text().to_string(),
                        position: token.position,
                    }
                })?;
                Ok(Expression::Constant(Constant::Integer(value)))
            }
            TokenKind::BooleanLiteral => {
                let token = self.advance();
                let value = token.text().eq_ignore_ascii_case("true");
                Ok(Expression::Constant(Constant::Boolean(value)))
            }
            TokenKind::StringLiteral => {
                let token = self.advance();
                Ok(Expression::Constant(Constant::String(
                    token.text.unwrap_or_default(),
                )))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                let position = token.position;
                let name = token.text.unwrap_or_default();
                if self.peek_kind() == TokenKind::LeftParen {
                    self.advance();
                    let args = self.nested(Self::parse_arguments)?;
                    self.bounded(Expression::Call { name, args }, position)
                } else {
                    Ok(Expression::Parameter(name))
                }
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.nested(Self::parse_or)?;
                self.expect(TokenKind::RightParen, "`)`")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("operand")),
        }
    }

    /// Arguments after the opening paren, through the closing paren.
    fn parse_arguments(&mut self) -> Result<Vec<Expression>> {
        let mut args = Vec::new();
        if self.peek_kind() == TokenKind::RightParen {
            self.advance();
            return Ok(args);
        }

        args.push(self.parse_or()?);
        while self.peek_kind() == TokenKind::Comma {
            self.advance();
            args.push(self.parse_or()?);
        }
        self.expect(TokenKind::RightParen, "`,` or `)`")?;
        Ok(args)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Parse `source` with the default context.
pub fn parse(source: &str) -> Result<Expression> {
    parse_with(source, &EvalContext::default())
}

/// Parse `source` with an explicit context.
#[tracing::instrument(level = "debug", skip(ctx), err)]
pub fn parse_with(source: &str, ctx: &EvalContext) -> Result<Expression> {
    let tokens = tokenize(source)?;
    if ctx.trace {
        for token in &tokens {
            tracing::trace!(kind = %token.kind, text = token.text(), offset = token.position.offset, "token");
        }
    }
    Parser::new(tokens, ctx).parse_expression()
}
