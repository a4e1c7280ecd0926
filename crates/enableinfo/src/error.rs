//! Error types for enable-info scanning, parsing and evaluation

use thiserror::Error;

use crate::ast::Constant;
use crate::token::{Position, TokenKind};

/// Broad classification of an [`EnableInfoError`].
///
/// Every error is an "invalid enable-info expression"; the category says
/// which stage rejected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Rejected by the lexer
    Lexical,
    /// Rejected by the parser
    Syntax,
    /// Operator applied to a wrong-kinded operand
    Type,
    /// Division by zero
    Arithmetic,
    /// Call to an unknown function
    Semantic,
    /// Source text could not be decoded
    Encoding,
}

/// Main error type for enable-info operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnableInfoError {
    // ═══════════════════════════════════════════════════════════════════
    // Lexical
    // ═══════════════════════════════════════════════════════════════════
    /// A character that starts no token
    #[error("invalid expression: unexpected character `{ch}` at {position}")]
    UnexpectedCharacter {
        /// The offending character
        ch: char,
        /// Where it was found
        position: Position,
    },

    /// A string literal with no closing quote
    #[error("invalid expression: unterminated string literal starting at {position}")]
    UnterminatedString {
        /// Position of the opening quote
        position: Position,
    },

    /// An integer literal that does not fit in 32 bits
    #[error("invalid expression: integer literal `{literal}` at {position} is out of range")]
    IntegerOverflow {
        /// The digits as written
        literal: String,
        /// Where the literal starts
        position: Position,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Syntax
    // ═══════════════════════════════════════════════════════════════════
    /// A token the grammar does not allow here
    #[error("invalid expression: unexpected {found} at {position}, expected {expected}")]
    UnexpectedToken {
        /// Kind of the token that was found
        found: TokenKind,
        /// What the parser was looking for
        expected: &'static str,
        /// Where the token starts
        position: Position,
    },

    /// Input ended where an operand or closing token was required
    #[error("invalid expression: unexpected end of input at {position}, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for
        expected: &'static str,
        /// Offset of the end of input
        position: Position,
    },

    /// Expression nested deeper than the configured limit
    #[error("invalid expression: nesting exceeds {limit} levels at {position}")]
    NestingTooDeep {
        /// The configured maximum depth
        limit: usize,
        /// Where the limit was crossed
        position: Position,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Evaluation
    // ═══════════════════════════════════════════════════════════════════
    /// Operand of the wrong kind
    #[error("invalid expression: `{op}` expects {expected} operands, got {got}")]
    TypeMismatch {
        /// Operator symbol
        op: &'static str,
        /// Required operand kind
        expected: &'static str,
        /// Kind actually supplied
        got: &'static str,
    },

    /// Integer division with a zero divisor
    #[error("invalid expression: division by zero")]
    DivisionByZero,

    /// Call to a name that is not a built-in function
    #[error("invalid expression: unknown function `{name}`")]
    UnknownFunction {
        /// The name as written
        name: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Input decoding
    // ═══════════════════════════════════════════════════════════════════
    /// UTF-16 source containing an unpaired surrogate
    #[error("invalid expression: source is not valid UTF-16 (unit {index})")]
    InvalidEncoding {
        /// Index of the first bad code unit
        index: usize,
    },
}

impl EnableInfoError {
    /// Which stage of the pipeline produced this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnexpectedCharacter { .. }
            | Self::UnterminatedString { .. }
            | Self::IntegerOverflow { .. } => ErrorCategory::Lexical,
            Self::UnexpectedToken { .. }
            | Self::UnexpectedEnd { .. }
            | Self::NestingTooDeep { .. } => ErrorCategory::Syntax,
            Self::TypeMismatch { .. } => ErrorCategory::Type,
            Self::DivisionByZero => ErrorCategory::Arithmetic,
            Self::UnknownFunction { .. } => ErrorCategory::Semantic,
            Self::InvalidEncoding { .. } => ErrorCategory::Encoding,
        }
    }

    /// Source position, for errors raised before evaluation.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnterminatedString { position }
            | Self::IntegerOverflow { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEnd { position, .. }
            | Self::NestingTooDeep { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub(crate) fn type_mismatch(op: &'static str, expected: &'static str, got: &Constant) -> Self {
        Self::TypeMismatch {
            op,
            expected,
            got: kind_name(got),
        }
    }
}

/// Result type alias for enable-info operations
pub type Result<T> = std::result::Result<T, EnableInfoError>;

/// Get the kind name of a constant for error messages.
pub fn kind_name(value: &Constant) -> &'static str {
    match value {
        Constant::Boolean(_) => "Boolean",
        Constant::Integer(_) => "Integer",
        Constant::String(_) => "String",
        Constant::UndefinedVariable(_) => "UndefinedVariable",
    }
}
