//! Tokens produced by the lexer

use std::fmt;

/// Character offset into the expression source (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    /// Offset in characters, not bytes
    pub offset: usize,
}

impl Position {
    /// Create a position at the given character offset.
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}", self.offset)
    }
}

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input; always the last token
    EndOfFile,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// Variable or function name
    Identifier,
    /// `true` / `false`, any case
    BooleanLiteral,
    /// Decimal digits
    IntegerLiteral,
    /// Double-quoted text
    StringLiteral,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    Not,
}

impl TokenKind {
    /// Human-readable description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::EndOfFile => "end of input",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::Comma => "`,`",
            TokenKind::Identifier => "identifier",
            TokenKind::BooleanLiteral => "boolean literal",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Or => "`||`",
            TokenKind::And => "`&&`",
            TokenKind::Equal => "`==`",
            TokenKind::NotEqual => "`!=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEqual => "`>=`",
            TokenKind::Less => "`<`",
            TokenKind::LessEqual => "`<=`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Not => "`!`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single lexical token.
///
/// `text` is set for identifiers and literals only. For string literals it
/// holds the contents without the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is
    pub kind: TokenKind,
    /// Source text for identifiers and literals
    pub text: Option<String>,
    /// Where the token starts
    pub position: Position,
}

impl Token {
    /// A token without text (operators, punctuation, end of input).
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self {
            kind,
            text: None,
            position,
        }
    }

    /// A token carrying its source text.
    pub fn with_text(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            position,
        }
    }

    /// The token text, or an empty string for textless tokens.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
