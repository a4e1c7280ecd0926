//! Abstract syntax tree for enable-info expressions
//!
//! Every node is immutable once built. The tree owns its children, so a
//! parsed [`Expression`] can be shared read-only across threads.

use std::fmt;

/// A fully reduced value.
///
/// `UndefinedVariable` is the tombstone produced when a name is not bound
/// in the variable snapshot. It is a value, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// `true` or `false`
    Boolean(bool),
    /// 32-bit signed integer
    Integer(i32),
    /// String contents, without quotes
    String(String),
    /// Name of a variable that failed to resolve
    UndefinedVariable(String),
}

impl Constant {
    /// Create a string constant.
    pub fn string(s: impl Into<String>) -> Self {
        Constant::String(s.into())
    }

    /// Is this the undefined-variable tombstone?
    pub fn is_undefined(&self) -> bool {
        matches!(self, Constant::UndefinedVariable(_))
    }
}

impl From<bool> for Constant {
    fn from(b: bool) -> Self {
        Constant::Boolean(b)
    }
}

impl From<i32> for Constant {
    fn from(n: i32) -> Self {
        Constant::Integer(n)
    }
}

impl From<&str> for Constant {
    fn from(s: &str) -> Self {
        Constant::String(s.to_string())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Negate,
    /// `+`
    UnaryPlus,
}

impl UnaryOp {
    /// Source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
            UnaryOp::UnaryPlus => "+",
        }
    }
}

/// Arithmetic, equality and relational operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
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
}

impl BinaryOp {
    /// Source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
        }
    }
}

/// Short-circuiting boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// `&&`
    And,
    /// `||`
    Or,
}

impl LogicalOp {
    /// Source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

/// The fixed set of built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `in(x, a, b, ...)`: membership test
    In,
    /// `min(a, b, ...)`
    Min,
    /// `max(a, b, ...)`
    Max,
    /// `dim(a, b)`
    Dim,
}

impl Builtin {
    /// Look up a built-in by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        [Builtin::In, Builtin::Min, Builtin::Max, Builtin::Dim]
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::In => "in",
            Builtin::Min => "min",
            Builtin::Max => "max",
            Builtin::Dim => "dim",
        }
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// A literal or an already reduced value
    Constant(Constant),

    /// A host variable reference, resolved at evaluation time
    Parameter(String),

    /// Prefix operator application
    Unary {
        /// The operator
        op: UnaryOp,
        /// Its operand
        operand: Box<Expression>,
    },

    /// Arithmetic, equality or relational operator
    Binary {
        /// The operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },

    /// `&&` / `||`
    Logical {
        /// The operator
        op: LogicalOp,
        /// Left operand, always evaluated
        left: Box<Expression>,
        /// Right operand, skipped on short-circuit
        right: Box<Expression>,
    },

    /// Built-in function call; the name is checked at evaluation time
    Call {
        /// Function name as written
        name: String,
        /// Argument expressions
        args: Vec<Expression>,
    },
}

impl Expression {
    /// Constant node.
    pub fn constant(value: impl Into<Constant>) -> Self {
        Expression::Constant(value.into())
    }

    /// Variable reference node.
    pub fn parameter(name: impl Into<String>) -> Self {
        Expression::Parameter(name.into())
    }

    /// Unary node.
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Binary node.
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Logical node.
    pub fn logical(op: LogicalOp, left: Expression, right: Expression) -> Self {
        Expression::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Call node.
    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call {
            name: name.into(),
            args,
        }
    }

    /// Depth of the tree; a leaf has depth 1.
    ///
    /// The parser keeps this within [`crate::EvalContext::max_depth`].
    pub fn depth(&self) -> usize {
        match self {
            Expression::Constant(_) | Expression::Parameter(_) => 1,
            Expression::Unary { operand, .. } => 1 + operand.depth(),
            Expression::Binary { left, right, .. } | Expression::Logical { left, right, .. } => {
                1 + left.depth().max(right.depth())
            }
            Expression::Call { args, .. } => {
                1 + args.iter().map(Expression::depth).max().unwrap_or(0)
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Source printing
// ═══════════════════════════════════════════════════════════════════════

/// Prints source text that parses back to the same literal.
impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Boolean(b) => write!(f, "{}", b),
            Constant::Integer(n) if *n == i32::MIN => write!(f, "(-{} - 1)", i32::MAX),
            Constant::Integer(n) if *n < 0 => write!(f, "(-{})", n.unsigned_abs()),
            Constant::Integer(n) => write!(f, "{}", n),
            Constant::String(s) => write!(f, "\"{}\"", s),
            Constant::UndefinedVariable(name) => write!(f, "{}", name),
        }
    }
}

/// Prints fully parenthesized source that re-parses to an equal tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(c) => write!(f, "{}", c),
            Expression::Parameter(name) => write!(f, "{}", name),
            Expression::Unary { op, operand } => write!(f, "({}{})", op.symbol(), operand),
            Expression::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expression::Logical { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expression::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
