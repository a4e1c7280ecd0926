//! # enableinfo
//!
//! Evaluator for the enable-info expressions that Photoshop-compatible
//! filter plug-ins (8bf modules) embed in their `PiPL` resources.
//!
//! The host evaluates a plugin's expression against the current document
//! state to decide whether the filter's menu entry is enabled:
//!
//! ```text
//! source → [Lexer] → tokens → [Parser] → Expression → [evaluate(vars)] → bool
//! ```
//!
//! The language is small and dynamically typed: booleans, 32-bit integers,
//! strings, host variables such as `PSHOP_ImageMode`, and the built-ins
//! `in`, `min`, `max` and `dim`. Unknown variables are not errors; they
//! reduce to an undefined value that makes the whole expression `false`.
//!
//! ```
//! use enableinfo::{EnableInfo, EnableInfoVariables, ImageMode};
//!
//! let info = EnableInfo::parse("PSHOP_ImageDepth == 8 && !PSHOP_HasSelectionMask").unwrap();
//! let vars = EnableInfoVariables::new(800, 600, ImageMode::RGB, false, 3, 3, false, false);
//! assert!(info.evaluate(&vars).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod cache;
pub mod context;
pub mod enable_info;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod variables;

// Re-export main types
pub use ast::{BinaryOp, Builtin, Constant, Expression, LogicalOp, UnaryOp};
pub use cache::CachedEnableInfo;
pub use context::EvalContext;
pub use enable_info::EnableInfo;
pub use error::{EnableInfoError, ErrorCategory, Result};
pub use eval::{evaluate, Evaluate};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, parse_with, Parser};
pub use token::{Position, Token, TokenKind};
pub use variables::{EnableInfoVariables, ImageMode, VariableName};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse and evaluate `source` in one step.
pub fn evaluate_str(source: &str, vars: &EnableInfoVariables) -> Result<bool> {
    evaluate(&parse(source)?, vars)
}
