//! Expression evaluation
//!
//! A post-order walk that reduces every node to a [`Constant`]. Type
//! errors, division by zero and unknown functions abort the walk; unknown
//! variables do not, they reduce to [`Constant::UndefinedVariable`].

pub mod binary;
pub mod call;
pub mod logical;
pub mod unary;

use crate::ast::{Constant, Expression};
use crate::error::Result;
use crate::variables::EnableInfoVariables;

/// Trait for evaluating AST nodes to constants.
///
/// This is the core abstraction for the tree-walking interpreter.
pub trait Evaluate {
    /// Reduce this node against the given snapshot.
    fn eval(&self, vars: &EnableInfoVariables) -> Result<Constant>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expression {
    fn eval(&self, vars: &EnableInfoVariables) -> Result<Constant> {
        match self {
            Expression::Constant(c) => Ok(c.clone()),
            Expression::Parameter(name) => Ok(resolve(name, vars)),
            Expression::Unary { op, operand } => unary::eval_unary(*op, operand, vars),
            Expression::Binary { op, left, right } => binary::eval_binary(*op, left, right, vars),
            Expression::Logical { op, left, right } => {
                logical::eval_logical(*op, left, right, vars)
            }
            Expression::Call { name, args } => call::eval_call(name, args, vars),
        }
    }
}

fn resolve(name: &str, vars: &EnableInfoVariables) -> Constant {
    let value = vars.lookup(name);
    if value.is_undefined() {
        tracing::debug!(name, "undefined enable-info variable");
    }
    value
}

/// Ordinal comparison ignoring case, used for string equality and `in`.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_uppercase)
        .eq(b.chars().flat_map(char::to_uppercase))
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression to the enablement verdict.
///
/// Only a root that reduces to `Boolean(true)` enables the filter; any other
/// reduction, including an undefined variable, yields `false`.
#[tracing::instrument(level = "debug", skip_all, fields(expr = %expr), ret, err)]
pub fn evaluate(expr: &Expression, vars: &EnableInfoVariables) -> Result<bool> {
    match expr.eval(vars)? {
        Constant::Boolean(b) => Ok(b),
        other => {
            tracing::debug!(result = ?other, "expression did not reduce to a boolean");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::ImageMode;

    fn vars() -> EnableInfoVariables {
        EnableInfoVariables::new(200, 100, ImageMode::RGB, false, 3, 3, false, false)
    }

    #[test]
    fn test_constant_is_returned_unchanged() {
        let expr = Expression::constant("RGBMode");
        assert_eq!(expr.eval(&vars()).unwrap(), Constant::string("RGBMode"));
    }

    #[test]
    fn test_parameter_resolves() {
        let expr = Expression::parameter("PSHOP_ImageWidth");
        assert_eq!(expr.eval(&vars()).unwrap(), Constant::Integer(200));
    }

    #[test]
    fn test_unknown_parameter_is_undefined() {
        let expr = Expression::parameter("PSHOP_Bogus");
        assert_eq!(
            expr.eval(&vars()).unwrap(),
            Constant::UndefinedVariable("PSHOP_Bogus".into())
        );
    }

    #[test]
    fn test_verdict_requires_boolean_true() {
        assert!(evaluate(&Expression::constant(true), &vars()).unwrap());
        assert!(!evaluate(&Expression::constant(false), &vars()).unwrap());
        assert!(!evaluate(&Expression::constant(1), &vars()).unwrap());
        assert!(!evaluate(&Expression::constant("true"), &vars()).unwrap());
        assert!(!evaluate(&Expression::parameter("nope"), &vars()).unwrap());
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("RGBMode", "rgbmode"));
        assert!(eq_ignore_case("", ""));
        assert!(!eq_ignore_case("RGBMode", "RGBMode "));
        assert!(eq_ignore_case("ÄB", "äb"));
    }
}
