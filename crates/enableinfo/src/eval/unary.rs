//! Unary operation evaluation

use crate::ast::{Constant, Expression, UnaryOp};
use crate::error::{EnableInfoError, Result};
use crate::variables::EnableInfoVariables;

use super::Evaluate;

/// Evaluate a prefix operator node.
pub fn eval_unary(
    op: UnaryOp,
    operand: &Expression,
    vars: &EnableInfoVariables,
) -> Result<Constant> {
    let value = operand.eval(vars)?;
    apply_unary(op, value)
}

/// Apply a prefix operator to an already reduced operand.
pub(crate) fn apply_unary(op: UnaryOp, operand: Constant) -> Result<Constant> {
    if operand.is_undefined() {
        return Ok(operand);
    }

    match op {
        UnaryOp::Not => eval_not(operand),
        UnaryOp::Negate => eval_neg(operand),
        UnaryOp::UnaryPlus => eval_plus(operand),
    }
}

/// Logical NOT (`!x`).
fn eval_not(operand: Constant) -> Result<Constant> {
    match operand {
        Constant::Boolean(b) => Ok(Constant::Boolean(!b)),
        other => Err(EnableInfoError::type_mismatch("!", "Boolean", &other)),
    }
}

/// Arithmetic negation (`-x`), wrapping at `i32::MIN`.
fn eval_neg(operand: Constant) -> Result<Constant> {
    match operand {
        Constant::Integer(n) => Ok(Constant::Integer(n.wrapping_neg())),
        other => Err(EnableInfoError::type_mismatch("-", "Integer", &other)),
    }
}

/// Identity (`+x`), still restricted to integers.
fn eval_plus(operand: Constant) -> Result<Constant> {
    match operand {
        Constant::Integer(n) => Ok(Constant::Integer(n)),
        other => Err(EnableInfoError::type_mismatch("+", "Integer", &other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_bool() {
        let result = apply_unary(UnaryOp::Not, Constant::Boolean(true)).unwrap();
        assert_eq!(result, Constant::Boolean(false));
    }

    #[test]
    fn test_not_integer_fails() {
        let result = apply_unary(UnaryOp::Not, Constant::Integer(0));
        assert!(matches!(
            result.unwrap_err(),
            EnableInfoError::TypeMismatch {
                op: "!",
                got: "Integer",
                ..
            }
        ));
    }

    #[test]
    fn test_neg_integer() {
        let result = apply_unary(UnaryOp::Negate, Constant::Integer(42)).unwrap();
        assert_eq!(result, Constant::Integer(-42));
    }

    #[test]
    fn test_neg_wraps_at_min() {
        let result = apply_unary(UnaryOp::Negate, Constant::Integer(i32::MIN)).unwrap();
        assert_eq!(result, Constant::Integer(i32::MIN));
    }

    #[test]
    fn test_neg_bool_fails() {
        let result = apply_unary(UnaryOp::Negate, Constant::Boolean(true));
        assert!(matches!(
            result.unwrap_err(),
            EnableInfoError::TypeMismatch { op: "-", .. }
        ));
    }

    #[test]
    fn test_plus_is_identity_on_integers() {
        let result = apply_unary(UnaryOp::UnaryPlus, Constant::Integer(-5)).unwrap();
        assert_eq!(result, Constant::Integer(-5));
        assert!(apply_unary(UnaryOp::UnaryPlus, Constant::string("5")).is_err());
    }

    #[test]
    fn test_undefined_propagates() {
        let undefined = Constant::UndefinedVariable("PSHOP_X".into());
        for op in [UnaryOp::Not, UnaryOp::Negate, UnaryOp::UnaryPlus] {
            assert_eq!(apply_unary(op, undefined.clone()).unwrap(), undefined);
        }
    }
}
