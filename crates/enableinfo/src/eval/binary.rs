//! Binary operation evaluation

use crate::ast::{BinaryOp, Constant, Expression};
use crate::error::{EnableInfoError, Result};
use crate::variables::EnableInfoVariables;

use super::{eq_ignore_case, Evaluate};

/// Evaluate an arithmetic, equality or relational node.
///
/// Both operands are always evaluated, left first.
pub fn eval_binary(
    op: BinaryOp,
    left: &Expression,
    right: &Expression,
    vars: &EnableInfoVariables,
) -> Result<Constant> {
    let left = left.eval(vars)?;
    let right = right.eval(vars)?;
    apply_binary(op, left, right)
}

/// Apply a binary operator to already reduced operands.
pub(crate) fn apply_binary(op: BinaryOp, left: Constant, right: Constant) -> Result<Constant> {
    // An undefined operand wins over any type check
    if left.is_undefined() {
        return Ok(left);
    }
    if right.is_undefined() {
        return Ok(right);
    }

    match op {
        BinaryOp::Equal => Ok(Constant::Boolean(constants_equal(&left, &right))),
        BinaryOp::NotEqual => Ok(Constant::Boolean(!constants_equal(&left, &right))),
        BinaryOp::Add => arithmetic(op, &left, &right, |a, b| Ok(a.wrapping_add(b))),
        BinaryOp::Subtract => arithmetic(op, &left, &right, |a, b| Ok(a.wrapping_sub(b))),
        BinaryOp::Multiply => arithmetic(op, &left, &right, |a, b| Ok(a.wrapping_mul(b))),
        BinaryOp::Divide => arithmetic(op, &left, &right, divide),
        BinaryOp::Greater => relational(op, &left, &right, |a, b| a > b),
        BinaryOp::GreaterEqual => relational(op, &left, &right, |a, b| a >= b),
        BinaryOp::Less => relational(op, &left, &right, |a, b| a < b),
        BinaryOp::LessEqual => relational(op, &left, &right, |a, b| a <= b),
    }
}

/// Equality across kinds: different kinds are never equal.
fn constants_equal(left: &Constant, right: &Constant) -> bool {
    match (left, right) {
        (Constant::Boolean(a), Constant::Boolean(b)) => a == b,
        (Constant::Integer(a), Constant::Integer(b)) => a == b,
        (Constant::String(a), Constant::String(b)) => eq_ignore_case(a, b),
        _ => false,
    }
}

fn integer_operands(op: BinaryOp, left: &Constant, right: &Constant) -> Result<(i32, i32)> {
    match (left, right) {
        (Constant::Integer(a), Constant::Integer(b)) => Ok((*a, *b)),
        (Constant::Integer(_), other) | (other, _) => Err(EnableInfoError::type_mismatch(
            op.symbol(),
            "Integer",
            other,
        )),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Integer Operations
// ═══════════════════════════════════════════════════════════════════════

fn arithmetic(
    op: BinaryOp,
    left: &Constant,
    right: &Constant,
    f: fn(i32, i32) -> Result<i32>,
) -> Result<Constant> {
    let (a, b) = integer_operands(op, left, right)?;
    Ok(Constant::Integer(f(a, b)?))
}

fn relational(
    op: BinaryOp,
    left: &Constant,
    right: &Constant,
    f: fn(i32, i32) -> bool,
) -> Result<Constant> {
    let (a, b) = integer_operands(op, left, right)?;
    Ok(Constant::Boolean(f(a, b)))
}

fn divide(a: i32, b: i32) -> Result<i32> {
    if b == 0 {
        return Err(EnableInfoError::DivisionByZero);
    }
    Ok(a.wrapping_div(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i32) -> Constant {
        Constant::Integer(n)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(apply_binary(BinaryOp::Add, int(2), int(3)).unwrap(), int(5));
        assert_eq!(apply_binary(BinaryOp::Subtract, int(2), int(3)).unwrap(), int(-1));
        assert_eq!(apply_binary(BinaryOp::Multiply, int(4), int(3)).unwrap(), int(12));
        assert_eq!(apply_binary(BinaryOp::Divide, int(7), int(2)).unwrap(), int(3));
        assert_eq!(apply_binary(BinaryOp::Divide, int(-7), int(2)).unwrap(), int(-3));
    }

    #[test]
    fn test_arithmetic_wraps() {
        assert_eq!(
            apply_binary(BinaryOp::Add, int(i32::MAX), int(1)).unwrap(),
            int(i32::MIN)
        );
        assert_eq!(
            apply_binary(BinaryOp::Multiply, int(i32::MAX), int(2)).unwrap(),
            int(-2)
        );
        assert_eq!(
            apply_binary(BinaryOp::Divide, int(i32::MIN), int(-1)).unwrap(),
            int(i32::MIN)
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            apply_binary(BinaryOp::Divide, int(1), int(0)).unwrap_err(),
            EnableInfoError::DivisionByZero
        );
    }

    #[test]
    fn test_relational() {
        assert_eq!(
            apply_binary(BinaryOp::Greater, int(2), int(1)).unwrap(),
            Constant::Boolean(true)
        );
        assert_eq!(
            apply_binary(BinaryOp::GreaterEqual, int(2), int(2)).unwrap(),
            Constant::Boolean(true)
        );
        assert_eq!(
            apply_binary(BinaryOp::Less, int(2), int(2)).unwrap(),
            Constant::Boolean(false)
        );
        assert_eq!(
            apply_binary(BinaryOp::LessEqual, int(1), int(2)).unwrap(),
            Constant::Boolean(true)
        );
    }

    #[test]
    fn test_arithmetic_type_mismatch_reports_offender() {
        let err = apply_binary(BinaryOp::Add, int(1), Constant::string("a")).unwrap_err();
        assert_eq!(
            err,
            EnableInfoError::TypeMismatch {
                op: "+",
                expected: "Integer",
                got: "String"
            }
        );
        let err = apply_binary(BinaryOp::Less, Constant::Boolean(true), int(1)).unwrap_err();
        assert_eq!(
            err,
            EnableInfoError::TypeMismatch {
                op: "<",
                expected: "Integer",
                got: "Boolean"
            }
        );
    }

    #[test]
    fn test_equality_same_kind() {
        assert_eq!(
            apply_binary(BinaryOp::Equal, int(3), int(3)).unwrap(),
            Constant::Boolean(true)
        );
        assert_eq!(
            apply_binary(BinaryOp::Equal, Constant::Boolean(false), Constant::Boolean(false))
                .unwrap(),
            Constant::Boolean(true)
        );
        assert_eq!(
            apply_binary(
                BinaryOp::Equal,
                Constant::string("RGBMode"),
                Constant::string("rgbMODE")
            )
            .unwrap(),
            Constant::Boolean(true)
        );
        assert_eq!(
            apply_binary(BinaryOp::NotEqual, int(3), int(4)).unwrap(),
            Constant::Boolean(true)
        );
    }

    #[test]
    fn test_equality_never_requires_integers() {
        assert_eq!(
            apply_binary(BinaryOp::NotEqual, Constant::string("a"), Constant::string("A")).unwrap(),
            Constant::Boolean(false)
        );
        assert_eq!(
            apply_binary(BinaryOp::Equal, Constant::Boolean(true), Constant::string("x")).unwrap(),
            Constant::Boolean(false)
        );
    }

    #[test]
    fn test_equality_mixed_kinds_is_unequal() {
        assert_eq!(
            apply_binary(BinaryOp::Equal, int(1), Constant::Boolean(true)).unwrap(),
            Constant::Boolean(false)
        );
        assert_eq!(
            apply_binary(BinaryOp::NotEqual, Constant::string("1"), int(1)).unwrap(),
            Constant::Boolean(true)
        );
    }

    #[test]
    fn test_undefined_propagates_before_type_checks() {
        let undefined = Constant::UndefinedVariable("PSHOP_X".into());
        assert_eq!(
            apply_binary(BinaryOp::Add, undefined.clone(), Constant::string("a")).unwrap(),
            undefined
        );
        assert_eq!(
            apply_binary(BinaryOp::Equal, int(1), undefined.clone()).unwrap(),
            undefined
        );
        assert_eq!(
            apply_binary(BinaryOp::Divide, int(1), undefined.clone()).unwrap(),
            undefined
        );
    }

    #[test]
    fn test_left_undefined_wins() {
        let a = Constant::UndefinedVariable("A".into());
        let b = Constant::UndefinedVariable("B".into());
        assert_eq!(apply_binary(BinaryOp::Less, a.clone(), b).unwrap(), a);
    }
}
