//! Short-circuit `&&` / `||` evaluation
//!
//! Both operators accept booleans only, but a non-boolean operand is not an
//! error: the whole node reduces to `false`. Plugin expressions written
//! against older hosts rely on this.

use crate::ast::{Constant, Expression, LogicalOp};
use crate::error::Result;
use crate::variables::EnableInfoVariables;

use super::Evaluate;

/// Evaluate a logical node.
pub fn eval_logical(
    op: LogicalOp,
    left: &Expression,
    right: &Expression,
    vars: &EnableInfoVariables,
) -> Result<Constant> {
    let left_val = match left.eval(vars)? {
        Constant::Boolean(b) => b,
        other => return Ok(non_boolean(op, "left", &other)),
    };

    match (op, left_val) {
        (LogicalOp::And, false) => return Ok(Constant::Boolean(false)),
        (LogicalOp::Or, true) => return Ok(Constant::Boolean(true)),
        _ => {}
    }

    match right.eval(vars)? {
        Constant::Boolean(b) => Ok(Constant::Boolean(b)),
        other => Ok(non_boolean(op, "right", &other)),
    }
}

fn non_boolean(op: LogicalOp, side: &str, value: &Constant) -> Constant {
    tracing::debug!(op = op.symbol(), side, value = ?value, "non-boolean logical operand");
    Constant::Boolean(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::error::EnableInfoError;
    use crate::variables::ImageMode;

    fn vars() -> EnableInfoVariables {
        EnableInfoVariables::new(10, 10, ImageMode::GrayScale, false, 1, 1, false, false)
    }

    fn div_by_zero() -> Expression {
        Expression::binary(
            BinaryOp::Divide,
            Expression::constant(1),
            Expression::constant(0),
        )
    }

    fn eval(op: LogicalOp, left: Expression, right: Expression) -> Result<Constant> {
        eval_logical(op, &left, &right, &vars())
    }

    #[test]
    fn test_truth_tables() {
        for a in [false, true] {
            for b in [false, true] {
                let and = eval(LogicalOp::And, Expression::constant(a), Expression::constant(b));
                let or = eval(LogicalOp::Or, Expression::constant(a), Expression::constant(b));
                assert_eq!(and.unwrap(), Constant::Boolean(a && b));
                assert_eq!(or.unwrap(), Constant::Boolean(a || b));
            }
        }
    }

    #[test]
    fn test_and_short_circuits() {
        let result = eval(LogicalOp::And, Expression::constant(false), div_by_zero());
        assert_eq!(result.unwrap(), Constant::Boolean(false));
    }

    #[test]
    fn test_or_short_circuits() {
        let result = eval(LogicalOp::Or, Expression::constant(true), div_by_zero());
        assert_eq!(result.unwrap(), Constant::Boolean(true));
    }

    #[test]
    fn test_right_side_errors_when_evaluated() {
        let result = eval(LogicalOp::And, Expression::constant(true), div_by_zero());
        assert_eq!(result.unwrap_err(), EnableInfoError::DivisionByZero);
    }

    #[test]
    fn test_non_boolean_left_is_false() {
        // Even `||` with a true right side
        let result = eval(LogicalOp::Or, Expression::constant(1), Expression::constant(true));
        assert_eq!(result.unwrap(), Constant::Boolean(false));
        let result = eval(
            LogicalOp::And,
            Expression::parameter("PSHOP_Missing"),
            Expression::constant(true),
        );
        assert_eq!(result.unwrap(), Constant::Boolean(false));
    }

    #[test]
    fn test_non_boolean_left_skips_right() {
        let result = eval(LogicalOp::And, Expression::constant("x"), div_by_zero());
        assert_eq!(result.unwrap(), Constant::Boolean(false));
    }

    #[test]
    fn test_non_boolean_right_is_false() {
        let result = eval(LogicalOp::Or, Expression::constant(false), Expression::constant(7));
        assert_eq!(result.unwrap(), Constant::Boolean(false));
        let result = eval(
            LogicalOp::And,
            Expression::constant(true),
            Expression::parameter("PSHOP_Missing"),
        );
        assert_eq!(result.unwrap(), Constant::Boolean(false));
    }
}
