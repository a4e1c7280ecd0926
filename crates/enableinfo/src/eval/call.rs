//! Built-in function evaluation
//!
//! The function set is fixed. Arity and argument kinds are checked here,
//! and bad ones degrade to a default result instead of an error. Only an
//! unknown function name is an error.

use crate::ast::{Builtin, Constant, Expression};
use crate::error::{EnableInfoError, Result};
use crate::variables::EnableInfoVariables;

use super::{eq_ignore_case, Evaluate};

/// Evaluate a call node.
pub fn eval_call(
    name: &str,
    args: &[Expression],
    vars: &EnableInfoVariables,
) -> Result<Constant> {
    let builtin = Builtin::from_name(name).ok_or_else(|| EnableInfoError::UnknownFunction {
        name: name.to_string(),
    })?;

    match builtin {
        Builtin::In => builtin_in(args, vars),
        Builtin::Min => builtin_extremum(args, vars, std::cmp::min),
        Builtin::Max => builtin_extremum(args, vars, std::cmp::max),
        Builtin::Dim => builtin_dim(args, vars),
    }
}

/// `in(x, a, b, ...)`: true if any later argument of the same kind equals `x`.
///
/// Arguments are evaluated left to right and evaluation stops at the
/// first match.
fn builtin_in(args: &[Expression], vars: &EnableInfoVariables) -> Result<Constant> {
    let (needle, candidates) = match args {
        [needle, candidates @ ..] if !candidates.is_empty() => (needle.eval(vars)?, candidates),
        _ => return Ok(Constant::Boolean(false)),
    };

    if !matches!(
        needle,
        Constant::Boolean(_) | Constant::Integer(_) | Constant::String(_)
    ) {
        return Ok(Constant::Boolean(false));
    }

    for candidate in candidates {
        let matched = match (&needle, candidate.eval(vars)?) {
            (Constant::String(a), Constant::String(b)) => eq_ignore_case(a, &b),
            (Constant::Integer(a), Constant::Integer(b)) => *a == b,
            (Constant::Boolean(a), Constant::Boolean(b)) => *a == b,
            _ => false,
        };
        if matched {
            return Ok(Constant::Boolean(true));
        }
    }
    Ok(Constant::Boolean(false))
}

/// `min(...)` / `max(...)`.
///
/// The first two arguments must be integers or the result is `0`; later
/// non-integer arguments are skipped.
fn builtin_extremum(
    args: &[Expression],
    vars: &EnableInfoVariables,
    pick: fn(i32, i32) -> i32,
) -> Result<Constant> {
    let [first, second, rest @ ..] = args else {
        return Ok(Constant::Integer(0));
    };

    let (a, b) = match (first.eval(vars)?, second.eval(vars)?) {
        (Constant::Integer(a), Constant::Integer(b)) => (a, b),
        _ => return Ok(Constant::Integer(0)),
    };

    let mut acc = pick(a, b);
    for arg in rest {
        if let Constant::Integer(n) = arg.eval(vars)? {
            acc = pick(acc, n);
        }
    }
    Ok(Constant::Integer(acc))
}

/// `dim(a, b)` = `a && !b`.
///
/// Vendor documentation never defined this function; the semantics match
/// what Photoshop does with it.
fn builtin_dim(args: &[Expression], vars: &EnableInfoVariables) -> Result<Constant> {
    let [first, second] = args else {
        return Ok(Constant::Boolean(false));
    };

    match (first.eval(vars)?, second.eval(vars)?) {
        (Constant::Boolean(a), Constant::Boolean(b)) => Ok(Constant::Boolean(a && !b)),
        _ => Ok(Constant::Boolean(false)),
    }
}
