//! The constructor for each operator, and the rules it applies.
//!
//! Each rule is a function that takes the operands of the operator as arguments, and returns
//! `Some(expr)` with the canonical result if the rule applies, or `None` if it does not. A
//! constructor tries its rules in order, and wraps the operands in a new node if none applies.

pub mod abs;
pub mod negate;
pub mod power;
pub mod product;
pub mod root;
pub mod sum;

use crate::expr::{BinaryOp, Expr, Node};
use rug::Integer;

/// If the expression is a power, calls the given function with the base and exponent.
pub(crate) fn do_power<'a, T>(
    expr: &'a Expr,
    f: impl FnOnce(&'a Expr, &'a Expr) -> Option<T>,
) -> Option<T> {
    if let Node::Binary(BinaryOp::Power, [base, exponent]) = expr.node() {
        f(base, exponent)
    } else {
        None
    }
}

/// If the expression is an integer, calls the given function with it.
pub(crate) fn do_integer<T>(expr: &Expr, f: impl FnOnce(&Integer) -> Option<T>) -> Option<T> {
    expr.as_integer().and_then(f)
}

/// Returns true if the expression is an even integer.
pub(crate) fn is_even_integer(expr: &Expr) -> bool {
    expr.as_integer().map_or(false, Integer::is_even)
}

/// Returns true if the expression is an odd integer.
pub(crate) fn is_odd_integer(expr: &Expr) -> bool {
    expr.as_integer().map_or(false, Integer::is_odd)
}
