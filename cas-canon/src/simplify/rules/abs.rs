//! Rules for absolute values.
//!
//! These only use facts that hold for every real value of the variables involved, such as
//! `|a^2| = a^2` or `|a*b| = |a|*|b|`.

use crate::expr::{BinaryOp, Expr, Node, UnaryOp, VariadicOp};
use crate::simplify::{record, step::Step};
use crate::step_collector::StepCollector;
use super::{is_even_integer, is_odd_integer, power, product};

/// The absolute value of a number is a number.
pub fn abs_number(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let value = expr.as_number()?;
    let abs = Expr::number(value.clone().abs());
    record(step_collector, Step::AbsNumber);
    Some(abs)
}

/// `||a|| = |a|`
/// `|c| = c` for a positive constant `c`
pub fn abs_idempotent(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match expr.node() {
        Node::Unary(UnaryOp::Abs, _) | Node::Constant(_) => {
            record(step_collector, Step::AbsIdempotent);
            Some(expr.clone())
        },
        _ => None,
    }
}

/// `|a^(2n)| = a^(2n)`
/// `|root(a, 2n)| = root(a, 2n)`
pub fn abs_non_negative(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let non_negative = match expr.node() {
        Node::Binary(BinaryOp::Power, [_, exponent]) => is_even_integer(exponent),
        Node::Unary(UnaryOp::Root(degree), _) => degree % 2 == 0,
        _ => false,
    };

    if non_negative {
        record(step_collector, Step::AbsNonNegative);
        Some(expr.clone())
    } else {
        None
    }
}

/// `|-a| = |a|`
pub fn abs_negate(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let inner = expr.as_negation()?;
    let abs = abs(inner, step_collector);
    record(step_collector, Step::AbsNegate);
    Some(abs)
}

/// `|a*b| = |a|*|b|`
/// `|a/b| = |a|/|b|`
/// `|a^(2n+1)| = |a|^(2n+1)`
pub fn abs_distribute(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let distributed = match expr.node() {
        Node::Variadic(VariadicOp::Multiply, factors) => {
            let factors = factors.iter()
                .map(|factor| abs(factor, step_collector))
                .collect::<Vec<_>>();
            product::multiply(&factors, step_collector)
        },
        Node::Binary(BinaryOp::Divide, [numerator, denominator]) => {
            let numerator = abs(numerator, step_collector);
            let denominator = abs(denominator, step_collector);
            product::quotient(&numerator, &denominator, step_collector)
        },
        Node::Binary(BinaryOp::Power, [base, exponent]) if is_odd_integer(exponent) => {
            let base = abs(base, step_collector);
            power::raise(&base, exponent, step_collector)
        },
        _ => return None,
    };

    record(step_collector, Step::AbsDistribute);
    Some(distributed)
}

/// Returns `|expr|`.
pub fn abs(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    abs_number(expr, step_collector)
        .or_else(|| abs_idempotent(expr, step_collector))
        .or_else(|| abs_non_negative(expr, step_collector))
        .or_else(|| abs_negate(expr, step_collector))
        .or_else(|| abs_distribute(expr, step_collector))
        .unwrap_or_else(|| Expr::from_node(Node::Unary(UnaryOp::Abs, expr.clone())))
}
