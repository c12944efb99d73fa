//! Rules for negation.

use crate::expr::{Expr, Node, UnaryOp};
use crate::simplify::{record, step::Step};
use crate::step_collector::StepCollector;
use rug::Rational;

/// `-(-a) = a`
///
/// Returns the handle that was negated, not a copy of it.
pub fn double_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let inner = expr.as_negation()?.clone();
    record(step_collector, Step::DoubleNegation);
    Some(inner)
}

/// The negation of a number is a number.
pub fn negate_number(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let value = expr.as_number()?;
    let negated = Expr::number(Rational::from(-value));
    record(step_collector, Step::NegateNumber);
    Some(negated)
}

/// Returns `-expr`.
pub fn negate(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    double_negation(expr, step_collector)
        .or_else(|| negate_number(expr, step_collector))
        .unwrap_or_else(|| Expr::from_node(Node::Unary(UnaryOp::Negate, expr.clone())))
}

#[cfg(test)]
mod tests {
    use crate::consts::ZERO;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn double_negation_is_identity() {
        let t = Expr::variable("t");
        let mut steps = Vec::new();
        let negated = negate(&t, &mut steps);
        let back = negate(&negated, &mut steps);
        assert!(back.ptr_eq(&t));
        assert_eq!(steps, vec![Step::DoubleNegation]);
    }

    #[test]
    fn numbers() {
        assert_eq!(negate(&Expr::integer(4), &mut ()), Expr::integer(-4));
        assert!(negate(&Expr::zero(), &mut ()).ptr_eq(&ZERO));
        assert!(negate(&Expr::integer(-1), &mut ()).is_one());
    }

    #[test]
    fn wraps_everything_else() {
        let x = Expr::variable("x");
        let sum = &x + 1;
        let negated = negate(&sum, &mut ());
        assert_eq!(negated.as_negation(), Some(&sum));
    }
}
