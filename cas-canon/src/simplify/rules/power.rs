//! Rules for powers.
//!
//! After these rules run, a power never has an exponent of `0` or `1`, a negative numeric
//! exponent, a negated exponent, or a non-integer rational exponent. Those are rewritten to `1`,
//! the base, a quotient, or a root.

use cas_error::Error;
use crate::consts::{ONE, ZERO};
use crate::error::DivisionByZero;
use crate::expr::{BinaryOp, Expr, Node, UnaryOp, VariadicOp};
use crate::number;
use crate::simplify::{record, step::Step};
use crate::step_collector::StepCollector;
use rug::{Integer, Rational};
use super::{do_integer, do_power, is_even_integer, negate, product, root};

/// `a^0 = 1`
pub fn power_zero(
    _: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if exponent.is_zero() {
        record(step_collector, Step::PowerZero);
        Some(ONE.clone())
    } else {
        None
    }
}

/// `a^1 = a`
pub fn power_one(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if exponent.is_one() {
        record(step_collector, Step::PowerOne);
        Some(base.clone())
    } else {
        None
    }
}

/// `1^a = 1`
pub fn power_one_left(
    base: &Expr,
    _: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if base.is_one() {
        record(step_collector, Step::PowerOneLeft);
        Some(ONE.clone())
    } else {
        None
    }
}

/// `0^a = 0` for a positive number `a`
pub fn power_zero_left(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let positive = exponent.as_number().map_or(false, |value| value.cmp0().is_gt());
    if base.is_zero() && positive {
        record(step_collector, Step::PowerZeroLeft);
        Some(ZERO.clone())
    } else {
        None
    }
}

/// Raises a number to an integer power, if the result is not too large.
pub fn power_number(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let value = base.as_number()?;
    let result = do_integer(exponent, |n| number::pow(value, n))?;
    record(step_collector, Step::PowerNumber);
    Some(Expr::number(result))
}

/// `a^(p/q) = root(a, q)^p`
pub fn power_rational(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let value = exponent.as_number()?;
    if number::is_integer(value) {
        return None;
    }

    let degree = value.denom().to_u64()?;
    let root = root::extract_root(base, degree, step_collector);
    let power = raise(&root, &Expr::integer(value.numer().clone()), step_collector);
    record(step_collector, Step::PowerRational);
    Some(power)
}

/// `a^(-b) = 1 / a^b`
pub fn power_reciprocal(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let magnitude = match exponent.as_number() {
        // zero to a negative power is rejected by `power`
        Some(_) if base.is_zero() => return None,
        Some(value) if value.cmp0().is_lt() => Expr::number(Rational::from(-value)),
        Some(_) => return None,
        None => exponent.as_negation()?.clone(),
    };

    let denominator = raise(base, &magnitude, step_collector);
    let reciprocal = product::quotient(&ONE, &denominator, step_collector);
    record(step_collector, Step::PowerReciprocal);
    Some(reciprocal)
}

/// `root(a, n)^(nk) = a^k`
pub fn power_of_root(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let Node::Unary(UnaryOp::Root(degree), radicand) = base.node() else {
        return None;
    };
    let k = do_integer(exponent, |n| {
        let degree = Integer::from(*degree);
        n.is_divisible(&degree).then(|| Integer::from(n / &degree))
    })?;

    let power = raise(radicand, &Expr::integer(k), step_collector);
    record(step_collector, Step::PowerOfRoot);
    Some(power)
}

/// `|a|^(2n) = a^(2n)`
pub fn power_of_abs(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let Node::Unary(UnaryOp::Abs, inner) = base.node() else {
        return None;
    };
    if !is_even_integer(exponent) {
        return None;
    }

    let power = raise(inner, exponent, step_collector);
    record(step_collector, Step::PowerOfAbs);
    Some(power)
}

/// `(a^b)^n = a^(bn)` for integer `n`
pub fn power_of_power(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    exponent.as_integer()?;
    do_power(base, |inner_base, inner_exponent| {
        let exponent = product::multiply(&[inner_exponent.clone(), exponent.clone()], step_collector);
        let power = raise(inner_base, &exponent, step_collector);
        record(step_collector, Step::PowerOfPower);
        Some(power)
    })
}

/// `(a*b)^n = a^n * b^n`
/// `(a/b)^n = a^n / b^n`
/// `(-a)^n = a^n` for even `n`, or `-(a^n)` for odd `n`
///
/// Products and quotients are distributed over symbolic exponents too, so that `(a*b)^t * (a*b)`
/// and `(a*b)^(t + 1)` have the same form. Negations are only distributed over integers.
pub fn distribute_power(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let integer = exponent.as_integer();
    if integer.is_none() && exponent.as_number().is_some() {
        return None;
    }

    let distributed = match base.node() {
        Node::Variadic(VariadicOp::Multiply, factors) => {
            let factors = factors.iter()
                .map(|factor| raise(factor, exponent, step_collector))
                .collect::<Vec<_>>();
            product::multiply(&factors, step_collector)
        },
        Node::Binary(BinaryOp::Divide, [numerator, denominator]) => {
            let numerator = raise(numerator, exponent, step_collector);
            let denominator = raise(denominator, exponent, step_collector);
            product::quotient(&numerator, &denominator, step_collector)
        },
        Node::Unary(UnaryOp::Negate, inner) => {
            let n = integer?;
            let power = raise(inner, exponent, step_collector);
            if n.is_even() {
                power
            } else {
                negate::negate(&power, step_collector)
            }
        },
        _ => return None,
    };

    record(step_collector, Step::DistributePower);
    Some(distributed)
}

/// Returns `base^exponent`.
///
/// Fails with [`DivisionByZero`] if `base` is zero and `exponent` is a negative number.
pub fn power(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    if base.is_zero() && exponent.is_negative_number() {
        return Err(Error::from_kind(DivisionByZero));
    }

    Ok(raise(base, exponent, step_collector))
}

/// Returns `base^exponent`, for operands that are known not to divide by zero.
pub(crate) fn raise(
    base: &Expr,
    exponent: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    power_zero(base, exponent, step_collector)
        .or_else(|| power_one(base, exponent, step_collector))
        .or_else(|| power_one_left(base, exponent, step_collector))
        .or_else(|| power_zero_left(base, exponent, step_collector))
        .or_else(|| power_number(base, exponent, step_collector))
        .or_else(|| power_rational(base, exponent, step_collector))
        .or_else(|| power_reciprocal(base, exponent, step_collector))
        .or_else(|| power_of_root(base, exponent, step_collector))
        .or_else(|| power_of_abs(base, exponent, step_collector))
        .or_else(|| power_of_power(base, exponent, step_collector))
        .or_else(|| distribute_power(base, exponent, step_collector))
        .unwrap_or_else(|| Expr::from_node(Node::Binary(BinaryOp::Power, [base.clone(), exponent.clone()])))
}

#[cfg(test)]
mod tests {
    use crate::consts::Constant;
    use pretty_assertions::assert_eq;
    use super::*;

    fn pow(base: &Expr, exponent: impl Into<Expr>) -> Expr {
        base.pow(&exponent.into()).unwrap()
    }

    #[test]
    fn identities() {
        let t = Expr::variable("t");
        assert!(pow(&t, 0).ptr_eq(&ONE));
        assert!(pow(&t, 1).ptr_eq(&t));
        assert!(pow(&Expr::one(), t.clone()).ptr_eq(&ONE));
        assert!(pow(&Expr::zero(), 3).ptr_eq(&ZERO));
        assert!(pow(&Expr::zero(), 0).ptr_eq(&ONE));
    }

    #[test]
    fn zero_to_negative_power() {
        let err = Expr::zero().pow(&Expr::integer(-2)).unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }

    #[test]
    fn numbers() {
        assert_eq!(pow(&Expr::integer(2), 10), Expr::integer(1024));
        assert_eq!(pow(&Expr::integer(-3), 3), Expr::integer(-27));
        assert_eq!(pow(&Expr::integer(2), -2), Expr::rational(1, 4).unwrap());
        assert_eq!(pow(&Expr::integer(4), Expr::rational(3, 2).unwrap()), Expr::integer(8));
    }

    #[test]
    fn huge_numeric_powers_stay_symbolic() {
        let power = pow(&Expr::integer(3), 1_000_000);
        assert_eq!(power.operands(), &[Expr::integer(3), Expr::integer(1_000_000)]);
    }

    #[test]
    fn negative_exponents() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        assert_eq!(pow(&x, -1), &Expr::one() / &x);
        assert_eq!(pow(&x, -y.clone()), &Expr::one() / &pow(&x, y.clone()));
        assert_eq!(pow(&(&x * &y), -2), &Expr::one() / &(&pow(&x, 2) * &pow(&y, 2)));
    }

    #[test]
    fn roots_cancel() {
        let t = Expr::variable("t");
        for degree in [2, 3, 4, 5, 666, 2552, 77777777] {
            let root = t.root(degree).unwrap();
            assert!(pow(&root, degree as i64).ptr_eq(&t));
        }
        assert_eq!(pow(&t.root(3).unwrap(), 6), pow(&t, 2));
    }

    #[test]
    fn power_of_power() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        assert_eq!(pow(&pow(&x, y.clone()), 3), pow(&x, 3 * &y));
        assert_eq!(pow(&pow(&x, 2), 3), pow(&x, 6));
    }

    #[test]
    fn distributes_integer_powers() {
        let x = Expr::variable("x");
        let e = Expr::constant(Constant::E);
        assert_eq!(pow(&(2 * &x), 3), 8 * pow(&x, 3));
        assert_eq!(pow(&-x.clone(), 2), pow(&x, 2));
        assert_eq!(pow(&-x.clone(), 3), -pow(&x, 3));
        assert_eq!(pow(&(&e / &x), 2), &pow(&e, 2) / &pow(&x, 2));
    }

    #[test]
    fn distributes_symbolic_powers() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let t = Expr::variable("t");
        let xy = &x * &y;

        assert_eq!(pow(&xy, t.clone()), &pow(&x, t.clone()) * &pow(&y, t.clone()));
        assert_eq!(&pow(&xy, t.clone()) * &xy, pow(&xy, &t + 1));
        assert_eq!(&xy * &pow(&xy, t.clone()), pow(&xy, &t + 1));
        assert_eq!(pow(&(&x / &y), t.clone()), &pow(&x, t.clone()) / &pow(&y, t.clone()));

        // the sign of a negation can't be moved out of a symbolic power
        assert_eq!(pow(&-x.clone(), t.clone()).operands()[0], -x);
    }
}
