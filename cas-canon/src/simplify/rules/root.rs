//! Rules for roots.
//!
//! `root(a, n)` is the principal `n`-th root of `a`. Even roots of squares become absolute
//! values (`sqrt(a^2) = |a|`), since nothing is known about the sign of `a`.

use cas_error::Error;
use crate::consts::{ONE, ZERO};
use crate::error::InvalidRootDegree;
use crate::expr::{BinaryOp, Expr, Node, UnaryOp, VariadicOp};
use crate::number;
use crate::simplify::{record, step::Step};
use crate::step_collector::StepCollector;
use rug::{Integer, Rational};
use super::{abs, negate, power, product};

/// Splits a positive rational `value` into `(outside, inside)`, such that
/// `root(value, degree) = outside * root(inside, degree)`.
///
/// Returns [`None`] if nothing can be pulled out of the root.
fn split_number(value: &Rational, degree: u64) -> Option<(Rational, Rational)> {
    let degree = u32::try_from(degree).ok()?;
    let (numer_out, numer_in) = number::split_perfect_power(value.numer(), degree);
    let (denom_out, denom_in) = number::split_perfect_power(value.denom(), degree);
    if numer_out == 1 && denom_out == 1 {
        return None;
    }

    Some((
        Rational::from((numer_out, denom_out)),
        Rational::from((numer_in, denom_in)),
    ))
}

/// Wraps the radicand in a root node without applying any rule.
fn wrap(radicand: &Expr, degree: u64) -> Expr {
    Expr::from_node(Node::Unary(UnaryOp::Root(degree), radicand.clone()))
}

/// Evaluates the root of a number exactly, or pulls perfect powers out of it.
///
/// `root(0, n) = 0`, `root(1, n) = 1`, `root(-a, n) = -root(a, n)` for odd `n`, and
/// `root(a^n * b, n) = a * root(b, n)` otherwise.
pub fn root_number(
    radicand: &Expr,
    degree: u64,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let value = radicand.as_number()?;
    let result = if value.cmp0().is_eq() {
        ZERO.clone()
    } else if *value == 1 {
        ONE.clone()
    } else if value.cmp0().is_lt() {
        if degree % 2 == 0 {
            return None;
        }
        let magnitude = Expr::number(Rational::from(-value));
        let root = extract_root(&magnitude, degree, step_collector);
        negate::negate(&root, step_collector)
    } else {
        let (outside, inside) = split_number(value, degree)?;
        let inside = Expr::number(inside);
        let root = if inside.is_one() { inside } else { wrap(&inside, degree) };
        product::multiply(&[Expr::number(outside), root], step_collector)
    };

    record(step_collector, Step::RootNumber);
    Some(result)
}

/// `root(-a, n) = -root(a, n)` for odd `n`
pub fn root_of_negation(
    radicand: &Expr,
    degree: u64,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if degree % 2 == 0 {
        return None;
    }

    let inner = radicand.as_negation()?;
    let root = extract_root(inner, degree, step_collector);
    let negated = negate::negate(&root, step_collector);
    record(step_collector, Step::RootOfNegation);
    Some(negated)
}

/// `root(root(a, m), n) = root(a, mn)`
pub fn root_of_root(
    radicand: &Expr,
    degree: u64,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let Node::Unary(UnaryOp::Root(inner_degree), inner) = radicand.node() else {
        return None;
    };
    let degree = inner_degree.checked_mul(degree)?;

    let root = extract_root(inner, degree, step_collector);
    record(step_collector, Step::RootOfRoot);
    Some(root)
}

/// Pulls perfect powers out of a root of a power or a product.
///
/// `root(a^(nk + r), n) = |a|^k * root(a^r, n)` for even `n`
/// `root(a^(nk + r), n) = a^k * root(a^r, n)` for odd `n`
/// `root(c * b, n) = root(c, n) * root(b, n)` for a positive number `c`
pub fn root_of_product(
    radicand: &Expr,
    degree: u64,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let (factors, step) = match radicand.node() {
        Node::Binary(BinaryOp::Power, _) => (std::slice::from_ref(radicand), Step::RootOfPower),
        Node::Variadic(VariadicOp::Multiply, factors) => (factors.as_slice(), Step::RootOfProduct),
        _ => return None,
    };

    let degree_int = Integer::from(degree);
    let mut outside = Vec::new();
    let mut inside = Vec::new();
    for factor in factors {
        match factor.node() {
            Node::Number(value) => match split_number(value, degree) {
                Some((out, rest)) => {
                    outside.push(Expr::number(out));
                    inside.push(Expr::number(rest));
                },
                None => inside.push(factor.clone()),
            },
            Node::Binary(BinaryOp::Power, [base, exponent]) => {
                let split = exponent.as_integer()
                    .filter(|exponent| **exponent >= degree_int)
                    .map(|exponent| {
                        let (k, r) = exponent.clone().div_rem(degree_int.clone());
                        (Expr::integer(k), Expr::integer(r))
                    });
                match split {
                    Some((k, r)) => {
                        let base_out = if degree % 2 == 0 {
                            abs::abs(base, step_collector)
                        } else {
                            base.clone()
                        };
                        outside.push(power::raise(&base_out, &k, step_collector));
                        inside.push(power::raise(base, &r, step_collector));
                    },
                    None => inside.push(factor.clone()),
                }
            },
            _ => inside.push(factor.clone()),
        }
    }

    if outside.is_empty() {
        return None;
    }

    let inside = product::multiply(&inside, step_collector);
    outside.push(extract_root(&inside, degree, step_collector));
    let result = product::multiply(&outside, step_collector);
    record(step_collector, step);
    Some(result)
}

/// Returns the principal `degree`-th root of the radicand, failing with [`InvalidRootDegree`] if
/// the degree is less than 2.
pub fn root(
    radicand: &Expr,
    degree: u64,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    if degree < 2 {
        return Err(Error::from_kind(InvalidRootDegree { degree }));
    }

    Ok(extract_root(radicand, degree, step_collector))
}

/// Returns the principal `degree`-th root of the radicand. The degree must be at least 2.
pub(crate) fn extract_root(
    radicand: &Expr,
    degree: u64,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    debug_assert!(degree >= 2);
    root_number(radicand, degree, step_collector)
        .or_else(|| root_of_negation(radicand, degree, step_collector))
        .or_else(|| root_of_root(radicand, degree, step_collector))
        .or_else(|| root_of_product(radicand, degree, step_collector))
        .unwrap_or_else(|| wrap(radicand, degree))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn invalid_degree() {
        let t = Expr::variable("t");
        for degree in [0, 1] {
            let err = t.root(degree).unwrap_err();
            assert_eq!(err.downcast_ref::<InvalidRootDegree>(), Some(&InvalidRootDegree { degree }));
        }
    }

    #[test]
    fn exact_numbers() {
        assert_eq!(Expr::integer(81).sqrt(), Expr::integer(9));
        assert_eq!(Expr::integer(-27).root(3).unwrap(), Expr::integer(-3));
        assert_eq!(Expr::rational(4, 9).unwrap().sqrt(), Expr::rational(2, 3).unwrap());
        assert!(Expr::one().root(77777777).unwrap().ptr_eq(&ONE));
    }

    #[test]
    fn perfect_powers_are_pulled_out() {
        let root_two = Expr::integer(2).sqrt();
        assert_eq!(Expr::integer(8).sqrt(), 2 * &root_two);
        assert_eq!(Expr::integer(-16).root(3).unwrap(), -(2 * Expr::integer(2).root(3).unwrap()));

        // no real square root
        assert_eq!(Expr::integer(-4).sqrt().kind(), crate::Kind::Root);
    }

    #[test]
    fn square_root_of_square() {
        let t = Expr::variable("t");
        assert_eq!(t.pow(&Expr::integer(2)).unwrap().sqrt(), t.abs());
        assert_eq!((&t * &t).sqrt(), t.abs());
        assert_eq!(t.pow(&Expr::integer(3)).unwrap().root(3).unwrap(), t);
        assert_eq!(t.pow(&Expr::integer(4)).unwrap().sqrt(), &t * &t);
    }

    #[test]
    fn products() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let radicand = 4 * &x.pow(&Expr::integer(3)).unwrap() * &y;
        assert_eq!(radicand.sqrt(), 2 * &x.abs() * &(&x * &y).sqrt());
    }

    #[test]
    fn nested_roots() {
        let t = Expr::variable("t");
        assert_eq!(t.sqrt().root(3).unwrap(), t.root(6).unwrap());
        assert_eq!((-&t).root(3).unwrap(), -t.root(3).unwrap());
    }
}
