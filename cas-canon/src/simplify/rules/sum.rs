//! The sum and difference constructors.
//!
//! Terms are split into a numeric factor and a core with
//! [`split_factor`](crate::ordering::split_factor). Terms with equal cores are combined by
//! adding their factors, so that `x + 2x - 3x` cancels to zero.

use crate::consts::{ONE, ZERO};
use crate::expr::{BinaryOp, Expr, Kind, Node, UnaryOp, VariadicOp};
use crate::ordering::{self, split_factor, Core};
use crate::simplify::{record, step::Step, MAX_PASSES};
use crate::step_collector::StepCollector;
use rug::{ops::NegAssign, Rational};
use super::{negate, product};

/// A term of a sum, `factor * core`.
#[derive(Debug)]
struct Term<'a> {
    factor: Rational,
    core: Core<'a>,

    /// The expression the term came from, if the term is unchanged.
    original: Option<&'a Expr>,
}

impl Term<'_> {
    /// Builds the canonical expression for the term, or [`None`] if its factor is zero.
    fn build(self, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
        if self.factor.cmp0().is_eq() {
            return None;
        }
        if let Some(original) = self.original {
            return Some(original.clone());
        }

        let core = match self.core {
            Core::Single(expr) => expr.clone(),
            Core::Product(factors) => {
                Expr::from_node(Node::Variadic(VariadicOp::Multiply, factors.to_vec()))
            },
            Core::Quotient(factors, denominator) => {
                let numerator = match factors {
                    [] => ONE.clone(),
                    [single] => single.clone(),
                    _ => Expr::from_node(Node::Variadic(VariadicOp::Multiply, factors.to_vec())),
                };
                Expr::from_node(Node::Binary(BinaryOp::Divide, [numerator, denominator.clone()]))
            },
        };

        Some(if self.factor == 1 {
            core
        } else if self.factor == -1 {
            negate::negate(&core, step_collector)
        } else {
            product::multiply(&[Expr::number(self.factor), core], step_collector)
        })
    }
}

/// Accumulates the terms of a sum.
#[derive(Debug)]
struct Sum<'a> {
    constant: Rational,
    terms: Vec<Term<'a>>,
}

impl<'a> Sum<'a> {
    fn new() -> Self {
        Self {
            constant: Rational::new(),
            terms: Vec::new(),
        }
    }

    /// Adds `expr` to the sum, or subtracts it if `negated` is true.
    fn push(&mut self, expr: &'a Expr, negated: bool, step_collector: &mut dyn StepCollector<Step>) {
        match expr.node() {
            Node::Number(value) => {
                if self.constant.cmp0().is_ne() {
                    record(step_collector, Step::SumNumbers);
                }
                if negated {
                    self.constant -= value;
                } else {
                    self.constant += value;
                }
            },
            Node::Variadic(VariadicOp::Add, terms) => {
                record(step_collector, Step::FlattenSum);
                for term in terms {
                    self.push(term, negated, step_collector);
                }
            },
            Node::Binary(BinaryOp::Subtract, [minuend, subtrahend]) => {
                record(step_collector, Step::FlattenSum);
                self.push(minuend, negated, step_collector);
                self.push(subtrahend, !negated, step_collector);
            },
            Node::Unary(UnaryOp::Negate, inner)
                if matches!(inner.kind(), Kind::Addition | Kind::Subtraction) =>
            {
                self.push(inner, !negated, step_collector);
            },
            _ => self.insert(expr, negated, step_collector),
        }
    }

    /// Adds a term that is not a number or a sum.
    fn insert(&mut self, expr: &'a Expr, negated: bool, step_collector: &mut dyn StepCollector<Step>) {
        let (mut factor, core) = split_factor(expr);
        if negated {
            factor.neg_assign();
        }

        match self.terms.iter_mut().find(|term| term.core == core) {
            Some(term) => {
                term.factor += factor;
                term.original = None;
                record(step_collector, Step::CombineLikeTerms);
            },
            None => self.terms.push(Term {
                factor,
                core,
                original: (!negated).then_some(expr),
            }),
        }
    }

    /// Puts the sum back together.
    fn finish(self, pass: usize, step_collector: &mut dyn StepCollector<Step>) -> Expr {
        let mut reshaped = false;
        let mut nested = false;
        let mut terms = Vec::with_capacity(self.terms.len() + 1);
        for term in self.terms {
            let combined = term.original.is_none();
            let core = term.core;
            if let Some(built) = term.build(step_collector) {
                reshaped |= combined && split_factor(&built).1 != core;
                nested |= combined && is_sum(&built);
                terms.push(built);
            }
        }

        // a rebuilt term can have a new core (`2 * 2^t` is `2^(1 + t)`), which may now match
        // another term, or be a sum that must be flattened (`-(x + 1)`)
        let again = nested || (reshaped && has_like_terms(&terms));
        if again && pass >= MAX_PASSES {
            tracing::warn!(pass, "sum did not settle, leaving remaining terms as they are");
        } else if again {
            if self.constant.cmp0().is_ne() {
                terms.push(Expr::number(self.constant));
            }
            return add_pass(&terms, pass + 1, step_collector);
        }

        if self.constant.cmp0().is_ne() {
            terms.push(Expr::number(self.constant));
        }
        ordering::sort(&mut terms);

        match terms.len() {
            0 => ZERO.clone(),
            1 => terms.remove(0),
            2 => match (terms[0].as_negation(), terms[1].as_negation()) {
                (Some(subtrahend), None) => subtraction(&terms[1], subtrahend, step_collector),
                (None, Some(subtrahend)) => subtraction(&terms[0], subtrahend, step_collector),
                _ => Expr::from_node(Node::Variadic(VariadicOp::Add, terms)),
            },
            _ => Expr::from_node(Node::Variadic(VariadicOp::Add, terms)),
        }
    }
}

/// Writes a sum of two terms, one of them negated, as a subtraction.
fn subtraction(
    minuend: &Expr,
    subtrahend: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    record(step_collector, Step::Subtraction);
    Expr::from_node(Node::Binary(BinaryOp::Subtract, [minuend.clone(), subtrahend.clone()]))
}

/// Returns true if the expression is a sum or difference, possibly negated.
fn is_sum(expr: &Expr) -> bool {
    let inner = expr.as_negation().unwrap_or(expr);
    matches!(inner.kind(), Kind::Addition | Kind::Subtraction)
}

/// Returns true if two of the terms differ only by a numeric factor.
fn has_like_terms(terms: &[Expr]) -> bool {
    let cores = terms.iter().map(|term| split_factor(term).1).collect::<Vec<_>>();
    cores.iter()
        .enumerate()
        .any(|(i, core)| cores[i + 1..].iter().any(|other| other == core))
}

fn add_pass(terms: &[Expr], pass: usize, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let mut sum = Sum::new();
    for term in terms {
        sum.push(term, false, step_collector);
    }
    sum.finish(pass, step_collector)
}

/// Returns the sum of the given terms, or zero if there are none. A single term is returned as
/// is.
pub fn add(terms: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Expr {
    add_pass(terms, 0, step_collector)
}

/// Returns `minuend - subtrahend`.
pub fn subtract(
    minuend: &Expr,
    subtrahend: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let negated = negate::negate(subtrahend, step_collector);
    add(&[minuend.clone(), negated], step_collector)
}

#[cfg(test)]
mod tests {
    use crate::consts::Constant;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn flattens_every_grouping() {
        let [w, x, y, z] = ["w", "x", "y", "z"].map(Expr::variable);
        let expected = Expr::from_node(Node::Variadic(
            VariadicOp::Add,
            vec![w.clone(), x.clone(), y.clone(), z.clone()],
        ));

        let groupings = [
            &(&(&w + &x) + &y) + &z,
            &(&w + &x) + &(&y + &z),
            &w + &(&x + &(&y + &z)),
            &(&w + &(&x + &y)) + &z,
            &w + &(&(&x + &y) + &z),
            &(&z + &y) + &(&x + &w),
        ];
        for sum in groupings {
            assert_eq!(sum, expected);
        }
    }

    #[test]
    fn numbers_first() {
        let t = Expr::variable("t");
        let a = &t + 99;
        let b = 99 + &t;
        assert_eq!(a, b);
        assert_eq!(a.operands()[0], Expr::integer(99));
    }

    #[test]
    fn mixed_kinds_sort() {
        let t = Expr::variable("t");
        let pi = Expr::constant(Constant::Pi);
        let square = t.pow(&Expr::integer(2)).unwrap();
        let sum = Expr::sum([t.clone(), pi.clone(), Expr::integer(735), square.clone()]);
        assert_eq!(
            sum.node(),
            &Node::Variadic(VariadicOp::Add, vec![Expr::integer(735), pi, t, square]),
        );
    }

    #[test]
    fn cancels_to_zero() {
        let t = Expr::variable("t");
        assert!((&t - &t).ptr_eq(&ZERO));
        assert!((&t + &-&t).ptr_eq(&ZERO));
        assert!(Expr::sum([&t + 1, -(&t + 1)]).ptr_eq(&ZERO));
        assert!((&(2 * &t) - &(&t + &t)).ptr_eq(&ZERO));
    }

    #[test]
    fn subtraction_sugar() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let difference = Expr::from_node(Node::Binary(BinaryOp::Subtract, [x.clone(), y.clone()]));
        assert_eq!(&x + &-&y, difference);
        assert_eq!(&x - &y, difference);

        let reversed = Expr::from_node(Node::Binary(BinaryOp::Subtract, [y.clone(), x.clone()]));
        assert_eq!(&-&x + &y, reversed);

        // three terms stay a sum
        assert_eq!((&(&x - &y) - 1).kind(), Kind::Addition);
    }

    #[test]
    fn like_terms() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        assert_eq!(&(&x + &x) + &x, 3 * &x);
        assert_eq!(&(3 * &x) - &(5 * &x), -(2 * &x));
        assert_eq!(&(&x * &y) + &(&y * &x), 2 * &(&x * &y));
        assert!((&(&x + &x) - &(2 * &x)).ptr_eq(&ZERO));
    }

    #[test]
    fn reshaped_terms_combine() {
        let t = Expr::variable("t");
        let power = Expr::integer(2).pow(&t).unwrap();
        let shifted = Expr::integer(2).pow(&(&t + 1)).unwrap();

        // 2^t + 2^t = 2^(1 + t), which then combines with the other 2^(1 + t)
        let sum = Expr::sum([power.clone(), power, shifted.clone()]);
        assert_eq!(sum, 2 * &shifted);
    }

    #[test]
    fn combined_sums_are_flattened() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let shifted = &x + 1;

        // 2(x + 1) - 3(x + 1) + y = y - x - 1
        let sum = Expr::sum([2 * &shifted, -3 * &shifted, y.clone()]);
        assert_eq!(sum, Expr::sum([y, -&x, Expr::integer(-1)]));
        assert!(sum.operands().iter().all(|term| !is_sum(term)));
    }

    #[test]
    fn quotients_combine_in_any_grouping() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let quotient = &x / &y;

        let tripled = Expr::sum([quotient.clone(), quotient.clone(), quotient.clone()]);
        assert_eq!(&(&quotient + &quotient) + &quotient, tripled);
        assert_eq!(&quotient + &(&quotient + &quotient), tripled);
        assert_eq!(tripled, &(3 * &x) / &y);

        assert_eq!(&(&quotient + &quotient) - &quotient, quotient);
        assert!((&(2 * &quotient) - &(&quotient + &quotient)).ptr_eq(&ZERO));

        // 2/y + 3/y = 5/y
        let reciprocal = 1 / &y;
        assert_eq!(&(2 * &reciprocal) + &(3 * &reciprocal), 5 / &y);
        assert_eq!(&(5 / &y) - &(6 / &y), -(1 / &y));
    }

    #[test]
    fn single_term_is_unchanged() {
        let x = Expr::variable("x");
        assert!(Expr::sum([x.clone()]).ptr_eq(&x));
        assert!((&x + 0).ptr_eq(&x));
        assert!(Expr::sum([]).ptr_eq(&ZERO));
    }
}
