//! The product and quotient constructors.
//!
//! Both are built by the same accumulator, [`Product`]. Every operand is broken down into a
//! numeric coefficient and a list of `base^exponent` factors, where dividing by an operand
//! negates the exponents of its factors. Factors with the same base are merged by adding their
//! exponents, and the result is put back together as:
//!
//! - a single factor, or a [`VariadicOp::Multiply`] node with the coefficient first, if no
//!   exponent is negative, or
//! - a [`BinaryOp::Divide`] node with the factors with negative exponents in the denominator,
//!
//! wrapped in a negation if the coefficient is negative.

use cas_error::Error;
use crate::consts::ZERO;
use crate::error::DivisionByZero;
use crate::expr::{BinaryOp, Expr, Node, UnaryOp, VariadicOp};
use crate::number;
use crate::ordering;
use crate::simplify::{record, step::Step, MAX_PASSES};
use crate::step_collector::StepCollector;
use rug::{ops::NegAssign, Rational};
use super::{negate, power, sum};

/// A factor of a product, `base^exponent`.
#[derive(Debug)]
struct Factor {
    base: Expr,
    exponent: Expr,

    /// The canonical form of `base^|exponent|`, if it is up to date with `exponent`.
    built: Option<Expr>,
}

/// Splits an exponent into its sign and magnitude. The sign is negative if the exponent is a
/// negative number or a negation.
fn split_sign(exponent: &Expr) -> (bool, Expr) {
    if let Some(value) = exponent.as_number() {
        if value.cmp0().is_lt() {
            return (true, Expr::number(Rational::from(-value)));
        }
    }

    match exponent.as_negation() {
        Some(inner) => (true, inner.clone()),
        None => (false, exponent.clone()),
    }
}

/// Returns true if the expression can be stored as a single factor.
fn is_factor(expr: &Expr) -> bool {
    !matches!(
        expr.node(),
        Node::Number(_)
            | Node::Unary(UnaryOp::Negate, _)
            | Node::Binary(BinaryOp::Divide, _)
            | Node::Variadic(VariadicOp::Multiply, _)
    )
}

/// Returns the base the expression has when viewed as a factor.
fn factor_base(expr: &Expr) -> &Expr {
    match expr.node() {
        Node::Binary(BinaryOp::Power, [base, _]) => base,
        _ => expr,
    }
}

/// Puts a positive coefficient and sorted factors together into a product.
fn assemble(coefficient: Rational, mut factors: Vec<Expr>) -> Expr {
    if factors.is_empty() {
        return Expr::number(coefficient);
    }

    if coefficient != 1 {
        factors.insert(0, Expr::number(coefficient));
    } else if factors.len() == 1 {
        return factors.remove(0);
    }

    Expr::from_node(Node::Variadic(VariadicOp::Multiply, factors))
}

/// Accumulates the operands of a product or quotient.
#[derive(Debug)]
struct Product {
    coefficient: Rational,
    factors: Vec<Factor>,
    zero: bool,
}

impl Product {
    fn new() -> Self {
        Self {
            coefficient: Rational::from(1),
            factors: Vec::new(),
            zero: false,
        }
    }

    /// Multiplies the product by `expr`, or divides it by `expr` if `invert` is true.
    fn push(&mut self, expr: &Expr, invert: bool, step_collector: &mut dyn StepCollector<Step>) {
        match expr.node() {
            Node::Number(value) => {
                if value.cmp0().is_eq() {
                    // divisors are never zero
                    debug_assert!(!invert);
                    self.zero = true;
                    return;
                }

                if self.coefficient != 1 {
                    record(step_collector, Step::MultiplyNumbers);
                }
                if invert {
                    self.coefficient /= value;
                } else {
                    self.coefficient *= value;
                }
            },
            Node::Unary(UnaryOp::Negate, inner) => {
                self.coefficient.neg_assign();
                self.push(inner, invert, step_collector);
            },
            Node::Binary(BinaryOp::Divide, [numerator, denominator]) => {
                record(step_collector, Step::FlattenProduct);
                self.push(numerator, invert, step_collector);
                self.push(denominator, !invert, step_collector);
            },
            Node::Variadic(VariadicOp::Multiply, factors) => {
                record(step_collector, Step::FlattenProduct);
                for factor in factors {
                    self.push(factor, invert, step_collector);
                }
            },
            Node::Binary(BinaryOp::Power, [base, exponent]) => {
                let exponent = if invert {
                    negate::negate(exponent, step_collector)
                } else {
                    exponent.clone()
                };
                self.insert(base, exponent, expr, step_collector);
            },
            _ => {
                let exponent = Expr::integer(if invert { -1 } else { 1 });
                self.insert(expr, exponent, expr, step_collector);
            },
        }
    }

    /// Adds the factor `base^exponent`, where `built` is the canonical form of
    /// `base^|exponent|`.
    fn insert(
        &mut self,
        base: &Expr,
        exponent: Expr,
        built: &Expr,
        step_collector: &mut dyn StepCollector<Step>,
    ) {
        match self.factors.iter_mut().find(|factor| factor.base == *base) {
            Some(factor) => {
                factor.exponent = sum::add(&[factor.exponent.clone(), exponent], step_collector);
                factor.built = None;
                record(step_collector, Step::CombineLikeFactors);
            },
            None => self.factors.push(Factor {
                base: base.clone(),
                exponent,
                built: Some(built.clone()),
            }),
        }
    }

    /// Rebuilds the factors whose exponent changed.
    ///
    /// Factors whose exponent became zero are removed. Rebuilt factors that are no longer a
    /// power of their original base (`root(a, 2)^2` becomes `a`, for example) are removed and
    /// returned with their sign, so that they can be pushed back into the product.
    fn settle(&mut self, step_collector: &mut dyn StepCollector<Step>) -> Vec<(Expr, bool)> {
        let mut unsettled = Vec::new();
        for mut factor in std::mem::take(&mut self.factors) {
            if factor.built.is_some() {
                self.factors.push(factor);
                continue;
            }
            if factor.exponent.is_zero() {
                continue;
            }

            let (invert, magnitude) = split_sign(&factor.exponent);
            let raised = power::raise(&factor.base, &magnitude, step_collector);
            if is_factor(&raised) && *factor_base(&raised) == factor.base {
                factor.built = Some(raised);
                self.factors.push(factor);
            } else {
                unsettled.push((raised, invert));
            }
        }
        unsettled
    }

    /// Moves the powers of an integer base out of the coefficient and into the exponent of the
    /// factor with that base, so that `8 * 2^t` becomes `2^(3 + t)`.
    ///
    /// Returns true if any exponent changed.
    fn fold_coefficient(&mut self, step_collector: &mut dyn StepCollector<Step>) -> bool {
        let mut changed = false;
        for factor in &mut self.factors {
            let base = match factor.base.as_integer() {
                Some(base) if *base >= 2 => base,
                _ => continue,
            };

            let (up, numer) = number::multiplicity(self.coefficient.numer(), base);
            let (down, denom) = number::multiplicity(self.coefficient.denom(), base);
            if up == down {
                continue;
            }

            self.coefficient = Rational::from((numer, denom));
            let shift = Expr::integer(i64::from(up) - i64::from(down));
            factor.exponent = sum::add(&[shift, factor.exponent.clone()], step_collector);
            factor.built = None;
            changed = true;
            record(step_collector, Step::FoldCoefficient);
        }
        changed
    }

    /// Settles the factors, then puts the product back together.
    fn finish(mut self, step_collector: &mut dyn StepCollector<Step>) -> Expr {
        let mut passes = 0;
        loop {
            let unsettled = self.settle(step_collector);
            let rebuilt = !unsettled.is_empty();
            for (expr, invert) in unsettled {
                self.push(&expr, invert, step_collector);
            }
            if self.zero {
                record(step_collector, Step::MultiplyZero);
                return ZERO.clone();
            }

            let folded = self.fold_coefficient(step_collector);
            if !rebuilt && !folded {
                break;
            }

            passes += 1;
            if passes >= MAX_PASSES {
                tracing::warn!(passes, "product did not settle, leaving remaining factors as they are");
                break;
            }
        }

        let negative = self.coefficient.cmp0().is_lt();
        if negative {
            self.coefficient.neg_assign();
        }

        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for factor in self.factors {
            let (invert, magnitude) = split_sign(&factor.exponent);
            if magnitude.is_zero() {
                continue;
            }

            let built = match factor.built {
                Some(built) => built,
                None => power::raise(&factor.base, &magnitude, step_collector),
            };
            if invert {
                denominator.push(built);
            } else {
                numerator.push(built);
            }
        }
        ordering::sort(&mut numerator);
        ordering::sort(&mut denominator);

        let numerator = assemble(self.coefficient, numerator);
        let result = if denominator.is_empty() {
            numerator
        } else {
            let denominator = assemble(Rational::from(1), denominator);
            Expr::from_node(Node::Binary(BinaryOp::Divide, [numerator, denominator]))
        };

        if negative {
            negate::negate(&result, step_collector)
        } else {
            result
        }
    }
}

/// Returns the product of the given factors.
///
/// Returns zero as soon as a factor is zero, and one if there are no factors. A single factor
/// is returned as is.
pub fn multiply(factors: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let mut product = Product::new();
    for factor in factors {
        product.push(factor, false, step_collector);
        if product.zero {
            record(step_collector, Step::MultiplyZero);
            return ZERO.clone();
        }
    }

    product.finish(step_collector)
}

/// Returns `numerator / denominator`, for a denominator that is known to be non-zero.
pub(crate) fn quotient(
    numerator: &Expr,
    denominator: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    debug_assert!(!denominator.is_zero());
    let mut product = Product::new();
    product.push(numerator, false, step_collector);
    if product.zero {
        record(step_collector, Step::MultiplyZero);
        return ZERO.clone();
    }

    product.push(denominator, true, step_collector);
    product.finish(step_collector)
}

/// Returns `numerator / denominator`, failing with [`DivisionByZero`] if the denominator is
/// zero.
pub fn divide(
    numerator: &Expr,
    denominator: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    if denominator.is_zero() {
        return Err(Error::from_kind(DivisionByZero));
    }

    if let (Some(a), Some(b)) = (numerator.as_number(), denominator.as_number()) {
        let value = number::divide(a, b)?;
        record(step_collector, Step::DivideNumbers);
        return Ok(Expr::number(value));
    }

    Ok(quotient(numerator, denominator, step_collector))
}
