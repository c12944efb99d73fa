//! The total order used to sort the operands of sums and products.
//!
//! Before two expressions are compared, a leading numeric factor is split off each one: `3*x`
//! becomes the factor `3` and the core `x`, and `-x` becomes the factor `-1` and the core `x`.
//! The cores are compared first, first by their [`Kind`] and then by their contents, and the
//! factors only break ties between equal cores. This places `x`, `-x` and `3*x` next to each
//! other, ordered by coefficient. The same goes for quotients, where `2x / y` has the factor `2`
//! and the same core as `x / y`.
//!
//! Contents are compared recursively, so two expressions compare [`Ordering::Equal`] only if
//! they are structurally identical.

use crate::expr::{BinaryOp, Expr, Kind, Node, UnaryOp, VariadicOp};
use rug::Rational;
use std::cmp::Ordering;

/// The symbolic part of an expression, with its numeric factor removed.
#[derive(Debug, Clone, Copy)]
pub enum Core<'a> {
    /// A single expression that is not a product or a quotient.
    Single(&'a Expr),

    /// The factors of a product, excluding its numeric coefficient. There are always at least
    /// two.
    Product(&'a [Expr]),

    /// A quotient whose numerator has its numeric coefficient removed. The numerator factors
    /// are empty if the numerator was a number, as in `2 / y`.
    Quotient(&'a [Expr], &'a Expr),
}

impl<'a> Core<'a> {
    /// Returns the kind used to rank the core.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Single(expr) => expr.kind(),
            Self::Product(_) => Kind::Multiplication,
            Self::Quotient(_, _) => Kind::Division,
        }
    }

    /// Returns the factors of the core, or the numerator factors of a quotient.
    pub fn factors(&self) -> &'a [Expr] {
        match self {
            Self::Single(expr) => std::slice::from_ref(*expr),
            Self::Product(factors) | Self::Quotient(factors, _) => factors,
        }
    }
}

/// Two cores are equal if they have the same factors, and the same denominator if they are
/// quotients.
impl PartialEq for Core<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Quotient(a, a_denom), Self::Quotient(b, b_denom)) => a == b && a_denom == b_denom,
            (Self::Quotient(_, _), _) | (_, Self::Quotient(_, _)) => false,
            _ => self.factors() == other.factors(),
        }
    }
}

/// Splits the coefficient off a list of factors.
fn split_coefficient(factors: &[Expr]) -> (Rational, &[Expr]) {
    match factors.split_first() {
        Some((first, rest)) => match first.as_number() {
            Some(coefficient) => (coefficient.clone(), rest),
            None => (Rational::from(1), factors),
        },
        None => (Rational::from(1), factors),
    }
}

/// Splits an expression into its numeric factor and its core.
///
/// The coefficient of a quotient's numerator is its factor, so `2x / y` splits into `2` and
/// `x / y`.
pub fn split_factor(expr: &Expr) -> (Rational, Core<'_>) {
    match expr.node() {
        Node::Unary(UnaryOp::Negate, inner) => {
            let (factor, core) = split_factor(inner);
            (-factor, core)
        },
        Node::Variadic(VariadicOp::Multiply, operands) => match split_coefficient(operands) {
            (coefficient, [single]) => (coefficient, Core::Single(single)),
            (coefficient, rest) => (coefficient, Core::Product(rest)),
        },
        Node::Binary(BinaryOp::Divide, [numerator, denominator]) => {
            let (coefficient, rest) = match numerator.node() {
                Node::Number(value) => (value.clone(), &[][..]),
                Node::Variadic(VariadicOp::Multiply, operands) => split_coefficient(operands),
                _ => (Rational::from(1), std::slice::from_ref(numerator)),
            };
            (coefficient, Core::Quotient(rest, denominator))
        },
        _ => (Rational::from(1), Core::Single(expr)),
    }
}

/// Compares two expressions.
pub fn compare(a: &Expr, b: &Expr) -> Ordering {
    if a.ptr_eq(b) {
        return Ordering::Equal;
    }

    let (factor_a, core_a) = split_factor(a);
    let (factor_b, core_b) = split_factor(b);
    compare_cores(core_a, core_b).then_with(|| factor_a.cmp(&factor_b))
}

/// Compares two cores by kind, then by contents.
fn compare_cores(a: Core<'_>, b: Core<'_>) -> Ordering {
    match a.kind().cmp(&b.kind()) {
        Ordering::Equal => (),
        ord => return ord,
    }

    match (a, b) {
        (Core::Single(a), Core::Single(b)) => compare_contents(a, b),
        (Core::Quotient(a, a_denom), Core::Quotient(b, b_denom)) => {
            compare_slices(a, b).then_with(|| compare(a_denom, b_denom))
        },
        (a, b) => compare_slices(a.factors(), b.factors()),
    }
}

/// Compares two expressions of the same kind by their contents.
fn compare_contents(a: &Expr, b: &Expr) -> Ordering {
    match (a.node(), b.node()) {
        (Node::Number(a), Node::Number(b)) => a.cmp(b),
        (Node::Constant(a), Node::Constant(b)) => a.sort_order().cmp(&b.sort_order()),
        (Node::Variable(a), Node::Variable(b)) => a.as_bytes().cmp(b.as_bytes()),
        (Node::Unary(op_a, a), Node::Unary(op_b, b)) => unary_rank(*op_a)
            .cmp(&unary_rank(*op_b))
            .then_with(|| compare(a, b)),
        (Node::Binary(_, a), Node::Binary(_, b)) => compare_slices(a, b),
        (Node::Variadic(_, a), Node::Variadic(_, b)) => compare_slices(a, b),

        // unreachable if the kinds are equal
        _ => Ordering::Equal,
    }
}

/// Orders the unary operators that share a [`Kind`]: negation, then absolute value, then roots
/// by increasing degree.
fn unary_rank(op: UnaryOp) -> (u8, u64) {
    match op {
        UnaryOp::Negate => (0, 0),
        UnaryOp::Abs => (1, 0),
        UnaryOp::Root(degree) => (2, degree),
    }
}

/// Compares two lists of expressions element by element, then by length.
fn compare_slices(a: &[Expr], b: &[Expr]) -> Ordering {
    for (a, b) in a.iter().zip(b.iter()) {
        match compare(a, b) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    a.len().cmp(&b.len())
}

/// Sorts expressions in place. The sort is stable.
pub fn sort(exprs: &mut [Expr]) {
    exprs.sort_by(compare);
}
