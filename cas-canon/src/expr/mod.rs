//! The canonical expression type, [`Expr`].
//!
//! An [`Expr`] is a cheap, clonable handle to an immutable [`Node`]. Cloning a handle never
//! copies the tree it points to, and rewrite rules that leave an expression unchanged hand back
//! the same handle, which can be observed with [`Expr::ptr_eq`].
//!
//! # Canonical form
//!
//! Handles are only ever created by the constructors on [`Expr`] (or by canonicalizing a
//! [`RawExpr`](crate::RawExpr)), so every [`Expr`] in existence satisfies these properties:
//!
//! - A [`VariadicOp::Add`] or [`VariadicOp::Multiply`] node has at least two operands, none of
//!   which is a node of the same operation, and the operands are sorted with
//!   [`compare`](crate::ordering::compare).
//! - A sum contains at most one number, and no two of its terms differ only by a numeric factor.
//! - A product contains at most one number, which is its first operand and is positive and not
//!   `1`. No two of its factors share the same base. It never contains a negation or a division.
//! - [`UnaryOp::Negate`] never wraps another negation or a number.
//! - A [`BinaryOp::Power`] never has an exponent of `0` or `1`, or a negative numeric exponent.
//! - Zero is always the [`ZERO`](crate::consts::ZERO) handle, and one is always the
//!   [`ONE`](crate::consts::ONE) handle.
//!
//! Since two expressions that mean the same thing under these rules have the same tree,
//! [`PartialEq`] is plain structural equality.

mod iter;
mod ops;

use cas_error::Error;
use crate::consts::{Constant, ONE, ZERO};
use crate::number;
use crate::simplify::rules::{abs, negate, power, product, root, sum};
use iter::ExprIter;
use rug::{Integer, Rational};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::{collections::BTreeSet, fmt, hash::{Hash, Hasher}, sync::Arc};

/// The operator of a [`Node::Unary`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum UnaryOp {
    /// Additive inverse, `-a`.
    Negate,

    /// Absolute value, `|a|`.
    Abs,

    /// The principal root of the given degree. The degree is always at least 2.
    Root(u64),
}

/// The operator of a [`Node::Binary`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum BinaryOp {
    /// `a^b`
    Power,

    /// `a / b`
    Divide,

    /// `a - b`
    Subtract,
}

/// The operator of a [`Node::Variadic`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum VariadicOp {
    /// A sum of two or more terms.
    Add,

    /// A product of two or more factors.
    Multiply,
}

/// The broad category of a node, used as the first key when ordering operands.
///
/// The declaration order of the variants is their rank: numbers sort before constants, constants
/// before variables, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Number,
    Constant,
    Variable,
    Unary,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Root,
    Power,
}

/// The contents of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Node {
    /// An exact rational number.
    Number(Rational),

    /// A named constant, such as `pi`.
    Constant(Constant),

    /// A variable, identified by its name.
    Variable(String),

    /// An operator applied to a single operand.
    Unary(UnaryOp, Expr),

    /// An operator applied to two operands. The operands are the base and exponent for
    /// [`BinaryOp::Power`], the numerator and denominator for [`BinaryOp::Divide`], and the
    /// minuend and subtrahend for [`BinaryOp::Subtract`].
    Binary(BinaryOp, [Expr; 2]),

    /// An operator applied to two or more operands.
    Variadic(VariadicOp, Vec<Expr>),
}

/// A handle to a canonical expression.
///
/// See the [module-level documentation](self) for the guarantees every [`Expr`] upholds.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Expr(Arc<Node>);

impl Expr {
    /// Wraps a node without applying any rewrite rule. The node must already be canonical.
    pub(crate) fn from_node(node: Node) -> Self {
        Self(Arc::new(node))
    }

    /// Creates an integer.
    pub fn integer(value: impl Into<Integer>) -> Self {
        Self::number(Rational::from(value.into()))
    }

    /// Creates a number. Zero and one are returned as the shared [`ZERO`] and [`ONE`] handles.
    pub fn number(value: Rational) -> Self {
        if value.cmp0().is_eq() {
            ZERO.clone()
        } else if value == 1 {
            ONE.clone()
        } else {
            Self::from_node(Node::Number(value))
        }
    }

    /// Creates the reduced fraction `numerator / denominator`.
    pub fn rational(
        numerator: impl Into<Integer>,
        denominator: impl Into<Integer>,
    ) -> Result<Self, Error> {
        number::make_rational(numerator, denominator).map(Self::number)
    }

    /// Creates the exact, fully reduced number that a decimal literal like `-0.125` denotes.
    pub fn from_decimal(literal: &str) -> Result<Self, Error> {
        number::from_decimal(literal).map(Self::number)
    }

    /// Creates a variable with the given name.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::from_node(Node::Variable(name.into()))
    }

    /// Creates a named constant.
    pub fn constant(constant: Constant) -> Self {
        Self::from_node(Node::Constant(constant))
    }

    /// Returns the shared zero handle.
    pub fn zero() -> Self {
        ZERO.clone()
    }

    /// Returns the shared one handle.
    pub fn one() -> Self {
        ONE.clone()
    }

    /// Returns `-self`.
    ///
    /// Negating a negation returns the handle it wraps.
    pub fn negate(&self) -> Self {
        negate::negate(self, &mut ())
    }

    /// Returns `|self|`.
    pub fn abs(&self) -> Self {
        abs::abs(self, &mut ())
    }

    /// Returns the principal square root of `self`.
    pub fn sqrt(&self) -> Self {
        root::extract_root(self, 2, &mut ())
    }

    /// Returns the principal `degree`-th root of `self`. Fails if `degree` is less than 2.
    pub fn root(&self, degree: u64) -> Result<Self, Error> {
        root::root(self, degree, &mut ())
    }

    /// Returns `self^exponent`. Fails if `self` is zero and `exponent` is a negative number.
    pub fn pow(&self, exponent: &Self) -> Result<Self, Error> {
        power::power(self, exponent, &mut ())
    }

    /// Returns `self / divisor`. Fails if `divisor` is zero.
    pub fn divide(&self, divisor: &Self) -> Result<Self, Error> {
        product::divide(self, divisor, &mut ())
    }

    /// Returns `self - rhs`.
    pub fn subtract(&self, rhs: &Self) -> Self {
        sum::subtract(self, rhs, &mut ())
    }

    /// Returns the sum of the given terms, or zero if there are none.
    pub fn sum(terms: impl IntoIterator<Item = Self>) -> Self {
        let terms = terms.into_iter().collect::<Vec<_>>();
        sum::add(&terms, &mut ())
    }

    /// Returns the product of the given factors, or one if there are none.
    pub fn product(factors: impl IntoIterator<Item = Self>) -> Self {
        let factors = factors.into_iter().collect::<Vec<_>>();
        product::multiply(&factors, &mut ())
    }

    /// Returns the contents of the expression.
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// Returns the category of the expression.
    pub fn kind(&self) -> Kind {
        match self.node() {
            Node::Number(_) => Kind::Number,
            Node::Constant(_) => Kind::Constant,
            Node::Variable(_) => Kind::Variable,
            Node::Unary(UnaryOp::Root(_), _) => Kind::Root,
            Node::Unary(_, _) => Kind::Unary,
            Node::Binary(BinaryOp::Power, _) => Kind::Power,
            Node::Binary(BinaryOp::Divide, _) => Kind::Division,
            Node::Binary(BinaryOp::Subtract, _) => Kind::Subtraction,
            Node::Variadic(VariadicOp::Add, _) => Kind::Addition,
            Node::Variadic(VariadicOp::Multiply, _) => Kind::Multiplication,
        }
    }

    /// Returns true if both handles point to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the operands of the expression, in order. Leaves have no operands.
    pub fn operands(&self) -> &[Self] {
        match self.node() {
            Node::Number(_) | Node::Constant(_) | Node::Variable(_) => &[],
            Node::Unary(_, operand) => std::slice::from_ref(operand),
            Node::Binary(_, operands) => operands,
            Node::Variadic(_, operands) => operands,
        }
    }

    /// If the expression is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Rational> {
        match self.node() {
            Node::Number(value) => Some(value),
            _ => None,
        }
    }

    /// If the expression is an integer, returns a reference to it.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number()
            .filter(|value| number::is_integer(value))
            .map(Rational::numer)
    }

    /// If the expression is a constant, returns it.
    pub fn as_constant(&self) -> Option<Constant> {
        match self.node() {
            Node::Constant(constant) => Some(*constant),
            _ => None,
        }
    }

    /// If the expression is a variable, returns its name.
    pub fn as_variable(&self) -> Option<&str> {
        match self.node() {
            Node::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// If the expression is a negation, returns the negated expression.
    pub fn as_negation(&self) -> Option<&Self> {
        match self.node() {
            Node::Unary(UnaryOp::Negate, inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().map_or(false, |value| value.cmp0().is_eq())
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number().map_or(false, |value| *value == 1)
    }

    /// Returns true if the expression is a number less than zero.
    pub fn is_negative_number(&self) -> bool {
        self.as_number().map_or(false, |value| value.cmp0().is_lt())
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }

    /// Returns the names of the variables in the expression.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(Self::as_variable)
            .collect()
    }

    /// Returns the number of nodes in the expression tree, counting shared sub-trees once per
    /// occurrence.
    pub fn complexity(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Binding strength of the expression when printed, used to place parentheses.
    fn precedence(&self) -> u8 {
        match self.node() {
            Node::Number(value) if !number::is_integer(value) || value.cmp0().is_lt() => 2,
            Node::Number(_) | Node::Constant(_) | Node::Variable(_) => 4,
            Node::Unary(UnaryOp::Negate, _) => 2,
            Node::Unary(_, _) => 4,
            Node::Binary(BinaryOp::Power, _) => 3,
            Node::Binary(BinaryOp::Divide, _) => 2,
            Node::Binary(BinaryOp::Subtract, _) => 1,
            Node::Variadic(VariadicOp::Add, _) => 1,
            Node::Variadic(VariadicOp::Multiply, _) => 2,
        }
    }

    /// Writes the expression, wrapped in parentheses if it binds less tightly than `min`.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Handles pointing to the same node are equal without looking at the node.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Number(value) => write!(f, "{}", value),
            Node::Constant(constant) => write!(f, "{}", constant.name()),
            Node::Variable(name) => write!(f, "{}", name),
            Node::Unary(UnaryOp::Negate, operand) => {
                write!(f, "-")?;
                operand.fmt_operand(f, 3)
            },
            Node::Unary(UnaryOp::Abs, operand) => write!(f, "|{}|", operand),
            Node::Unary(UnaryOp::Root(2), operand) => write!(f, "sqrt({})", operand),
            Node::Unary(UnaryOp::Root(degree), operand) => write!(f, "root({}, {})", operand, degree),
            Node::Binary(op, [lhs, rhs]) => {
                let (symbol, lhs_min, rhs_min) = match op {
                    BinaryOp::Power => ("^", 4, 4),
                    BinaryOp::Divide => (" / ", 2, 3),
                    BinaryOp::Subtract => (" - ", 1, 2),
                };
                lhs.fmt_operand(f, lhs_min)?;
                write!(f, "{}", symbol)?;
                rhs.fmt_operand(f, rhs_min)
            },
            Node::Variadic(op, operands) => {
                let (separator, min) = match op {
                    VariadicOp::Add => (" + ", 1),
                    VariadicOp::Multiply => (" * ", 3),
                };
                let mut iter = operands.iter();
                if let Some(operand) = iter.next() {
                    operand.fmt_operand(f, min)?;
                    for operand in iter {
                        write!(f, "{}", separator)?;
                        operand.fmt_operand(f, min)?;
                    }
                }
                Ok(())
            },
        }
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::integer(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<Integer> for Expr {
    fn from(value: Integer) -> Self {
        Self::integer(value)
    }
}

impl From<Rational> for Expr {
    fn from(value: Rational) -> Self {
        Self::number(value)
    }
}

impl From<Constant> for Expr {
    fn from(constant: Constant) -> Self {
        Self::constant(constant)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn zero_and_one_are_shared() {
        assert!(Expr::integer(0).ptr_eq(&ZERO));
        assert!(Expr::rational(4, 4).unwrap().ptr_eq(&ONE));
        assert!(Expr::from_decimal("0.000").unwrap().ptr_eq(&ZERO));
        assert!(Expr::integer(7).subtract(&Expr::integer(7)).ptr_eq(&ZERO));
        assert!((Expr::integer(3) / Expr::integer(3)).ptr_eq(&ONE));
    }

    #[test]
    fn fractions_cancel() {
        let pairs = [(9, 4), (21, 99), (77, 1), (9, 12), (42, 63), (21, 12), (55, 867), (49, 32), (3, 37)];
        for (a, b) in pairs {
            let ab = Expr::rational(a, b).unwrap();
            let ba = Expr::rational(b, a).unwrap();
            assert!((&ab * &ba).ptr_eq(&ONE));
            assert!((&Expr::integer(a) / &Expr::integer(b) * Expr::integer(b) / Expr::integer(a)).ptr_eq(&ONE));
        }
    }

    #[test]
    fn fractions_reduce() {
        for (a, b, c, d) in [(1, 5, 2, 10), (1, 3, 2, 6), (1, 7, 3, 21), (-2, 4, 1, -2)] {
            assert_eq!(Expr::rational(a, b).unwrap(), Expr::rational(c, d).unwrap());
        }
        assert_eq!(Expr::integer(2) / Expr::integer(10), Expr::rational(1, 5).unwrap());
        assert_ne!(Expr::rational(1, 5).unwrap(), Expr::rational(1, 6).unwrap());
    }

    #[test]
    fn decimals() {
        let cases = [
            ("0.25", 1, 4),
            ("0.5", 1, 2),
            ("0.75", 3, 4),
            ("0.125", 1, 8),
            ("0.2", 1, 5),
            ("1.25", 5, 4),
            ("-0.04", -1, 25),
        ];
        for (literal, numerator, denominator) in cases {
            assert_eq!(Expr::from_decimal(literal).unwrap(), Expr::rational(numerator, denominator).unwrap());
        }
    }

    #[test]
    fn zero_annihilates() {
        let t = Expr::variable("t");
        assert!((0 * Expr::integer(641)).ptr_eq(&ZERO));
        assert!(Expr::product([t.clone(), Expr::zero(), t.sqrt()]).ptr_eq(&ZERO));
    }

    #[test]
    fn coefficients_fold_into_powers() {
        let t = Expr::variable("t");
        let two = Expr::integer(2);
        let three = Expr::integer(3);
        assert_eq!(8 * two.pow(&t).unwrap(), two.pow(&(&t + 3)).unwrap());
        assert_eq!(48 * two.pow(&t).unwrap(), 3 * two.pow(&(&t + 4)).unwrap());
        assert_eq!(162 * three.pow(&t).unwrap(), 2 * three.pow(&(&t + 4)).unwrap());
    }

    #[test]
    fn kinds() {
        let x = Expr::variable("x");
        assert_eq!(Expr::integer(3).kind(), Kind::Number);
        assert_eq!(Expr::constant(Constant::Pi).kind(), Kind::Constant);
        assert_eq!(x.kind(), Kind::Variable);
        assert_eq!(x.negate().kind(), Kind::Unary);
        assert_eq!(x.abs().kind(), Kind::Unary);
        assert_eq!(x.sqrt().kind(), Kind::Root);
        assert_eq!((&x + 1).kind(), Kind::Addition);
        assert_eq!((1 - &x).kind(), Kind::Subtraction);
        assert_eq!((2 * &x).kind(), Kind::Multiplication);
        assert_eq!((1 / &x).kind(), Kind::Division);
        assert_eq!(x.pow(&Expr::integer(2)).unwrap().kind(), Kind::Power);
    }

    #[test]
    fn complexity_counts_every_occurrence() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        assert_eq!(x.complexity(), 1);

        // x * y^x
        let expr = &x * &y.pow(&x).unwrap();
        assert_eq!(expr.complexity(), 5);
        assert!(expr.complexity() > (&x * &y).complexity());
    }

    #[test]
    fn variables_are_collected_once() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let expr = &(&x * &y) + &x.pow(&y).unwrap();
        assert_eq!(expr.variables().into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn display() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let pi = Expr::constant(Constant::Pi);

        assert_eq!((&x + &y).to_string(), "x + y");
        assert_eq!((&x - &y).to_string(), "x - y");
        assert_eq!((3 * &x).to_string(), "3 * x");
        assert_eq!((&x / &y).to_string(), "x / y");
        assert_eq!((&x + 1).pow(&Expr::integer(2)).unwrap().to_string(), "(1 + x)^2");
        assert_eq!((&pi * &x).negate().to_string(), "-(pi * x)");
        assert_eq!(x.root(3).unwrap().to_string(), "root(x, 3)");
        assert_eq!(Expr::rational(1, 2).unwrap().to_string(), "1/2");
    }
}
