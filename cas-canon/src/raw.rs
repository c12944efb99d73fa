//! Uncanonicalized expression trees.
//!
//! A [`RawExpr`] is the shape an expression has before any rewrite rule runs, such as the tree
//! a parser produces or a document a deserializer reads. It can hold anything, including
//! divisions by zero and invalid root degrees; those are only reported when the tree is
//! canonicalized with [`RawExpr::canonicalize`].

use cas_error::Error;
use crate::consts::Constant;
use crate::expr::{BinaryOp, Expr, Node, UnaryOp, VariadicOp};
use crate::number;
use crate::simplify::rules::{abs, negate, power, product, root, sum};
use crate::simplify::step::Step;
use crate::step_collector::StepCollector;
use rug::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An expression tree that has not been canonicalized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RawExpr {
    /// An integer literal.
    Integer(Integer),

    /// A fraction `numerator / denominator`, not necessarily reduced.
    Fraction(Integer, Integer),

    /// A decimal literal, such as `-0.125`.
    Decimal(String),

    /// A named constant.
    Constant(Constant),

    /// A variable.
    Variable(String),

    /// `-a`
    Neg(Box<RawExpr>),

    /// `|a|`
    Abs(Box<RawExpr>),

    /// `root(a, n)`
    Root(Box<RawExpr>, u64),

    /// `a^b`
    Pow(Box<RawExpr>, Box<RawExpr>),

    /// `a / b`
    Div(Box<RawExpr>, Box<RawExpr>),

    /// `a - b`
    Sub(Box<RawExpr>, Box<RawExpr>),

    /// `a + b + ...`
    Add(Vec<RawExpr>),

    /// `a * b * ...`
    Mul(Vec<RawExpr>),
}

impl RawExpr {
    /// Canonicalizes the tree.
    ///
    /// Fails with the first error found in a post-order walk of the tree, for example a
    /// [`DivisionByZero`](crate::error::DivisionByZero) or an
    /// [`InvalidRootDegree`](crate::error::InvalidRootDegree).
    pub fn canonicalize(&self) -> Result<Expr, Error> {
        self.build(&mut ())
    }

    /// Canonicalizes the tree, returning the rewrite steps that fired, in order.
    pub fn canonicalize_with_steps(&self) -> Result<(Expr, Vec<Step>), Error> {
        let mut steps = Vec::new();
        let expr = self.build(&mut steps)?;
        Ok((expr, steps))
    }

    /// Collects the operands of a chain of nested [`RawExpr::Add`] or [`RawExpr::Mul`] nodes,
    /// left to right. Long chains are common in generated input, so this walks the chain with
    /// an explicit stack instead of recursing.
    fn chain(&self, is_link: fn(&Self) -> Option<&[Self]>) -> Vec<&Self> {
        let mut operands = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match is_link(expr) {
                Some(children) => stack.extend(children.iter().rev()),
                None => operands.push(expr),
            }
        }
        operands
    }

    fn build(&self, step_collector: &mut dyn StepCollector<Step>) -> Result<Expr, Error> {
        Ok(match self {
            Self::Integer(value) => Expr::integer(value.clone()),
            Self::Fraction(numerator, denominator) => {
                Expr::number(number::make_rational(numerator.clone(), denominator.clone())?)
            },
            Self::Decimal(literal) => Expr::from_decimal(literal)?,
            Self::Constant(constant) => Expr::constant(*constant),
            Self::Variable(name) => Expr::variable(name.as_str()),
            Self::Neg(inner) => {
                let inner = inner.build(step_collector)?;
                negate::negate(&inner, step_collector)
            },
            Self::Abs(inner) => {
                let inner = inner.build(step_collector)?;
                abs::abs(&inner, step_collector)
            },
            Self::Root(radicand, degree) => {
                let radicand = radicand.build(step_collector)?;
                root::root(&radicand, *degree, step_collector)?
            },
            Self::Pow(base, exponent) => {
                let base = base.build(step_collector)?;
                let exponent = exponent.build(step_collector)?;
                power::power(&base, &exponent, step_collector)?
            },
            Self::Div(numerator, denominator) => {
                let numerator = numerator.build(step_collector)?;
                let denominator = denominator.build(step_collector)?;
                product::divide(&numerator, &denominator, step_collector)?
            },
            Self::Sub(minuend, subtrahend) => {
                let minuend = minuend.build(step_collector)?;
                let subtrahend = subtrahend.build(step_collector)?;
                sum::subtract(&minuend, &subtrahend, step_collector)
            },
            Self::Add(_) => {
                let terms = self.chain(|expr| match expr {
                    Self::Add(terms) => Some(terms.as_slice()),
                    _ => None,
                })
                    .into_iter()
                    .map(|term| term.build(step_collector))
                    .collect::<Result<Vec<_>, _>>()?;
                sum::add(&terms, step_collector)
            },
            Self::Mul(_) => {
                let factors = self.chain(|expr| match expr {
                    Self::Mul(factors) => Some(factors.as_slice()),
                    _ => None,
                })
                    .into_iter()
                    .map(|factor| factor.build(step_collector))
                    .collect::<Result<Vec<_>, _>>()?;
                product::multiply(&factors, step_collector)
            },
        })
    }
}

/// Converts a canonical expression back into a raw tree with the same shape. Canonicalizing the
/// result gives back an expression equal to the original.
impl From<&Expr> for RawExpr {
    fn from(expr: &Expr) -> Self {
        let boxed = |expr: &Expr| Box::new(Self::from(expr));
        match expr.node() {
            Node::Number(value) => {
                if number::is_integer(value) {
                    Self::Integer(value.numer().clone())
                } else {
                    Self::Fraction(value.numer().clone(), value.denom().clone())
                }
            },
            Node::Constant(constant) => Self::Constant(*constant),
            Node::Variable(name) => Self::Variable(name.clone()),
            Node::Unary(UnaryOp::Negate, inner) => Self::Neg(boxed(inner)),
            Node::Unary(UnaryOp::Abs, inner) => Self::Abs(boxed(inner)),
            Node::Unary(UnaryOp::Root(degree), inner) => Self::Root(boxed(inner), *degree),
            Node::Binary(BinaryOp::Power, [base, exponent]) => Self::Pow(boxed(base), boxed(exponent)),
            Node::Binary(BinaryOp::Divide, [a, b]) => Self::Div(boxed(a), boxed(b)),
            Node::Binary(BinaryOp::Subtract, [a, b]) => Self::Sub(boxed(a), boxed(b)),
            Node::Variadic(VariadicOp::Add, terms) => Self::Add(terms.iter().map(Self::from).collect()),
            Node::Variadic(VariadicOp::Multiply, factors) => {
                Self::Mul(factors.iter().map(Self::from).collect())
            },
        }
    }
}

impl From<Expr> for RawExpr {
    fn from(expr: Expr) -> Self {
        Self::from(&expr)
    }
}

#[cfg(test)]
mod tests {
    use crate::consts::ZERO;
    use crate::error::{DivisionByZero, InvalidDecimal, InvalidRootDegree};
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> RawExpr {
        RawExpr::Variable(name.to_string())
    }

    fn int(value: i32) -> RawExpr {
        RawExpr::Integer(Integer::from(value))
    }

    #[test]
    fn matches_constructors() {
        // (x + 2) * x - 3/6
        let raw = RawExpr::Sub(
            Box::new(RawExpr::Mul(vec![RawExpr::Add(vec![var("x"), int(2)]), var("x")])),
            Box::new(RawExpr::Fraction(Integer::from(3), Integer::from(6))),
        );
        let x = Expr::variable("x");
        let expected = &(&(&x + 2) * &x) - &Expr::rational(1, 2).unwrap();
        assert_eq!(raw.canonicalize().unwrap(), expected);
    }

    #[test]
    fn decimals() {
        let cases = [
            ("0.25", (1, 4)),
            ("0.08", (2, 25)),
            ("-1.5", (-3, 2)),
            ("12", (12, 1)),
            ("3.000", (3, 1)),
        ];
        for (literal, (numerator, denominator)) in cases {
            let raw = RawExpr::Decimal(literal.to_string());
            assert_eq!(raw.canonicalize().unwrap(), Expr::rational(numerator, denominator).unwrap());
        }

        let err = RawExpr::Decimal("1.2.3".to_string()).canonicalize().unwrap_err();
        assert!(err.is::<InvalidDecimal>());
    }

    #[test]
    fn errors() {
        let zero = RawExpr::Sub(Box::new(var("y")), Box::new(var("y")));
        let raw = RawExpr::Div(Box::new(var("x")), Box::new(zero));
        assert!(raw.canonicalize().unwrap_err().is::<DivisionByZero>());

        let raw = RawExpr::Fraction(Integer::from(1), Integer::new());
        assert!(raw.canonicalize().unwrap_err().is::<DivisionByZero>());

        let raw = RawExpr::Pow(Box::new(int(0)), Box::new(int(-1)));
        assert!(raw.canonicalize().unwrap_err().is::<DivisionByZero>());

        let raw = RawExpr::Add(vec![var("x"), RawExpr::Root(Box::new(var("x")), 1)]);
        assert!(raw.canonicalize().unwrap_err().is::<InvalidRootDegree>());
    }

    #[test]
    fn long_chains() {
        // (((x + x) + x) + ...) with two thousand terms
        let raw = (1..2000).fold(var("x"), |acc, _| RawExpr::Add(vec![acc, var("x")]));
        assert_eq!(raw.canonicalize().unwrap(), 2000 * Expr::variable("x"));

        // 2 * (-1 * (2 * (-1 * ...)))
        let raw = (0..2000).fold(int(1), |acc, i| {
            let factor = if i % 2 == 0 { 2 } else { -1 };
            RawExpr::Mul(vec![int(factor), acc])
        });
        assert_eq!(raw.canonicalize().unwrap(), Expr::integer(2).pow(&Expr::integer(1000)).unwrap());
    }

    #[test]
    fn steps() {
        // x + x - 2x
        let raw = RawExpr::Sub(
            Box::new(RawExpr::Add(vec![var("x"), var("x")])),
            Box::new(RawExpr::Mul(vec![int(2), var("x")])),
        );
        let (expr, steps) = raw.canonicalize_with_steps().unwrap();
        assert!(expr.ptr_eq(&ZERO));
        assert!(steps.contains(&Step::CombineLikeTerms));
        assert!(steps.contains(&Step::FlattenSum));

        let (_, steps) = var("x").canonicalize_with_steps().unwrap();
        assert_eq!(steps, vec![]);
    }

    #[test]
    fn round_trip() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let pi = Expr::constant(Constant::Pi);
        let exprs = [
            &(&x - &y) / &(&x + &pi),
            -(3 * &x.pow(&y).unwrap()),
            &x.abs().sqrt() + &Expr::rational(-2, 3).unwrap(),
            &Expr::integer(2).pow(&(&x + 3)).unwrap() * &y.root(5).unwrap(),
        ];
        for expr in exprs {
            assert_eq!(RawExpr::from(&expr).canonicalize().unwrap(), expr);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize() {
        let json = r#"{"Add":[{"Variable":"t"},{"Decimal":"99.0"},{"Neg":{"Variable":"t"}}]}"#;
        let raw: RawExpr = serde_json::from_str(json).unwrap();
        assert_eq!(raw.canonicalize().unwrap(), Expr::integer(99));

        let raw = RawExpr::Mul(vec![RawExpr::Constant(Constant::E), int(-7)]);
        let json = serde_json::to_string(&raw).unwrap();
        assert_eq!(serde_json::from_str::<RawExpr>(&json).unwrap(), raw);
    }
}
