//! Named mathematical constants, and the shared zero and one expressions.
//!
//! [`ZERO`] and [`ONE`] are created once, on first use, and every rewrite that produces zero or
//! one hands out a clone of the same handle. Callers can rely on [`Expr::ptr_eq`] against them.

use crate::expr::{Expr, Node};
use once_cell::sync::Lazy;
use rug::Rational;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The additive identity.
pub static ZERO: Lazy<Expr> = Lazy::new(|| Expr::from_node(Node::Number(Rational::new())));

/// The multiplicative identity.
pub static ONE: Lazy<Expr> = Lazy::new(|| Expr::from_node(Node::Number(Rational::from(1))));

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter.
    Pi,

    /// Euler's number.
    E,
}

impl Constant {
    /// Returns the position of this constant relative to the other constants, when sorting the
    /// operands of a sum or product.
    pub fn sort_order(self) -> u8 {
        match self {
            Self::Pi => 0,
            Self::E => 1,
        }
    }

    /// Returns the conventional name of the constant.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }
}
