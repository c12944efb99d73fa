//! Arithmetic operators for [`Expr`].
//!
//! The operators accept any mix of owned and borrowed expressions, as well as `i64` integers on
//! either side. They are shorthand for the constructors on [`Expr`]; division panics on a zero
//! divisor, use [`Expr::divide`] to handle that case.

use super::Expr;
use std::ops::{Add, Div, Mul, Neg, Sub};

fn add(lhs: &Expr, rhs: &Expr) -> Expr {
    Expr::sum([lhs.clone(), rhs.clone()])
}

fn sub(lhs: &Expr, rhs: &Expr) -> Expr {
    lhs.subtract(rhs)
}

fn mul(lhs: &Expr, rhs: &Expr) -> Expr {
    Expr::product([lhs.clone(), rhs.clone()])
}

/// # Panics
///
/// Panics if `rhs` is zero.
fn div(lhs: &Expr, rhs: &Expr) -> Expr {
    match lhs.divide(rhs) {
        Ok(quotient) => quotient,
        Err(err) => panic!("{}", err),
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:path) => {
        impl $trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Self::Output {
                $op(self, rhs)
            }
        }

        impl $trait<Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Self::Output {
                $op(self, &rhs)
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Self::Output {
                $op(&self, rhs)
            }
        }

        impl $trait<Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Self::Output {
                $op(&self, &rhs)
            }
        }

        impl_binary_op!(@int $trait, $method, $op, i64);
    };
    (@int $trait:ident, $method:ident, $op:path, $int:ty) => {
        impl $trait<$int> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: $int) -> Self::Output {
                $op(self, &Expr::integer(rhs))
            }
        }

        impl $trait<$int> for Expr {
            type Output = Expr;

            fn $method(self, rhs: $int) -> Self::Output {
                $op(&self, &Expr::integer(rhs))
            }
        }

        impl $trait<&Expr> for $int {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Self::Output {
                $op(&Expr::integer(self), rhs)
            }
        }

        impl $trait<Expr> for $int {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Self::Output {
                $op(&Expr::integer(self), &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Sub, sub, sub);
impl_binary_op!(Mul, mul, mul);
impl_binary_op!(Div, div, div);

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
