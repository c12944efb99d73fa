//! Exact rational arithmetic used by [`Node::Number`](crate::Node::Number) leaves.
//!
//! Numbers are always stored as reduced [`Rational`]s with a positive denominator, so two equal
//! values always have the same representation.

use cas_error::Error;
use crate::error::{DivisionByZero, InvalidDecimal};
use rug::{ops::Pow, Integer, Rational};
use std::cmp::Ordering;

/// Upper bound on the number of bits a folded power `a^n` is estimated to have. Powers of
/// numbers that would be larger than this are left unevaluated.
pub const POWER_BIT_BUDGET: u64 = 1 << 16;

/// Largest trial divisor used when pulling perfect powers out of a root of an integer.
pub const ROOT_TRIAL_LIMIT: u32 = 1 << 10;

/// Creates the reduced fraction `numerator / denominator`.
pub fn make_rational(
    numerator: impl Into<Integer>,
    denominator: impl Into<Integer>,
) -> Result<Rational, Error> {
    let denominator = denominator.into();
    if denominator.cmp0() == Ordering::Equal {
        return Err(Error::from_kind(DivisionByZero));
    }

    Ok(Rational::from((numerator.into(), denominator)))
}

/// Reads a decimal literal such as `-12.375` into an exact, fully reduced fraction.
///
/// The literal is an optional sign, followed by digits with at most one decimal point. At least
/// one digit must be present.
pub fn from_decimal(literal: &str) -> Result<Rational, Error> {
    let invalid = || Error::from_kind(InvalidDecimal { literal: literal.to_string() });

    let (negative, unsigned) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.len() + fraction.len() == 0 || !is_digits(whole) || !is_digits(fraction) {
        return Err(invalid());
    }

    let digits = format!("{}{}", whole, fraction);
    let mut numerator = Integer::from_str_radix(&digits, 10).map_err(|_| invalid())?;
    if negative {
        numerator = -numerator;
    }
    let places = u32::try_from(fraction.len()).map_err(|_| invalid())?;
    let denominator = Integer::from(10).pow(places);

    Ok(Rational::from((numerator, denominator)))
}

/// Returns true if the number is an integer.
pub fn is_integer(value: &Rational) -> bool {
    *value.denom() == 1
}

/// Computes `a + b`.
pub fn add(a: &Rational, b: &Rational) -> Rational {
    Rational::from(a + b)
}

/// Computes `a * b`.
pub fn multiply(a: &Rational, b: &Rational) -> Rational {
    Rational::from(a * b)
}

/// Computes `a / b`, failing if `b` is zero.
pub fn divide(a: &Rational, b: &Rational) -> Result<Rational, Error> {
    if b.cmp0() == Ordering::Equal {
        return Err(Error::from_kind(DivisionByZero));
    }

    Ok(Rational::from(a / b))
}

/// Computes `base^exponent` exactly.
///
/// Returns [`None`] if `base` is zero and `exponent` is negative, or if the result is estimated
/// to exceed [`POWER_BIT_BUDGET`] bits.
pub fn pow(base: &Rational, exponent: &Integer) -> Option<Rational> {
    let negative = exponent.cmp0() == Ordering::Less;
    if negative && base.cmp0() == Ordering::Equal {
        return None;
    }

    let magnitude = exponent.clone().abs().to_u32()?;
    let bits = u64::from(base.numer().significant_bits().max(base.denom().significant_bits()));
    if bits.saturating_mul(u64::from(magnitude)) > POWER_BIT_BUDGET {
        return None;
    }

    let numer = base.numer().clone().pow(magnitude);
    let denom = base.denom().clone().pow(magnitude);
    if negative {
        Some(Rational::from((denom, numer)))
    } else {
        Some(Rational::from((numer, denom)))
    }
}

/// Returns the exact `degree`-th root of a non-negative integer, if there is one.
pub fn exact_root(value: &Integer, degree: u32) -> Option<Integer> {
    debug_assert!(value.cmp0() != Ordering::Less);
    let (root, rem) = value.clone().root_rem(Integer::new(), degree);
    if rem.cmp0() == Ordering::Equal {
        Some(root)
    } else {
        None
    }
}

/// Splits a positive integer `n` into `(outside, inside)` such that `n = outside^degree * inside`,
/// pulling out every perfect `degree`-th power factor whose root is at most [`ROOT_TRIAL_LIMIT`],
/// and then `inside` itself if it is a perfect power.
pub fn split_perfect_power(value: &Integer, degree: u32) -> (Integer, Integer) {
    let mut outside = Integer::from(1);
    let mut inside = value.clone();

    for trial in 2..=ROOT_TRIAL_LIMIT {
        // `trial^degree` is at least `2^((bits(trial) - 1) * degree)`
        let trial_bits = u64::from(u32::BITS - trial.leading_zeros() - 1);
        if trial_bits * u64::from(degree) >= u64::from(inside.significant_bits()) {
            break;
        }

        let factor = Integer::from(trial).pow(degree);
        while inside.is_divisible(&factor) {
            inside /= &factor;
            outside *= trial;
        }
    }

    if inside != 1 {
        if let Some(root) = exact_root(&inside, degree) {
            outside *= root;
            inside = Integer::from(1);
        }
    }

    (outside, inside)
}

/// Returns the number of times `base` divides `value`, along with the quotient that is left.
///
/// `base` must be at least 2, and `value` must be non-zero.
pub fn multiplicity(value: &Integer, base: &Integer) -> (u32, Integer) {
    debug_assert!(*base >= 2 && value.cmp0() != Ordering::Equal);
    let mut count = 0;
    let mut rest = value.clone();
    while rest.is_divisible(base) {
        rest /= base;
        count += 1;
    }
    (count, rest)
}
