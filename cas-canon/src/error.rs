//! Kinds of errors that can occur while building an expression.
//!
//! Every other construction is total. These kinds are wrapped in a [`cas_error::Error`] before
//! being returned.

use cas_attrs::ErrorKind;

/// A division by zero was attempted, either through an explicit division, a fraction with a
/// zero denominator, or zero raised to a negative power.
#[derive(Debug, Clone, ErrorKind, PartialEq, Eq)]
#[error(
    message = "division by zero",
    labels = ["this expression"],
    help = "the denominator of a fraction must be non-zero",
)]
pub struct DivisionByZero;

/// A root was requested with a degree less than 2.
#[derive(Debug, Clone, ErrorKind, PartialEq, Eq)]
#[error(
    message = format!("cannot take a root of degree {}", self.degree),
    labels = ["this root"],
    help = "the degree of a root must be at least 2",
)]
pub struct InvalidRootDegree {
    /// The degree that was given.
    pub degree: u64,
}

/// A decimal literal could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq, Eq)]
#[error(
    message = format!("`{}` is not a decimal number", self.literal),
    labels = ["this literal"],
    help = "decimal numbers are written as digits with an optional sign and decimal point, like `-12.375`",
)]
pub struct InvalidDecimal {
    /// The literal that was given.
    pub literal: String,
}

#[cfg(test)]
mod tests {
    use cas_error::Error;
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::from_kind(DivisionByZero).to_string(), "division by zero");
        assert_eq!(
            Error::from_kind(InvalidRootDegree { degree: 1 }).to_string(),
            "cannot take a root of degree 1",
        );
        assert_eq!(
            Error::from_kind(InvalidDecimal { literal: "1..2".to_string() }).to_string(),
            "`1..2` is not a decimal number",
        );
    }
}
