/// A rewrite rule that fired while building an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// `-(-a) = a`
    DoubleNegation,

    /// The negation of a number is folded into the number.
    NegateNumber,

    /// The absolute value of a number is folded into the number.
    AbsNumber,

    /// `||a|| = |a|`, and `|c| = c` for a positive constant `c`.
    AbsIdempotent,

    /// `|a^(2n)| = a^(2n)`, and `|root(a, 2n)| = root(a, 2n)`
    AbsNonNegative,

    /// `|-a| = |a|`
    AbsNegate,

    /// `|a*b| = |a|*|b|`, `|a/b| = |a|/|b|` and `|a^(2n+1)| = |a|^(2n+1)`
    AbsDistribute,

    /// A root of a number is evaluated exactly, or perfect powers are pulled out of it.
    RootNumber,

    /// `root(a^(nk), n) = |a|^k` for even `n`, or `a^k` for odd `n`.
    RootOfPower,

    /// Perfect powers are pulled out of a root of a product.
    RootOfProduct,

    /// `root(root(a, m), n) = root(a, mn)`
    RootOfRoot,

    /// `root(-a, n) = -root(a, n)` for odd `n`.
    RootOfNegation,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    PowerOneLeft,

    /// `0^a = 0` for positive `a`.
    PowerZeroLeft,

    /// A power of a number with an integer exponent is folded into a number.
    PowerNumber,

    /// `root(a, n)^(nk) = a^k`
    PowerOfRoot,

    /// `|a|^(2n) = a^(2n)`
    PowerOfAbs,

    /// `a^(p/q) = root(a, q)^p`
    PowerRational,

    /// `a^(-b) = 1 / a^b`
    PowerReciprocal,

    /// `(a^b)^n = a^(bn)` for integer `n`.
    PowerOfPower,

    /// `(a*b)^n = a^n * b^n`, `(a/b)^n = a^n / b^n` and `(-a)^n = (-1)^n * a^n` for integer `n`.
    DistributePower,

    /// Nested sums are flattened into one sum.
    FlattenSum,

    /// The numbers in a sum are added together.
    SumNumbers,

    /// Terms that differ only by a numeric factor are combined.
    CombineLikeTerms,

    /// A sum of exactly two terms, one of which is negated, is written as a subtraction.
    Subtraction,

    /// Nested products, negations and divisions are flattened into one product.
    FlattenProduct,

    /// `0*a = 0`
    MultiplyZero,

    /// The numbers in a product are multiplied together.
    MultiplyNumbers,

    /// Factors with the same base are combined by adding their exponents.
    CombineLikeFactors,

    /// `b^m * b^e = b^(m + e)` for a numeric coefficient `b^m`.
    FoldCoefficient,

    /// The division of two numbers is folded into a number.
    DivideNumbers,
}
