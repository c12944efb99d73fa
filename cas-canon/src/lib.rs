//! Symbolic expressions that are kept in a unique **canonical form** as they are built.
//!
//! # Expression representation
//!
//! Expressions are immutable trees of [`Expr`] handles. Each handle is a reference-counted
//! pointer to a [`Node`], which is either a leaf (a [`Node::Number`], a named
//! [`Node::Constant`], or a [`Node::Variable`]) or an operator applied to other expressions.
//! Sub-trees are shared freely between parents, and handles can be sent across threads.
//!
//! There is no way to build an [`Expr`] without going through one of its constructors, and
//! every constructor rewrites its result into canonical form before returning it. For example,
//! `x + (y + z)`, `(x + y) + z` and `z + y + x` all produce the same single [`VariadicOp::Add`]
//! node with the operands `x`, `y` and `z`, in that order:
//!
//! ```
//! use cas_canon::Expr;
//!
//! let (x, y, z) = (Expr::variable("x"), Expr::variable("y"), Expr::variable("z"));
//! let a = &x + &(&y + &z);
//! let b = &(&x + &y) + &z;
//! let c = &(&z + &y) + &x;
//! assert_eq!(a, b);
//! assert_eq!(b, c);
//! assert_eq!(a.operands(), &[x, y, z]);
//! ```
//!
//! Because every expression is canonical, equality is a plain structural comparison: two
//! expressions that canonicalize to the same tree are equal, without any further
//! simplification step.
//!
//! # Canonicalization
//!
//! The rewrite rules live in the [`simplify`] module and run inside the constructors. They
//! flatten nested sums and products, fold numbers, combine like terms and like factors, and
//! apply the power and root laws that hold without assumptions on the sign of a variable.
//! Operands of sums and products are sorted with the total order in [`ordering`].
//!
//! ```
//! use cas_canon::Expr;
//!
//! let t = Expr::variable("t");
//! let two = Expr::integer(2);
//!
//! // 8 * 2^t = 2^(3 + t)
//! let lhs = 8 * two.pow(&t).unwrap();
//! let rhs = two.pow(&(3 + &t)).unwrap();
//! assert_eq!(lhs, rhs);
//! ```
//!
//! Collaborators that produce expressions from some other representation (a parser, a
//! deserializer) can build a [`RawExpr`] and canonicalize it in one call, optionally collecting
//! the [`Step`]s that fired.

pub mod consts;
pub mod error;
pub mod expr;
pub mod number;
pub mod ordering;
pub mod raw;
pub mod simplify;
pub mod step_collector;

#[cfg(test)]
mod proptests;

pub use cas_error::Error;
pub use consts::Constant;
pub use expr::{BinaryOp, Expr, Kind, Node, UnaryOp, VariadicOp};
pub use raw::RawExpr;
pub use simplify::step::Step;
pub use step_collector::StepCollector;
