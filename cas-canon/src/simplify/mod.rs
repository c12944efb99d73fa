//! The rewrite rules applied by every constructor of [`Expr`](crate::Expr).
//!
//! Each operator has its own constructor in [`rules`], which rewrites the operator applied to
//! already-canonical operands into a canonical expression. Constructors may call each other (a
//! product of two equal factors becomes a power, for example), but every such call is made on
//! strictly smaller operands, or is bounded by [`MAX_PASSES`].
//!
//! Every constructor takes a [`StepCollector`], which receives a [`Step`] for each rule that
//! fires. Steps are also emitted as `TRACE` level events under the `cas_canon` target.

pub mod rules;
pub mod step;

use crate::step_collector::StepCollector;
use step::Step;

/// Maximum number of times the product and sum accumulators re-examine their operands after a
/// rewrite changed the shape of one of them.
pub const MAX_PASSES: usize = 64;

/// Records that a rule fired.
pub(crate) fn record(step_collector: &mut dyn StepCollector<Step>, step: Step) {
    tracing::trace!(?step, "rewrite rule applied");
    step_collector.push(step);
}
