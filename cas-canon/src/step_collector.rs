/// A type that collects the rewrite steps taken while building an expression.
///
/// [`StepCollector`] is also implemented for the unit type `()`, which discards every step. The
/// public constructors on [`Expr`](crate::Expr) use it, so building expressions normally has no
/// bookkeeping cost. Use a [`Vec`] with [`RawExpr::canonicalize_with_steps`] to see which rules
/// fired.
///
/// [`RawExpr::canonicalize_with_steps`]: crate::RawExpr::canonicalize_with_steps
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

/// Counts the steps without storing them.
impl<S> StepCollector<S> for usize {
    #[inline]
    fn push(&mut self, _: S) {
        *self += 1;
    }
}
