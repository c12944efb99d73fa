use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`]. A sub-tree that is shared between
/// several parents is visited once for each parent.
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression is the last visited expression.
    ///
    /// This compares the locations of the handles, not the nodes they point to, since the same
    /// node can appear as two different operands.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            let operands = expr.operands();
            match operands.last() {
                Some(last) if !self.is_last_visited(last) => {
                    self.stack.extend(operands.iter().rev());
                },
                _ => return self.visit(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let expr = (&x + &y).pow(&Expr::integer(2)).unwrap();

        let visited = expr.post_order_iter()
            .map(|expr| expr.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "y", "x + y", "2", "(x + y)^2"]);
    }

    #[test]
    fn shared_operands() {
        let x = Expr::variable("x");
        let expr = Expr::sum([x.sqrt(), x.abs()]);
        let variables = expr.post_order_iter()
            .filter(|expr| expr.as_variable().is_some())
            .count();
        assert_eq!(variables, 2);
    }
}
