use crate::consts::{ONE, ZERO};
use crate::{Expr, RawExpr};
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (-12i64..12).prop_map(Expr::integer),
        prop::sample::select(vec!["a", "b", "t", "x"]).prop_map(Expr::variable),
    ]
}

/// Sums, differences, products, quotients, negations, small integer powers, square roots and
/// absolute values of numbers and variables.
fn expr() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| &a + &b),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| &a - &b),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| &a * &b),
            (inner.clone(), inner.clone())
                .prop_filter_map("divisor is zero", |(a, b)| a.divide(&b).ok()),
            inner.clone().prop_map(|a| a.negate()),
            inner.clone().prop_map(|a| a.sqrt()),
            inner.clone().prop_map(|a| a.abs()),
            (inner, 0u32..4).prop_map(|(a, n)| a.pow(&Expr::integer(n)).unwrap()),
        ]
    })
}

proptest! {
    #[test]
    fn double_negation(x in expr()) {
        let twice = x.negate().negate();
        if x.as_number().is_none() && x.as_negation().is_none() {
            prop_assert!(twice.ptr_eq(&x));
        } else {
            prop_assert_eq!(twice, x);
        }
    }

    #[test]
    fn difference_with_itself(x in expr()) {
        prop_assert!((&x - &x).ptr_eq(&ZERO));
        prop_assert!(Expr::sum([x.clone(), x.negate()]).ptr_eq(&ZERO));
    }

    #[test]
    fn reciprocal_fractions(
        a in (1i64..10_000).prop_flat_map(|a| prop_oneof![Just(a), Just(-a)]),
        b in 1i64..10_000,
    ) {
        let ab = Expr::rational(a, b).unwrap();
        let ba = Expr::rational(b, a).unwrap();
        prop_assert!((&ab * &ba).ptr_eq(&ONE));
        prop_assert!((&ab / &ab).ptr_eq(&ONE));
    }

    #[test]
    fn sum_ignores_order(terms in prop::collection::vec(expr(), 1..6), seed in any::<u64>()) {
        let mut shuffled = terms.clone();
        let len = shuffled.len();
        shuffled.rotate_left((seed % len as u64) as usize);
        shuffled.reverse();
        prop_assert_eq!(Expr::sum(terms), Expr::sum(shuffled));
    }

    #[test]
    fn product_ignores_order(factors in prop::collection::vec(expr(), 1..5), seed in any::<u64>()) {
        let mut shuffled = factors.clone();
        let len = shuffled.len();
        shuffled.rotate_left((seed % len as u64) as usize);
        shuffled.reverse();
        prop_assert_eq!(Expr::product(factors), Expr::product(shuffled));
    }

    #[test]
    fn grouping_does_not_matter(a in expr(), b in expr(), c in expr()) {
        prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
    }

    #[test]
    fn exponents_add(x in leaf(), y in leaf()) {
        let t = Expr::variable("t");
        let product = &t.pow(&x).unwrap() * &t.pow(&y).unwrap();
        prop_assert_eq!(product, t.pow(&(&x + &y)).unwrap());

        let quotient = &t.pow(&x).unwrap() / &t.pow(&y).unwrap();
        prop_assert_eq!(quotient, t.pow(&(&x - &y)).unwrap());
    }

    #[test]
    fn canonical_form_is_a_fixed_point(x in expr()) {
        let again = RawExpr::from(&x).canonicalize().unwrap();
        prop_assert_eq!(again, x);
    }
}
