//! Property-based tests for power series and generalized series.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use asymptote_poly::DensePoly;
    use asymptote_rings::{Q, Ring, Scalar};

    use crate::continuous::ContinuousSeries;
    use crate::discrete::DiscreteSeries;
    use crate::domain::{Domain, ReferenceSet, SeriesKind};
    use crate::power_series::PowerSeries;
    use crate::shift_quotient::{shift_quotient, GrowthParameters};

    fn continuous() -> Domain {
        Domain::rationals("x", SeriesKind::Continuous).unwrap()
    }

    fn discrete() -> Domain {
        Domain::rationals("n", SeriesKind::Discrete).unwrap()
    }

    fn small_scalar() -> impl Strategy<Value = Scalar> {
        (-9i64..10i64).prop_map(Scalar::from)
    }

    // Coefficients of degree 0-4
    fn small_coeffs() -> impl Strategy<Value = Vec<Scalar>> {
        proptest::collection::vec(small_scalar(), 1..=5)
    }

    fn small_series() -> impl Strategy<Value = PowerSeries<Scalar>> {
        (small_coeffs(), prop::option::of(1usize..8)).prop_map(|(c, p)| match p {
            Some(p) => PowerSeries::with_precision(c, p),
            None => PowerSeries::exact(c),
        })
    }

    fn unit_series() -> impl Strategy<Value = PowerSeries<Scalar>> {
        small_series().prop_filter("constant term must be nonzero", |s| !s.coeff(0).is_zero())
    }

    // (tail, exponential polynomial, ramification), all exact
    fn continuous_parts() -> impl Strategy<Value = (Vec<Scalar>, Vec<Scalar>, usize)> {
        (small_coeffs(), small_coeffs(), 1usize..4)
    }

    fn build(tail: Vec<Scalar>, exp: Vec<Scalar>, ram: usize) -> ContinuousSeries {
        ContinuousSeries::from_power_series(
            &continuous(),
            PowerSeries::exact(tail),
            DensePoly::new(exp),
            ram,
        )
        .unwrap()
    }

    proptest! {
        // Power series arithmetic

        #[test]
        fn series_add_commutative(a in small_series(), b in small_series()) {
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn series_mul_commutative(a in small_series(), b in small_series()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn series_mul_associative(a in small_series(), b in small_series(), c in small_series()) {
            prop_assert_eq!(a.mul(&b).mul(&c), a.mul(&b.mul(&c)));
        }

        #[test]
        fn series_inverse_is_inverse(a in unit_series()) {
            let inv = a.inverse(10).unwrap();
            prop_assert!(a.mul(&inv).is_one());
        }

        #[test]
        fn series_exp_of_sum(c1 in small_coeffs(), c2 in small_coeffs()) {
            // exp(f + g) = exp(f) exp(g) for f(0) = g(0) = 0
            let f = PowerSeries::exact(c1).shift_up(1).truncate(6);
            let g = PowerSeries::exact(c2).shift_up(1).truncate(6);
            let lhs = f.add(&g).exp(6).unwrap();
            let rhs = f.exp(6).unwrap().mul(&g.exp(6).unwrap());
            prop_assert_eq!(lhs, rhs);
        }

        // Continuous generalized series

        #[test]
        fn similarity_is_symmetric(
            (t1, e1, r1) in continuous_parts(),
            (t2, e2, r2) in continuous_parts(),
        ) {
            let a = build(t1, e1, r1);
            let b = build(t2, e2, r2);
            for reference in [ReferenceSet::Integers, ReferenceSet::Rationals] {
                prop_assert_eq!(a.similar(&b, reference), b.similar(&a, reference));
            }
        }

        #[test]
        fn unit_and_zero_laws((t, e, r) in continuous_parts()) {
            let a = build(t, e, r);
            let d = continuous();
            prop_assert_eq!(a.mul(&ContinuousSeries::one(&d)).unwrap(), a.clone());
            prop_assert_eq!(a.add(&ContinuousSeries::zero(&d)).unwrap(), a.clone());
            prop_assert!(a.mul(&ContinuousSeries::zero(&d)).unwrap().is_zero());
            prop_assert!(a.sub(&a).unwrap().is_zero());
        }

        #[test]
        fn ramification_is_minimal((t, e, r) in continuous_parts(), k in 1usize..4) {
            // Writing the same series at a multiple of its ramification
            // normalizes back to the same value
            let a = build(t.clone(), e.clone(), r);
            let inflated = ContinuousSeries::from_power_series(
                &continuous(),
                PowerSeries::exact(t).inflate(k),
                DensePoly::new(e).inflate(k),
                r * k,
            )
            .unwrap();
            prop_assert_eq!(inflated.ramification(), a.ramification());
            prop_assert_eq!(inflated, a);
        }

        #[test]
        fn multiplication_commutes(
            (t1, e1, r1) in continuous_parts(),
            (t2, e2, r2) in continuous_parts(),
        ) {
            let a = build(t1, e1, r1);
            let b = build(t2, e2, r2);
            prop_assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
        }

        #[test]
        fn derivative_is_linear(t1 in small_coeffs(), t2 in small_coeffs(), e in small_coeffs()) {
            // Unramified, so that every pair of orders differs by an integer
            let a = build(t1, e.clone(), 1);
            let b = build(t2, e, 1);
            let sum = a.add(&b).unwrap();
            let lhs = sum.derivative().unwrap();
            let rhs = a.derivative().unwrap().add(&b.derivative().unwrap()).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn derivative_is_linear_when_ramified(
            t1 in small_coeffs(),
            t2 in small_coeffs(),
            e in small_coeffs(),
            ram in 2usize..4,
            prec in prop::option::of(1usize..6),
        ) {
            // Nonzero constant terms keep both orders at zero, and a nonzero
            // exponential part fixes the order of each derivative
            prop_assume!(!t1[0].is_zero() && !t2[0].is_zero());
            prop_assume!(e.iter().any(|c| !c.is_zero()));
            prop_assume!(!(t1[0].clone() + t2[0].clone()).is_zero());

            let tail = |c: Vec<Scalar>| match prec {
                Some(p) => PowerSeries::with_precision(c, p),
                None => PowerSeries::exact(c),
            };
            let make = |c: Vec<Scalar>| {
                ContinuousSeries::from_power_series(
                    &continuous(),
                    tail(c),
                    DensePoly::new(e.clone()),
                    ram,
                )
                .unwrap()
            };
            let a = make(t1);
            let b = make(t2);
            prop_assert!(a.similar(&b, ReferenceSet::Integers));

            let sum = a.add(&b).unwrap();
            let lhs = sum.derivative().unwrap();
            let rhs = a.derivative().unwrap().add(&b.derivative().unwrap()).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn exponential_tail_round_trip((t, e, r) in continuous_parts()) {
            let a = build(t, e, r);
            let product = a.exponential_part().mul(&a.tail()).unwrap();
            prop_assert_eq!(product, a);
        }

        #[test]
        fn substitution_composes((t, e, r) in continuous_parts(), k1 in 1i64..4, k2 in 1i64..4) {
            let a = build(t, e, r);
            let s1 = Scalar::from(k1);
            let s2 = Scalar::from(k2);
            let twice = a.substitute(&s1).unwrap().substitute(&s2).unwrap();
            let once = a.substitute(&Scalar::from(k1 * k2)).unwrap();
            prop_assert_eq!(twice, once);
        }

        // Discrete generalized series

        #[test]
        fn shift_of_polynomial(
            coeffs in small_coeffs().prop_filter("leading coefficient must be nonzero", |c| {
                !c.last().is_some_and(|x| x.is_zero())
            }),
            i in 0i64..4,
        ) {
            let p = DensePoly::new(coeffs);
            let s = DiscreteSeries::from_polynomial(&discrete(), &p).unwrap().shift(i).unwrap();
            let shifted = p.compose(&DensePoly::new(vec![Scalar::from(i), Scalar::from(1_i64)]));

            let degree = Scalar::from(i64::try_from(p.degree()).unwrap());
            let expansion = s.expansion().coeff(0);
            let expected = shifted.reverse();
            prop_assert_eq!(s.leading_exponent(), &degree);
            prop_assert_eq!(expansion.coeffs(), expected.coeffs());
        }

        #[test]
        fn shift_quotient_base_case(gamma_num in -3i64..4, rho in 1i64..5, prec in 0usize..6) {
            let params = GrowthParameters {
                superexponential: Q::new(gamma_num, 2),
                exponential: Scalar::from(rho),
                subexponential: vec![],
                multiplier: 1,
                leading_exponent: Scalar::from(Q::new(1, 3)),
            };
            let sq = shift_quotient(&params, 0, prec).unwrap();
            prop_assert!(sq.series.is_one());
            prop_assert!(sq.series.is_exact());
        }
    }
}
