//! End-to-end scenarios across domains, both series kinds and coercion.

use asymptote_poly::DensePoly;
use asymptote_rings::{CoefficientField, Q, Scalar};
use asymptote_series::{
    ContinuousSeries, DiscreteComponents, DiscreteSeries, Domain, ErrorKind, LogPoly, PowerSeries,
    Precision, ReferenceSet, SeriesError, SeriesKind, DEFAULT_PRECISION,
};

fn q(n: i64, d: i64) -> Scalar {
    Scalar::from(Q::new(n, d))
}

fn ints(coeffs: &[i64]) -> Vec<Scalar> {
    coeffs.iter().copied().map(Scalar::from).collect()
}

fn continuous() -> Domain {
    Domain::rationals("x", SeriesKind::Continuous).unwrap()
}

fn discrete() -> Domain {
    Domain::rationals("n", SeriesKind::Discrete).unwrap()
}

fn series(tail: &[i64], exp: &[i64], ram: usize) -> ContinuousSeries {
    ContinuousSeries::from_power_series(
        &continuous(),
        PowerSeries::exact(ints(tail)),
        DensePoly::new(ints(exp)),
        ram,
    )
    .unwrap()
}

#[test]
fn substitution_clears_ramification() {
    let a = series(&[1, 1, 1], &[0], 3);
    assert_eq!(a.ramification(), 3);

    let b = a.substitute(&q(3, 1)).unwrap();
    assert_eq!(b.ramification(), 1);
    assert_eq!(b.tail_poly(), &LogPoly::constant(PowerSeries::exact(ints(&[1, 1, 1]))));
    assert_eq!(b.precision(), Precision::Infinite);
}

#[test]
fn product_ramification_is_lcm() {
    let a = series(&[1, 1, 1], &[0], 2);
    let b = series(&[1, 1, 1], &[0], 3);
    assert_eq!((&a * &b).unwrap().ramification(), 6);

    let a = series(&[1, 1], &[1], 2);
    let b = series(&[1, 1], &[1], 3);
    assert_eq!((&a * &b).unwrap().ramification(), 6);
}

#[test]
fn addition_requires_similarity() {
    let a = series(&[1], &[1, 1, 1], 2);
    let b = ContinuousSeries::from_power_series(
        &continuous(),
        PowerSeries::one(),
        DensePoly::new(vec![q(-2, 3), q(1, 1), q(1, 1)]),
        2,
    )
    .unwrap();

    assert!(!a.similar(&b, ReferenceSet::Integers));
    assert!(!b.similar(&a, ReferenceSet::Integers));
    assert!(a.similar(&b, ReferenceSet::Rationals));

    let err = (&a + &b).unwrap_err();
    assert_eq!(err, SeriesError::NotSimilar);
    assert_eq!(err.kind(), ErrorKind::Incompatibility);
}

#[test]
fn derivative_matches_product_rule() {
    let a = series(&[1, 1, 1], &[1, 1, 1], 2);
    let b = series(&[2, 0, 3], &[1, 1, 1], 2);

    let sum = (&a + &b).unwrap();
    let lhs = sum.derivative().unwrap();
    let rhs = (&a.derivative().unwrap() + &b.derivative().unwrap()).unwrap();
    assert_eq!(lhs, rhs);
}

#[test]
fn split_round_trip() {
    let a = series(&[2, 1, 0, 5], &[3, 0, 1], 3);
    let rebuilt = (&a.exponential_part() * &a.tail()).unwrap();
    assert_eq!(rebuilt, a);
}

#[test]
fn algebraic_coefficients() {
    let base = continuous();
    let ext = base.base_extend(ints(&[-2, 0, 1]), "a").unwrap();
    let a = ext.field().generator().unwrap();

    // (1 + a x)(1 - a x) = 1 - 2x^2
    let plus = ContinuousSeries::from_power_series(
        &ext,
        PowerSeries::exact(vec![q(1, 1), a.clone()]),
        DensePoly::zero(),
        1,
    )
    .unwrap();
    let minus = ContinuousSeries::from_power_series(
        &ext,
        PowerSeries::exact(vec![q(1, 1), -a]),
        DensePoly::zero(),
        1,
    )
    .unwrap();

    let product = (&plus * &minus).unwrap();
    assert_eq!(product, series(&[1, 0, -2], &[0], 1));
    assert_ne!(product.domain(), &base);
}

#[test]
fn domains_are_interned() {
    let a = Domain::new(CoefficientField::Rationals, "z", SeriesKind::Discrete).unwrap();
    let b = Domain::rationals("z", SeriesKind::Discrete).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, Domain::rationals("z", SeriesKind::Continuous).unwrap());

    let err = Domain::rationals("xLOG", SeriesKind::Continuous).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Construction);
    assert!(Domain::rationals("", SeriesKind::Continuous).is_err());
}

#[test]
fn domain_factories() {
    let d = continuous();
    assert!(d.zero().is_zero());
    assert!(d.one().is_one());
    let x = d.gen();
    assert_eq!(x.as_continuous().and_then(ContinuousSeries::order), Some(q(1, 1)));

    let n = discrete().gen();
    assert_eq!(n.as_discrete().map(DiscreteSeries::leading_exponent), Some(&q(1, 1)));
}

#[test]
fn coerced_operands_combine() {
    let d = discrete();
    let p = d.coerce(DensePoly::new(ints(&[1, 1]))).unwrap();
    let two = d.coerce(q(2, 1)).unwrap();
    let sum = p.add(&two).unwrap();
    let expected = d.coerce(DensePoly::new(ints(&[3, 1]))).unwrap();
    assert_eq!(sum, expected);
}

#[test]
fn shifting_a_factorial_like_sequence() {
    // f(n) = (n/e)^n n^(1/2) ~ n!/sqrt(2 pi)
    let f = DiscreteSeries::from_components(
        &discrete(),
        DiscreteComponents {
            superexponential: Q::one(),
            leading_exponent: q(1, 2),
            ..DiscreteComponents::from_expansion(LogPoly::one())
        },
    )
    .unwrap();

    let g = f.shift(1).unwrap();
    assert_eq!(g.superexponential_part(), &Q::one());
    assert_eq!(g.leading_exponent(), &q(3, 2));
    assert_eq!(g.precision(), Precision::Finite(DEFAULT_PRECISION));

    // f(n+1)/f(n) = (n+1) (1 + 1/n)^(n+1/2) / e = n (1 + 1/n + 1/(12 n^2) + ...)
    let c = g.expansion().coeff(0);
    assert_eq!(c.coeff(0), q(1, 1));
    assert_eq!(c.coeff(1), q(1, 1));
    assert_eq!(c.coeff(2), q(1, 12));

    let quotient = (&g * &f.inverse().unwrap()).unwrap();
    assert!(quotient.superexponential_part().is_zero());
    assert_eq!(quotient.leading_exponent(), &q(1, 1));
}

#[test]
fn shifting_through_evaluation() {
    let n = discrete().gen();
    let n = n.as_discrete().unwrap();
    let square = (n * n).unwrap();

    let shifted = square.evaluate_at(&DensePoly::new(ints(&[2, 1]))).unwrap();
    assert_eq!(shifted.leading_exponent(), &q(2, 1));
    assert_eq!(
        shifted.expansion().coeff(0),
        PowerSeries::with_precision(ints(&[1, 4, 4]), DEFAULT_PRECISION)
    );

    let err = square.evaluate_at(&DensePoly::new(ints(&[5]))).unwrap_err();
    assert!(matches!(err, SeriesError::UnsupportedArgument(_)));
}

#[test]
fn error_taxonomy() {
    let log = ContinuousSeries::new(&continuous(), LogPoly::x(), DensePoly::zero(), 1).unwrap();
    assert_eq!(log.inverse().unwrap_err().kind(), ErrorKind::NonInvertible);
    assert_eq!(log.substitute(&q(-1, 1)).unwrap_err().kind(), ErrorKind::Domain);

    let n = discrete().gen();
    let n = n.as_discrete().unwrap();
    assert_eq!(n.shift(-1).unwrap_err().kind(), ErrorKind::Domain);

    let err = ContinuousSeries::from_scalar(&discrete(), q(1, 1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Construction);
}
