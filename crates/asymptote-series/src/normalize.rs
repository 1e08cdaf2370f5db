//! Exponent bookkeeping shared by the continuous and discrete normalizers.
//!
//! Both kinds of series carry a polynomial in `log` whose coefficients are
//! power series in a ramified generator. Normalization folds the common
//! valuation of those coefficients into the leading exponent and lowers the
//! ramification to the gcd of every exponent that occurs.

use asymptote_poly::DensePoly;
use asymptote_rings::{Q, Scalar};

use crate::power_series::{PowerSeries, Precision};

/// A polynomial in `log x` with truncated power series coefficients.
pub type LogPoly = DensePoly<PowerSeries<Scalar>>;

/// Greatest common divisor, with `gcd(0, b) = b`.
#[must_use]
pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of two positive integers.
#[must_use]
pub fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}

pub(crate) fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// The rational `n / d` as a scalar.
pub(crate) fn ratio(n: usize, d: usize) -> Scalar {
    Scalar::from(Q::new(to_i64(n), to_i64(d)))
}

/// The common valuation of the coefficients; a coefficient known only to be
/// `O(x^p)` counts as valuation `p`.
pub(crate) fn tail_valuation(t: &LogPoly) -> Option<usize> {
    t.coeffs()
        .iter()
        .filter_map(|c| c.valuation_bound().finite())
        .min()
}

/// The smallest coefficient precision.
#[must_use]
pub fn tail_precision(t: &LogPoly) -> Precision {
    t.coeffs()
        .iter()
        .map(PowerSeries::precision)
        .min()
        .unwrap_or(Precision::Infinite)
}

/// Folds into `g` every exponent and finite precision of the coefficients.
pub(crate) fn tail_exponent_gcd(t: &LogPoly, g: usize) -> usize {
    t.coeffs().iter().fold(g, |g, c| {
        let g = c.exponents().fold(g, gcd);
        c.precision().finite().map_or(g, |p| gcd(g, p))
    })
}

/// Folds into `g` every exponent of `p`.
pub(crate) fn poly_exponent_gcd(p: &DensePoly<Scalar>, g: usize) -> usize {
    p.exponents().fold(g, gcd)
}

pub(crate) fn tail_shift_down(t: &LogPoly, k: usize) -> LogPoly {
    t.map_coeffs(|c| c.shift_down(k))
}

pub(crate) fn tail_shift_up(t: &LogPoly, k: usize) -> LogPoly {
    t.map_coeffs(|c| c.shift_up(k))
}

pub(crate) fn tail_inflate(t: &LogPoly, q: usize) -> LogPoly {
    t.map_coeffs(|c| c.inflate(q))
}

pub(crate) fn tail_deflate(t: &LogPoly, q: usize) -> LogPoly {
    t.map_coeffs(|c| c.deflate(q))
}

/// Embeds a polynomial as a log-free tail.
pub(crate) fn tail_from_poly(p: &DensePoly<Scalar>) -> LogPoly {
    LogPoly::constant(PowerSeries::from_poly(p))
}

/// Builds a truncated series from `(exponent, coefficient)` pairs, dropping
/// terms at or beyond `prec`.
pub(crate) fn sparse_series(
    terms: impl IntoIterator<Item = (usize, Scalar)>,
    prec: usize,
) -> PowerSeries<Scalar> {
    let mut coeffs = vec![Scalar::from(0_i64); prec];
    for (e, c) in terms {
        if e < prec {
            coeffs[e] = c;
        }
    }
    PowerSeries::with_precision(coeffs, prec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(coeffs: &[i64], prec: Precision) -> PowerSeries<Scalar> {
        PowerSeries::new(coeffs.iter().copied().map(Scalar::from).collect(), prec)
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(5, 0), 5);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(2, 3), 6);
    }

    #[test]
    fn test_tail_valuation() {
        let t = LogPoly::new(vec![
            series(&[0, 0, 1], Precision::Infinite),
            series(&[0, 0, 0, 1], Precision::Infinite),
        ]);
        assert_eq!(tail_valuation(&t), Some(2));

        // An unknown coefficient bounds the valuation by its precision
        let t = LogPoly::new(vec![
            PowerSeries::big_oh(1),
            series(&[0, 0, 0, 1], Precision::Infinite),
        ]);
        assert_eq!(tail_valuation(&t), Some(1));
    }

    #[test]
    fn test_tail_exponent_gcd() {
        let t = LogPoly::constant(series(&[1, 0, 0, 0, 1], Precision::Infinite));
        assert_eq!(tail_exponent_gcd(&t, 6), 2);

        let t = LogPoly::constant(series(&[1, 0, 1], Precision::Finite(5)));
        assert_eq!(tail_exponent_gcd(&t, 2), 1);
    }

    #[test]
    fn test_tail_precision() {
        let t = LogPoly::new(vec![
            series(&[1], Precision::Finite(7)),
            series(&[1], Precision::Finite(4)),
        ]);
        assert_eq!(tail_precision(&t), Precision::Finite(4));
        assert_eq!(tail_precision(&LogPoly::one()), Precision::Infinite);
    }

    #[test]
    fn test_sparse_series() {
        let s = sparse_series(
            [
                (0, Scalar::from(1_i64)),
                (3, Scalar::from(2_i64)),
                (9, Scalar::from(5_i64)),
            ],
            5,
        );
        assert_eq!(s, series(&[1, 0, 0, 2], Precision::Finite(5)));
    }
}
