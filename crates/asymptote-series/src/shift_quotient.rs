//! Asymptotic shift quotients.
//!
//! For a discrete series with growth
//!
//! ```text
//! f(n) = (n/e)^(γn) · ρ^n · exp(Σ c_l n^(l/r)) · n^α
//! ```
//!
//! the quotient `f(n+i)/f(n)` equals `n^(iγ)` times a power series in
//! `y = n^(-1/r)`. Each growth factor contributes one series:
//!
//! - `(1 + i/n)^(iγ)` from `(n+i)^(iγ)` when `γ ≠ 0`
//! - `ρ^i`
//! - `exp(γ i Σ (-i)^l/(l+1) y^(rl) + Σ c_l Σ C(l/r, j) i^j y^(rj-l))`
//! - `(1 + i/n)^α`

use asymptote_rings::{Q, Ring, Scalar};
use tracing::{debug, trace};

use crate::error::{Result, SeriesError};
use crate::normalize::{ratio, sparse_series, to_i64};
use crate::power_series::PowerSeries;

/// The growth parameters of a discrete series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowthParameters {
    /// γ, the exponent of `(n/e)^n`.
    pub superexponential: Q,
    /// ρ, the base of the exponential factor.
    pub exponential: Scalar,
    /// `c_1, ..., c_(r-1)`: the coefficients of `n^(l/r)` inside `exp`.
    pub subexponential: Vec<Scalar>,
    /// The ramification divided by the denominator of γ.
    pub multiplier: usize,
    /// α, the exponent of the polynomial factor.
    pub leading_exponent: Scalar,
}

impl GrowthParameters {
    /// Returns the ramification `r = den(γ) · multiplier`.
    #[must_use]
    pub fn ramification(&self) -> usize {
        self.superexponential.denominator_usize().unwrap_or(1) * self.multiplier
    }
}

/// The quotient `f(n+i)/f(n) = n^leading_exponent · series(n^(-1/ramification))`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftQuotient {
    /// The power of `n` factored out, `iγ`.
    pub leading_exponent: Q,
    /// The series in `y = n^(-1/ramification)`.
    pub series: PowerSeries<Scalar>,
    /// The ramification of `y`.
    pub ramification: usize,
}

/// Computes `λ (λ-1) ... (λ-j+1) / j!`.
#[must_use]
pub fn generalized_binomial(lambda: &Scalar, j: usize) -> Scalar {
    (0..j).fold(Scalar::one(), |acc, m| {
        acc * (lambda.clone() - Scalar::from(to_i64(m))) * ratio(1, m + 1)
    })
}

fn power(base: &Scalar, k: usize) -> Scalar {
    base.pow(u32::try_from(k).unwrap_or(u32::MAX))
}

/// `(1 + i/n)^λ` in `y = n^(-1/ram)`, truncated at `O(y^n_terms)`.
fn binomial_factor(lambda: &Scalar, i: &Scalar, ram: usize, n_terms: usize) -> PowerSeries<Scalar> {
    let terms = (0..)
        .map(|k| (ram * k, k))
        .take_while(|&(e, _)| e < n_terms)
        .map(|(e, k)| (e, generalized_binomial(lambda, k) * power(i, k)));
    sparse_series(terms, n_terms)
}

/// The argument of `exp` contributed by `(n/e)^(γn)`.
fn superexponential_argument(
    gamma: &Scalar,
    i: &Scalar,
    ram: usize,
    n_terms: usize,
) -> PowerSeries<Scalar> {
    let neg_i = -i.clone();
    let terms = (1..)
        .map(|l| (ram * l, l))
        .take_while(|&(e, _)| e < n_terms)
        .map(|(e, l)| (e, gamma.clone() * i.clone() * power(&neg_i, l) * ratio(1, l + 1)));
    sparse_series(terms, n_terms)
}

/// The argument of `exp` contributed by `c · n^(l/ram)`.
fn subexponential_argument(
    c: &Scalar,
    l: usize,
    i: &Scalar,
    ram: usize,
    n_terms: usize,
) -> PowerSeries<Scalar> {
    let lambda = ratio(l, ram);
    let terms = (1..)
        .map(|j| (ram * j - l, j))
        .take_while(|&(e, _)| e < n_terms)
        .map(|(e, j)| (e, c.clone() * generalized_binomial(&lambda, j) * power(i, j)));
    sparse_series(terms, n_terms)
}

/// Computes `f(n+i)/f(n)` up to a relative error of `O(n^(-prec))`.
///
/// # Errors
///
/// Fails if `shift` is negative, if the parameters are malformed, or if
/// `prec` terms cannot cover the growth `n^(iγ)` (a negative truncation
/// order).
#[tracing::instrument(skip_all, fields(shift, prec))]
pub fn shift_quotient(params: &GrowthParameters, shift: i64, prec: usize) -> Result<ShiftQuotient> {
    if params.multiplier == 0 {
        return Err(SeriesError::Construction("ramification multiplier must be positive".into()));
    }
    let ram = params.ramification();
    if shift < 0 {
        return Err(SeriesError::NegativeShift(shift));
    }
    if params.subexponential.len() >= ram {
        return Err(SeriesError::Construction(format!(
            "subexponential part needs fewer than {ram} coefficients"
        )));
    }
    if shift == 0 {
        return Ok(ShiftQuotient {
            leading_exponent: Q::zero(),
            series: PowerSeries::one(),
            ramification: ram,
        });
    }

    let i_gamma = params.superexponential.clone() * Q::from(shift);
    let n_terms = (Q::from(to_i64(ram)) * (Q::from(to_i64(prec)) + i_gamma.clone()))
        .to_i64()
        .ok_or_else(|| {
            SeriesError::InsufficientPrecision(format!("order of n^{i_gamma} overflows"))
        })?;
    let n_terms = usize::try_from(n_terms).map_err(|_| {
        SeriesError::InsufficientPrecision(format!(
            "{prec} terms cannot absorb the growth n^{i_gamma}"
        ))
    })?;

    let i = Scalar::from(shift);
    let mut series = PowerSeries::one();

    if !params.superexponential.is_zero() {
        let factor = binomial_factor(&Scalar::from(i_gamma.clone()), &i, ram, n_terms);
        trace!(%factor, "power factor");
        series = series.mul(&factor);
    }

    let rho = power(&params.exponential, usize::try_from(shift).unwrap_or(usize::MAX));
    trace!(%rho, "exponential factor");
    series = series.scale(&rho);

    let mut arg = PowerSeries::big_oh(n_terms);
    if !params.superexponential.is_zero() {
        let gamma = Scalar::from(params.superexponential.clone());
        arg = arg.add(&superexponential_argument(&gamma, &i, ram, n_terms));
    }
    for (idx, c) in params.subexponential.iter().enumerate() {
        if !c.is_zero() {
            arg = arg.add(&subexponential_argument(c, idx + 1, &i, ram, n_terms));
        }
    }
    let factor = arg
        .exp(n_terms)
        .ok_or_else(|| {
            SeriesError::Construction("exponential argument has a constant term".into())
        })?;
    trace!(%factor, "exponential of growth terms");
    series = series.mul(&factor);

    let factor = binomial_factor(&params.leading_exponent, &i, ram, n_terms);
    trace!(%factor, "polynomial factor");
    series = series.mul(&factor).truncate(n_terms);

    debug!(terms = n_terms, ramification = ram, "computed shift quotient");
    Ok(ShiftQuotient {
        leading_exponent: i_gamma,
        series,
        ramification: ram,
    })
}
