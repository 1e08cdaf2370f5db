//! Discrete generalized series.
//!
//! A discrete series represents
//!
//! ```text
//! (n/e)^(γn) · ρ^n · exp(s(n^(1/r))) · n^α · P(n^(-1/r), log n)
//! ```
//!
//! with γ rational, `s` a polynomial of degree below `r` without constant
//! term, and `P` a polynomial in `log n` with truncated power series
//! coefficients. These are the formal solutions of linear recurrences at
//! infinity, and the discrete shift `n -> n + i` acts on them.

use asymptote_poly::DensePoly;
use asymptote_rings::{Field, Q, Ring, Scalar};
use tracing::{debug, trace};

use crate::domain::{Domain, ReferenceSet};
use crate::error::{Result, SeriesError};
use crate::normalize::{
    lcm, poly_exponent_gcd, ratio, sparse_series, tail_deflate, tail_exponent_gcd,
    tail_inflate, tail_precision, tail_shift_down, tail_shift_up, tail_valuation, to_i64, LogPoly,
};
use crate::power_series::{PowerSeries, Precision};
use crate::shift_quotient::{generalized_binomial, shift_quotient, GrowthParameters};
use crate::DEFAULT_PRECISION;

/// The raw parts of a discrete series, before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscreteComponents {
    /// γ, the exponent of `(n/e)^n`.
    pub superexponential: Q,
    /// The ramification `r`.
    pub ramification: usize,
    /// ρ, the base of `ρ^n`.
    pub exponential: Scalar,
    /// `s(t)` with `t = n^(1/r)`.
    pub subexponential: DensePoly<Scalar>,
    /// α, the exponent of `n^α`.
    pub leading_exponent: Scalar,
    /// `P(y, log n)` with `y = n^(-1/r)`.
    pub expansion: LogPoly,
}

impl DiscreteComponents {
    /// Components of the plain expansion `P(n^(-1), log n)`.
    #[must_use]
    pub fn from_expansion(expansion: LogPoly) -> Self {
        Self {
            superexponential: Q::zero(),
            ramification: 1,
            exponential: Scalar::one(),
            subexponential: DensePoly::zero(),
            leading_exponent: Scalar::zero(),
            expansion,
        }
    }
}

/// A discrete generalized series.
#[derive(Clone, Debug)]
pub struct DiscreteSeries {
    domain: Domain,
    gamma: Q,
    ramification: usize,
    rho: Scalar,
    subexp: DensePoly<Scalar>,
    alpha: Scalar,
    expansion: LogPoly,
}

impl DiscreteSeries {
    /// Validates, then normalizes, a series given by its components.
    ///
    /// If the denominator of γ does not divide the ramification, the series
    /// is first rewritten at the least common multiple.
    ///
    /// # Errors
    ///
    /// Fails with a construction error if the domain is not discrete, the
    /// ramification is zero, ρ is zero for a nonzero series, `s` has a
    /// constant term or degree at least `r`, or a coefficient lies outside
    /// the domain's field.
    pub fn from_components(domain: &Domain, components: DiscreteComponents) -> Result<Self> {
        let DiscreteComponents {
            superexponential: gamma,
            ramification,
            exponential: rho,
            subexponential: subexp,
            leading_exponent: alpha,
            expansion,
        } = components;

        if !domain.is_discrete() {
            return Err(SeriesError::Construction(format!("{domain} is not discrete")));
        }
        if ramification == 0 {
            return Err(SeriesError::Construction(
                "ramification must be a positive integer".into(),
            ));
        }
        if rho.is_zero() && !expansion.is_zero() {
            return Err(SeriesError::Construction(
                "exponential part of a nonzero series must be nonzero".into(),
            ));
        }
        if !subexp.coeff(0).is_zero() {
            return Err(SeriesError::Construction(
                "subexponential part must vanish at zero".into(),
            ));
        }
        if !subexp.is_zero() && subexp.degree() >= ramification {
            return Err(SeriesError::Construction(format!(
                "subexponential part must have degree below the ramification {ramification}"
            )));
        }
        domain.check_scalar(&rho)?;
        domain.check_scalar(&alpha)?;
        domain.check_poly(&subexp)?;
        domain.check_log_poly(&expansion)?;

        let den = gamma.denominator_usize().unwrap_or(1);
        let (subexp, expansion, ramification) = if ramification % den == 0 {
            (subexp, expansion, ramification)
        } else {
            let ram = lcm(ramification, den);
            let s = ram / ramification;
            (subexp.inflate(s), tail_inflate(&expansion, s), ram)
        };

        Ok(Self::normalized(
            domain.clone(),
            gamma,
            ramification,
            rho,
            subexp,
            alpha,
            expansion,
        ))
    }

    /// Embeds `s(n^(-1/r))`.
    ///
    /// # Errors
    ///
    /// See [`DiscreteSeries::from_components`].
    pub fn from_power_series(
        domain: &Domain,
        series: PowerSeries<Scalar>,
        ramification: usize,
    ) -> Result<Self> {
        Self::from_components(
            domain,
            DiscreteComponents {
                ramification,
                ..DiscreteComponents::from_expansion(LogPoly::constant(series))
            },
        )
    }

    /// Embeds a constant.
    ///
    /// # Errors
    ///
    /// See [`DiscreteSeries::from_components`].
    pub fn from_scalar(domain: &Domain, c: Scalar) -> Result<Self> {
        Self::from_power_series(domain, PowerSeries::constant(c), 1)
    }

    /// Embeds a polynomial in `n` as `n^deg · rev(p)(n^(-1))`.
    ///
    /// # Errors
    ///
    /// See [`DiscreteSeries::from_components`].
    pub fn from_polynomial(domain: &Domain, p: &DensePoly<Scalar>) -> Result<Self> {
        Self::from_components(
            domain,
            DiscreteComponents {
                leading_exponent: Scalar::from(to_i64(p.degree())),
                ..DiscreteComponents::from_expansion(LogPoly::constant(PowerSeries::from_poly(
                    &p.reverse(),
                )))
            },
        )
    }

    /// The zero series.
    #[must_use]
    pub fn zero(domain: &Domain) -> Self {
        debug_assert!(domain.is_discrete());
        Self {
            domain: domain.clone(),
            gamma: Q::zero(),
            ramification: 1,
            rho: Scalar::zero(),
            subexp: DensePoly::zero(),
            alpha: Scalar::zero(),
            expansion: LogPoly::zero(),
        }
    }

    /// The series 1.
    #[must_use]
    pub fn one(domain: &Domain) -> Self {
        Self {
            rho: Scalar::one(),
            expansion: LogPoly::one(),
            ..Self::zero(domain)
        }
    }

    /// The generator `n`.
    #[must_use]
    pub fn gen(domain: &Domain) -> Self {
        Self {
            alpha: Scalar::one(),
            ..Self::one(domain)
        }
    }

    /// Folds the expansion's valuation into α and lowers the ramification.
    ///
    /// The ramification stays a multiple of the denominator of γ.
    #[allow(clippy::too_many_arguments)]
    fn normalized(
        domain: Domain,
        gamma: Q,
        ramification: usize,
        rho: Scalar,
        subexp: DensePoly<Scalar>,
        alpha: Scalar,
        expansion: LogPoly,
    ) -> Self {
        if expansion.is_zero() {
            return Self::zero(&domain);
        }

        let mut alpha = alpha;
        let mut expansion = expansion;
        let mut subexp = subexp;
        let mut ramification = ramification;

        if let Some(v) = tail_valuation(&expansion).filter(|&v| v > 0) {
            alpha = alpha - ratio(v, ramification);
            expansion = tail_shift_down(&expansion, v);
            trace!(valuation = v, ramification, "folded expansion valuation into exponent");
        }

        let den = gamma.denominator_usize().unwrap_or(1);
        let g = tail_exponent_gcd(&expansion, poly_exponent_gcd(&subexp, ramification / den));
        if g > 1 {
            subexp = subexp.deflate(g);
            expansion = tail_deflate(&expansion, g);
            debug!(from = ramification, to = ramification / g, "lowered ramification");
            ramification /= g;
        }

        Self {
            domain,
            gamma,
            ramification,
            rho,
            subexp,
            alpha,
            expansion,
        }
    }

    /// Re-expresses the ramified parts at ramification `r * s`.
    fn inflated(&self, s: usize) -> (DensePoly<Scalar>, LogPoly) {
        (self.subexp.inflate(s), tail_inflate(&self.expansion, s))
    }

    /// Returns the domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Returns γ.
    #[must_use]
    pub fn superexponential_part(&self) -> &Q {
        &self.gamma
    }

    /// Returns ρ.
    #[must_use]
    pub fn exponential_part(&self) -> &Scalar {
        &self.rho
    }

    /// Returns `s`.
    #[must_use]
    pub fn subexponential_part(&self) -> &DensePoly<Scalar> {
        &self.subexp
    }

    /// Returns α.
    #[must_use]
    pub fn leading_exponent(&self) -> &Scalar {
        &self.alpha
    }

    /// Returns `P`.
    #[must_use]
    pub fn expansion(&self) -> &LogPoly {
        &self.expansion
    }

    /// Returns the ramification.
    #[must_use]
    pub fn ramification(&self) -> usize {
        self.ramification
    }

    /// Returns the normalized components.
    #[must_use]
    pub fn components(&self) -> DiscreteComponents {
        DiscreteComponents {
            superexponential: self.gamma.clone(),
            ramification: self.ramification,
            exponential: self.rho.clone(),
            subexponential: self.subexp.clone(),
            leading_exponent: self.alpha.clone(),
            expansion: self.expansion.clone(),
        }
    }

    /// Returns true if the expansion has positive degree in `log n`.
    #[must_use]
    pub fn has_logarithms(&self) -> bool {
        self.expansion.degree() > 0
    }

    /// Returns the degree of the expansion in `log n`.
    #[must_use]
    pub fn log_degree(&self) -> usize {
        self.expansion.degree()
    }

    /// Returns the smallest precision among the expansion coefficients.
    #[must_use]
    pub fn precision(&self) -> Precision {
        tail_precision(&self.expansion)
    }

    /// Returns true for the zero series.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.expansion.is_zero()
    }

    /// Returns true for the exact series 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.gamma.is_zero()
            && self.ramification == 1
            && self.rho.is_one()
            && self.subexp.is_zero()
            && self.alpha.is_zero()
            && self.expansion == LogPoly::one()
    }

    /// Multiplies two series.
    ///
    /// # Errors
    ///
    /// Fails if the domains differ.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.domain.check_same(&other.domain)?;
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero(&self.domain));
        }

        let ram = lcm(self.ramification, other.ramification);
        let (sa, ea) = self.inflated(ram / self.ramification);
        let (sb, eb) = other.inflated(ram / other.ramification);
        Ok(Self::normalized(
            self.domain.clone(),
            self.gamma.clone() + other.gamma.clone(),
            ram,
            self.rho.clone() * other.rho.clone(),
            sa.add(&sb),
            self.alpha.clone() + other.alpha.clone(),
            ea.mul(&eb),
        ))
    }

    /// Returns true if both series share γ, ρ, the ramification and `s`, and
    /// `α_self − α_other` lies in `reference`.
    #[must_use]
    pub fn similar(&self, other: &Self, reference: ReferenceSet) -> bool {
        self.domain == other.domain
            && self.gamma == other.gamma
            && self.rho == other.rho
            && self.ramification == other.ramification
            && self.subexp == other.subexp
            && reference.contains(&(self.alpha.clone() - other.alpha.clone()))
    }

    /// Adds two similar series; the result keeps the larger α.
    ///
    /// # Errors
    ///
    /// Fails if the domains differ or the series are not similar.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.domain.check_same(&other.domain)?;
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }
        if !self.similar(other, ReferenceSet::Integers) {
            return Err(SeriesError::NotSimilar);
        }

        let ram = self.ramification;
        let d = (self.alpha.clone() - other.alpha.clone()).mul_by_scalar(to_i64(ram));
        let d = d.as_rational().and_then(Q::to_i64).ok_or(SeriesError::NotSimilar)?;

        // n^(-k/ram) = y^k moves onto the expansion of the smaller exponent
        let (alpha, high, low) = if d >= 0 {
            (self.alpha.clone(), &self.expansion, &other.expansion)
        } else {
            (other.alpha.clone(), &other.expansion, &self.expansion)
        };
        let shift = usize::try_from(d.unsigned_abs()).map_err(|_| SeriesError::NotSimilar)?;
        let expansion = high.add(&tail_shift_up(low, shift));

        Ok(Self::normalized(
            self.domain.clone(),
            self.gamma.clone(),
            ram,
            self.rho.clone(),
            self.subexp.clone(),
            alpha,
            expansion,
        ))
    }

    /// Subtracts two similar series.
    ///
    /// # Errors
    ///
    /// See [`DiscreteSeries::add`].
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.neg())
    }

    /// Negates the series.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            expansion: self.expansion.neg(),
            ..self.clone()
        }
    }

    /// Inverts the series, truncating exact expansions at [`DEFAULT_PRECISION`].
    ///
    /// # Errors
    ///
    /// Fails on zero and on series with logarithms.
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with_precision(DEFAULT_PRECISION)
    }

    /// Inverts the series, truncating exact expansions at `O(y^prec)`.
    ///
    /// # Errors
    ///
    /// Fails on zero and on series with logarithms.
    pub fn inverse_with_precision(&self, prec: usize) -> Result<Self> {
        if self.is_zero() {
            return Err(SeriesError::DivisionByZero);
        }
        if self.has_logarithms() {
            return Err(SeriesError::LogarithmicInverse);
        }

        let rho = self.rho.inv().ok_or(SeriesError::DivisionByZero)?;
        let inv = self
            .expansion
            .coeff(0)
            .inverse(prec)
            .ok_or(SeriesError::DivisionByZero)?;
        Ok(Self::normalized(
            self.domain.clone(),
            -self.gamma.clone(),
            self.ramification,
            rho,
            self.subexp.neg(),
            -self.alpha.clone(),
            LogPoly::constant(inv),
        ))
    }

    /// Applies the shift `n -> n + i`.
    ///
    /// The expansion is truncated at its own precision, or at
    /// [`DEFAULT_PRECISION`] if it is exact.
    ///
    /// # Errors
    ///
    /// Fails if `i` is negative.
    #[tracing::instrument(skip_all, fields(shift = i))]
    pub fn shift(&self, i: i64) -> Result<Self> {
        if i < 0 {
            return Err(SeriesError::NegativeShift(i));
        }
        if self.is_zero() || i == 0 {
            return Ok(self.clone());
        }

        let ram = self.ramification;
        let p_y = self.precision().finite_or(DEFAULT_PRECISION);
        let i_gamma = self.gamma.clone() * Q::from(i);
        let prec_n = (Q::new(to_i64(p_y), to_i64(ram)) - i_gamma.clone())
            .ceil_i64()
            .and_then(|p| usize::try_from(p.max(0)).ok())
            .unwrap_or(0);

        let params = GrowthParameters {
            superexponential: self.gamma.clone(),
            exponential: self.rho.clone(),
            subexponential: self.subexp.coeffs().iter().skip(1).cloned().collect(),
            multiplier: ram / self.gamma.denominator_usize().unwrap_or(1),
            leading_exponent: self.alpha.clone(),
        };
        let quotient = shift_quotient(&params, i, prec_n)?;

        // (n+i)^(-1/r) = y (1 + i y^r)^(-1/r)
        let step = Scalar::from(i);
        let step_pow = |k: usize| step.pow(u32::try_from(k).unwrap_or(u32::MAX));
        let root = -ratio(1, ram);
        let sigma = sparse_series(
            (0..)
                .map(|k| (ram * k + 1, k))
                .take_while(|&(e, _)| e < p_y)
                .map(|(e, k)| (e, generalized_binomial(&root, k) * step_pow(k))),
            p_y,
        );
        // log(n+i) = log n + log(1 + i y^r)
        let log_shift = sparse_series(
            (1..)
                .map(|k| (ram * k, k))
                .take_while(|&(e, _)| e < p_y)
                .map(|(e, k)| {
                    let sign = if k % 2 == 1 { Scalar::one() } else { -Scalar::one() };
                    (e, sign * step_pow(k) * ratio(1, k))
                }),
            p_y,
        );

        let mut coeffs = Vec::with_capacity(self.expansion.coeffs().len());
        for c in self.expansion.coeffs() {
            let composed = c.compose(&sigma).ok_or_else(|| {
                SeriesError::Construction("shifted generator has a constant term".into())
            })?;
            coeffs.push(composed.truncate(p_y));
        }
        let substituted =
            LogPoly::new(coeffs).compose(&LogPoly::new(vec![log_shift, PowerSeries::one()]));
        let expansion = substituted.map_coeffs(|c| c.mul(&quotient.series));

        debug!(precision = p_y, "shifted discrete series");
        Ok(Self::normalized(
            self.domain.clone(),
            self.gamma.clone(),
            ram,
            self.rho.clone(),
            self.subexp.clone(),
            self.alpha.clone() + Scalar::from(i_gamma),
            expansion,
        ))
    }

    /// Evaluates at a polynomial argument; only `n + c` with a nonnegative
    /// integer `c` is supported, as a shift.
    ///
    /// # Errors
    ///
    /// Fails with an unsupported-argument error for any other polynomial.
    pub fn evaluate_at(&self, p: &DensePoly<Scalar>) -> Result<Self> {
        let unsupported = || SeriesError::UnsupportedArgument(format!("cannot evaluate at {p}"));
        if p.degree() != 1 || !p.leading_coeff().is_one() {
            return Err(unsupported());
        }
        let c = p.coeff(0);
        let i = c.as_rational().and_then(Q::to_i64).ok_or_else(unsupported)?;
        self.shift(i)
    }

    /// Reinterprets the series in a domain over a larger field.
    ///
    /// # Errors
    ///
    /// Fails unless `domain` has the same variable and kind and its field
    /// contains the current one.
    pub fn lift_into(&self, domain: &Domain) -> Result<Self> {
        if !domain.accepts(&self.domain) {
            return Err(SeriesError::DomainMismatch(format!(
                "cannot lift from {} into {domain}",
                self.domain
            )));
        }
        Ok(Self {
            domain: domain.clone(),
            ..self.clone()
        })
    }

    /// Lifts the series into the domain extended by a root of `modulus`.
    ///
    /// # Errors
    ///
    /// Fails if the extension is invalid.
    pub fn base_extend(&self, modulus: Vec<Scalar>, name: &str) -> Result<Self> {
        let domain = self.domain.base_extend(modulus, name)?;
        self.lift_into(&domain)
    }
}

impl PartialEq for DiscreteSeries {
    fn eq(&self, other: &Self) -> bool {
        self.domain.is_compatible(&other.domain)
            && self.gamma == other.gamma
            && self.ramification == other.ramification
            && self.rho == other.rho
            && self.subexp == other.subexp
            && self.alpha == other.alpha
            && self.expansion == other.expansion
    }
}

impl Eq for DiscreteSeries {}

impl std::ops::Add for &DiscreteSeries {
    type Output = Result<DiscreteSeries>;

    fn add(self, rhs: Self) -> Self::Output {
        DiscreteSeries::add(self, rhs)
    }
}

impl std::ops::Sub for &DiscreteSeries {
    type Output = Result<DiscreteSeries>;

    fn sub(self, rhs: Self) -> Self::Output {
        DiscreteSeries::sub(self, rhs)
    }
}

impl std::ops::Mul for &DiscreteSeries {
    type Output = Result<DiscreteSeries>;

    fn mul(self, rhs: Self) -> Self::Output {
        DiscreteSeries::mul(self, rhs)
    }
}

impl std::ops::Neg for &DiscreteSeries {
    type Output = DiscreteSeries;

    fn neg(self) -> Self::Output {
        DiscreteSeries::neg(self)
    }
}
