//! Continuous generalized series.
//!
//! A continuous series represents
//!
//! ```text
//! exp(∫ E(x^(-1/r)) / x dx) · T(x^(1/r), log x)
//! ```
//!
//! where `E` is a polynomial over the coefficient field (its constant term is
//! the order `x^e0`), `T` is a polynomial in `log x` with truncated power
//! series coefficients, and `r` is the ramification.
//!
//! Every value is normalized on construction: the common valuation of the
//! tail is folded into `E` and `r` is the smallest ramification that can
//! express the series.

use asymptote_poly::DensePoly;
use asymptote_rings::{Q, Ring, Scalar};
use tracing::{debug, trace};

use crate::domain::{Domain, ReferenceSet};
use crate::error::{Result, SeriesError};
use crate::normalize::{
    lcm, poly_exponent_gcd, ratio, tail_deflate, tail_exponent_gcd, tail_from_poly, tail_inflate,
    tail_precision, tail_shift_down, tail_shift_up, tail_valuation, to_i64, LogPoly,
};
use crate::power_series::{PowerSeries, Precision};
use crate::DEFAULT_PRECISION;

/// A continuous generalized series.
#[derive(Clone, Debug)]
pub struct ContinuousSeries {
    domain: Domain,
    ramification: usize,
    exp: DensePoly<Scalar>,
    tail: LogPoly,
}

impl ContinuousSeries {
    /// Builds and normalizes a series from its raw parts.
    ///
    /// # Errors
    ///
    /// Fails if the domain is not continuous, the ramification is zero, or a
    /// coefficient lies outside the domain's field.
    pub fn new(
        domain: &Domain,
        tail: LogPoly,
        exp: DensePoly<Scalar>,
        ramification: usize,
    ) -> Result<Self> {
        if !domain.is_continuous() {
            return Err(SeriesError::Construction(format!("{domain} is not continuous")));
        }
        if ramification == 0 {
            return Err(SeriesError::Construction(
                "ramification must be a positive integer".into(),
            ));
        }
        domain.check_log_poly(&tail)?;
        domain.check_poly(&exp)?;
        Ok(Self::normalized(domain.clone(), tail, exp, ramification))
    }

    /// Builds `exp(∫ E(x^(-1/r))/x dx) · s(x^(1/r))`.
    ///
    /// # Errors
    ///
    /// See [`ContinuousSeries::new`].
    pub fn from_power_series(
        domain: &Domain,
        series: PowerSeries<Scalar>,
        exp: DensePoly<Scalar>,
        ramification: usize,
    ) -> Result<Self> {
        Self::new(domain, LogPoly::constant(series), exp, ramification)
    }

    /// Embeds a constant.
    ///
    /// # Errors
    ///
    /// See [`ContinuousSeries::new`].
    pub fn from_scalar(domain: &Domain, c: Scalar) -> Result<Self> {
        Self::new(domain, LogPoly::constant(PowerSeries::constant(c)), DensePoly::zero(), 1)
    }

    /// Embeds a polynomial in `x`.
    ///
    /// # Errors
    ///
    /// See [`ContinuousSeries::new`].
    pub fn from_polynomial(domain: &Domain, p: &DensePoly<Scalar>) -> Result<Self> {
        Self::new(domain, tail_from_poly(p), DensePoly::zero(), 1)
    }

    /// The zero series.
    #[must_use]
    pub fn zero(domain: &Domain) -> Self {
        debug_assert!(domain.is_continuous());
        Self {
            domain: domain.clone(),
            ramification: 1,
            exp: DensePoly::zero(),
            tail: LogPoly::zero(),
        }
    }

    /// The series 1.
    #[must_use]
    pub fn one(domain: &Domain) -> Self {
        debug_assert!(domain.is_continuous());
        Self {
            domain: domain.clone(),
            ramification: 1,
            exp: DensePoly::zero(),
            tail: LogPoly::one(),
        }
    }

    /// The generator `x`, stored as order 1 with tail 1.
    #[must_use]
    pub fn gen(domain: &Domain) -> Self {
        Self {
            exp: DensePoly::one(),
            ..Self::one(domain)
        }
    }

    /// Restores the invariants: valuation folded into the order, minimal
    /// ramification, canonical zero.
    fn normalized(
        domain: Domain,
        tail: LogPoly,
        exp: DensePoly<Scalar>,
        ramification: usize,
    ) -> Self {
        if tail.is_zero() {
            return Self::zero(&domain);
        }

        let mut tail = tail;
        let mut exp = exp;
        let mut ramification = ramification;

        if let Some(v) = tail_valuation(&tail).filter(|&v| v > 0) {
            exp = exp.add(&DensePoly::constant(ratio(v, ramification)));
            tail = tail_shift_down(&tail, v);
            trace!(valuation = v, ramification, "folded tail valuation into order");
        }

        let g = tail_exponent_gcd(&tail, poly_exponent_gcd(&exp, ramification));
        if g > 1 {
            exp = exp.deflate(g);
            tail = tail_deflate(&tail, g);
            debug!(from = ramification, to = ramification / g, "lowered ramification");
            ramification /= g;
        }

        Self {
            domain,
            ramification,
            exp,
            tail,
        }
    }

    /// Re-expresses the series at ramification `r * s`.
    fn inflated(&self, s: usize) -> (DensePoly<Scalar>, LogPoly) {
        (self.exp.inflate(s), tail_inflate(&self.tail, s))
    }

    /// Returns the domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Returns the ramification `r`.
    #[must_use]
    pub fn ramification(&self) -> usize {
        self.ramification
    }

    /// Returns the polynomial `E` of the exponential part.
    #[must_use]
    pub fn exponential_poly(&self) -> &DensePoly<Scalar> {
        &self.exp
    }

    /// Returns the log-polynomial `T`.
    #[must_use]
    pub fn tail_poly(&self) -> &LogPoly {
        &self.tail
    }

    /// Returns the factor `exp(∫ E(x^(-1/r))/x dx)` as a series.
    #[must_use]
    pub fn exponential_part(&self) -> Self {
        if self.is_zero() {
            return Self::one(&self.domain);
        }
        Self::normalized(self.domain.clone(), LogPoly::one(), self.exp.clone(), self.ramification)
    }

    /// Returns the factor `T(x^(1/r), log x)` as a series.
    #[must_use]
    pub fn tail(&self) -> Self {
        Self::normalized(
            self.domain.clone(),
            self.tail.clone(),
            DensePoly::zero(),
            self.ramification,
        )
    }

    /// Returns the order (the constant term of `E`), or `None` for zero.
    #[must_use]
    pub fn order(&self) -> Option<Scalar> {
        (!self.is_zero()).then(|| self.exp.coeff(0))
    }

    /// Returns true if `E` is nonzero.
    #[must_use]
    pub fn has_exponential_part(&self) -> bool {
        !self.exp.is_zero()
    }

    /// Returns true if the tail has positive degree in `log x`.
    #[must_use]
    pub fn has_logarithms(&self) -> bool {
        self.tail.degree() > 0
    }

    /// Returns the degree of the tail in `log x`.
    #[must_use]
    pub fn log_degree(&self) -> usize {
        self.tail.degree()
    }

    /// Returns the smallest precision among the tail coefficients.
    #[must_use]
    pub fn precision(&self) -> Precision {
        tail_precision(&self.tail)
    }

    /// Returns true for the zero series.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.tail.is_zero()
    }

    /// Returns true for the exact series 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.exp.is_zero() && self.ramification == 1 && self.tail == LogPoly::one()
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
        let (ea, ta) = self.inflated(ram / self.ramification);
        let (eb, tb) = other.inflated(ram / other.ramification);
        Ok(Self::normalized(self.domain.clone(), ta.mul(&tb), ea.add(&eb), ram))
    }

    /// Returns true if `ram · (E_self − E_other)` is a constant in `reference`,
    /// at the common ramification `ram`.
    #[must_use]
    pub fn similar(&self, other: &Self, reference: ReferenceSet) -> bool {
        if self.domain != other.domain {
            return false;
        }
        let ram = lcm(self.ramification, other.ramification);
        let diff = self
            .exp
            .inflate(ram / self.ramification)
            .sub(&other.exp.inflate(ram / other.ramification));
        diff.is_constant() && reference.contains(&diff.coeff(0).mul_by_scalar(to_i64(ram)))
    }

    /// Adds two similar series.
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

        let ram = lcm(self.ramification, other.ramification);
        let (ea, ta) = self.inflated(ram / self.ramification);
        let (eb, tb) = other.inflated(ram / other.ramification);

        let d = (ea.coeff(0) - eb.coeff(0)).mul_by_scalar(to_i64(ram));
        let d = d.as_rational().and_then(Q::to_i64).ok_or(SeriesError::NotSimilar)?;

        // x^(d/ram) moves onto the tail of the operand with the larger order
        let (high, low, low_exp) = if d >= 0 { (ta, tb, eb) } else { (tb, ta, ea) };
        let shift = usize::try_from(d.unsigned_abs()).map_err(|_| SeriesError::NotSimilar)?;
        let tail = tail_shift_up(&high, shift).add(&low);

        Ok(Self::normalized(self.domain.clone(), tail, low_exp, ram))
    }

    /// Subtracts two similar series.
    ///
    /// # Errors
    ///
    /// See [`ContinuousSeries::add`].
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.neg())
    }

    /// Negates the series.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            tail: self.tail.neg(),
            ..self.clone()
        }
    }

    /// Inverts the series, truncating exact tails at [`DEFAULT_PRECISION`].
    ///
    /// # Errors
    ///
    /// Fails on zero and on series with logarithms.
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with_precision(DEFAULT_PRECISION)
    }

    /// Inverts the series, truncating exact tails at `O(x^(prec/r))`.
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

        let inv = self
            .tail
            .coeff(0)
            .inverse(prec)
            .ok_or(SeriesError::DivisionByZero)?;
        Ok(Self::normalized(
            self.domain.clone(),
            LogPoly::constant(inv),
            self.exp.neg(),
            self.ramification,
        ))
    }

    /// Differentiates with respect to `x`.
    ///
    /// The product rule splits the derivative into `E(x^(-1/r))/x · T` and
    /// `x^(-1) · (θT / r + ∂T/∂log)` where `θ = t d/dt` acts on the
    /// coefficients in `t = x^(1/r)`.
    ///
    /// # Errors
    ///
    /// Propagates failures of the final addition, which cannot occur for
    /// normalized inputs.
    pub fn derivative(&self) -> Result<Self> {
        if self.is_zero() {
            return Ok(self.clone());
        }
        let r = self.ramification;

        let outer = if self.exp.is_zero() {
            Self::zero(&self.domain)
        } else {
            // E(x^(-1/r)) = x^(-deg/r) · rev(E)(x^(1/r))
            let rev = PowerSeries::from_poly(&self.exp.reverse());
            let tail = self.tail.map_coeffs(|c| c.mul(&rev));
            let lowered = ratio(self.exp.degree(), r) + Scalar::one();
            let exp = self.exp.sub(&DensePoly::constant(lowered));
            Self::normalized(self.domain.clone(), tail, exp, r)
        };

        let r_inv = ratio(1, r);
        let theta = self.tail.map_coeffs(|c| c.euler_derivative().scale(&r_inv));
        let inner_tail = theta.add(&self.tail.derivative());
        let inner_exp = self.exp.sub(&DensePoly::one());
        let inner = Self::normalized(self.domain.clone(), inner_tail, inner_exp, r);

        outer.add(&inner)
    }

    /// Substitutes `x -> x^e` for a positive rational `e = a/b`.
    ///
    /// # Errors
    ///
    /// Fails if `e` is not a positive rational number.
    pub fn substitute(&self, e: &Scalar) -> Result<Self> {
        let invalid = || SeriesError::InvalidExponent(e.to_string());
        let q = e.as_rational().filter(|q| q.is_positive()).ok_or_else(invalid)?;
        let a = q
            .numerator_i64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(invalid)?;
        let b = q.denominator_usize().ok_or_else(invalid)?;

        if self.is_zero() {
            return Ok(self.clone());
        }

        let exp = self.exp.inflate(a).scale(e);
        let mut e_pow = Scalar::one();
        let mut coeffs = Vec::with_capacity(self.tail.coeffs().len());
        for c in self.tail.coeffs() {
            coeffs.push(c.inflate(a).scale(&e_pow));
            e_pow = e_pow * e.clone();
        }

        Ok(Self::normalized(
            self.domain.clone(),
            LogPoly::new(coeffs),
            exp,
            b * self.ramification,
        ))
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

/// Series over nested fields compare after lifting into the larger one.
impl PartialEq for ContinuousSeries {
    fn eq(&self, other: &Self) -> bool {
        self.domain.is_compatible(&other.domain)
            && self.ramification == other.ramification
            && self.exp == other.exp
            && self.tail == other.tail
    }
}

impl Eq for ContinuousSeries {}

impl std::ops::Add for &ContinuousSeries {
    type Output = Result<ContinuousSeries>;

    fn add(self, rhs: Self) -> Self::Output {
        ContinuousSeries::add(self, rhs)
    }
}

impl std::ops::Sub for &ContinuousSeries {
    type Output = Result<ContinuousSeries>;

    fn sub(self, rhs: Self) -> Self::Output {
        ContinuousSeries::sub(self, rhs)
    }
}

impl std::ops::Mul for &ContinuousSeries {
    type Output = Result<ContinuousSeries>;

    fn mul(self, rhs: Self) -> Self::Output {
        ContinuousSeries::mul(self, rhs)
    }
}

impl std::ops::Neg for &ContinuousSeries {
    type Output = ContinuousSeries;

    fn neg(self) -> Self::Output {
        ContinuousSeries::neg(self)
    }
}
