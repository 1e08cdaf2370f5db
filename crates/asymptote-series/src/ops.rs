//! Arithmetic operations on power series.
//!
//! Provides addition, multiplication, inversion, exponentials, composition
//! and the Euler derivative `x d/dx`, all tracking precision.

use asymptote_rings::traits::{Field, Ring};

use crate::power_series::{PowerSeries, Precision};

impl<R: Ring> PowerSeries<R> {
    /// Adds two power series.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs().len().max(other.coeffs().len());
        let coeffs = (0..len).map(|n| self.coeff(n) + other.coeff(n)).collect();
        Self::new(coeffs, self.precision().min(other.precision()))
    }

    /// Negates a power series.
    #[must_use]
    pub fn neg(&self) -> Self {
        self.map(|c| -c.clone())
    }

    /// Subtracts two power series.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Scales a power series by a constant.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        self.map(|x| x.clone() * c.clone())
    }

    /// Multiplies two power series (Cauchy product).
    ///
    /// The product of `a + O(x^p)` and `b + O(x^q)` is known up to
    /// `O(x^min(p + val(b), q + val(a)))`.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let prec = self
            .precision()
            .plus(other.valuation_bound())
            .min(other.precision().plus(self.valuation_bound()));

        if self.is_zero() || other.is_zero() {
            return Self::new(Vec::new(), prec);
        }

        let full = self.coeffs().len() + other.coeffs().len() - 1;
        let len = prec.finite().map_or(full, |p| p.min(full));
        let mut coeffs = vec![R::zero(); len];

        for (i, a) in self.coeffs().iter().enumerate().take(len) {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs().iter().enumerate().take(len - i) {
                coeffs[i + j] = coeffs[i + j].clone() + a.clone() * b.clone();
            }
        }

        Self::new(coeffs, prec)
    }

    /// Raises to a non-negative integer power by repeated squaring.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    /// Computes the Euler derivative `x d/dx`: the coefficient of `x^i` is
    /// multiplied by `i`. The precision is unchanged.
    #[must_use]
    pub fn euler_derivative(&self) -> Self {
        let coeffs = self
            .coeffs()
            .iter()
            .enumerate()
            .map(|(i, c)| c.mul_by_scalar(i64::try_from(i).unwrap_or(i64::MAX)))
            .collect();
        Self::new(coeffs, self.precision())
    }

    /// Computes the composition `f(g(x))` by Horner's rule.
    ///
    /// Returns `None` unless `g` has positive valuation. The result is known
    /// up to the smaller of the two precisions.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Option<Self> {
        if !other.coeff(0).is_zero() {
            return None;
        }

        let prec = self.precision().min(other.precision());
        let mut result = Self::zero();
        for c in self.coeffs().iter().rev() {
            result = result.mul(other).add(&Self::constant(c.clone()));
            if let Precision::Finite(p) = prec {
                result = result.truncate(p);
            }
        }

        Some(Self::new(result.coeffs().to_vec(), prec))
    }
}

/// Operations that require a field (division, inversion).
impl<R: Field> PowerSeries<R> {
    /// Computes the multiplicative inverse of a unit.
    ///
    /// Returns `None` if the constant term is zero. An exact non-constant
    /// series has an infinite inverse, which is truncated at
    /// `O(x^default_prec)`.
    ///
    /// g_0 = 1/f_0, g_n = -1/f_0 * Σᵢ₌₁ⁿ f_i * g_{n-i}
    #[must_use]
    pub fn inverse(&self, default_prec: usize) -> Option<Self> {
        let f0_inv = self.coeff(0).inv()?;

        if self.is_exact() && self.coeffs().len() == 1 {
            return Some(Self::constant(f0_inv));
        }

        let n_terms = self.precision().finite_or(default_prec);
        let mut g: Vec<R> = Vec::with_capacity(n_terms);
        for n in 0..n_terms {
            if n == 0 {
                g.push(f0_inv.clone());
                continue;
            }
            let mut sum = R::zero();
            for i in 1..=n.min(self.coeffs().len().saturating_sub(1)) {
                sum = sum + self.coeffs()[i].clone() * g[n - i].clone();
            }
            g.push(-(f0_inv.clone() * sum));
        }

        Some(Self::with_precision(g, n_terms))
    }

    /// Divides two power series, `f / g = f * (1/g)`.
    #[must_use]
    pub fn div(&self, other: &Self, default_prec: usize) -> Option<Self> {
        let inv = other.inverse(default_prec)?;
        Some(self.mul(&inv))
    }

    /// Computes `exp(f)` for a series with zero constant term.
    ///
    /// Returns `None` if the constant term is nonzero. Uses the recurrence
    /// `n e_n = Σₖ₌₁ⁿ k f_k e_{n-k}` from `e' = f' e`. An exact nonzero input
    /// is truncated at `O(x^default_prec)`.
    #[must_use]
    pub fn exp(&self, default_prec: usize) -> Option<Self> {
        if !self.coeff(0).is_zero() {
            return None;
        }
        if self.is_zero() && self.is_exact() {
            return Some(Self::one());
        }

        let n_terms = self.precision().finite_or(default_prec);
        let mut e: Vec<R> = Vec::with_capacity(n_terms);
        for n in 0..n_terms {
            if n == 0 {
                e.push(R::one());
                continue;
            }
            let mut sum = R::zero();
            for k in 1..=n.min(self.coeffs().len().saturating_sub(1)) {
                let kf = self.coeffs()[k].mul_by_scalar(i64::try_from(k).ok()?);
                sum = sum + kf * e[n - k].clone();
            }
            let n_inv = R::from_i64(i64::try_from(n).ok()?).inv()?;
            e.push(sum * n_inv);
        }

        Some(Self::with_precision(e, n_terms))
    }
}

impl<R: Ring> Ring for PowerSeries<R> {
    fn zero() -> Self {
        PowerSeries::zero()
    }

    fn one() -> Self {
        PowerSeries::one()
    }

    fn is_zero(&self) -> bool {
        PowerSeries::is_zero(self)
    }

    fn is_one(&self) -> bool {
        PowerSeries::is_one(self)
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        self.map(|c| c.mul_by_scalar(n))
    }
}

impl<R: Ring> std::ops::Add for PowerSeries<R> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        PowerSeries::add(&self, &rhs)
    }
}

impl<R: Ring> std::ops::Sub for PowerSeries<R> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        PowerSeries::sub(&self, &rhs)
    }
}

impl<R: Ring> std::ops::Mul for PowerSeries<R> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        PowerSeries::mul(&self, &rhs)
    }
}

impl<R: Ring> std::ops::Neg for PowerSeries<R> {
    type Output = Self;

    fn neg(self) -> Self {
        PowerSeries::neg(&self)
    }
}
