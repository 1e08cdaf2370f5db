//! Dense univariate polynomials.
//!
//! Degrees stay small throughout series arithmetic (exponential parts and
//! log-degrees rarely exceed a handful of terms), so multiplication is
//! schoolbook.

use asymptote_rings::traits::Ring;

/// A dense univariate polynomial.
///
/// Coefficients are stored in ascending degree order with trailing zeros
/// removed. The zero polynomial is stored as a single zero coefficient.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DensePoly<R: Ring> {
    /// Coefficients in ascending degree order.
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Creates a new polynomial from coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(R::is_zero) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }

        Self { coeffs }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![R::zero()],
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![R::one()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Returns the degree of the polynomial (0 for the zero polynomial).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns true if this is the constant polynomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    /// Returns true if the polynomial has degree 0.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        &self.coeffs[self.coeffs.len() - 1]
    }

    /// Returns the coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Consumes the polynomial, returning its coefficients.
    #[must_use]
    pub fn into_coeffs(self) -> Vec<R> {
        self.coeffs
    }

    /// Returns the exponents with a nonzero coefficient, ascending.
    pub fn exponents(&self) -> impl Iterator<Item = usize> + '_ {
        self.coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, _)| i)
    }

    /// Returns the smallest exponent with a nonzero coefficient, or `None`
    /// for the zero polynomial.
    #[must_use]
    pub fn valuation(&self) -> Option<usize> {
        self.exponents().next()
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Substitutes another polynomial for x using Horner's method.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for c in self.coeffs.iter().rev() {
            result = result.mul(other).add(&Self::constant(c.clone()));
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            let a = self.coeffs.get(i).cloned().unwrap_or_else(R::zero);
            let b = other.coeffs.get(i).cloned().unwrap_or_else(R::zero);
            result.push(a + b);
        }

        Self::new(result)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let n = self.coeffs.len();
        let m = other.coeffs.len();
        let mut result = vec![R::zero(); n + m - 1];

        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].clone() + a.clone() * b.clone();
            }
        }

        Self::new(result)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self::new(self.coeffs.iter().map(|x| x.clone() * c.clone()).collect())
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return Self::zero();
        }

        let result = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c.mul_by_scalar(to_i64(i)))
            .collect();

        Self::new(result)
    }

    /// Shifts the polynomial by multiplying by x^n.
    #[must_use]
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }

        let mut coeffs = vec![R::zero(); n];
        coeffs.extend(self.coeffs.iter().cloned());
        Self::new(coeffs)
    }

    /// Reverses the coefficient order: `x^deg * p(1/x)`.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::new(self.coeffs.iter().rev().cloned().collect())
    }

    /// Substitutes `x -> x^q`.
    ///
    /// # Panics
    ///
    /// Panics if `q` is zero.
    #[must_use]
    pub fn inflate(&self, q: usize) -> Self {
        assert!(q > 0, "inflation factor must be positive");
        if q == 1 || self.is_zero() {
            return self.clone();
        }

        let mut coeffs = vec![R::zero(); self.degree() * q + 1];
        for (i, c) in self.coeffs.iter().enumerate() {
            coeffs[i * q] = c.clone();
        }
        Self::new(coeffs)
    }

    /// Substitutes `x^q -> x`, the inverse of [`inflate`](Self::inflate).
    ///
    /// Every exponent with a nonzero coefficient must be divisible by `q`.
    ///
    /// # Panics
    ///
    /// Panics if `q` is zero.
    #[must_use]
    pub fn deflate(&self, q: usize) -> Self {
        assert!(q > 0, "deflation factor must be positive");
        debug_assert!(self.exponents().all(|e| e % q == 0), "exponent not divisible by {q}");
        if q == 1 {
            return self.clone();
        }
        Self::new(self.coeffs.iter().step_by(q).cloned().collect())
    }

    /// Applies `f` to every coefficient.
    #[must_use]
    pub fn map_coeffs<S: Ring>(&self, mut f: impl FnMut(&R) -> S) -> DensePoly<S> {
        DensePoly::new(self.coeffs.iter().map(|c| f(c)).collect())
    }

    /// Applies `f` to every coefficient together with its exponent.
    #[must_use]
    pub fn map_coeffs_indexed<S: Ring>(&self, mut f: impl FnMut(usize, &R) -> S) -> DensePoly<S> {
        DensePoly::new(self.coeffs.iter().enumerate().map(|(i, c)| f(i, c)).collect())
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }
        if n == 1 {
            return self.clone();
        }

        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            exp >>= 1;
        }

        result
    }
}

fn to_i64(i: usize) -> i64 {
    i64::try_from(i).unwrap_or(i64::MAX)
}

impl<R: Ring + std::fmt::Display> std::fmt::Display for DensePoly<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }

            let c = c.to_string();
            // Compound coefficients, such as series, need grouping
            let c = if i > 0 && c.contains(' ') { format!("({c})") } else { c };
            let term = match i {
                0 => c,
                1 => format!("{c}*x"),
                _ => format!("{c}*x^{i}"),
            };
            terms.push(term);
        }

        write!(f, "{}", terms.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asymptote_rings::rational::Q;

    fn poly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::new(coeffs.iter().copied().map(Q::from_integer).collect())
    }

    #[test]
    fn test_basic_ops() {
        let p = poly(&[1, 2]); // 1 + 2x
        let q = poly(&[3, 4]); // 3 + 4x

        let sum = p.add(&q);
        assert_eq!(sum.coeff(0), Q::from_integer(4));
        assert_eq!(sum.coeff(1), Q::from_integer(6));
    }

    #[test]
    fn test_mul() {
        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x^2
        let prod = poly(&[1, 2]).mul(&poly(&[3, 4]));
        assert_eq!(prod, poly(&[3, 10, 8]));
    }

    #[test]
    fn test_eval() {
        // p(2) = 1 + 4 + 12 = 17
        let p = poly(&[1, 2, 3]);
        assert_eq!(p.eval(&Q::from_integer(2)), Q::from_integer(17));
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), 1);
        assert!(poly(&[0, 0]).is_zero());
    }

    #[test]
    fn test_valuation_and_exponents() {
        let p = poly(&[0, 0, 3, 0, 5]);
        assert_eq!(p.valuation(), Some(2));
        assert_eq!(p.exponents().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(DensePoly::<Q>::zero().valuation(), None);
    }

    #[test]
    fn test_reverse() {
        assert_eq!(poly(&[1, 2, 3]).reverse(), poly(&[3, 2, 1]));
        // 2x + 3x^2 reverses to 3 + 2x
        assert_eq!(poly(&[0, 2, 3]).reverse(), poly(&[3, 2]));
    }

    #[test]
    fn test_inflate_deflate() {
        let p = poly(&[1, 1, 1]);
        let inflated = p.inflate(3);
        assert_eq!(inflated, poly(&[1, 0, 0, 1, 0, 0, 1]));
        assert_eq!(inflated.deflate(3), p);
    }

    #[test]
    fn test_compose() {
        // p(x) = 1 + x^2, p(x + 1) = 2 + 2x + x^2
        let p = poly(&[1, 0, 1]);
        assert_eq!(p.compose(&poly(&[1, 1])), poly(&[2, 2, 1]));
    }

    #[test]
    fn test_derivative() {
        assert_eq!(poly(&[5, 1, 1, 1]).derivative(), poly(&[1, 2, 3]));
        assert!(poly(&[7]).derivative().is_zero());
    }

    #[test]
    fn test_map_coeffs_indexed() {
        // x * d/dx
        let p = poly(&[4, 1, 1]);
        let theta = p.map_coeffs_indexed(|i, c| c.mul_by_scalar(i64::try_from(i).unwrap()));
        assert_eq!(theta, poly(&[0, 1, 2]));
    }

    #[test]
    fn test_shift() {
        assert_eq!(poly(&[1, 2]).shift(2), poly(&[0, 0, 1, 2]));
    }

    #[test]
    fn test_display() {
        assert_eq!(poly(&[1, 0, 3]).to_string(), "1 + 3*x^2");
        assert_eq!(poly(&[0, -2]).to_string(), "-2*x");
        assert_eq!(DensePoly::<Q>::zero().to_string(), "0");
    }
}
