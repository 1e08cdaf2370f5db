//! Truncated power series with explicit precision.
//!
//! A [`PowerSeries`] stores the coefficients of `x^0, ..., x^(p-1)` together
//! with a [`Precision`] recording the `O(x^p)` error term. Exact series (such
//! as polynomials) carry [`Precision::Infinite`].

use std::fmt;

use asymptote_poly::DensePoly;
use asymptote_rings::traits::Ring;

/// The truncation order of a power series.
///
/// `Finite(p)` means the series is known modulo `x^p`. The derived ordering
/// places every finite precision below `Infinite`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    /// Known up to `O(x^p)`.
    Finite(usize),
    /// Exact.
    Infinite,
}

impl Precision {
    /// Returns the finite bound, if any.
    #[must_use]
    pub fn finite(self) -> Option<usize> {
        match self {
            Self::Finite(p) => Some(p),
            Self::Infinite => None,
        }
    }

    /// Returns true for a finite precision.
    #[must_use]
    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Returns the finite bound, or `fallback` for exact series.
    #[must_use]
    pub fn finite_or(self, fallback: usize) -> usize {
        self.finite().unwrap_or(fallback)
    }

    /// Precision after multiplying by `x^k`.
    #[must_use]
    pub fn raise(self, k: usize) -> Self {
        match self {
            Self::Finite(p) => Self::Finite(p + k),
            Self::Infinite => Self::Infinite,
        }
    }

    /// Precision after dividing by `x^k`.
    #[must_use]
    pub fn lower(self, k: usize) -> Self {
        match self {
            Self::Finite(p) => Self::Finite(p.saturating_sub(k)),
            Self::Infinite => Self::Infinite,
        }
    }

    /// Precision after substituting `x -> x^q`.
    #[must_use]
    pub fn scale(self, q: usize) -> Self {
        match self {
            Self::Finite(p) => Self::Finite(p * q),
            Self::Infinite => Self::Infinite,
        }
    }

    /// The sum of two precisions, as used by the product rule.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a + b),
            _ => Self::Infinite,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(p) => write!(f, "O(x^{p})"),
            Self::Infinite => write!(f, "exact"),
        }
    }
}

/// A truncated power series over a ring.
///
/// Coefficients at or beyond the precision are never stored, and trailing
/// zeros are removed, so the zero series has no stored coefficients.
///
/// Equality compares coefficients *and* precision: `1 + O(x^3)` and
/// `1 + O(x^4)` differ. [`Ring::is_zero`] and [`Ring::is_one`] only look at
/// the coefficients.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PowerSeries<R: Ring> {
    coeffs: Vec<R>,
    prec: Precision,
}

impl<R: Ring> PowerSeries<R> {
    /// Creates a series from coefficients and a precision.
    ///
    /// Coefficients at or beyond the precision are discarded.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>, prec: Precision) -> Self {
        if let Precision::Finite(p) = prec {
            coeffs.truncate(p);
        }
        while coeffs.last().is_some_and(R::is_zero) {
            coeffs.pop();
        }
        Self { coeffs, prec }
    }

    /// Creates an exact series (a polynomial).
    #[must_use]
    pub fn exact(coeffs: Vec<R>) -> Self {
        Self::new(coeffs, Precision::Infinite)
    }

    /// Creates a series truncated at `O(x^p)`.
    #[must_use]
    pub fn with_precision(coeffs: Vec<R>, p: usize) -> Self {
        Self::new(coeffs, Precision::Finite(p))
    }

    /// Embeds a polynomial as an exact series.
    #[must_use]
    pub fn from_poly(p: &DensePoly<R>) -> Self {
        Self::exact(p.coeffs().to_vec())
    }

    /// The exact zero series.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: Vec::new(),
            prec: Precision::Infinite,
        }
    }

    /// The exact series 1.
    #[must_use]
    pub fn one() -> Self {
        Self::constant(R::one())
    }

    /// An exact constant series.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::exact(vec![c])
    }

    /// The series `O(x^p)`.
    #[must_use]
    pub fn big_oh(p: usize) -> Self {
        Self {
            coeffs: Vec::new(),
            prec: Precision::Finite(p),
        }
    }

    /// The exact monomial `c x^n`.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::exact(coeffs)
    }

    /// Returns the precision.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.prec
    }

    /// Returns true if the series is exact.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.prec == Precision::Infinite
    }

    /// Returns the coefficient of `x^n` (zero if not stored).
    #[must_use]
    pub fn coeff(&self, n: usize) -> R {
        self.coeffs.get(n).cloned().unwrap_or_else(R::zero)
    }

    /// Returns the stored coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Returns true if every known coefficient vanishes.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns true if the known part is exactly 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    /// Returns the exponents with a nonzero coefficient, ascending.
    pub fn exponents(&self) -> impl Iterator<Item = usize> + '_ {
        self.coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, _)| i)
    }

    /// Returns the index of the first nonzero coefficient, or `None` if every
    /// known coefficient vanishes.
    #[must_use]
    pub fn valuation(&self) -> Option<usize> {
        self.exponents().next()
    }

    /// The valuation, or the precision when no coefficient is known to be
    /// nonzero.
    #[must_use]
    pub fn valuation_bound(&self) -> Precision {
        self.valuation().map_or(self.prec, Precision::Finite)
    }

    /// Truncates to `O(x^n)` (keeping the current precision if it is lower).
    #[must_use]
    pub fn truncate(&self, n: usize) -> Self {
        Self::new(self.coeffs.clone(), self.prec.min(Precision::Finite(n)))
    }

    /// Multiplies by `x^k`.
    #[must_use]
    pub fn shift_up(&self, k: usize) -> Self {
        if k == 0 {
            return self.clone();
        }
        let mut coeffs = vec![R::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Self::new(coeffs, self.prec.raise(k))
    }

    /// Divides by `x^k`.
    ///
    /// Coefficients below `x^k` must vanish.
    #[must_use]
    pub fn shift_down(&self, k: usize) -> Self {
        debug_assert!(
            self.valuation_bound() >= Precision::Finite(k),
            "series is not divisible by x^{k}"
        );
        let coeffs = self.coeffs.iter().skip(k).cloned().collect();
        Self::new(coeffs, self.prec.lower(k))
    }

    /// Substitutes `x -> x^q`.
    ///
    /// # Panics
    ///
    /// Panics if `q` is zero.
    #[must_use]
    pub fn inflate(&self, q: usize) -> Self {
        assert!(q > 0, "inflation factor must be positive");
        if q == 1 || self.coeffs.is_empty() {
            return Self::new(self.coeffs.clone(), self.prec.scale(q));
        }
        let mut coeffs = vec![R::zero(); (self.coeffs.len() - 1) * q + 1];
        for (i, c) in self.coeffs.iter().enumerate() {
            coeffs[i * q] = c.clone();
        }
        Self::new(coeffs, self.prec.scale(q))
    }

    /// Substitutes `x^q -> x`, the inverse of [`inflate`](Self::inflate).
    ///
    /// Every exponent with a nonzero coefficient, and a finite precision,
    /// must be divisible by `q`.
    ///
    /// # Panics
    ///
    /// Panics if `q` is zero.
    #[must_use]
    pub fn deflate(&self, q: usize) -> Self {
        assert!(q > 0, "deflation factor must be positive");
        debug_assert!(self.exponents().all(|e| e % q == 0));
        let prec = match self.prec {
            Precision::Finite(p) => {
                debug_assert!(p % q == 0, "precision {p} not divisible by {q}");
                Precision::Finite(p / q)
            }
            Precision::Infinite => Precision::Infinite,
        };
        Self::new(self.coeffs.iter().step_by(q).cloned().collect(), prec)
    }

    /// Applies `f` to every coefficient, keeping the precision.
    #[must_use]
    pub fn map<S: Ring>(&self, f: impl FnMut(&R) -> S) -> PowerSeries<S> {
        PowerSeries::new(self.coeffs.iter().map(f).collect(), self.prec)
    }

    /// Converts the known part to a polynomial, dropping the error term.
    #[must_use]
    pub fn to_poly(&self) -> DensePoly<R> {
        DensePoly::new(self.coeffs.clone())
    }
}

impl<R: Ring + fmt::Display> fmt::Display for PowerSeries<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            terms.push(match i {
                0 => format!("{c}"),
                1 => format!("{c}*x"),
                _ => format!("{c}*x^{i}"),
            });
        }
        if let Precision::Finite(p) = self.prec {
            terms.push(format!("O(x^{p})"));
        }
        if terms.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", terms.join(" + "))
        }
    }
}
