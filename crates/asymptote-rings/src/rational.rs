//! The field of rational numbers Q.
//!
//! Rationals are always stored in lowest terms with a positive denominator.

use dashu::base::{Abs, Inverse, Signed as DashuSigned};
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::traits::{Field, Ring};

/// An arbitrary precision rational number.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Q(RBig);

impl Q {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        let q = RBig::from_parts(IBig::from(num), UBig::from(den.unsigned_abs()));
        if den < 0 {
            Self(-q)
        } else {
            Self(q)
        }
    }

    /// The rational zero.
    #[must_use]
    pub fn zero() -> Self {
        Self(RBig::ZERO)
    }

    /// The rational one.
    #[must_use]
    pub fn one() -> Self {
        Self(RBig::ONE)
    }

    /// Returns true if this is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == RBig::ZERO
    }

    /// Returns true if this is one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }

    /// Creates a rational from an integer.
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(RBig::from(n))
    }

    /// Returns the numerator as an `i64`, if it fits.
    #[must_use]
    pub fn numerator_i64(&self) -> Option<i64> {
        self.0.numerator().clone().try_into().ok()
    }

    /// Returns the denominator as a `usize`, if it fits.
    #[must_use]
    pub fn denominator_usize(&self) -> Option<usize> {
        self.0.denominator().clone().try_into().ok()
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        *self.0.denominator() == UBig::ONE
    }

    /// Converts to an `i64` if this is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.numerator_i64()
        } else {
            None
        }
    }

    /// Returns the smallest integer not less than `self`, if it fits in an `i64`.
    #[must_use]
    pub fn ceil_i64(&self) -> Option<i64> {
        let num = self.numerator_i64()?;
        let den = i64::try_from(self.denominator_usize()?).ok()?;
        let floor = num.div_euclid(den);
        Some(if num.rem_euclid(den) == 0 { floor } else { floor + 1 })
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        DashuSigned::is_positive(&self.0)
    }

    /// Returns a reference to the inner `dashu::RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }
}

impl Zero for Q {
    fn zero() -> Self {
        Q::zero()
    }

    fn is_zero(&self) -> bool {
        Q::is_zero(self)
    }
}

impl One for Q {
    fn one() -> Self {
        Q::one()
    }

    fn is_one(&self) -> bool {
        Q::is_one(self)
    }
}

impl Ring for Q {
    fn zero() -> Self {
        Q::zero()
    }

    fn one() -> Self {
        Q::one()
    }

    fn is_zero(&self) -> bool {
        Q::is_zero(self)
    }

    fn is_one(&self) -> bool {
        Q::is_one(self)
    }

    fn from_i64(n: i64) -> Self {
        Self::from_integer(n)
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        Self(self.0.clone() * RBig::from(n))
    }
}

impl Field for Q {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.recip())
        }
    }
}

impl Add for Q {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Q {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Q {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Div for Q {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Neg for Q {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Q {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<RBig> for Q {
    fn from(value: RBig) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q({})", self.0)
    }
}

impl fmt::Display for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
