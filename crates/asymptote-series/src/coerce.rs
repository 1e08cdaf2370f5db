//! Operand coercion and the tagged union of series values.
//!
//! Every value a caller may combine with a series is one [`Operand`]; a
//! [`Domain`] converts it with an explicit rule per variant.

use asymptote_poly::DensePoly;
use asymptote_rings::Scalar;

use crate::continuous::ContinuousSeries;
use crate::discrete::DiscreteSeries;
use crate::domain::{Domain, ReferenceSet, SeriesKind};
use crate::error::{Result, SeriesError};
use crate::power_series::{PowerSeries, Precision};

/// A value that can be coerced into a series domain.
#[derive(Clone, Debug)]
pub enum Operand {
    /// A constant.
    Scalar(Scalar),
    /// A polynomial in the domain variable.
    Polynomial(DensePoly<Scalar>),
    /// A power series in the domain variable (`x` or `n^(-1)`).
    PowerSeries(PowerSeries<Scalar>),
    /// A series, possibly of another domain.
    Series(GeneralizedSeries),
}

impl From<Scalar> for Operand {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<DensePoly<Scalar>> for Operand {
    fn from(p: DensePoly<Scalar>) -> Self {
        Self::Polynomial(p)
    }
}

impl From<PowerSeries<Scalar>> for Operand {
    fn from(s: PowerSeries<Scalar>) -> Self {
        Self::PowerSeries(s)
    }
}

impl From<GeneralizedSeries> for Operand {
    fn from(s: GeneralizedSeries) -> Self {
        Self::Series(s)
    }
}

/// A continuous or discrete generalized series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneralizedSeries {
    /// A continuous series.
    Continuous(ContinuousSeries),
    /// A discrete series.
    Discrete(DiscreteSeries),
}

impl From<ContinuousSeries> for GeneralizedSeries {
    fn from(s: ContinuousSeries) -> Self {
        Self::Continuous(s)
    }
}

impl From<DiscreteSeries> for GeneralizedSeries {
    fn from(s: DiscreteSeries) -> Self {
        Self::Discrete(s)
    }
}

fn kind_mismatch(a: &GeneralizedSeries, b: &GeneralizedSeries) -> SeriesError {
    SeriesError::DomainMismatch(format!("{} and {}", a.domain(), b.domain()))
}

impl GeneralizedSeries {
    /// Returns the domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        match self {
            Self::Continuous(s) => s.domain(),
            Self::Discrete(s) => s.domain(),
        }
    }

    /// Returns the continuous series, if this is one.
    #[must_use]
    pub fn as_continuous(&self) -> Option<&ContinuousSeries> {
        match self {
            Self::Continuous(s) => Some(s),
            Self::Discrete(_) => None,
        }
    }

    /// Returns the discrete series, if this is one.
    #[must_use]
    pub fn as_discrete(&self) -> Option<&DiscreteSeries> {
        match self {
            Self::Discrete(s) => Some(s),
            Self::Continuous(_) => None,
        }
    }

    /// Returns true for the zero series.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Continuous(s) => s.is_zero(),
            Self::Discrete(s) => s.is_zero(),
        }
    }

    /// Returns true for the exact series 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        match self {
            Self::Continuous(s) => s.is_one(),
            Self::Discrete(s) => s.is_one(),
        }
    }

    /// Returns the precision of the tail or expansion.
    #[must_use]
    pub fn precision(&self) -> Precision {
        match self {
            Self::Continuous(s) => s.precision(),
            Self::Discrete(s) => s.precision(),
        }
    }

    /// Returns the ramification.
    #[must_use]
    pub fn ramification(&self) -> usize {
        match self {
            Self::Continuous(s) => s.ramification(),
            Self::Discrete(s) => s.ramification(),
        }
    }

    /// Returns true if both series are of the same kind and similar.
    #[must_use]
    pub fn similar(&self, other: &Self, reference: ReferenceSet) -> bool {
        match (self, other) {
            (Self::Continuous(a), Self::Continuous(b)) => a.similar(b, reference),
            (Self::Discrete(a), Self::Discrete(b)) => a.similar(b, reference),
            _ => false,
        }
    }

    /// Multiplies two series of the same domain.
    ///
    /// # Errors
    ///
    /// Fails if the domains differ.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Continuous(a), Self::Continuous(b)) => a.mul(b).map(Into::into),
            (Self::Discrete(a), Self::Discrete(b)) => a.mul(b).map(Into::into),
            _ => Err(kind_mismatch(self, other)),
        }
    }

    /// Adds two similar series of the same domain.
    ///
    /// # Errors
    ///
    /// Fails if the domains differ or the series are not similar.
    pub fn add(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Continuous(a), Self::Continuous(b)) => a.add(b).map(Into::into),
            (Self::Discrete(a), Self::Discrete(b)) => a.add(b).map(Into::into),
            _ => Err(kind_mismatch(self, other)),
        }
    }

    /// Subtracts two similar series of the same domain.
    ///
    /// # Errors
    ///
    /// Fails if the domains differ or the series are not similar.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.neg())
    }

    /// Negates the series.
    #[must_use]
    pub fn neg(&self) -> Self {
        match self {
            Self::Continuous(s) => s.neg().into(),
            Self::Discrete(s) => s.neg().into(),
        }
    }

    /// Inverts the series.
    ///
    /// # Errors
    ///
    /// Fails on zero and on series with logarithms.
    pub fn inverse(&self) -> Result<Self> {
        match self {
            Self::Continuous(s) => s.inverse().map(Into::into),
            Self::Discrete(s) => s.inverse().map(Into::into),
        }
    }

    /// Reinterprets the series in a domain over a larger field.
    ///
    /// # Errors
    ///
    /// Fails unless `domain` accepts the current domain.
    pub fn lift_into(&self, domain: &Domain) -> Result<Self> {
        match self {
            Self::Continuous(s) => s.lift_into(domain).map(Into::into),
            Self::Discrete(s) => s.lift_into(domain).map(Into::into),
        }
    }
}

impl Domain {
    /// Converts an operand into a series of this domain.
    ///
    /// Constants, polynomials and power series are embedded; a series is
    /// returned as is if it already belongs here, lifted if this domain's
    /// field contains its field, and rejected otherwise.
    ///
    /// # Errors
    ///
    /// Fails with a domain mismatch if the operand cannot be represented,
    /// for instance a coefficient outside the field or a series of another
    /// variable or kind.
    pub fn coerce(&self, operand: impl Into<Operand>) -> Result<GeneralizedSeries> {
        match (operand.into(), self.kind()) {
            (Operand::Scalar(c), SeriesKind::Continuous) => {
                ContinuousSeries::from_scalar(self, c).map(Into::into)
            }
            (Operand::Scalar(c), SeriesKind::Discrete) => {
                DiscreteSeries::from_scalar(self, c).map(Into::into)
            }
            (Operand::Polynomial(p), SeriesKind::Continuous) => {
                ContinuousSeries::from_polynomial(self, &p).map(Into::into)
            }
            (Operand::Polynomial(p), SeriesKind::Discrete) => {
                DiscreteSeries::from_polynomial(self, &p).map(Into::into)
            }
            (Operand::PowerSeries(s), SeriesKind::Continuous) => {
                ContinuousSeries::from_power_series(self, s, DensePoly::zero(), 1).map(Into::into)
            }
            (Operand::PowerSeries(s), SeriesKind::Discrete) => {
                DiscreteSeries::from_power_series(self, s, 1).map(Into::into)
            }
            (Operand::Series(s), _) if s.domain() == self => Ok(s),
            (Operand::Series(s), _) => s.lift_into(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use asymptote_rings::Q;

    fn q(n: i64, d: i64) -> Scalar {
        Scalar::from(Q::new(n, d))
    }

    fn sqrt2() -> Vec<Scalar> {
        vec![q(-2, 1), q(0, 1), q(1, 1)]
    }

    #[test]
    fn test_coerce_scalar() {
        let d = Domain::rationals("x", SeriesKind::Continuous).unwrap();
        assert!(d.coerce(q(1, 1)).unwrap().is_one());
        assert!(d.coerce(q(0, 1)).unwrap().is_zero());
        assert!(d.coerce(q(3, 2)).unwrap().as_continuous().is_some());
    }

    #[test]
    fn test_coerce_polynomial() {
        let d = Domain::rationals("n", SeriesKind::Discrete).unwrap();
        let p = DensePoly::new(vec![q(1, 1), q(0, 1), q(2, 1)]);
        let s = d.coerce(p).unwrap();
        let s = s.as_discrete().unwrap();
        assert_eq!(s.leading_exponent(), &q(2, 1));
        assert_eq!(s.expansion().coeff(0), PowerSeries::exact(vec![q(2, 1), q(0, 1), q(1, 1)]));
    }

    #[test]
    fn test_coerce_power_series() {
        let d = Domain::rationals("x", SeriesKind::Continuous).unwrap();
        let s = d.coerce(PowerSeries::with_precision(vec![q(0, 1), q(1, 1)], 4)).unwrap();
        let s = s.as_continuous().unwrap();
        assert_eq!(s.order(), Some(q(1, 1)));
        assert_eq!(s.precision(), Precision::Finite(3));
    }

    #[test]
    fn test_coerce_series_into_extension() {
        let d = Domain::rationals("x", SeriesKind::Continuous).unwrap();
        let e = d.base_extend(sqrt2(), "a").unwrap();

        let x = d.gen();
        let lifted = e.coerce(x.clone()).unwrap();
        assert_eq!(lifted.domain(), &e);
        assert_eq!(lifted, x);

        let err = d.coerce(lifted).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Incompatibility);
    }

    #[test]
    fn test_coerce_rejects_foreign_values() {
        let d = Domain::rationals("x", SeriesKind::Continuous).unwrap();
        let e = d.base_extend(sqrt2(), "a").unwrap();
        let a = e.field().generator().unwrap();
        assert!(d.coerce(a).is_err());

        let discrete = Domain::rationals("x", SeriesKind::Discrete).unwrap();
        assert!(d.coerce(discrete.one()).is_err());
        let other = Domain::rationals("t", SeriesKind::Continuous).unwrap();
        assert!(d.coerce(other.one()).is_err());
    }

    #[test]
    fn test_dispatch() {
        let d = Domain::rationals("x", SeriesKind::Continuous).unwrap();
        let x = d.gen();
        let one = d.one();
        let sum = x.add(&one).unwrap();
        assert_eq!(sum.sub(&x).unwrap(), one);
        assert_eq!(x.mul(&x.inverse().unwrap()).unwrap(), one);
        assert!(x.similar(&one, ReferenceSet::Integers));

        let n = Domain::rationals("n", SeriesKind::Discrete).unwrap().gen();
        assert!(!x.similar(&n, ReferenceSet::Rationals));
        assert_eq!(x.mul(&n).unwrap_err().kind(), ErrorKind::Incompatibility);
        assert_eq!(x.add(&n).unwrap_err().kind(), ErrorKind::Incompatibility);
    }
}
