//! Series domains and their process-wide registry.
//!
//! A [`Domain`] fixes the coefficient field, the variable name and the kind
//! of series. Domains are interned: building the same domain twice returns
//! handles to one shared descriptor. Equality is structural, so interning
//! only saves allocations.

use std::fmt;
use std::sync::{Arc, LazyLock};

use asymptote_poly::DensePoly;
use asymptote_rings::{CoefficientField, Scalar};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::coerce::GeneralizedSeries;
use crate::continuous::ContinuousSeries;
use crate::discrete::DiscreteSeries;
use crate::error::{Result, SeriesError};
use crate::normalize::LogPoly;
use crate::power_series::PowerSeries;
use crate::LOG_SYMBOL;

/// The two families of generalized series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Expansions at a singular point of a differential equation.
    Continuous,
    /// Expansions at infinity of solutions of a recurrence.
    Discrete,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continuous => write!(f, "continuous"),
            Self::Discrete => write!(f, "discrete"),
        }
    }
}

/// The set an exponent difference must lie in for two series to be similar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReferenceSet {
    /// Differences must be integers (the default, required for addition).
    #[default]
    Integers,
    /// Differences may be any rational number.
    Rationals,
}

impl ReferenceSet {
    /// Returns true if `s` lies in this set.
    #[must_use]
    pub fn contains(self, s: &Scalar) -> bool {
        match self {
            Self::Integers => s.is_integer(),
            Self::Rationals => s.as_rational().is_some(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct DomainData {
    field: CoefficientField,
    var: String,
    kind: SeriesKind,
}

/// A handle to an interned series domain.
#[derive(Clone, PartialEq, Eq)]
pub struct Domain(Arc<DomainData>);

#[derive(Clone, PartialEq, Eq, Hash)]
struct DomainKey {
    field: usize,
    var: String,
    kind: SeriesKind,
}

static REGISTRY: LazyLock<RwLock<FxHashMap<DomainKey, Domain>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

impl Domain {
    /// Returns the domain of `kind` series in `var` over `field`.
    ///
    /// # Errors
    ///
    /// Fails with a construction error if `var` is empty or contains the
    /// reserved log token.
    pub fn new(field: CoefficientField, var: &str, kind: SeriesKind) -> Result<Self> {
        if var.is_empty() {
            return Err(SeriesError::Construction("variable name must be non-empty".into()));
        }
        if var.contains(LOG_SYMBOL) {
            return Err(SeriesError::Construction(format!(
                "variable name {var} contains the reserved token {LOG_SYMBOL}"
            )));
        }

        let key = DomainKey {
            field: field.id(),
            var: var.to_string(),
            kind,
        };

        if let Some(domain) = REGISTRY.read().get(&key) {
            return Ok(domain.clone());
        }

        let mut registry = REGISTRY.write();
        let domain = registry
            .entry(key)
            .or_insert_with(|| {
                debug!(%field, var, %kind, "registered series domain");
                Self(Arc::new(DomainData {
                    field,
                    var: var.to_string(),
                    kind,
                }))
            })
            .clone();
        Ok(domain)
    }

    /// Returns the domain of `kind` series in `var` over Q.
    ///
    /// # Errors
    ///
    /// See [`Domain::new`].
    pub fn rationals(var: &str, kind: SeriesKind) -> Result<Self> {
        Self::new(CoefficientField::Rationals, var, kind)
    }

    /// Returns the coefficient field.
    #[must_use]
    pub fn field(&self) -> &CoefficientField {
        &self.0.field
    }

    /// Returns the variable name.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.0.var
    }

    /// Returns the kind of series.
    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.0.kind
    }

    /// Returns true for continuous series domains.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        self.0.kind == SeriesKind::Continuous
    }

    /// Returns true for discrete series domains.
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        self.0.kind == SeriesKind::Discrete
    }

    /// Returns the same family of series over `field`, which must contain
    /// the current field.
    ///
    /// # Errors
    ///
    /// Fails if `field` does not contain the current coefficient field.
    pub fn with_field(&self, field: CoefficientField) -> Result<Self> {
        if !field.contains(self.field()) {
            return Err(SeriesError::DomainMismatch(format!(
                "{field} does not contain {}",
                self.field()
            )));
        }
        Self::new(field, self.var(), self.kind())
    }

    /// Returns the same family of series over the field extended by a root
    /// of `modulus`.
    ///
    /// # Errors
    ///
    /// Fails if the extension is invalid.
    pub fn base_extend(&self, modulus: Vec<Scalar>, name: &str) -> Result<Self> {
        let field = self.field().extension(modulus, name)?;
        self.with_field(field)
    }

    /// Returns true if series over `other` can be reinterpreted in this domain.
    #[must_use]
    pub fn accepts(&self, other: &Self) -> bool {
        self.var() == other.var()
            && self.kind() == other.kind()
            && self.field().contains(other.field())
    }

    /// Returns true if values of the two domains can be compared.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.accepts(other) || other.accepts(self)
    }

    /// Returns an error unless `other` is this domain.
    pub(crate) fn check_same(&self, other: &Self) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(SeriesError::DomainMismatch(format!("{self} and {other}")))
        }
    }

    /// Returns an error unless `s` lies in the coefficient field.
    pub(crate) fn check_scalar(&self, s: &Scalar) -> Result<()> {
        if s.lies_in(self.field()) {
            Ok(())
        } else {
            Err(SeriesError::DomainMismatch(format!(
                "coefficient {s} is not in {}",
                self.field()
            )))
        }
    }

    pub(crate) fn check_poly(&self, p: &DensePoly<Scalar>) -> Result<()> {
        p.coeffs().iter().try_for_each(|c| self.check_scalar(c))
    }

    pub(crate) fn check_series(&self, s: &PowerSeries<Scalar>) -> Result<()> {
        s.coeffs().iter().try_for_each(|c| self.check_scalar(c))
    }

    pub(crate) fn check_log_poly(&self, t: &LogPoly) -> Result<()> {
        t.coeffs().iter().try_for_each(|c| self.check_series(c))
    }

    /// Returns the zero series.
    #[must_use]
    pub fn zero(&self) -> GeneralizedSeries {
        match self.kind() {
            SeriesKind::Continuous => ContinuousSeries::zero(self).into(),
            SeriesKind::Discrete => DiscreteSeries::zero(self).into(),
        }
    }

    /// Returns the series 1.
    #[must_use]
    pub fn one(&self) -> GeneralizedSeries {
        match self.kind() {
            SeriesKind::Continuous => ContinuousSeries::one(self).into(),
            SeriesKind::Discrete => DiscreteSeries::one(self).into(),
        }
    }

    /// Returns the generator: `x` for continuous domains, `n` for discrete ones.
    #[must_use]
    pub fn gen(&self) -> GeneralizedSeries {
        match self.kind() {
            SeriesKind::Continuous => ContinuousSeries::gen(self).into(),
            SeriesKind::Discrete => DiscreteSeries::gen(self).into(),
        }
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("field", &self.field().to_string())
            .field("var", &self.var())
            .field("kind", &self.kind())
            .finish()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} generalized series in {} over {}",
            self.kind(),
            self.var(),
            self.field()
        )
    }
}
