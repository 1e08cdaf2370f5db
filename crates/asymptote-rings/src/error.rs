//! Errors raised while building coefficient fields.

use thiserror::Error;

/// Errors that can occur when constructing an algebraic extension.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The defining polynomial is constant.
    #[error("defining polynomial must have degree at least 1")]
    ModulusDegree,

    /// The defining polynomial's leading coefficient vanishes.
    #[error("defining polynomial has a zero leading coefficient")]
    ZeroLeadingCoefficient,

    /// A coefficient of the defining polynomial lives outside the base field.
    #[error("coefficient {0} does not belong to the base field")]
    CoefficientOutsideBase(String),

    /// Extensions need a printable generator name.
    #[error("generator name must be non-empty")]
    EmptyGeneratorName,
}
