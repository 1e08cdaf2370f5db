//! Errors raised by generalized series operations.

use asymptote_rings::FieldError;
use thiserror::Error;

/// The broad class an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid arguments to a constructor or factory.
    Construction,
    /// An operation between series that cannot be combined.
    Incompatibility,
    /// Inversion of zero or of a logarithmic series.
    NonInvertible,
    /// An argument outside an operation's domain.
    Domain,
    /// A precision request that cannot be honored.
    Precision,
}

/// Errors that can occur in generalized series arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("invalid construction: {0}")]
    Construction(String),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("series belong to incompatible domains: {0}")]
    DomainMismatch(String),

    #[error("cannot add series that are not similar")]
    NotSimilar,

    #[error("division by zero")]
    DivisionByZero,

    #[error("series with logarithmic terms are not invertible")]
    LogarithmicInverse,

    #[error("exponent must be a positive rational number, got {0}")]
    InvalidExponent(String),

    #[error("shift must be non-negative, got {0}")]
    NegativeShift(i64),

    #[error("unsupported argument: {0}")]
    UnsupportedArgument(String),

    #[error("insufficient precision: {0}")]
    InsufficientPrecision(String),
}

impl SeriesError {
    /// Returns the class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Construction(_) | Self::Field(_) => ErrorKind::Construction,
            Self::DomainMismatch(_) | Self::NotSimilar => ErrorKind::Incompatibility,
            Self::DivisionByZero | Self::LogarithmicInverse => ErrorKind::NonInvertible,
            Self::InvalidExponent(_) | Self::NegativeShift(_) | Self::UnsupportedArgument(_) => {
                ErrorKind::Domain
            }
            Self::InsufficientPrecision(_) => ErrorKind::Precision,
        }
    }
}

/// Result type for series operations.
pub type Result<T> = std::result::Result<T, SeriesError>;
