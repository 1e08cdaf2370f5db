//! Generalized series for the asymptote workspace.
//!
//! This crate provides:
//! - [`PowerSeries`]: truncated power series with explicit [`Precision`]
//! - [`Domain`]: interned descriptors of a series family
//! - [`ContinuousSeries`]: `exp(∫ E(x^(-1/r))/x dx) · T(x^(1/r), log x)`,
//!   the local solutions of linear differential equations
//! - [`DiscreteSeries`]: `(n/e)^(γn) ρ^n exp(s(n^(1/r))) n^α · P(n^(-1/r), log n)`,
//!   the asymptotic solutions of linear recurrences
//! - [`shift_quotient()`]: the asymptotic ratio `f(n+i)/f(n)`
//!
//! # Key algorithms
//!
//! - Normalization: valuation folding and ramification minimization
//! - Similarity: the test that gates addition
//! - Shift quotients: generalized binomial and exponential-of-series expansions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coerce;
pub mod continuous;
pub mod discrete;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod ops;
pub mod power_series;
pub mod shift_quotient;

#[cfg(test)]
mod proptests;

pub use coerce::{GeneralizedSeries, Operand};
pub use continuous::ContinuousSeries;
pub use discrete::{DiscreteComponents, DiscreteSeries};
pub use domain::{Domain, ReferenceSet, SeriesKind};
pub use error::{ErrorKind, Result, SeriesError};
pub use normalize::LogPoly;
pub use power_series::{PowerSeries, Precision};
pub use shift_quotient::{generalized_binomial, shift_quotient, GrowthParameters, ShiftQuotient};

/// Truncation order used when an exact series has an infinite result, such
/// as the inverse of a non-constant polynomial or a shifted expansion.
pub const DEFAULT_PRECISION: usize = 20;

/// The reserved token for `log x` in log-polynomials; no series variable may
/// contain it.
pub const LOG_SYMBOL: &str = "LOG";
