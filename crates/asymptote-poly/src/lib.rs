//! # asymptote-poly
//!
//! Dense univariate polynomials for generalized series.
//!
//! Polynomials appear in two roles: as exponential parts with scalar
//! coefficients, and as polynomials in `log x` whose coefficients are
//! truncated power series. Both use [`DensePoly`], which is generic over any
//! [`Ring`](asymptote_rings::Ring).
//!
//! Besides ring arithmetic the type offers the exponent bookkeeping the
//! series normalizer needs: valuation, reversal, `x -> x^q` substitution and
//! its inverse, and composition.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dense;

#[cfg(test)]
mod proptests;

pub use dense::DensePoly;
