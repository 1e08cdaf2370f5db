//! # asymptote-rings
//!
//! Coefficient rings for generalized series.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `Field`
//! - Exact rationals `Q`
//! - Towers of algebraic number fields and their elements (`Scalar`)
//!
//! ## Field Tower
//!
//! ```text
//! QQ
//!  └── QQ[a]            (a root of m(a) over QQ)
//!       └── QQ[a][b]    (b root of m'(b) over QQ[a])
//! ```
//!
//! Every [`Scalar`] is stored in the smallest field of its tower, so a
//! rational constant compares equal no matter which field produced it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algebraic;
pub mod error;
pub mod rational;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use algebraic::{AlgebraicNumber, CoefficientField, NumberField, Scalar};
pub use error::FieldError;
pub use rational::Q;
pub use traits::{Field, Ring};
