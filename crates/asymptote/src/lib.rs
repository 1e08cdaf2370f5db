//! # Asymptote
//!
//! Generalized series: the formal asymptotic expansions that solve linear
//! differential equations at a singular point and linear recurrences at
//! infinity.
//!
//! ## Layers
//!
//! - **Rings**: exact rationals and towers of algebraic number fields
//! - **Polynomials**: dense univariate polynomials over any ring
//! - **Series**: truncated power series with explicit precision, and
//!   continuous and discrete generalized series built on them
//!
//! ## Quick Start
//!
//! ```rust
//! use asymptote::prelude::*;
//!
//! let domain = Domain::rationals("n", SeriesKind::Discrete).unwrap();
//! let n = DiscreteSeries::gen(&domain);
//! let shifted = n.shift(1).unwrap();
//! assert_eq!(shifted.leading_exponent(), &Scalar::from(1_i64));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use asymptote_poly as poly;
pub use asymptote_rings as rings;
pub use asymptote_series as series;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use asymptote_poly::DensePoly;
    pub use asymptote_rings::{CoefficientField, Field, Ring, Scalar, Q};
    pub use asymptote_series::{
        ContinuousSeries, DiscreteComponents, DiscreteSeries, Domain, GeneralizedSeries, LogPoly,
        Operand, PowerSeries, Precision, ReferenceSet, SeriesError, SeriesKind,
    };
}
