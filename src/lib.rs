//! `benchwrap` provides composable benchmark problems for black-box optimization. A problem maps
//! a vector of parameters to one or more objective values ($`f(\mathbb{R}^n) \to \mathbb{R}^m`$)
//! and declares a *region of interest*, a box of lower and upper limits on each variable. Problems
//! can be wrapped, layer by layer, by transforms which change how they are evaluated without
//! touching the problem they wrap.
//!
//! <div class="warning">
//!
//! This crate is still in an early development phase, and the API is not stable. It can (and likely will) be subject to breaking changes before the 1.0.0 version release.
//!
//! </div>
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [Penalizing Uninteresting Values](#penalizing-uninteresting-values)
//! - [Warnings](#warnings)
//!
//! # Key Features
//! * A small pair of traits, [`ProblemInfo`](traits::ProblemInfo) and
//!   [`Problem`](traits::Problem), which any benchmark function can implement.
//! * Transforms which are problems themselves, so they can be substituted anywhere an untransformed
//!   problem is expected and stacked into chains.
//! * Problems can be owned, borrowed, boxed or shared behind an [`Arc`](std::sync::Arc) by a
//!   transform, and transforms never outlive a borrowed problem.
//! * Generic user data and error types which flow through every layer of a chain untouched.
//!
//! # Quick Start
//!
//! Implement [`ProblemInfo`](traits::ProblemInfo) to describe the shape of the problem and
//! [`Problem`](traits::Problem) to evaluate it:
//!
//! ```rust
//! use std::convert::Infallible;
//! use benchwrap::prelude::*;
//!
//! pub struct Shifted {
//!     bounds: Bounds,
//! }
//! impl ProblemInfo for Shifted {
//!     fn bounds(&self) -> &Bounds {
//!         &self.bounds
//!     }
//!     fn number_of_objectives(&self) -> usize {
//!         1
//!     }
//! }
//! impl Problem for Shifted {
//!     fn evaluate(&self, x: &[Float], _args: &()) -> Result<DVector<Float>, Infallible> {
//!         Ok(DVector::from_element(1, x.iter().map(|xi| (xi - 1.0).powi(2)).sum::<Float>() + 5.0))
//!     }
//! }
//!
//! fn main() -> Result<(), Infallible> {
//!     let problem = Shifted { bounds: vec![(-1.0, 1.0); 2].into() };
//!     let penalized = (&problem).penalize_uninteresting_values(2.0);
//!     assert_eq!(penalized.number_of_variables(), 2);
//!     // (2 - 1)^2 = 1 outside of the region of interest, scaled by 2
//!     assert_eq!(penalized.evaluate(&[2.0, 1.0], &())?[0], 6.0 + 2.0);
//!     Ok(())
//! }
//! ```
//!
//! Some standard problems are provided in the [`test_functions`] module for testing and
//! benchmarking.
//!
//! # Penalizing Uninteresting Values
//! The [`PenalizeUninterestingValues`](transforms::PenalizeUninterestingValues) transform adds a
//! quadratic penalty to every objective whenever a point leaves the region of interest
//! $`[l_i, u_i]`$ of the problem it wraps:
//! ```math
//! y_j \leftarrow y_j + \lambda \sum_{i=1}^{n} \max(x_i - u_i, l_i - x_i, 0)^2
//! ```
//! where $`\lambda`$ is the penalty factor. Inside the region of interest the wrapped problem is
//! left untouched, and it is always evaluated, even when the penalty is zero.
//!
//! # Warnings
//! Advisory warnings (for instance about a negative penalty factor) are sent to the [`log`]
//! facade. They can be silenced with [`disable_warnings`](core::disable_warnings) or by setting
//! the environment variable `BENCHWRAP_WARNINGS=0`; `BENCHWRAP_WARNINGS=1` forces them on.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Module containing the [`Bound`](core::Bound) type, the evaluation counter and utilities.
pub mod core;
/// Module containing the traits every problem and transform implements.
pub mod traits;
/// Module containing transforms which wrap problems.
pub mod transforms;
/// Module containing standard functions for testing and benchmarking.
pub mod test_functions;

pub use nalgebra::DVector;

/// The floating-point type used throughout the crate.
#[cfg(not(feature = "f32"))]
pub type Float = f64;
/// The floating-point type used throughout the crate.
#[cfg(feature = "f32")]
pub type Float = f32;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::{
        core::{Bound, Bounds, EvaluationCounter},
        traits::{Problem, ProblemExt, ProblemInfo, ProblemTransform},
        transforms::PenalizeUninterestingValues,
        DVector, Float,
    };
}
