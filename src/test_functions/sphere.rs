use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::{
    core::Bounds,
    traits::{Problem, ProblemInfo},
    DVector, Float,
};

/// A generalized spherical function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n} x_i^2
/// ```
/// The global minimum is at $`f(\vec{0}) = 0`$. The region of interest defaults to
/// $`[-5, 5]^n`$.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Sphere {
    bounds: Bounds,
}
impl Sphere {
    /// Create an `n`-dimensional Sphere function.
    pub fn new(n: usize) -> Self {
        Self {
            bounds: super::default_region(n),
        }
    }
    /// Replace the region of interest.
    ///
    /// # Panics
    ///
    /// This method will panic if the number of bounds is not equal to the dimension.
    pub fn with_bounds<B: Into<Bounds>>(mut self, bounds: B) -> Self {
        self.bounds = super::replace_region(&self.bounds, bounds.into());
        self
    }
}
impl ProblemInfo for Sphere {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }
    fn number_of_objectives(&self) -> usize {
        1
    }
}
impl Problem for Sphere {
    fn evaluate(&self, x: &[Float], _args: &()) -> Result<DVector<Float>, Infallible> {
        let value = x.iter().map(|xi| xi.powi(2)).sum::<Float>();
        Ok(DVector::from_element(1, value))
    }
}
