use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::{
    core::Bounds,
    traits::{Problem, ProblemInfo},
    DVector, Float,
};

/// The Rosenbrock function, a non-convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
/// ```
/// where $`n \geq 2`$. This function has a minimum at $`f(\vec{1}) = 0`$.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rosenbrock {
    bounds: Bounds,
}
impl Rosenbrock {
    /// Create an `n`-dimensional Rosenbrock function.
    ///
    /// # Panics
    ///
    /// This function will panic if `n < 2`.
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "The Rosenbrock function needs at least 2 dimensions");
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
impl ProblemInfo for Rosenbrock {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }
    fn number_of_objectives(&self) -> usize {
        1
    }
}
impl Problem for Rosenbrock {
    fn evaluate(&self, x: &[Float], _args: &()) -> Result<DVector<Float>, Infallible> {
        #[allow(clippy::suboptimal_flops)]
        let value = x
            .windows(2)
            .map(|w| 100.0 * (w[1] - w[0].powi(2)).powi(2) + (1.0 - w[0]).powi(2))
            .sum::<Float>();
        Ok(DVector::from_element(1, value))
    }
}
