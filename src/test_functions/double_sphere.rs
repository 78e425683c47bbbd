use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::{
    core::Bounds,
    traits::{Problem, ProblemInfo},
    DVector, Float,
};

/// A bi-objective problem made of two spheres with different centers.
///
/// ```math
/// \vec{f}(\vec{x}) = \left(\sum_{i=1}^{n} x_i^2,\; \sum_{i=1}^{n} (x_i - 1)^2\right)
/// ```
/// The Pareto set is the segment between $`\vec{0}`$ and $`\vec{1}`$.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DoubleSphere {
    bounds: Bounds,
}
impl DoubleSphere {
    /// Create an `n`-dimensional double sphere problem.
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
impl ProblemInfo for DoubleSphere {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }
    fn number_of_objectives(&self) -> usize {
        2
    }
}
impl Problem for DoubleSphere {
    fn evaluate(&self, x: &[Float], _args: &()) -> Result<DVector<Float>, Infallible> {
        let f1 = x.iter().map(|xi| xi.powi(2)).sum::<Float>();
        let f2 = x.iter().map(|xi| (xi - 1.0).powi(2)).sum::<Float>();
        Ok(DVector::from_vec(vec![f1, f2]))
    }
}
