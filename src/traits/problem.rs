use std::{convert::Infallible, sync::Arc};

use crate::{core::Bounds, DVector, Float};

/// The metadata every benchmark problem exposes: its region of interest and its number of
/// objectives.
///
/// This is split from [`Problem`] so that code which only inspects the shape of a problem (like
/// the constructors of transforms) does not need to name the user-data and error types of
/// [`Problem::evaluate`].
pub trait ProblemInfo {
    /// The region of interest, one [`Bound`](crate::core::Bound) per variable.
    fn bounds(&self) -> &Bounds;
    /// The number of objective values returned by each evaluation (at least one).
    fn number_of_objectives(&self) -> usize;
    /// The number of variables of the problem.
    fn number_of_variables(&self) -> usize {
        self.bounds().len()
    }
    /// The lower limits of the region of interest.
    fn lower_bounds(&self) -> DVector<Float> {
        self.bounds().lower()
    }
    /// The upper limits of the region of interest.
    fn upper_bounds(&self) -> DVector<Float> {
        self.bounds().upper()
    }
    /// Checks whether `x` lies inside the region of interest.
    fn is_in_region_of_interest(&self, x: &[Float]) -> bool {
        self.bounds().contains(x)
    }
}

/// A trait which describes a benchmark problem $`f(\mathbb{R}^n) \to \mathbb{R}^m`$.
///
/// The `Problem` trait takes a generic `U` representing the type of user data/arguments and a
/// generic `E` representing any possible errors that might be returned during function
/// execution. Transforms pass both through to the problem they wrap.
pub trait Problem<U = (), E = Infallible>: ProblemInfo {
    /// The evaluation of the problem at a point `x` with the given arguments/user data.
    ///
    /// The returned vector has [`ProblemInfo::number_of_objectives`] components.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &[Float], args: &U) -> Result<DVector<Float>, E>;
}

impl<P> ProblemInfo for &P
where
    P: ProblemInfo + ?Sized,
{
    fn bounds(&self) -> &Bounds {
        (**self).bounds()
    }
    fn number_of_objectives(&self) -> usize {
        (**self).number_of_objectives()
    }
}
impl<P, U, E> Problem<U, E> for &P
where
    P: Problem<U, E> + ?Sized,
{
    fn evaluate(&self, x: &[Float], args: &U) -> Result<DVector<Float>, E> {
        (**self).evaluate(x, args)
    }
}

impl<P> ProblemInfo for Box<P>
where
    P: ProblemInfo + ?Sized,
{
    fn bounds(&self) -> &Bounds {
        (**self).bounds()
    }
    fn number_of_objectives(&self) -> usize {
        (**self).number_of_objectives()
    }
}
impl<P, U, E> Problem<U, E> for Box<P>
where
    P: Problem<U, E> + ?Sized,
{
    fn evaluate(&self, x: &[Float], args: &U) -> Result<DVector<Float>, E> {
        (**self).evaluate(x, args)
    }
}

impl<P> ProblemInfo for Arc<P>
where
    P: ProblemInfo + ?Sized,
{
    fn bounds(&self) -> &Bounds {
        (**self).bounds()
    }
    fn number_of_objectives(&self) -> usize {
        (**self).number_of_objectives()
    }
}
impl<P, U, E> Problem<U, E> for Arc<P>
where
    P: Problem<U, E> + ?Sized,
{
    fn evaluate(&self, x: &[Float], args: &U) -> Result<DVector<Float>, E> {
        (**self).evaluate(x, args)
    }
}
