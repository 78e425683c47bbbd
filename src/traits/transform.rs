use crate::{
    core::EvaluationCounter, traits::ProblemInfo, transforms::PenalizeUninterestingValues, Float,
};

/// A problem which wraps another problem and modifies how it is evaluated.
///
/// Transforms delegate their metadata to the wrapped problem unless they document otherwise, so
/// a chain of transforms can be walked back to its leaf through repeated calls to
/// [`ProblemTransform::inner`].
pub trait ProblemTransform: ProblemInfo {
    /// The type of the wrapped problem.
    type Inner: ProblemInfo;
    /// The wrapped problem.
    fn inner(&self) -> &Self::Inner;
}

/// Builder-style methods which wrap any problem in one of the transforms provided by this crate.
///
/// ```rust
/// use benchwrap::prelude::*;
/// use benchwrap::test_functions::Sphere;
///
/// let sphere = Sphere::new(2);
/// let problem = (&sphere).penalize_uninteresting_values(10.0).counted();
/// let y = problem.evaluate(&[6.0, 0.0], &()).unwrap();
/// assert_eq!(y[0], 36.0 + 10.0);
/// assert_eq!(problem.evaluations(), 1);
/// ```
pub trait ProblemExt: ProblemInfo + Sized {
    /// Wrap `self` in a [`PenalizeUninterestingValues`] transform with the given penalty factor.
    ///
    /// # Panics
    ///
    /// See [`PenalizeUninterestingValues::new`].
    fn penalize_uninteresting_values(self, factor: Float) -> PenalizeUninterestingValues<Self> {
        PenalizeUninterestingValues::new(self, factor)
    }
    /// Wrap `self` in an [`EvaluationCounter`].
    fn counted(self) -> EvaluationCounter<Self> {
        EvaluationCounter::new(self)
    }
}
impl<P> ProblemExt for P where P: ProblemInfo {}
