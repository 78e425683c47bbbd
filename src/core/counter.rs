use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    core::Bounds,
    traits::{Problem, ProblemInfo, ProblemTransform},
    DVector, Float,
};

/// A pass-through transform which counts how many times the wrapped problem was evaluated.
///
/// Every call to [`Problem::evaluate`] is counted, including calls which return an error. The
/// counter is atomic, so a shared [`EvaluationCounter`] can be evaluated from several threads.
#[derive(Debug, Default)]
pub struct EvaluationCounter<P> {
    inner: P,
    evaluations: AtomicUsize,
}

impl<P> EvaluationCounter<P> {
    /// Wrap `inner` with a counter starting at zero.
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            evaluations: AtomicUsize::new(0),
        }
    }
    /// The number of evaluations since creation or since the last call to
    /// [`EvaluationCounter::reset`].
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
    /// Set the number of evaluations back to zero.
    pub fn reset(&self) {
        self.evaluations.store(0, Ordering::SeqCst);
    }
    /// Unwraps the counter and returns the inner problem.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P> ProblemInfo for EvaluationCounter<P>
where
    P: ProblemInfo,
{
    fn bounds(&self) -> &Bounds {
        self.inner.bounds()
    }
    fn number_of_objectives(&self) -> usize {
        self.inner.number_of_objectives()
    }
    fn number_of_variables(&self) -> usize {
        self.inner.number_of_variables()
    }
}

impl<P> ProblemTransform for EvaluationCounter<P>
where
    P: ProblemInfo,
{
    type Inner = P;
    fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P, U, E> Problem<U, E> for EvaluationCounter<P>
where
    P: Problem<U, E>,
{
    fn evaluate(&self, x: &[Float], args: &U) -> Result<DVector<Float>, E> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        self.inner.evaluate(x, args)
    }
}
