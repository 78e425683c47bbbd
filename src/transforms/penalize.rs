use serde::{Deserialize, Serialize};

use crate::{
    core::{maybe_warn, Bounds},
    traits::{Problem, ProblemInfo, ProblemTransform},
    DVector, Float,
};

/// A transform which adds a quadratic penalty to every objective value whenever the input lies
/// outside of the region of interest of the wrapped problem.
///
/// For a point $`\vec{x}`$ and the bounds $`[l_i, u_i]`$ of the inner problem, the penalty is
///
/// ```math
/// P(\vec{x}) = \sum_{i=1}^{n} \begin{cases}
///   (x_i - u_i)^2 & x_i > u_i \\
///   (l_i - x_i)^2 & x_i < l_i \\
///   0 & \text{otherwise}
/// \end{cases}
/// ```
///
/// and every component of the inner result is shifted by the same amount,
/// $`y_j \leftarrow y_j + \lambda P(\vec{x})`$, where $`\lambda`$ is the penalty factor. Points
/// inside the region of interest are evaluated exactly as by the inner problem.
///
/// The inner problem may be owned or borrowed (`&P`, [`Box<P>`], [`Arc<P>`](std::sync::Arc)).
/// Dropping the transform only drops what it owns. The transform holds no mutable state, so it is
/// [`Send`] and [`Sync`] exactly when the inner problem is.
///
/// ```rust
/// use benchwrap::prelude::*;
/// use benchwrap::test_functions::Sphere;
///
/// let sphere = Sphere::new(2).with_bounds([(-1.0, 1.0), (-1.0, 1.0)]);
/// let penalized = PenalizeUninterestingValues::new(&sphere, 2.0);
/// // (2 - 1)^2 = 1 outside on the first coordinate
/// let y = penalized.evaluate(&[2.0, 0.0], &()).unwrap();
/// assert_eq!(y[0], 4.0 + 2.0 * 1.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PenalizeUninterestingValues<P> {
    inner: P,
    factor: Float,
}

impl<P> PenalizeUninterestingValues<P>
where
    P: ProblemInfo,
{
    /// Wraps `inner` so that evaluations outside of its region of interest are penalized by
    /// `factor` times the summed squared distance to the violated bounds.
    ///
    /// A negative `factor` is accepted, but since it rewards points outside of the region of
    /// interest, a warning is emitted (see [`maybe_warn`]).
    ///
    /// # Panics
    ///
    /// This function will panic if any bound of `inner` does not have its lower limit strictly
    /// below its upper limit. Such a problem is misconfigured and cannot be penalized
    /// meaningfully.
    pub fn new(inner: P, factor: Float) -> Self {
        if let Some((i, bound)) = inner.bounds().first_malformed() {
            panic!(
                "Malformed region of interest: bound #{} = {} does not satisfy lower < upper",
                i, bound
            );
        }
        if factor < 0.0 {
            maybe_warn(format_args!(
                "Penalty factor {factor} is negative and will reward points outside of the region of interest"
            ));
        }
        log::debug!(
            "penalizing uninteresting values of a problem with {} variables and {} objectives (factor = {})",
            inner.number_of_variables(),
            inner.number_of_objectives(),
            factor
        );
        Self { inner, factor }
    }
    /// The penalty factor.
    pub const fn factor(&self) -> Float {
        self.factor
    }
    /// Unwraps the transform and returns the inner problem.
    pub fn into_inner(self) -> P {
        self.inner
    }
    /// The (unscaled) penalty for the point `x` with respect to the bounds of the inner problem.
    ///
    /// This is the sum of [`Bound::squared_excess`](crate::core::Bound::squared_excess) over
    /// all coordinates.
    ///
    /// # Panics
    ///
    /// This method will panic if the length of `x` is not equal to the number of variables of
    /// the problem.
    pub fn penalty(&self, x: &[Float]) -> Float {
        assert_eq!(
            x.len(),
            self.inner.number_of_variables(),
            "Expected a point with {} variables, got {}",
            self.inner.number_of_variables(),
            x.len()
        );
        let mut penalty = 0.0;
        for (xi, bound) in x.iter().zip(self.inner.bounds().iter()) {
            debug_assert!(
                bound.is_well_formed(),
                "Malformed region of interest: {bound} does not satisfy lower < upper"
            );
            penalty += bound.squared_excess(*xi);
        }
        penalty
    }
}

impl<P> ProblemInfo for PenalizeUninterestingValues<P>
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

impl<P> ProblemTransform for PenalizeUninterestingValues<P>
where
    P: ProblemInfo,
{
    type Inner = P;
    fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P, U, E> Problem<U, E> for PenalizeUninterestingValues<P>
where
    P: Problem<U, E>,
{
    /// Evaluates the inner problem at `x` and adds `factor * penalty(x)` to every objective.
    ///
    /// The inner problem is always evaluated, even when `x` is inside the region of interest.
    ///
    /// # Errors
    ///
    /// Returns the inner problem's error unchanged if its evaluation fails.
    ///
    /// # Panics
    ///
    /// This method will panic if the length of `x` is not equal to the number of variables of
    /// the problem.
    fn evaluate(&self, x: &[Float], args: &U) -> Result<DVector<Float>, E> {
        let penalty = self.penalty(x);
        let mut y = self.inner.evaluate(x, args)?;
        if penalty != 0.0 {
            log::trace!("applying boundary penalty {penalty} (factor = {})", self.factor);
        }
        y.add_scalar_mut(self.factor * penalty);
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        convert::Infallible,
        fmt::{self, Display},
        sync::Arc,
    };

    use approx::assert_relative_eq;
    use fastrand::Rng;

    use super::*;
    use crate::{
        core::{
            disable_warnings,
            utils::testing::{lock_warnings, warned_about},
            Bound, EvaluationCounter, SampleFloat,
        },
        test_functions::{DoubleSphere, Rosenbrock, Sphere},
        traits::ProblemExt,
    };

    /// A problem with a constant value, useful for isolating the penalty term.
    struct Constant {
        bounds: Bounds,
        values: Vec<Float>,
    }
    impl Constant {
        fn new(bounds: impl Into<Bounds>, values: &[Float]) -> Self {
            Self {
                bounds: bounds.into(),
                values: values.to_vec(),
            }
        }
    }
    impl ProblemInfo for Constant {
        fn bounds(&self) -> &Bounds {
            &self.bounds
        }
        fn number_of_objectives(&self) -> usize {
            self.values.len()
        }
    }
    impl Problem for Constant {
        fn evaluate(&self, _x: &[Float], _: &()) -> Result<DVector<Float>, Infallible> {
            Ok(DVector::from_column_slice(&self.values))
        }
    }

    fn unit_box() -> Constant {
        Constant::new([(-1.0, 1.0), (-1.0, 1.0)], &[5.0])
    }

    #[test]
    fn test_overshoot_above_upper_bound() {
        let inner = unit_box();
        let t = PenalizeUninterestingValues::new(&inner, 2.0);
        let y = t.evaluate(&[2.0, 0.0], &()).unwrap();
        assert_eq!(t.penalty(&[2.0, 0.0]), 1.0);
        assert_eq!(y, DVector::from_vec(vec![7.0]));
    }

    #[test]
    fn test_undershoot_below_lower_bound() {
        let inner = unit_box();
        let t = PenalizeUninterestingValues::new(&inner, 2.0);
        assert_eq!(t.penalty(&[-3.0, 0.0]), 4.0);
        let y = t.evaluate(&[-3.0, 0.0], &()).unwrap();
        assert_eq!(y[0], 5.0 + 8.0);
    }

    #[test]
    fn test_violations_sum_over_coordinates() {
        let inner = unit_box();
        let t = PenalizeUninterestingValues::new(&inner, 1.0);
        assert_eq!(t.penalty(&[2.0, -4.0]), 1.0 + 9.0);
        assert_eq!(t.evaluate(&[2.0, -4.0], &()).unwrap()[0], 15.0);
    }

    #[test]
    fn test_in_bounds_transparency() {
        let sphere = Sphere::new(4);
        let rosenbrock = Rosenbrock::new(4);
        let p_sphere = PenalizeUninterestingValues::new(&sphere, 1e4);
        let p_rosenbrock = PenalizeUninterestingValues::new(&rosenbrock, 1e4);
        let mut rng = Rng::with_seed(0);
        for _ in 0..200 {
            let x = sphere.bounds().random_point(&mut rng);
            assert_eq!(
                p_sphere.evaluate(x.as_slice(), &()).unwrap(),
                sphere.evaluate(x.as_slice(), &()).unwrap()
            );
            assert_eq!(
                p_rosenbrock.evaluate(x.as_slice(), &()).unwrap(),
                rosenbrock.evaluate(x.as_slice(), &()).unwrap()
            );
        }
        // the limits themselves are inside
        let corner = [5.0, -5.0, 5.0, -5.0];
        assert_eq!(p_sphere.penalty(&corner), 0.0);
        assert_eq!(
            p_sphere.evaluate(&corner, &()).unwrap(),
            sphere.evaluate(&corner, &()).unwrap()
        );
    }

    #[test]
    fn test_penalty_grows_quadratically() {
        let inner = Constant::new([(-1.0, 1.0), (0.0, 10.0), (-2.0, 2.0)], &[0.0]);
        let t = PenalizeUninterestingValues::new(&inner, 3.0);
        let mut rng = Rng::with_seed(1);
        let mut last_above = 0.0;
        let mut last_below = 0.0;
        for step in 1..50 {
            let d = step as Float * 0.25;
            let mid = rng.range(0.0, 10.0);
            let above = t.evaluate(&[0.0, 10.0 + d, 0.0], &()).unwrap()[0];
            let below = t.evaluate(&[0.0, mid, -2.0 - d], &()).unwrap()[0];
            assert_relative_eq!(above, 3.0 * d * d);
            assert_relative_eq!(below, 3.0 * d * d);
            assert!(above >= last_above);
            assert!(below >= last_below);
            last_above = above;
            last_below = below;
        }
    }

    #[test]
    fn test_factor_scaling() {
        let sphere = Sphere::new(3);
        let unit = PenalizeUninterestingValues::new(&sphere, 1.0);
        let x = [7.0, -0.5, -9.0];
        let base = sphere.evaluate(&x, &()).unwrap()[0];
        let unit_term = unit.evaluate(&x, &()).unwrap()[0] - base;
        assert_relative_eq!(unit_term, 4.0 + 16.0);
        for k in [0.0, 0.5, 2.0, 1e3] {
            let scaled = PenalizeUninterestingValues::new(&sphere, k);
            let y = scaled.evaluate(&x, &()).unwrap()[0];
            assert_relative_eq!(y, base + k * unit_term);
        }
    }

    #[test]
    fn test_negative_factor_is_permitted() {
        let inner = unit_box();
        let t = PenalizeUninterestingValues::new(&inner, -1.0);
        assert_eq!(t.factor(), -1.0);
        assert_eq!(t.evaluate(&[3.0, 0.0], &()).unwrap()[0], 5.0 - 4.0);
        assert_eq!(t.evaluate(&[0.0, 0.0], &()).unwrap()[0], 5.0);
    }

    #[test]
    fn test_uniform_across_objectives() {
        let inner = Constant::new([(-1.0, 1.0), (-1.0, 1.0)], &[1.0, -2.0, 10.0]);
        let t = PenalizeUninterestingValues::new(&inner, 0.5);
        let y = t.evaluate(&[0.0, 3.0], &()).unwrap();
        assert_eq!(y, DVector::from_vec(vec![3.0, 0.0, 12.0]));

        let double = DoubleSphere::new(2);
        let t = double.penalize_uninteresting_values(10.0);
        let x = [0.0, -6.0];
        let base = t.inner().evaluate(&x, &()).unwrap();
        let y = t.evaluate(&x, &()).unwrap();
        assert_eq!(y.len(), 2);
        assert_relative_eq!(y[0] - base[0], 10.0);
        assert_relative_eq!(y[1] - base[1], 10.0);
    }

    #[test]
    fn test_metadata_pass_through() {
        let inner = Constant::new(
            vec![
                Bound::LowerAndUpperBound(-1.0, 2.0),
                Bound::UpperBound(3.0),
                Bound::NoBound,
            ],
            &[0.0, 0.0],
        );
        let t = PenalizeUninterestingValues::new(&inner, 1.0);
        assert_eq!(t.number_of_variables(), inner.number_of_variables());
        assert_eq!(t.number_of_objectives(), 2);
        assert_eq!(t.lower_bounds(), inner.lower_bounds());
        assert_eq!(t.upper_bounds(), inner.upper_bounds());
        assert_eq!(t.bounds(), inner.bounds());
        assert!(std::ptr::eq(*t.inner(), &inner));
    }

    #[test]
    fn test_unbounded_coordinates_are_never_penalized() {
        let inner = Constant::new(
            vec![Bound::NoBound, Bound::LowerBound(0.0), Bound::UpperBound(0.0)],
            &[0.0],
        );
        let t = PenalizeUninterestingValues::new(&inner, 1.0);
        assert_eq!(t.penalty(&[1e200, 1e200, -1e200]), 0.0);
        assert_eq!(t.penalty(&[-1e200, -2.0, 3.0]), 4.0 + 9.0);
    }

    #[test]
    fn test_nan_coordinate_adds_no_penalty() {
        let inner = unit_box();
        let t = PenalizeUninterestingValues::new(&inner, 2.0);
        assert_eq!(t.penalty(&[Float::NAN, 0.0]), 0.0);
        let sphere = Sphere::new(2);
        let t = PenalizeUninterestingValues::new(&sphere, 2.0);
        assert!(t.evaluate(&[Float::NAN, 0.0], &()).unwrap()[0].is_nan());
    }

    #[test]
    fn test_inner_is_always_evaluated() {
        let counter = EvaluationCounter::new(unit_box());
        let t = PenalizeUninterestingValues::new(&counter, 1.0);
        t.evaluate(&[0.0, 0.0], &()).unwrap();
        assert_eq!(counter.evaluations(), 1);
        t.evaluate(&[5.0, 0.0], &()).unwrap();
        assert_eq!(counter.evaluations(), 2);
        assert_eq!(t.penalty(&[5.0, 0.0]), 16.0);
        assert_eq!(counter.evaluations(), 2);
    }

    #[derive(Debug, PartialEq)]
    struct EvalError;
    impl Display for EvalError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "evaluation failed")
        }
    }
    struct Failing {
        bounds: Bounds,
    }
    impl ProblemInfo for Failing {
        fn bounds(&self) -> &Bounds {
            &self.bounds
        }
        fn number_of_objectives(&self) -> usize {
            1
        }
    }
    impl Problem<Float, EvalError> for Failing {
        fn evaluate(&self, x: &[Float], threshold: &Float) -> Result<DVector<Float>, EvalError> {
            if x[0] > *threshold {
                Err(EvalError)
            } else {
                Ok(DVector::from_element(1, x[0]))
            }
        }
    }

    #[test]
    fn test_user_data_and_errors_pass_through() {
        let t = PenalizeUninterestingValues::new(
            Failing {
                bounds: [(0.0, 1.0)].into(),
            },
            1.0,
        );
        assert_eq!(t.evaluate(&[2.0], &10.0), Ok(DVector::from_vec(vec![3.0])));
        assert_eq!(t.evaluate(&[2.0], &1.5), Err(EvalError));
    }

    #[test]
    fn test_owned_shared_and_chained_inner() {
        let owned = PenalizeUninterestingValues::new(unit_box(), 2.0);
        assert_eq!(owned.evaluate(&[2.0, 0.0], &()).unwrap()[0], 7.0);
        assert_eq!(owned.into_inner().values, vec![5.0]);

        let shared = Arc::new(unit_box());
        let a = PenalizeUninterestingValues::new(Arc::clone(&shared), 1.0);
        let b = PenalizeUninterestingValues::new(Arc::clone(&shared), 3.0);
        assert_eq!(a.evaluate(&[0.0, 2.0], &()).unwrap()[0], 6.0);
        assert_eq!(b.evaluate(&[0.0, 2.0], &()).unwrap()[0], 8.0);
        drop(a);
        drop(b);
        assert_eq!(Arc::strong_count(&shared), 1);

        // penalties stack when transforms are chained, as each layer sees the same bounds
        let chained = unit_box()
            .penalize_uninteresting_values(1.0)
            .penalize_uninteresting_values(2.0);
        assert_eq!(chained.evaluate(&[2.0, 0.0], &()).unwrap()[0], 5.0 + 1.0 + 2.0);
        assert_eq!(chained.inner().factor(), 1.0);
    }

    #[test]
    fn test_concurrent_evaluation() {
        let counter = EvaluationCounter::new(Sphere::new(3));
        let t = PenalizeUninterestingValues::new(&counter, 2.0);
        let expected = t.evaluate(&[6.0, 0.0, 0.0], &()).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        assert_eq!(t.evaluate(&[6.0, 0.0, 0.0], &()).unwrap(), expected);
                    }
                });
            }
        });
        assert_eq!(counter.evaluations(), 401);
    }

    #[test]
    #[should_panic(expected = "Malformed region of interest")]
    fn test_malformed_bounds_are_fatal() {
        let inner = Constant::new(
            vec![
                Bound::LowerAndUpperBound(-1.0, 1.0),
                Bound::LowerAndUpperBound(2.0, 2.0),
            ],
            &[0.0],
        );
        let _ = PenalizeUninterestingValues::new(&inner, 1.0);
    }

    #[test]
    #[should_panic(expected = "Expected a point with 2 variables, got 3")]
    fn test_dimension_mismatch_is_fatal() {
        let inner = unit_box();
        let t = PenalizeUninterestingValues::new(&inner, 1.0);
        let _ = t.evaluate(&[0.0, 0.0, 0.0], &());
    }

    #[test]
    #[should_panic(expected = "Expected a point with 2 variables, got 1")]
    fn test_penalty_of_short_point_is_fatal() {
        let inner = unit_box();
        let _ = PenalizeUninterestingValues::new(&inner, 1.0).penalty(&[5.0]);
    }

    #[test]
    #[should_panic(expected = "Malformed region of interest")]
    fn test_inverted_limits_are_fatal() {
        let sphere = Sphere::new(1).with_bounds(Bounds::from_limits(&[1.0], &[-1.0]));
        let _ = sphere.penalize_uninteresting_values(1.0).evaluate(&[0.0], &());
    }

    #[test]
    fn test_negative_factor_warns_unless_disabled() {
        let _guard = lock_warnings();
        let inner = unit_box();
        let _ = PenalizeUninterestingValues::new(&inner, -0.125);
        assert!(warned_about("Penalty factor -0.125 is negative"));
        let _ = PenalizeUninterestingValues::new(&inner, 0.125);
        assert!(!warned_about("Penalty factor 0.125"));
        disable_warnings();
        let _ = PenalizeUninterestingValues::new(&inner, -0.375);
        assert!(!warned_about("Penalty factor -0.375"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = Sphere::new(2).penalize_uninteresting_values(100.0);
        let bytes = serde_pickle::to_vec(&t, Default::default()).unwrap();
        let back: PenalizeUninterestingValues<Sphere> =
            serde_pickle::from_slice(&bytes, Default::default()).unwrap();
        assert_eq!(back, t);
        assert_eq!(
            back.evaluate(&[6.0, 0.0], &()).unwrap(),
            t.evaluate(&[6.0, 0.0], &()).unwrap()
        );
    }
}
