use crate::{core::utils::SampleFloat, DVector, Float};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

/// An enum that describes the limits of a single variable's region of interest.
///
/// Points outside of a [`Bound`] are still valid inputs to a problem, they are just considered
/// uninteresting and may be penalized by transforms such as
/// [`PenalizeUninterestingValues`](crate::transforms::PenalizeUninterestingValues).
#[derive(Default, Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Bound {
    #[default]
    /// `(-inf, +inf)`
    NoBound,
    /// `(min, +inf)`
    LowerBound(Float),
    /// `(-inf, max)`
    UpperBound(Float),
    /// `(min, max)`
    LowerAndUpperBound(Float, Float),
}
impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower(), self.upper())
    }
}
impl From<(Float, Float)> for Bound {
    /// Builds a bound from `(lower, upper)`, where infinite limits mean "no limit".
    ///
    /// # Panics
    ///
    /// This function will panic unless `lower < upper`.
    fn from(value: (Float, Float)) -> Self {
        let (l, u) = value;
        assert_well_ordered(None, l, u);
        match (l.is_finite(), u.is_finite()) {
            (true, true) => Self::LowerAndUpperBound(l, u),
            (true, false) => Self::LowerBound(l),
            (false, true) => Self::UpperBound(u),
            (false, false) => Self::NoBound,
        }
    }
}
impl From<(&Float, &Float)> for Bound {
    fn from(value: (&Float, &Float)) -> Self {
        (*value.0, *value.1).into()
    }
}
impl From<(Option<Float>, Option<Float>)> for Bound {
    fn from(value: (Option<Float>, Option<Float>)) -> Self {
        match value {
            (Some(a), Some(b)) => (a, b),
            (Some(l), None) => (l, Float::INFINITY),
            (None, Some(u)) => (Float::NEG_INFINITY, u),
            (None, None) => (Float::NEG_INFINITY, Float::INFINITY),
        }
        .into()
    }
}
impl From<&Self> for Bound {
    fn from(value: &Self) -> Self {
        *value
    }
}

fn assert_well_ordered(index: Option<usize>, lower: Float, upper: Float) {
    if lower < upper {
        return;
    }
    match index {
        Some(i) => panic!(
            "Malformed region of interest: bound #{i} = ({lower}, {upper}) does not satisfy lower < upper"
        ),
        None => panic!(
            "Malformed region of interest: ({lower}, {upper}) does not satisfy lower < upper"
        ),
    }
}

impl Bound {
    /// Returns the lower bound or `-inf` if there is none.
    pub const fn lower(&self) -> Float {
        match self {
            Self::NoBound | Self::UpperBound(_) => Float::NEG_INFINITY,
            Self::LowerBound(lb) | Self::LowerAndUpperBound(lb, _) => *lb,
        }
    }
    /// Returns the upper bound or `+inf` if there is none.
    pub const fn upper(&self) -> Float {
        match self {
            Self::NoBound | Self::LowerBound(_) => Float::INFINITY,
            Self::UpperBound(ub) | Self::LowerAndUpperBound(_, ub) => *ub,
        }
    }
    /// Returns `true` if the lower limit is strictly less than the upper limit.
    ///
    /// The [`From`] conversions and [`Bounds::from_limits`] refuse to build a bound failing this
    /// check, so only a [`Bound::LowerAndUpperBound`] or `NaN` limit written out directly can.
    pub fn is_well_formed(&self) -> bool {
        self.lower() < self.upper()
    }
    /// Checks whether the given `value` lies inside the (closed) bound.
    pub fn contains(&self, value: Float) -> bool {
        match self {
            Self::NoBound => true,
            Self::LowerBound(lb) => value >= *lb,
            Self::UpperBound(ub) => value <= *ub,
            Self::LowerAndUpperBound(lb, ub) => value >= *lb && value <= *ub,
        }
    }
    /// Checks whether the given `value` is compatible with the bound and returns `0.0` if it is,
    /// and the distance to the bound otherwise signed by whether the bound is a lower (`-`) or
    /// upper (`+`) bound.
    pub fn bound_excess(&self, value: Float) -> Float {
        let overshoot = value - self.upper();
        let undershoot = self.lower() - value;
        if overshoot > 0.0 {
            overshoot
        } else if undershoot > 0.0 {
            -undershoot
        } else {
            0.0
        }
    }
    /// The squared distance of `value` outside of the bound, or `0.0` inside of it.
    ///
    /// ```math
    /// p(x) = \begin{cases}
    ///   (x - x_\text{max})^2 & x > x_\text{max} \\
    ///   (x_\text{min} - x)^2 & x < x_\text{min} \\
    ///   0 & \text{otherwise}
    /// \end{cases}
    /// ```
    ///
    /// The upper limit is checked first and the two cases never both contribute. A `NaN` value
    /// fails both comparisons and contributes `0.0`.
    #[inline]
    pub fn squared_excess(&self, value: Float) -> Float {
        let c1 = value - self.upper();
        let c2 = self.lower() - value;
        if c1 > 0.0 {
            c1 * c1
        } else if c2 > 0.0 {
            c2 * c2
        } else {
            0.0
        }
    }
    /// Clips a value to be within the bound.
    pub fn clip_value(&self, value: Float) -> Float {
        match *self {
            Self::NoBound => value,
            Self::LowerBound(lb) => Float::max(value, lb),
            Self::UpperBound(ub) => Float::min(value, ub),
            Self::LowerAndUpperBound(lb, ub) => value.clamp(lb, ub),
        }
    }
    /// Get a random value in the bound.
    ///
    /// Infinite limits are replaced by `∓Float::MAX / 2` so that the width of the sampled range
    /// stays representable.
    pub fn random(&self, rng: &mut Rng) -> Float {
        let half_max = Float::MAX / 2.0;
        rng.range(
            Float::max(self.lower(), -half_max),
            Float::min(self.upper(), half_max),
        )
    }
}

/// A struct that contains a list of [`Bound`]s, one per variable of a problem.
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    /// Builds [`Bounds`] from separate vectors of lower and upper limits.
    ///
    /// # Panics
    ///
    /// This function will panic if `lower` and `upper` have different lengths, or if any
    /// `lower[i] < upper[i]` does not hold.
    pub fn from_limits(lower: &[Float], upper: &[Float]) -> Self {
        assert_eq!(
            lower.len(),
            upper.len(),
            "lower and upper limits must have the same length"
        );
        Self(
            lower
                .iter()
                .zip(upper)
                .enumerate()
                .map(|(i, (&l, &u))| {
                    assert_well_ordered(Some(i), l, u);
                    Bound::from((l, u))
                })
                .collect(),
        )
    }
    /// Returns the inner Vector of bounds.
    pub fn into_inner(self) -> Vec<Bound> {
        self.0
    }
    /// The lower limits of every bound (`-inf` where there is none).
    pub fn lower(&self) -> DVector<Float> {
        DVector::from_iterator(self.len(), self.iter().map(Bound::lower))
    }
    /// The upper limits of every bound (`+inf` where there is none).
    pub fn upper(&self) -> DVector<Float> {
        DVector::from_iterator(self.len(), self.iter().map(Bound::upper))
    }
    /// Checks whether every coordinate of `x` lies inside its bound.
    pub fn contains(&self, x: &[Float]) -> bool {
        x.iter().zip(self.iter()).all(|(v, b)| b.contains(*v))
    }
    /// Returns the index and value of the first bound whose lower limit is not strictly below
    /// its upper limit.
    pub fn first_malformed(&self) -> Option<(usize, Bound)> {
        self.iter()
            .enumerate()
            .find(|(_, b)| !b.is_well_formed())
            .map(|(i, b)| (i, *b))
    }
    /// The sum of [`Bound::squared_excess`] over every coordinate of `x`.
    ///
    /// ```math
    /// P(\vec{x}) = \sum_{i=1}^{n} p_i(x_i)
    /// ```
    pub fn penalty(&self, x: &[Float]) -> Float {
        x.iter()
            .zip(self.iter())
            .fold(0.0, |acc, (v, b)| acc + b.squared_excess(*v))
    }
    /// Creates a random point inside the bounds.
    pub fn random_point(&self, rng: &mut Rng) -> DVector<Float> {
        DVector::from_iterator(self.len(), self.iter().map(|b| b.random(rng)))
    }
}

impl<B> From<Vec<B>> for Bounds
where
    B: Into<Bound>,
{
    fn from(value: Vec<B>) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}
impl<B> From<&[B]> for Bounds
where
    B: Into<Bound> + Copy,
{
    fn from(value: &[B]) -> Self {
        Self(value.iter().copied().map(Into::into).collect())
    }
}
impl<const N: usize, B> From<[B; N]> for Bounds
where
    B: Into<Bound>,
{
    fn from(value: [B; N]) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}

impl Deref for Bounds {
    type Target = Vec<Bound>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bounds {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
