/// Module containing the [`Problem`] and [`ProblemInfo`] traits.
pub mod problem;
/// Module containing the [`ProblemTransform`] and [`ProblemExt`] traits.
pub mod transform;

pub use problem::{Problem, ProblemInfo};
pub use transform::{ProblemExt, ProblemTransform};
