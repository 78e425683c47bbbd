/// [`Bound`] and [`Bounds`] types describing the region of interest of a problem.
pub mod bound;
/// [`EvaluationCounter`] transform for counting evaluations of a problem.
pub mod counter;
/// Sampling helpers and the crate's warning switches.
pub mod utils;

pub use bound::{Bound, Bounds};
pub use counter::EvaluationCounter;
pub use utils::{disable_warnings, enable_warnings, maybe_warn, should_warn, SampleFloat};
