/// Module containing the [`PenalizeUninterestingValues`] transform.
pub mod penalize;

pub use penalize::PenalizeUninterestingValues;
