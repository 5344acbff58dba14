//! Protein predictions, their propagation along the ontology and the final report
//!
//! The flow of data is:
//!
//! 1. Raw predictions ([`RawPrediction`]) of a protein to a GO term are
//!    added to a [`PredictionTable`]. The table keeps the best score of
//!    every (protein, branch, term) combination.
//! 2. [`propagate`] expands every prediction to all ancestors of its term,
//!    following the true-path rule. The result is a separate [`Propagation`]
//!    which can be merged back into the table if needed.
//! 3. A [`Report`] lists the best terms of each protein and branch.

mod propagation;
mod protein;
mod report;
mod table;

pub use propagation::{propagate, propagate_with_bonus, PropagatedPrediction, Propagation};
pub use protein::ProteinId;
pub use report::{Report, ReportRecord};
pub use table::{BranchScores, PredictionTable, RawPrediction, TermScores};
