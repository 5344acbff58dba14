#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use core::fmt::Debug;
use thiserror::Error;

pub mod ontology;
pub mod parser;
pub mod pipeline;
pub mod predictions;
pub mod term;

pub use ontology::Ontology;
pub use pipeline::PipelineConfig;
pub use predictions::{PredictionTable, ProteinId, Propagation, Report};
pub use term::{Branch, GoGroup, GoTerm, GoTermId};

/// Confidence bonus added to every direct (non-propagated) prediction
pub const DEFAULT_BONUS: f64 = 0.1;

/// Bonus added to propagated scores for every additional identical raw prediction
pub const DUPLICATE_BONUS: f64 = 0.05;

/// Number of terms reported per protein and branch
pub const DEFAULT_TOP_K: usize = 30;

/// Score assigned to every line of a prediction TSV file
pub const RAW_SCORE: f64 = 1.0;

/// Highest possible score of any prediction
pub const MAX_SCORE: f64 = 1.0;

/// Line that starts a term stanza in OBO files
const OBO_TERM_MARKER: &str = "[Term]";

const DEFAULT_NUM_PARENTS: usize = 4;
const DEFAULT_NUM_TERMS: usize = 50_000;

/// Main Error type for this crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GoError {
    /// The term does not exist in the Ontology
    #[error("term does not exist")]
    DoesNotExist,
    /// Failed to open a file
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// Failed to write output data
    #[error("cannot write output: {0}")]
    CannotWrite(String),
    /// Invalid data in an input source
    #[error("invalid input data: {0}")]
    InvalidInput(String),
    /// A line of an OBO file does not follow the `key: value` format
    #[error("malformed line {line}: {content}")]
    MalformedLine {
        /// 1-based line number inside the source
        line: usize,
        /// the offending line
        content: String,
    },
    /// The namespace of a term is not one of the three GO branches
    #[error("unknown branch: {0}")]
    UnknownBranch(String),
}

/// Shortcut for `Result<T, GoError>`
pub type GoResult<T> = Result<T, GoError>;

/// Clamps a score to the maximum allowed score
fn clamp_score(score: f64) -> f64 {
    score.min(MAX_SCORE)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clamping() {
        assert!((clamp_score(1.1) - 1.0).abs() < f64::EPSILON);
        assert!((clamp_score(0.4) - 0.4).abs() < f64::EPSILON);
        assert!((clamp_score(1.0) - 1.0).abs() < f64::EPSILON);
    }
}
