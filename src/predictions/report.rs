use std::fmt::Display;
use std::io::Write;

use crate::predictions::{PredictionTable, ProteinId};
use crate::term::GoTermId;
use crate::{GoError, GoResult, DEFAULT_TOP_K};

/// A single line of a [`Report`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    protein: ProteinId,
    term: GoTermId,
    score: f64,
}

impl ReportRecord {
    /// The protein
    pub fn protein(&self) -> &ProteinId {
        &self.protein
    }

    /// The predicted term
    pub fn term(&self) -> &GoTermId {
        &self.term
    }

    /// The unrounded score
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Tab separated `protein`, `term` and the score with 3 decimals
impl Display for ReportRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{:.3}", self.protein, self.term, self.score)
    }
}

/// The best scoring terms of every protein and branch
///
/// For each protein, in the order they were added to the [`PredictionTable`],
/// and each branch (`CCO`, `MFO`, `BPO`), the terms are ranked by score.
/// Terms with the same score keep the order in which they were added.
/// Only the best `top_k` terms are reported.
///
/// # Examples
///
/// ```
/// use gopath::{Branch, PredictionTable, Report};
///
/// let mut table = PredictionTable::new();
/// table.add_prediction("P12345", "GO:0008150", 0.2, Branch::BiologicalProcess);
/// table.add_prediction("P12345", "GO:0006412", 0.8, Branch::BiologicalProcess);
/// table.add_prediction("P12345", "GO:0005739", 0.5, Branch::CellularComponent);
///
/// let report = Report::new(&table).with_top_k(1);
/// let lines: Vec<String> = report.records().iter().map(ToString::to_string).collect();
/// assert_eq!(lines, vec![
///     "P12345\tGO:0005739\t0.600",
///     "P12345\tGO:0006412\t0.900",
/// ]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    table: &'a PredictionTable,
    top_k: usize,
}

impl<'a> Report<'a> {
    /// Constructs a new report with the default of [`DEFAULT_TOP_K`] terms
    pub fn new(table: &'a PredictionTable) -> Self {
        Self {
            table,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Changes the number of reported terms per protein and branch
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Returns the number of reported terms per protein and branch
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Returns all records of the report
    pub fn records(&self) -> Vec<ReportRecord> {
        let mut records = Vec::new();
        if self.top_k == 0 {
            return records;
        }

        for (protein, branches) in self.table.proteins() {
            for (_, scores) in branches.iter() {
                let mut ranked: Vec<(&GoTermId, f64)> = scores.iter().collect();
                // `sort_by` is stable, ties stay in insertion order
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
                records.extend(ranked.into_iter().take(self.top_k).map(|(term, score)| {
                    ReportRecord {
                        protein: protein.clone(),
                        term: term.clone(),
                        score,
                    }
                }));
            }
        }
        records
    }

    /// Writes the report as tab separated lines, without header
    ///
    /// # Errors
    ///
    /// [`GoError::CannotWrite`] if writing fails
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> GoResult<()> {
        for record in self.records() {
            writeln!(writer, "{record}").map_err(|err| GoError::CannotWrite(err.to_string()))?;
        }
        writer
            .flush()
            .map_err(|err| GoError::CannotWrite(err.to_string()))
    }
}
