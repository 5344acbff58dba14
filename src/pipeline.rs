//! Runs all steps from raw predictions to the final report
//!
//! ```
//! use gopath::{Ontology, PipelineConfig};
//! use gopath::pipeline;
//!
//! let ontology = Ontology::from_obo_file("tests/go_small.obo").unwrap();
//! let config = PipelineConfig::default();
//!
//! let predictions = "\
//! UniProtKB\tP12345\tGO:0005739\tmitochondrion
//! UniProtKB\tP12345\tGO:0003824\tcatalytic activity
//! ";
//! let output = pipeline::run(&ontology, predictions.as_bytes(), &config).unwrap();
//!
//! let mut report = Vec::new();
//! pipeline::write_report(output.table(), &config, &mut report).unwrap();
//! assert!(String::from_utf8(report).unwrap().starts_with("P12345\tGO:0005739\t1.000\n"));
//! ```
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use tracing::{info, trace};

use crate::parser;
use crate::predictions::{propagate_with_bonus, PredictionTable, Propagation, RawPrediction, Report};
use crate::{GoError, GoResult, Ontology, DEFAULT_BONUS, DEFAULT_TOP_K, DUPLICATE_BONUS, RAW_SCORE};

/// Settings of all pipeline steps
///
/// # Examples
///
/// ```
/// use gopath::PipelineConfig;
///
/// let mut config = PipelineConfig::default();
/// config.set_top_k(10).set_bonus(0.2);
/// assert_eq!(config.top_k(), 10);
/// assert!((config.duplicate_bonus() - 0.05).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    bonus: f64,
    duplicate_bonus: f64,
    top_k: usize,
    raw_score: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bonus: DEFAULT_BONUS,
            duplicate_bonus: DUPLICATE_BONUS,
            top_k: DEFAULT_TOP_K,
            raw_score: RAW_SCORE,
        }
    }
}

impl PipelineConfig {
    /// The bonus added to every direct prediction
    pub fn bonus(&self) -> f64 {
        self.bonus
    }

    /// Sets the bonus added to every direct prediction
    pub fn set_bonus(&mut self, bonus: f64) -> &mut Self {
        self.bonus = bonus;
        self
    }

    /// The bonus for every repeated prediction during propagation
    pub fn duplicate_bonus(&self) -> f64 {
        self.duplicate_bonus
    }

    /// Sets the bonus for every repeated prediction during propagation
    pub fn set_duplicate_bonus(&mut self, duplicate_bonus: f64) -> &mut Self {
        self.duplicate_bonus = duplicate_bonus;
        self
    }

    /// The number of reported terms per protein and branch
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Sets the number of reported terms per protein and branch
    pub fn set_top_k(&mut self, top_k: usize) -> &mut Self {
        self.top_k = top_k;
        self
    }

    /// The score of every raw prediction line
    pub fn raw_score(&self) -> f64 {
        self.raw_score
    }

    /// Sets the score of every raw prediction line
    pub fn set_raw_score(&mut self, raw_score: f64) -> &mut Self {
        self.raw_score = raw_score;
        self
    }
}

/// The products of [`run`]
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    table: PredictionTable,
    propagation: Propagation,
}

impl PipelineOutput {
    /// The aggregated direct predictions
    pub fn table(&self) -> &PredictionTable {
        &self.table
    }

    /// The predictions propagated to all ancestors
    pub fn propagation(&self) -> &Propagation {
        &self.propagation
    }

    /// Consumes `self` and returns the table and propagation
    pub fn into_parts(self) -> (PredictionTable, Propagation) {
        (self.table, self.propagation)
    }
}

/// Adds raw predictions to a new [`PredictionTable`]
///
/// Every prediction gets the score [`PipelineConfig::raw_score`] and is added
/// with [`PipelineConfig::bonus`]. Predictions of terms without a branch
/// are skipped.
///
/// # Errors
///
/// Returns the first error of `predictions`
pub fn collect_predictions<I: IntoIterator<Item = GoResult<RawPrediction>>>(
    ontology: &Ontology,
    predictions: I,
    config: &PipelineConfig,
) -> GoResult<PredictionTable> {
    let mut table = PredictionTable::new();
    let mut skipped = 0usize;
    for prediction in predictions {
        let prediction = prediction?;
        let Some(branch) = ontology.branch(prediction.term()) else {
            trace!("Skipping prediction of {} without branch", prediction.term());
            skipped += 1;
            continue;
        };
        let (protein, term, _) = prediction.into_parts();
        table.add_prediction_with_bonus(protein, term, config.raw_score, branch, config.bonus);
    }
    info!(
        "Collected predictions of {} proteins, skipped {} predictions",
        table.len(),
        skipped
    );
    Ok(table)
}

/// Reads raw predictions and propagates them along `ontology`
///
/// # Errors
///
/// - [`GoError::InvalidInput`]: a prediction line has fewer than three columns
pub fn run<R: BufRead>(
    ontology: &Ontology,
    predictions: R,
    config: &PipelineConfig,
) -> GoResult<PipelineOutput> {
    let table = collect_predictions(ontology, parser::predictions::read(predictions), config)?;
    let propagation = propagate_with_bonus(ontology, table.raw_predictions(), config.duplicate_bonus);
    Ok(PipelineOutput { table, propagation })
}

/// Writes the report of `table` with [`PipelineConfig::top_k`] terms
///
/// # Errors
///
/// [`GoError::CannotWrite`] if writing fails
pub fn write_report<W: Write>(
    table: &PredictionTable,
    config: &PipelineConfig,
    writer: W,
) -> GoResult<()> {
    Report::new(table)
        .with_top_k(config.top_k)
        .write_tsv(writer)
}

/// Writes the report of `table` into a new file
///
/// # Errors
///
/// - [`GoError::CannotOpenFile`]: the file can't be created
/// - [`GoError::CannotWrite`]: writing fails
pub fn write_report_file<P: AsRef<Path>>(
    table: &PredictionTable,
    config: &PipelineConfig,
    file: P,
) -> GoResult<()> {
    let filename = file.as_ref().display().to_string();
    let file = File::create(file).map_err(|_| GoError::CannotOpenFile(filename))?;
    write_report(table, config, BufWriter::new(file))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Branch;

    const OBO: &str = "\
[Term]
id: GO:0000001
name: root
namespace: biological_process

[Term]
id: GO:0000002
name: leaf
namespace: biological_process
is_a: GO:0000001 ! root
";

    #[test]
    fn end_to_end() {
        let ontology = Ontology::from_obo_str(OBO).unwrap();
        let output = run(
            &ontology,
            "db\tproteinA\tGO:0000002\n".as_bytes(),
            &PipelineConfig::default(),
        )
        .unwrap();

        let scores = output.table().protein("proteinA").unwrap();
        assert_eq!(
            scores.get(Branch::BiologicalProcess).get("GO:0000002"),
            Some(1.0)
        );

        let propagation = output.propagation();
        assert_eq!(propagation.len(), 2);
        for record in propagation {
            assert!((record.score() - 1.0).abs() < f64::EPSILON);
        }

        let mut buffer = Vec::new();
        write_report(output.table(), &PipelineConfig::default(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "proteinA\tGO:0000002\t1.000\n");
    }

    #[test]
    fn unknown_terms_are_skipped() {
        let ontology = Ontology::from_obo_str(OBO).unwrap();
        let data = "db\tproteinA\tGO:0000009\ndb\tproteinB\tGO:0000001\n";
        let output = run(&ontology, data.as_bytes(), &PipelineConfig::default()).unwrap();
        assert_eq!(output.table().len(), 1);
        assert!(output.table().protein("proteinA").is_none());
    }

    #[test]
    fn invalid_line() {
        let ontology = Ontology::from_obo_str(OBO).unwrap();
        let data = "db\tproteinA\tGO:0000002\nproteinB GO:0000001\n";
        assert!(matches!(
            run(&ontology, data.as_bytes(), &PipelineConfig::default()),
            Err(GoError::InvalidInput(_))
        ));
    }

    #[test]
    fn fixture_files() {
        let ontology = Ontology::from_obo_file("tests/go_small.obo").unwrap();
        let predictions = parser::predictions::read_file("tests/predictions.tsv").unwrap();
        let config = PipelineConfig::default();

        let table = collect_predictions(&ontology, predictions, &config).unwrap();
        assert_eq!(table.len(), 2);

        let scores = table.protein("P12345").unwrap();
        assert_eq!(scores.get(Branch::CellularComponent).len(), 1);
        assert_eq!(scores.get(Branch::MolecularFunction).len(), 1);
        assert_eq!(scores.get(Branch::BiologicalProcess).len(), 1);
        assert!(table.protein("Q67890").unwrap().score("GO:9999999").is_none());

        let propagation = propagate_with_bonus(&ontology, table.raw_predictions(), config.duplicate_bonus());
        assert_eq!(propagation.for_protein("P12345").count(), 16);
        assert_eq!(propagation.for_protein("Q67890").count(), 10);
    }

    #[test]
    fn custom_config() {
        let ontology = Ontology::from_obo_str(OBO).unwrap();
        let mut config = PipelineConfig::default();
        config.set_raw_score(0.5).set_bonus(0.0).set_top_k(1);

        let data = "db\tproteinA\tGO:0000002\ndb\tproteinA\tGO:0000001\n";
        let (table, propagation) = run(&ontology, data.as_bytes(), &config)
            .unwrap()
            .into_parts();

        let scores = table.protein("proteinA").unwrap();
        assert_eq!(scores.score("GO:0000001"), Some(0.5));
        assert_eq!(propagation.for_protein("proteinA").count(), 3);

        let mut buffer = Vec::new();
        write_report(&table, &config, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }
}
