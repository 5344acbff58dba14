use std::collections::HashMap;

use tracing::debug;

use crate::predictions::{ProteinId, RawPrediction};
use crate::term::GoTermId;
use crate::{clamp_score, Ontology, DUPLICATE_BONUS};

/// A score of a protein for an ancestor of one of its predicted terms
#[derive(Debug, Clone, PartialEq)]
pub struct PropagatedPrediction {
    protein: ProteinId,
    term: GoTermId,
    score: f64,
}

impl PropagatedPrediction {
    /// The protein of the original prediction
    pub fn protein(&self) -> &ProteinId {
        &self.protein
    }

    /// The ancestor term (or the predicted term itself)
    pub fn term(&self) -> &GoTermId {
        &self.term
    }

    /// The propagated score
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// The result of [`propagate`]
///
/// Contains one [`PropagatedPrediction`] for every ancestor of every
/// input prediction, in the order of the input.
#[derive(Debug, Default, Clone)]
pub struct Propagation {
    records: Vec<PropagatedPrediction>,
}

impl Propagation {
    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record was created
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator of all records
    pub fn iter(&self) -> std::slice::Iter<'_, PropagatedPrediction> {
        self.records.iter()
    }

    /// Returns an iterator of all records of a single protein
    pub fn for_protein<'a>(
        &'a self,
        protein: &'a str,
    ) -> impl Iterator<Item = &'a PropagatedPrediction> + 'a {
        self.records
            .iter()
            .filter(move |record| record.protein.as_str() == protein)
    }
}

impl<'a> IntoIterator for &'a Propagation {
    type Item = &'a PropagatedPrediction;
    type IntoIter = std::slice::Iter<'a, PropagatedPrediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Propagation {
    type Item = PropagatedPrediction;
    type IntoIter = std::vec::IntoIter<PropagatedPrediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Propagates predictions to all ancestors of their terms
///
/// Uses [`DUPLICATE_BONUS`], see [`propagate_with_bonus`]
pub fn propagate<I: IntoIterator<Item = RawPrediction>>(
    ontology: &Ontology,
    predictions: I,
) -> Propagation {
    propagate_with_bonus(ontology, predictions, DUPLICATE_BONUS)
}

/// Propagates predictions to all ancestors of their terms
///
/// Predictions are grouped by protein. Every prediction creates one record for
/// each term of [`Ontology::ancestors_of`], including the term itself.
///
/// If a protein has the same term with the same score more than once, the
/// score is raised by `bonus` for every additional occurrence, capped at
/// [`MAX_SCORE`](crate::MAX_SCORE). Each of the occurrences still creates
/// its own records, so identical records are emitted once per occurrence.
///
/// Unknown terms are not an error, they only propagate to themselves.
///
/// # Examples
///
/// ```
/// use gopath::predictions::{propagate, RawPrediction};
/// use gopath::Ontology;
///
/// let ontology = Ontology::from_obo_str("\
/// [Term]
/// id: GO:0000001
/// namespace: biological_process
///
/// [Term]
/// id: GO:0000002
/// namespace: biological_process
/// is_a: GO:0000001 ! root
/// ").unwrap();
///
/// let prediction = RawPrediction::new("P12345", "GO:0000002", 0.5);
/// let propagation = propagate(&ontology, vec![prediction.clone(), prediction]);
///
/// // 2 identical predictions x 2 ancestors
/// assert_eq!(propagation.len(), 4);
/// for record in &propagation {
///     assert!((record.score() - 0.55).abs() < 1e-9);
/// }
/// ```
pub fn propagate_with_bonus<I: IntoIterator<Item = RawPrediction>>(
    ontology: &Ontology,
    predictions: I,
    bonus: f64,
) -> Propagation {
    let mut proteins: Vec<(ProteinId, Vec<(GoTermId, f64)>)> = Vec::new();
    let mut index: HashMap<ProteinId, usize> = HashMap::new();
    let mut num_predictions = 0usize;

    for prediction in predictions {
        num_predictions += 1;
        let (protein, term, score) = prediction.into_parts();
        let idx = *index.entry(protein.clone()).or_insert_with(|| {
            proteins.push((protein, Vec::new()));
            proteins.len() - 1
        });
        proteins[idx].1.push((term, score));
    }

    let mut records = Vec::with_capacity(num_predictions);
    for (protein, terms) in &proteins {
        let mut occurrences: HashMap<(&GoTermId, u64), usize> = HashMap::new();
        for (term, score) in terms {
            *occurrences.entry((term, score_key(*score))).or_default() += 1;
        }

        for (term, score) in terms {
            let count = occurrences
                .get(&(term, score_key(*score)))
                .copied()
                .unwrap_or(1);
            let score = duplicate_score(*score, count, bonus);
            for ancestor in &ontology.ancestors_of(term) {
                records.push(PropagatedPrediction {
                    protein: protein.clone(),
                    term: ancestor.clone(),
                    score,
                });
            }
        }
    }

    debug!(
        "Propagated {} predictions of {} proteins to {} records",
        num_predictions,
        proteins.len(),
        records.len()
    );
    Propagation { records }
}

/// Hashable representation of a score
///
/// Equal scores have the same key, `-0.0` is counted as `0.0`
fn score_key(score: f64) -> u64 {
    (score + 0.0).to_bits()
}

#[allow(clippy::cast_precision_loss)]
fn duplicate_score(score: f64, count: usize, bonus: f64) -> f64 {
    clamp_score(score + count.saturating_sub(1) as f64 * bonus)
}
