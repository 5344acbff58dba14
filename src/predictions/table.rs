use std::collections::HashMap;

use tracing::trace;

use crate::predictions::{propagate, ProteinId, Propagation};
use crate::term::{Branch, GoTermId};
use crate::{clamp_score, Ontology, DEFAULT_BONUS};

/// A single prediction of a protein to a GO term
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrediction {
    protein: ProteinId,
    term: GoTermId,
    score: f64,
}

impl RawPrediction {
    /// Constructs a new `RawPrediction`
    pub fn new<P: Into<ProteinId>, T: Into<GoTermId>>(protein: P, term: T, score: f64) -> Self {
        Self {
            protein: protein.into(),
            term: term.into(),
            score,
        }
    }

    /// The predicted protein
    pub fn protein(&self) -> &ProteinId {
        &self.protein
    }

    /// The predicted term
    pub fn term(&self) -> &GoTermId {
        &self.term
    }

    /// The confidence score of the prediction
    pub fn score(&self) -> f64 {
        self.score
    }

    pub(crate) fn into_parts(self) -> (ProteinId, GoTermId, f64) {
        (self.protein, self.term, self.score)
    }
}

/// The scores of all predicted terms of a single branch
///
/// Terms are kept in the order they were first added, which
/// is the tie breaker when terms are ranked.
#[derive(Debug, Default, Clone)]
pub struct TermScores {
    scores: Vec<(GoTermId, f64)>,
    index: HashMap<GoTermId, usize>,
}

impl TermScores {
    /// Returns the score of a term, if present
    pub fn get(&self, term: &str) -> Option<f64> {
        self.index.get(term).map(|&idx| self.scores[idx].1)
    }

    /// Returns the number of terms
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if no term was predicted
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns an iterator of all terms and scores, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&GoTermId, f64)> + '_ {
        self.scores.iter().map(|(term, score)| (term, *score))
    }

    /// Inserts the score or keeps the existing score if it is higher
    ///
    /// Returns `true` if the term was not present before
    fn insert_max(&mut self, term: GoTermId, score: f64) -> bool {
        if let Some(&idx) = self.index.get(&term) {
            let stored = &mut self.scores[idx].1;
            *stored = stored.max(score);
            false
        } else {
            self.index.insert(term.clone(), self.scores.len());
            self.scores.push((term, score));
            true
        }
    }
}

/// The predicted terms of a protein, separated by [`Branch`]
#[derive(Debug, Default, Clone)]
pub struct BranchScores {
    cco: TermScores,
    mfo: TermScores,
    bpo: TermScores,
}

impl BranchScores {
    /// Returns the scores of one branch
    pub fn get(&self, branch: Branch) -> &TermScores {
        match branch {
            Branch::CellularComponent => &self.cco,
            Branch::MolecularFunction => &self.mfo,
            Branch::BiologicalProcess => &self.bpo,
        }
    }

    fn get_mut(&mut self, branch: Branch) -> &mut TermScores {
        match branch {
            Branch::CellularComponent => &mut self.cco,
            Branch::MolecularFunction => &mut self.mfo,
            Branch::BiologicalProcess => &mut self.bpo,
        }
    }

    /// Returns an iterator of all branches and their scores
    ///
    /// The branches are always returned as `CCO`, `MFO`, `BPO`
    pub fn iter(&self) -> impl Iterator<Item = (Branch, &TermScores)> + '_ {
        Branch::ALL.into_iter().map(|branch| (branch, self.get(branch)))
    }

    /// Returns the score of a term, regardless of its branch
    pub fn score(&self, term: &str) -> Option<f64> {
        self.iter().find_map(|(_, scores)| scores.get(term))
    }
}

/// Collection of the best prediction scores per protein, branch and term
///
/// # Examples
///
/// ```
/// use gopath::{Branch, PredictionTable};
///
/// let mut table = PredictionTable::new();
/// table.add_prediction("P12345", "GO:0005739", 0.5, Branch::CellularComponent);
/// table.add_prediction("P12345", "GO:0005739", 0.2, Branch::CellularComponent);
///
/// let scores = table.protein("P12345").unwrap();
/// assert_eq!(scores.get(Branch::CellularComponent).get("GO:0005739"), Some(0.6));
/// assert!(scores.get(Branch::BiologicalProcess).is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct PredictionTable {
    proteins: Vec<(ProteinId, BranchScores)>,
    index: HashMap<ProteinId, usize>,
}

impl PredictionTable {
    /// Constructs a new, empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prediction with the default bonus of [`DEFAULT_BONUS`]
    ///
    /// See [`PredictionTable::add_prediction_with_bonus`]
    pub fn add_prediction<P: Into<ProteinId>, T: Into<GoTermId>>(
        &mut self,
        protein: P,
        term: T,
        raw_score: f64,
        branch: Branch,
    ) {
        self.add_prediction_with_bonus(protein, term, raw_score, branch, DEFAULT_BONUS);
    }

    /// Adds a prediction of `protein` to `term`
    ///
    /// The stored score is `raw_score + bonus`, capped at [`MAX_SCORE`](crate::MAX_SCORE).
    /// If the term was predicted before, the higher score is kept.
    /// The first prediction of a protein creates the tables of all three branches.
    pub fn add_prediction_with_bonus<P: Into<ProteinId>, T: Into<GoTermId>>(
        &mut self,
        protein: P,
        term: T,
        raw_score: f64,
        branch: Branch,
        bonus: f64,
    ) {
        let score = clamp_score(raw_score + bonus);
        self.entry(protein.into())
            .get_mut(branch)
            .insert_max(term.into(), score);
    }

    fn entry(&mut self, protein: ProteinId) -> &mut BranchScores {
        let idx = match self.index.get(&protein) {
            Some(&idx) => idx,
            None => {
                let idx = self.proteins.len();
                self.index.insert(protein.clone(), idx);
                self.proteins.push((protein, BranchScores::default()));
                idx
            }
        };
        &mut self.proteins[idx].1
    }

    /// Returns the scores of a protein
    pub fn protein(&self, protein: &str) -> Option<&BranchScores> {
        self.index.get(protein).map(|&idx| &self.proteins[idx].1)
    }

    /// Returns an iterator of all proteins, in the order they were first added
    pub fn proteins(&self) -> impl Iterator<Item = (&ProteinId, &BranchScores)> + '_ {
        self.proteins.iter().map(|(protein, scores)| (protein, scores))
    }

    /// Returns the number of proteins
    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    /// Returns `true` if the table does not contain any protein
    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }

    /// Returns all stored scores as predictions
    ///
    /// Proteins are returned in the order they were first added, their
    /// terms by branch (`CCO`, `MFO`, `BPO`) and insertion order.
    pub fn raw_predictions(&self) -> Vec<RawPrediction> {
        let mut predictions = Vec::new();
        for (protein, branches) in &self.proteins {
            for (_, scores) in branches.iter() {
                predictions.extend(
                    scores
                        .iter()
                        .map(|(term, score)| RawPrediction::new(protein, term, score)),
                );
            }
        }
        predictions
    }

    /// Propagates all stored scores to the ancestors of their terms
    ///
    /// See [`propagate`]
    pub fn propagate(&self, ontology: &Ontology) -> Propagation {
        propagate(ontology, self.raw_predictions())
    }

    /// Adds propagated scores to the table
    ///
    /// No bonus is added and existing higher scores are kept. Records of
    /// terms without a branch in `ontology` are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use gopath::{Branch, Ontology, PredictionTable};
    ///
    /// let ontology = Ontology::from_obo_file("tests/go_small.obo").unwrap();
    ///
    /// let mut table = PredictionTable::new();
    /// table.add_prediction("P12345", "GO:0005739", 0.5, Branch::CellularComponent);
    ///
    /// let propagation = table.propagate(&ontology);
    /// table.merge_propagation(&propagation, &ontology);
    ///
    /// let scores = table.protein("P12345").unwrap();
    /// assert_eq!(scores.score("GO:0005575"), Some(0.6));
    /// ```
    pub fn merge_propagation(&mut self, propagation: &Propagation, ontology: &Ontology) {
        for record in propagation {
            let Some(branch) = ontology.branch(record.term()) else {
                trace!("Skipping {} without branch", record.term());
                continue;
            };
            self.entry(record.protein().clone())
                .get_mut(branch)
                .insert_max(record.term().clone(), clamp_score(record.score()));
        }
    }
}
