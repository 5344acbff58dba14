//! Step-wise construction of an [`Ontology`]
//!
//! The builder uses type states to guarantee that all terms are added
//! before they are connected and that the ancestor caches are created
//! before the [`Ontology`] becomes available:
//!
//! 1. [`Builder<LooseCollection>`]: add terms
//! 2. [`Builder<AllTerms>`]: connect terms to their parents
//! 3. [`Builder<ConnectedTerms>`]: ancestor caches are populated
//! 4. [`Ontology`]: read-only
use std::collections::HashSet;
use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::ontology::termarena::Arena;
use crate::parser::ParsedTerm;
use crate::term::internal::GoTermInternal;
use crate::term::{Branch, GoGroup, GoTermId};
use crate::Ontology;

/// Terms can be added, but not yet connected
pub struct LooseCollection;
/// All terms are added, parent-child connections can be created
pub struct AllTerms;
/// All terms are connected and the ancestor caches are created
pub struct ConnectedTerms;

fn transition_state<TX, TY>(builder: Builder<TX>) -> Builder<TY> {
    Builder::<TY> {
        terms: builder.terms,
        edges: builder.edges,
        state: PhantomData,
    }
}

/// Builds an [`Ontology`] from terms and their parent connections
///
/// # Examples
///
/// ```
/// use gopath::ontology::Builder;
/// use gopath::Branch;
///
/// let mut builder = Builder::new();
/// builder.add_term("GO:0000001", Some("root"), Some(Branch::MolecularFunction));
/// builder.add_term("GO:0000002", None, Some(Branch::MolecularFunction));
///
/// let mut builder = builder.terms_complete();
/// builder.add_parent("GO:0000001", "GO:0000002");
///
/// let ontology = builder.connect_all_terms().build();
///
/// assert_eq!(ontology.len(), 2);
/// assert_eq!(ontology.ancestors_of("GO:0000002").len(), 2);
/// ```
pub struct Builder<T> {
    terms: Arena,
    edges: usize,
    state: PhantomData<T>,
}

impl Default for Builder<LooseCollection> {
    fn default() -> Self {
        Builder::new()
    }
}

impl Builder<LooseCollection> {
    /// Constructs a new, empty builder
    pub fn new() -> Builder<LooseCollection> {
        Builder::<LooseCollection> {
            terms: Arena::default(),
            edges: 0,
            state: PhantomData,
        }
    }

    /// Adds a new term to the ontology
    ///
    /// This method does not link the term to its parents.
    /// If a term with the same id was added before, it is replaced.
    pub fn add_term<I: Into<GoTermId>>(
        &mut self,
        id: I,
        name: Option<&str>,
        branch: Option<Branch>,
    ) -> GoTermId {
        let mut term = GoTermInternal::new(id.into());
        *term.name_mut() = name.map(ToString::to_string);
        *term.branch_mut() = branch;
        self.insert(term)
    }

    /// Adds a term from the OBO parser to the ontology
    ///
    /// This method does not link the term to its parents.
    pub fn add_parsed_term(&mut self, parsed: ParsedTerm) -> GoTermId {
        let mut term = GoTermInternal::new(parsed.id);
        *term.name_mut() = parsed.name;
        *term.branch_mut() = parsed.branch;
        *term.obsolete_mut() = parsed.obsolete;
        *term.replacement_mut() = parsed.replaced_by;
        self.insert(term)
    }

    fn insert(&mut self, term: GoTermInternal) -> GoTermId {
        let id = term.id().clone();
        if !self.terms.insert(term) {
            warn!("Term {} is declared more than once", id);
        }
        id
    }

    /// Finishes adding terms and allows connecting them
    #[must_use]
    pub fn terms_complete(self) -> Builder<AllTerms> {
        transition_state(self)
    }
}

impl Builder<AllTerms> {
    /// Add a connection from a term to its parent
    ///
    /// If either term was never added, an empty placeholder term is created.
    /// The OBO source is not sorted, so parents can be referenced
    /// that are declared later or not at all.
    pub fn add_parent<I: Into<GoTermId>, J: Into<GoTermId>>(&mut self, parent_id: I, child_id: J) {
        let parent_id = parent_id.into();
        let child_id = child_id.into();

        if self.terms.get(parent_id.as_str()).is_none() {
            debug!("Adding placeholder term {}", parent_id);
        }
        let parent = self.terms.get_or_insert_mut(&parent_id);
        parent.add_child(child_id.clone());

        let child = self.terms.get_or_insert_mut(&child_id);
        if child.add_parent(parent_id) {
            self.edges += 1;
        }
    }

    /// Creates and caches the ancestors of every term
    ///
    /// No new terms or connections can be added afterwards.
    #[must_use]
    pub fn connect_all_terms(mut self) -> Builder<ConnectedTerms> {
        let closures: Vec<(GoTermId, GoGroup)> = self
            .terms
            .iter()
            .map(|term| (term.id().clone(), collect_ancestors(&self.terms, term)))
            .collect();

        for (id, ancestors) in closures {
            if let Some(term) = self.terms.get_mut(id.as_str()) {
                term.set_all_parents(ancestors);
            }
        }
        debug!(
            "Connected {} terms with {} edges",
            self.terms.len(),
            self.edges
        );
        transition_state(self)
    }
}

impl Builder<ConnectedTerms> {
    /// Returns the final, read-only [`Ontology`]
    pub fn build(mut self) -> Ontology {
        self.terms.shrink_to_fit();
        Ontology::new(self.terms)
    }
}

/// Returns all direct and indirect parents of `term`
///
/// Iterative depth-first walk along the parent connections. Every term
/// is expanded at most once, so even a cyclic source terminates.
/// The term itself is not part of the result.
fn collect_ancestors(terms: &Arena, term: &GoTermInternal) -> GoGroup {
    let mut visited: HashSet<&GoTermId> = HashSet::new();
    let mut stack: Vec<&GoTermId> = term.parents().iter().collect();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        if let Some(parent) = terms.get(current.as_str()) {
            stack.extend(parent.parents().iter().filter(|id| !visited.contains(id)));
        }
    }

    visited.remove(term.id());
    visited.into_iter().cloned().collect::<Vec<GoTermId>>().into()
}

#[cfg(test)]
mod test {
    use super::*;

    fn chain() -> Builder<AllTerms> {
        let mut builder = Builder::new();
        builder.add_term("GO:1", Some("root"), Some(Branch::BiologicalProcess));
        builder.add_term("GO:2", None, Some(Branch::BiologicalProcess));
        builder.add_term("GO:3", None, Some(Branch::BiologicalProcess));
        let mut builder = builder.terms_complete();
        builder.add_parent("GO:1", "GO:2");
        builder.add_parent("GO:2", "GO:3");
        builder
    }

    #[test]
    fn ancestors_of_chain() {
        let ontology = chain().connect_all_terms().build();
        let term = ontology.term("GO:3").unwrap();
        assert_eq!(term.all_parent_ids().len(), 2);
        assert!(term.all_parent_ids().contains(&"GO:1".into()));
        assert!(!term.all_parent_ids().contains(&"GO:3".into()));
        assert_eq!(ontology.term("GO:1").unwrap().all_parent_ids().len(), 0);
    }

    #[test]
    fn placeholder_parents() {
        let mut builder = chain();
        builder.add_parent("GO:9", "GO:1");
        let ontology = builder.connect_all_terms().build();

        assert_eq!(ontology.len(), 4);
        let placeholder = ontology.term("GO:9").unwrap();
        assert!(placeholder.name().is_none());
        assert!(placeholder.branch().is_none());
        assert_eq!(ontology.ancestors_of("GO:3").len(), 4);
    }

    #[test]
    fn duplicate_edges_are_counted_once() {
        let mut builder = chain();
        builder.add_parent("GO:1", "GO:2");
        assert_eq!(builder.edges, 2);
        let ontology = builder.connect_all_terms().build();
        assert_eq!(ontology.term("GO:2").unwrap().parent_ids().len(), 1);
    }

    #[test]
    fn diamond() {
        let mut builder = Builder::new();
        for id in ["GO:1", "GO:2", "GO:3", "GO:4"] {
            builder.add_term(id, None, None);
        }
        let mut builder = builder.terms_complete();
        builder.add_parent("GO:1", "GO:2");
        builder.add_parent("GO:1", "GO:3");
        builder.add_parent("GO:2", "GO:4");
        builder.add_parent("GO:3", "GO:4");
        let ontology = builder.connect_all_terms().build();

        let ancestors = ontology.ancestors_of("GO:4");
        assert_eq!(ancestors.len(), 4);
        assert_eq!(ontology.term("GO:1").unwrap().children_ids().len(), 2);
    }

    #[test]
    fn cycles_terminate() {
        let mut builder = Builder::new();
        builder.add_term("GO:1", None, None);
        builder.add_term("GO:2", None, None);
        let mut builder = builder.terms_complete();
        builder.add_parent("GO:1", "GO:2");
        builder.add_parent("GO:2", "GO:1");
        let ontology = builder.connect_all_terms().build();

        assert_eq!(ontology.ancestors_of("GO:1").len(), 2);
        assert_eq!(ontology.term("GO:1").unwrap().all_parent_ids().len(), 1);
    }

    #[test]
    fn replace_duplicate_term() {
        let mut builder = Builder::new();
        builder.add_term("GO:1", Some("first"), None);
        builder.add_term("GO:1", Some("second"), Some(Branch::CellularComponent));
        let ontology = builder.terms_complete().connect_all_terms().build();
        assert_eq!(ontology.len(), 1);
        assert_eq!(ontology.term("GO:1").unwrap().name(), Some("second"));
    }
}
