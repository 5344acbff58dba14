//! [`GoTerm`]s are the main building block of the Gene Ontology.
//! Each term is a well defined protein function, process or location.
//!
//! Every term belongs to exactly one [`Branch`] of the ontology and
//! is connected to its parent terms through `is_a` or `part_of` relations.
//! If a term applies to a protein, all of its ancestors apply as well
//! (the true-path rule).

mod branch;
pub(crate) mod group;
mod goterm;
mod gotermid;
pub(crate) mod internal;

pub use branch::Branch;
pub use group::{GoGroup, GoTermIds};
pub use goterm::GoTerm;
pub use gotermid::GoTermId;

use crate::Ontology;

/// A set of parent [`GoTermId`]s
pub type GoParents = GoGroup;

/// A set of child [`GoTermId`]s
pub type GoChildren = GoGroup;

/// The kind of relation between a term and its parent
///
/// Both relations are treated as generalizations for the
/// purpose of ancestor lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `is_a` relation: the child is a subtype of the parent
    IsA,
    /// `part_of` relationship: the child is a component of the parent
    PartOf,
}

/// Iterator of [`GoTerm`]s, created from a group of [`GoTermId`]s
pub struct GoTerms<'a> {
    ontology: &'a Ontology,
    group: GoTermIds<'a>,
}

impl<'a> GoTerms<'a> {
    /// Constructs a new iterator of [`GoTerm`]s from a [`GoGroup`]
    pub(crate) fn new(group: &'a GoGroup, ontology: &'a Ontology) -> Self {
        GoTerms {
            ontology,
            group: group.iter(),
        }
    }
}

impl<'a> Iterator for GoTerms<'a> {
    type Item = GoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        for id in self.group.by_ref() {
            if let Some(term) = self.ontology.term(id) {
                return Some(term);
            }
        }
        None
    }
}

impl std::fmt::Debug for GoTerms<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTerms")
    }
}
