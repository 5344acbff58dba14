//! The [`Ontology`] of GO terms and their ancestor closures

use core::fmt::Debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::parser::{go_obo, ParsedOntology};
use crate::term::{Branch, GoGroup, GoTerm, GoTermId};
use crate::{GoError, GoResult};

pub mod builder;
mod termarena;
pub use builder::Builder;
use termarena::Arena;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Ontology` is the main interface of the `gopath` crate and contains all terms
///
/// The [`Ontology`] holds every [`GoTerm`] of the Gene Ontology together with
/// its [`Branch`] and the connections to its parents. It is built once and
/// is read-only afterwards, so it can be shared between threads freely.
///
/// # Examples
///
/// ```
/// use gopath::{Branch, Ontology};
///
/// let ontology = Ontology::from_obo_file("tests/go_small.obo").unwrap();
///
/// let term = ontology.term("GO:0005739").unwrap();
/// assert_eq!(term.name(), Some("mitochondrion"));
/// assert_eq!(term.branch(), Some(Branch::CellularComponent));
///
/// // The ancestor closure always contains the term itself
/// let ancestors = ontology.ancestors_of("GO:0005739");
/// assert!(ancestors.contains(&"GO:0005739".into()));
/// assert!(ancestors.contains(&"GO:0005575".into()));
///
/// // Unknown terms are their own, single ancestor
/// assert_eq!(ontology.ancestors_of("GO:9999999").len(), 1);
/// ```
///
/// # Construction
///
/// The easiest way is to parse an OBO file, e.g. `go-basic.obo` from the
/// [Gene Ontology](https://geneontology.org/docs/download-ontology/) using
/// [`Ontology::from_obo_file`]. [`Ontology::from_obo_str`] and
/// [`Ontology::from_obo_reader`] parse other sources.
///
/// The [`Builder`] allows building the ontology manually.
///
/// # Layout
///
/// Terms are connected to each other in a directed acyclic graph. The
/// connection is derived from `is_a` and `part_of` relations of the child term.
///
/// ```mermaid
/// erDiagram
///     ONTOLOGY ||--|{ GOTERM : contains
///     GOTERM ||--o{ GOTERM : is_a
///     GOTERM ||--o{ GOTERM : part_of
///     GOTERM {
///         GoTermId id
///         str name
///         Branch branch
///         GoGroup parents
///         GoGroup children
///         GoGroup all_parents
///     }
/// ```
#[derive(Default, Clone)]
pub struct Ontology {
    terms: Arena,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.terms.len())
    }
}

/// Public API of the Ontology
///
/// Those methods are all safe to use
impl Ontology {
    pub(crate) fn new(terms: Arena) -> Self {
        Self { terms }
    }

    /// Builds the Ontology from parsed OBO data
    ///
    /// All terms are added first, then connected to their parents, so
    /// the order of the terms does not matter.
    pub fn from_parsed(parsed: ParsedOntology) -> Self {
        let (terms, edges) = parsed.into_parts();

        let mut builder = Builder::new();
        for term in terms {
            builder.add_parsed_term(term);
        }

        let mut builder = builder.terms_complete();
        for edge in edges {
            builder.add_parent(edge.parent, edge.child);
        }

        let ontology = builder.connect_all_terms().build();
        info!("Built ontology with {} terms", ontology.len());
        ontology
    }

    /// Parses an OBO formatted string into an Ontology
    ///
    /// # Errors
    ///
    /// - [`GoError::MalformedLine`]: a term contains a line without `: `
    /// - [`GoError::UnknownBranch`]: a term has an unknown namespace
    ///
    /// # Examples
    ///
    /// ```
    /// use gopath::Ontology;
    ///
    /// let ontology = Ontology::from_obo_str("\
    /// [Term]
    /// id: GO:0000001
    /// namespace: molecular_function
    /// ").unwrap();
    /// assert_eq!(ontology.len(), 1);
    ///
    /// assert!(Ontology::from_obo_str("[Term]\nid GO:0000001\n").is_err());
    /// ```
    pub fn from_obo_str(obo: &str) -> GoResult<Self> {
        go_obo::parse_str(obo).map(Self::from_parsed)
    }

    /// Parses OBO data from a reader into an Ontology
    ///
    /// # Errors
    ///
    /// - [`GoError::InvalidInput`]: the reader returns invalid data
    /// - [`GoError::MalformedLine`]: a term contains a line without `: `
    /// - [`GoError::UnknownBranch`]: a term has an unknown namespace
    pub fn from_obo_reader<R: BufRead>(reader: R) -> GoResult<Self> {
        go_obo::parse(reader).map(Self::from_parsed)
    }

    /// Parses an OBO file into an Ontology
    ///
    /// # Errors
    ///
    /// - [`GoError::CannotOpenFile`]: the file is not present or can't be opened
    /// - see [`Ontology::from_obo_reader`] for all other errors
    pub fn from_obo_file<P: AsRef<Path>>(filename: P) -> GoResult<Self> {
        let name = filename.as_ref().display().to_string();
        let file = File::open(filename).map_err(|_| GoError::CannotOpenFile(name))?;
        Self::from_obo_reader(BufReader::new(file))
    }

    /// Returns the number of terms in the Ontology
    ///
    /// Placeholder terms, that were only referenced as parent, are included
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the Ontology does not contain any terms
    ///
    /// # Examples
    ///
    /// ```
    /// use gopath::Ontology;
    /// let ontology = Ontology::default();
    /// assert!(ontology.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the [`GoTerm`] of the provided [`GoTermId`]
    ///
    /// If no such term is present in the Ontology, `None` is returned
    pub fn term<I: AsRef<str>>(&self, term_id: I) -> Option<GoTerm<'_>> {
        self.terms
            .get(term_id.as_ref())
            .map(|term| GoTerm::new(self, term))
    }

    /// Returns the [`GoTerm`] of the provided [`GoTermId`]
    ///
    /// # Errors
    ///
    /// [`GoError::DoesNotExist`] if the term is not present in the Ontology
    pub fn try_term<I: AsRef<str>>(&self, term_id: I) -> GoResult<GoTerm<'_>> {
        self.term(term_id).ok_or(GoError::DoesNotExist)
    }

    /// Returns `true` if the term is present in the Ontology
    pub fn contains<I: AsRef<str>>(&self, term_id: I) -> bool {
        self.terms.get(term_id.as_ref()).is_some()
    }

    /// Returns the [`Branch`] of the term
    ///
    /// `None` if the term is not present or did not declare a namespace
    pub fn branch<I: AsRef<str>>(&self, term_id: I) -> Option<Branch> {
        self.terms
            .get(term_id.as_ref())
            .and_then(|term| term.branch())
    }

    /// Returns a map of every term with a namespace to its [`Branch`]
    ///
    /// # Examples
    ///
    /// ```
    /// use gopath::{Branch, Ontology};
    ///
    /// let ontology = Ontology::from_obo_file("tests/go_small.obo").unwrap();
    /// let branches = ontology.branches();
    /// assert_eq!(branches.get("GO:0003674"), Some(&Branch::MolecularFunction));
    /// ```
    pub fn branches(&self) -> HashMap<GoTermId, Branch> {
        self.terms
            .iter()
            .filter_map(|term| term.branch().map(|branch| (term.id().clone(), branch)))
            .collect()
    }

    /// Returns the ancestor closure of a term
    ///
    /// The closure contains the term itself and every term that can be
    /// reached by following the `is_a` and `part_of` connections upwards.
    /// Including the term itself ensures that a prediction for a term
    /// is propagated to that very term as well.
    ///
    /// Querying a term that is not part of the Ontology is not an error,
    /// it returns a group with only the queried term.
    ///
    /// The closures are cached when the Ontology is built, so this method
    /// does not traverse the graph.
    ///
    /// # Examples
    ///
    /// ```
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
    /// let ancestors = ontology.ancestors_of("GO:0000002");
    /// assert_eq!(ancestors.len(), 2);
    ///
    /// let ancestors = ontology.ancestors_of("GO:0000001");
    /// assert_eq!(ancestors.len(), 1);
    /// ```
    pub fn ancestors_of<I: AsRef<str>>(&self, term_id: I) -> GoGroup {
        match self.term(term_id.as_ref()) {
            Some(term) => term.ancestor_ids(),
            None => {
                let mut group = GoGroup::with_capacity(1);
                group.insert(GoTermId::from(term_id.as_ref()));
                group
            }
        }
    }

    /// Returns an Iterator of all [`GoTerm`]s from the Ontology
    ///
    /// Terms are returned in the order they were declared
    pub fn terms(&self) -> Iter<'_> {
        self.into_iter()
    }
}

/// Iterates the Ontology and yields [`GoTerm`]s
pub struct Iter<'a> {
    inner: termarena::Iter<'a>,
    ontology: &'a Ontology,
}

impl<'a> std::iter::Iterator for Iter<'a> {
    type Item = GoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|term| GoTerm::new(self.ontology, term))
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = GoTerm<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.terms.iter(),
            ontology: self,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const OBO: &str = "\
format-version: 1.2
ontology: go

[Term]
id: GO:0000001
name: root
namespace: biological_process

[Term]
id: GO:0000002
name: child
namespace: biological_process
is_a: GO:0000001 ! root

[Term]
id: GO:0000003
name: grandchild
namespace: biological_process
is_a: GO:0000002 ! child
";

    #[test]
    fn parentless_term_is_own_ancestor() {
        let ont = Ontology::from_obo_str(OBO).unwrap();
        let ancestors = ont.ancestors_of("GO:0000001");
        assert_eq!(ancestors.len(), 1);
        assert!(ancestors.contains(&"GO:0000001".into()));
    }

    #[test]
    fn unknown_term_is_own_ancestor() {
        let ont = Ontology::from_obo_str(OBO).unwrap();
        let ancestors = ont.ancestors_of("GO:1234567");
        assert_eq!(ancestors.len(), 1);
        assert!(ancestors.contains(&"GO:1234567".into()));
        assert!(!ont.contains("GO:1234567"));
        assert!(matches!(ont.try_term("GO:1234567"), Err(GoError::DoesNotExist)));
        assert!(ont.try_term("GO:0000001").is_ok());
    }

    #[test]
    fn chain_ancestors() {
        let ont = Ontology::from_obo_str(OBO).unwrap();
        let ancestors = ont.ancestors_of("GO:0000003");
        for id in ["GO:0000001", "GO:0000002", "GO:0000003"] {
            assert!(ancestors.contains(&id.into()), "{id} missing");
        }
        assert_eq!(ancestors.len(), 3);
    }

    #[test]
    fn branches_and_iteration() {
        let ont = Ontology::from_obo_str(OBO).unwrap();
        assert_eq!(ont.len(), 3);
        assert_eq!(ont.branches().len(), 3);
        assert_eq!(ont.branch("GO:0000002"), Some(Branch::BiologicalProcess));
        assert_eq!(ont.branch("GO:7777777"), None);

        let names: Vec<&str> = ont.terms().filter_map(|term| term.name()).collect();
        assert_eq!(names, vec!["root", "child", "grandchild"]);
        assert_eq!(format!("{ont:?}"), "Ontology with 3 terms");
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Ontology::from_obo_file("tests/does_not_exist.obo"),
            Err(GoError::CannotOpenFile(_))
        ));
    }

    #[test]
    fn ontology_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Ontology>();
    }
}
