use crate::term::internal::GoTermInternal;
use crate::term::{Branch, GoChildren, GoGroup, GoParents, GoTermId, GoTerms};
use crate::Ontology;

/// The `GoTerm` represents a single term from the Gene Ontology
///
/// The term holds all required information and relationship data.
/// It is a cheap, borrowed view into the [`Ontology`].
///
/// # Examples
///
/// ```
/// use gopath::{Branch, Ontology};
///
/// let ontology = Ontology::from_obo_str("\
/// [Term]
/// id: GO:0000001
/// name: root
/// namespace: biological_process
///
/// [Term]
/// id: GO:0000002
/// name: leaf
/// namespace: biological_process
/// is_a: GO:0000001 ! root
/// ").unwrap();
///
/// let term = ontology.term("GO:0000002").unwrap();
/// assert_eq!(term.name(), Some("leaf"));
/// assert_eq!(term.branch(), Some(Branch::BiologicalProcess));
/// assert_eq!(term.parents().next().unwrap().name(), Some("root"));
/// assert_eq!(term.ancestor_ids().len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GoTerm<'a> {
    id: &'a GoTermId,
    name: Option<&'a str>,
    branch: Option<Branch>,
    parents: &'a GoParents,
    all_parents: &'a GoParents,
    children: &'a GoChildren,
    obsolete: bool,
    replacement: Option<&'a GoTermId>,
    ontology: &'a Ontology,
}

impl<'a> GoTerm<'a> {
    /// Constructs a new [`GoTerm`] from a `GoTermInternal`
    pub(crate) fn new(ontology: &'a Ontology, term: &'a GoTermInternal) -> GoTerm<'a> {
        GoTerm {
            id: term.id(),
            name: term.name(),
            branch: term.branch(),
            parents: term.parents(),
            all_parents: term.all_parents(),
            children: term.children(),
            obsolete: term.obsolete(),
            replacement: term.replacement(),
            ontology,
        }
    }

    /// Returns the [`GoTermId`] of the term
    ///
    /// e.g.: `GO:0008150`
    pub fn id(&self) -> &'a GoTermId {
        self.id
    }

    /// Returns the name of the term
    ///
    /// Terms that are only referenced as a parent, but never
    /// declared in the OBO source, do not have a name.
    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    /// Returns the [`Branch`] of the term, if the term declared a namespace
    pub fn branch(&self) -> Option<Branch> {
        self.branch
    }

    /// Returns an iterator of the direct parents of the term
    pub fn parents(&self) -> GoTerms<'a> {
        GoTerms::new(self.parents, self.ontology)
    }

    /// Returns the [`GoTermId`]s of the direct parents
    pub fn parent_ids(&self) -> &'a GoParents {
        self.parents
    }

    /// Returns an iterator of the direct children of the term
    pub fn children(&self) -> GoTerms<'a> {
        GoTerms::new(self.children, self.ontology)
    }

    /// Returns the [`GoTermId`]s of the direct children
    pub fn children_ids(&self) -> &'a GoChildren {
        self.children
    }

    /// Returns an iterator of all direct and indirect parents
    pub fn all_parents(&self) -> GoTerms<'a> {
        GoTerms::new(self.all_parents, self.ontology)
    }

    /// Returns the [`GoTermId`]s of all direct and indirect parents
    ///
    /// The term itself is not part of the group, use
    /// [`GoTerm::ancestor_ids`] to include it.
    pub fn all_parent_ids(&self) -> &'a GoParents {
        self.all_parents
    }

    /// Returns the ancestor closure of the term
    ///
    /// The closure contains all direct and indirect parents
    /// and the term itself.
    pub fn ancestor_ids(&self) -> GoGroup {
        let itself: GoGroup = std::iter::once(self.id.clone()).collect();
        self.all_parents | &itself
    }

    /// Returns `true` if `other` is a direct or indirect parent of the term
    pub fn child_of(&self, other: &GoTerm) -> bool {
        self.all_parents.contains(other.id)
    }

    /// Returns `true` if the term is flagged as obsolete
    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    /// Returns the replacement of an obsolete term, if declared
    pub fn replaced_by(&self) -> Option<&'a GoTermId> {
        self.replacement
    }
}

impl PartialEq for GoTerm<'_> {
    fn eq(&self, other: &GoTerm) -> bool {
        self.id == other.id
    }
}

impl Eq for GoTerm<'_> {}
