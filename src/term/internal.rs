use crate::term::{Branch, GoChildren, GoGroup, GoParents, GoTermId};
use crate::DEFAULT_NUM_PARENTS;

/// The stored representation of a term inside the [`Ontology`](crate::Ontology)
///
/// Clients only ever see the borrowed [`GoTerm`](crate::GoTerm) view.
#[derive(Debug, Clone)]
pub(crate) struct GoTermInternal {
    id: GoTermId,
    name: Option<String>,
    branch: Option<Branch>,
    parents: GoParents,
    all_parents: GoParents,
    children: GoChildren,
    obsolete: bool,
    replacement: Option<GoTermId>,
}

impl GoTermInternal {
    pub fn new(id: GoTermId) -> GoTermInternal {
        GoTermInternal {
            id,
            name: None,
            branch: None,
            parents: GoGroup::with_capacity(DEFAULT_NUM_PARENTS),
            all_parents: GoGroup::new(),
            children: GoGroup::with_capacity(DEFAULT_NUM_PARENTS),
            obsolete: false,
            replacement: None,
        }
    }

    pub fn id(&self) -> &GoTermId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn name_mut(&mut self) -> &mut Option<String> {
        &mut self.name
    }

    pub fn branch(&self) -> Option<Branch> {
        self.branch
    }

    pub fn branch_mut(&mut self) -> &mut Option<Branch> {
        &mut self.branch
    }

    pub fn parents(&self) -> &GoParents {
        &self.parents
    }

    pub fn children(&self) -> &GoChildren {
        &self.children
    }

    /// All direct and indirect parents, excluding the term itself
    pub fn all_parents(&self) -> &GoParents {
        &self.all_parents
    }

    pub fn set_all_parents(&mut self, all_parents: GoParents) {
        self.all_parents = all_parents;
    }

    pub fn add_parent<I: Into<GoTermId>>(&mut self, parent_id: I) -> bool {
        self.parents.insert(parent_id.into())
    }

    pub fn add_child<I: Into<GoTermId>>(&mut self, child_id: I) -> bool {
        self.children.insert(child_id.into())
    }

    pub fn obsolete(&self) -> bool {
        self.obsolete
    }

    pub fn obsolete_mut(&mut self) -> &mut bool {
        &mut self.obsolete
    }

    pub fn replacement(&self) -> Option<&GoTermId> {
        self.replacement.as_ref()
    }

    pub fn replacement_mut(&mut self) -> &mut Option<GoTermId> {
        &mut self.replacement
    }
}

impl PartialEq for GoTermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GoTermInternal {}
