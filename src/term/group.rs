use std::ops::BitOr;

use smallvec::SmallVec;

use crate::term::GoTermId;
use crate::DEFAULT_NUM_PARENTS;

/// A set of [`GoTermId`] representing a group of GO terms
///
/// Each term can occur only once in the group and the
/// group is always sorted.
///
/// This group is used e.g. for the parents, children or
/// the ancestor closure of a term
///
/// # Examples
///
/// ```
/// use gopath::{GoGroup, GoTermId};
///
/// let mut group = GoGroup::new();
/// assert!(group.insert("GO:0000002".into()));
/// assert!(group.insert("GO:0000001".into()));
/// assert!(!group.insert("GO:0000002".into()));
///
/// assert_eq!(group.len(), 2);
/// assert!(group.contains(&GoTermId::from("GO:0000001")));
///
/// let ids: Vec<String> = group.iter().map(ToString::to_string).collect();
/// assert_eq!(ids, vec!["GO:0000001", "GO:0000002"]);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GoGroup {
    ids: SmallVec<[GoTermId; DEFAULT_NUM_PARENTS]>,
}

impl GoGroup {
    /// Constructs a new, empty [`GoGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`GoGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`GoTermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`GoTermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`GoTermId`] to the group
    ///
    /// Returns whether the `GoTermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `GoTermId`, true is returned.
    /// - If the group already contained this `GoTermId`, false is returned.
    ///
    pub fn insert(&mut self, id: GoTermId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Adds a new [`GoTermId`] to the end of the group
    ///
    /// The caller must guarantee that `id` is larger than
    /// every id already in the group.
    fn push_sorted(&mut self, id: GoTermId) {
        debug_assert!(self.ids.last().map_or(true, |last| last < &id));
        self.ids.push(id);
    }

    /// Returns `true` if the group contains the [`GoTermId`]
    pub fn contains(&self, id: &GoTermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an Iterator of the [`GoTermId`]s inside the group
    pub fn iter(&self) -> GoTermIds<'_> {
        GoTermIds::new(self.ids.iter())
    }
}

impl FromIterator<GoTermId> for GoGroup {
    fn from_iter<T: IntoIterator<Item = GoTermId>>(iter: T) -> Self {
        let mut group = GoGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl From<Vec<GoTermId>> for GoGroup {
    fn from(mut ids: Vec<GoTermId>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        GoGroup {
            ids: SmallVec::from_vec(ids),
        }
    }
}

impl<'a> IntoIterator for &'a GoGroup {
    type Item = &'a GoTermId;
    type IntoIter = GoTermIds<'a>;

    fn into_iter(self) -> GoTermIds<'a> {
        GoTermIds::new(self.ids.iter())
    }
}

impl IntoIterator for GoGroup {
    type Item = GoTermId;
    type IntoIter = smallvec::IntoIter<[GoTermId; DEFAULT_NUM_PARENTS]>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

/// An iterator over [`GoTermId`]s
pub struct GoTermIds<'a> {
    inner: std::slice::Iter<'a, GoTermId>,
}

impl<'a> GoTermIds<'a> {
    fn new(inner: std::slice::Iter<'a, GoTermId>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for GoTermIds<'a> {
    type Item = &'a GoTermId;
    fn next(&mut self) -> Option<&'a GoTermId> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for GoTermIds<'_> {}

/// Merges two sorted groups into a new sorted group
impl BitOr for &GoGroup {
    type Output = GoGroup;

    fn bitor(self, rhs: &GoGroup) -> GoGroup {
        let mut group = GoGroup::with_capacity(self.len() + rhs.len());
        let mut left = self.ids.iter().peekable();
        let mut right = rhs.ids.iter().peekable();
        loop {
            let next = match (left.peek(), right.peek()) {
                (Some(l), Some(r)) => match l.cmp(r) {
                    std::cmp::Ordering::Less => left.next(),
                    std::cmp::Ordering::Greater => right.next(),
                    std::cmp::Ordering::Equal => {
                        right.next();
                        left.next()
                    }
                },
                (Some(_), None) => left.next(),
                (None, Some(_)) => right.next(),
                (None, None) => break,
            };
            if let Some(id) = next {
                group.push_sorted(id.clone());
            }
        }
        group
    }
}
