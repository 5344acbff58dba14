use core::fmt::Debug;
use std::borrow::Borrow;
use std::fmt::Display;
use std::sync::Arc;

/// The identifier of a [`GoTerm`](crate::GoTerm)
///
/// The identifier is treated as an opaque key, e.g. `GO:0008150`.
/// It is never parsed into a number, so identifiers from other
/// OBO ontologies work as well.
///
/// Cloning is cheap, all clones share the same string.
///
/// # Examples
///
/// ```
/// use gopath::GoTermId;
///
/// let id = GoTermId::from("GO:0008150");
/// assert_eq!(id.as_str(), "GO:0008150");
/// assert_eq!(id.to_string(), "GO:0008150");
/// assert!(id == "GO:0008150");
/// ```
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GoTermId {
    inner: Arc<str>,
}

impl GoTermId {
    /// Returns the identifier as string slice
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for GoTermId {
    fn from(s: &str) -> Self {
        GoTermId { inner: s.into() }
    }
}

impl From<String> for GoTermId {
    fn from(s: String) -> Self {
        GoTermId { inner: s.into() }
    }
}

impl From<&GoTermId> for GoTermId {
    fn from(id: &GoTermId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for GoTermId {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for GoTermId {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Debug for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTermId({self})")
    }
}

impl Display for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl PartialEq<str> for GoTermId {
    fn eq(&self, other: &str) -> bool {
        &*self.inner == other
    }
}

impl PartialEq<&str> for GoTermId {
    fn eq(&self, other: &&str) -> bool {
        &*self.inner == *other
    }
}
