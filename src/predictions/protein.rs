use core::fmt::Debug;
use std::borrow::Borrow;
use std::fmt::Display;
use std::sync::Arc;

/// The identifier of a protein, e.g. an `UniProtKB` accession
///
/// Just like [`GoTermId`](crate::GoTermId) it is an opaque key
/// and cheap to clone.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProteinId {
    inner: Arc<str>,
}

impl ProteinId {
    /// Returns the identifier as string slice
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for ProteinId {
    fn from(s: &str) -> Self {
        ProteinId { inner: s.into() }
    }
}

impl From<String> for ProteinId {
    fn from(s: String) -> Self {
        ProteinId { inner: s.into() }
    }
}

impl From<&ProteinId> for ProteinId {
    fn from(id: &ProteinId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for ProteinId {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for ProteinId {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Debug for ProteinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProteinId({self})")
    }
}

impl Display for ProteinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl PartialEq<&str> for ProteinId {
    fn eq(&self, other: &&str) -> bool {
        &*self.inner == *other
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_and_debug() {
        let id = ProteinId::from("P12345");
        assert_eq!(id.to_string(), "P12345");
        assert_eq!(format!("{id:?}"), "ProteinId(P12345)");
        assert!(id == "P12345");
    }
}
