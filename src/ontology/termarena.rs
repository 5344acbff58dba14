use std::collections::HashMap;

use crate::term::internal::GoTermInternal;
use crate::term::GoTermId;
use crate::DEFAULT_NUM_TERMS;

/// Storage of all terms of the ontology
///
/// Terms are kept in insertion order and are indexed by their [`GoTermId`].
#[derive(Debug, Clone)]
pub(crate) struct Arena {
    terms: Vec<GoTermInternal>,
    ids: HashMap<GoTermId, usize>,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: Vec::with_capacity(DEFAULT_NUM_TERMS),
            ids: HashMap::with_capacity(DEFAULT_NUM_TERMS),
        }
    }
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Inserts a new term or replaces the term with the same id
    ///
    /// Returns `false` if a term with the same id was already present
    pub fn insert(&mut self, term: GoTermInternal) -> bool {
        if let Some(&idx) = self.ids.get(term.id()) {
            self.terms[idx] = term;
            false
        } else {
            self.ids.insert(term.id().clone(), self.terms.len());
            self.terms.push(term);
            true
        }
    }

    pub fn get(&self, id: &str) -> Option<&GoTermInternal> {
        self.ids.get(id).map(|&idx| &self.terms[idx])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut GoTermInternal> {
        match self.ids.get(id) {
            Some(&idx) => Some(&mut self.terms[idx]),
            None => None,
        }
    }

    /// Returns the term with the given id, creating an empty one if missing
    pub fn get_or_insert_mut(&mut self, id: &GoTermId) -> &mut GoTermInternal {
        let idx = match self.ids.get(id) {
            Some(&idx) => idx,
            None => {
                let idx = self.terms.len();
                self.ids.insert(id.clone(), idx);
                self.terms.push(GoTermInternal::new(id.clone()));
                idx
            }
        };
        &mut self.terms[idx]
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.terms.iter(),
        }
    }

    pub fn shrink_to_fit(&mut self) {
        self.terms.shrink_to_fit();
        self.ids.shrink_to_fit();
    }
}

pub(crate) struct Iter<'a> {
    inner: std::slice::Iter<'a, GoTermInternal>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a GoTermInternal;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn insert_and_replace() {
        let mut arena = Arena::default();
        assert!(arena.insert(GoTermInternal::new("GO:1".into())));
        assert!(arena.insert(GoTermInternal::new("GO:2".into())));

        let mut replacement = GoTermInternal::new("GO:1".into());
        *replacement.name_mut() = Some("foo".to_string());
        assert!(!arena.insert(replacement));

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get("GO:1").unwrap().name(), Some("foo"));
        assert_eq!(arena.iter().next().unwrap().id(), &GoTermId::from("GO:1"));
    }

    #[test]
    fn get_or_insert() {
        let mut arena = Arena::default();
        arena.get_or_insert_mut(&"GO:1".into()).add_parent("GO:2");
        arena.get_or_insert_mut(&"GO:1".into()).add_parent("GO:3");
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get("GO:1").unwrap().parents().len(), 2);
        assert!(arena.get_mut("GO:2").is_none());
    }
}
