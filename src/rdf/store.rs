//! RDF triple store implementation
//!
//! An in-memory, insertion-ordered triple store with subject, predicate and
//! object indices. The P-LOD graph is loaded once and only read afterwards,
//! so the store has no removal path.

use super::types::{NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::IndexSet;
use std::collections::HashMap;
use thiserror::Error;

/// RDF store errors
#[derive(Error, Debug)]
pub enum RdfStoreError {
    /// Duplicate triple
    #[error("Duplicate triple: {0}")]
    DuplicateTriple(String),
}

pub type RdfStoreResult<T> = Result<T, RdfStoreError>;

/// RDF triple store with multiple indices for efficient queries
///
/// Every index maps a term to positions in the primary `IndexSet`, so all
/// lookups return triples in load order.
#[derive(Clone, Default)]
pub struct RdfStore {
    /// All triples (primary storage)
    triples: IndexSet<Triple>,

    /// Subject -> positions
    subject_index: HashMap<RdfSubject, Vec<usize>>,

    /// Predicate -> positions
    predicate_index: HashMap<RdfPredicate, Vec<usize>>,

    /// Object -> positions
    object_index: HashMap<RdfObject, Vec<usize>>,
}

impl RdfStore {
    /// Create a new empty RDF store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple into the store
    pub fn insert(&mut self, triple: Triple) -> RdfStoreResult<()> {
        if self.triples.contains(&triple) {
            return Err(RdfStoreError::DuplicateTriple(triple.to_string()));
        }

        let (pos, _) = self.triples.insert_full(triple.clone());
        self.update_indices_insert(&triple, pos);

        Ok(())
    }

    /// Insert many triples, skipping ones already present.
    ///
    /// Returns the number of triples actually added.
    pub fn extend<I>(&mut self, triples: I) -> usize
    where
        I: IntoIterator<Item = Triple>,
    {
        triples
            .into_iter()
            .filter(|triple| self.insert(triple.clone()).is_ok())
            .count()
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Get triples with a specific subject
    pub fn triples_with_subject(&self, subject: &RdfSubject) -> Vec<&Triple> {
        self.lookup(self.subject_index.get(subject))
    }

    /// Get triples with a specific predicate
    pub fn triples_with_predicate(&self, predicate: &RdfPredicate) -> Vec<&Triple> {
        self.lookup(self.predicate_index.get(predicate))
    }

    /// Get triples with a specific object
    pub fn triples_with_object(&self, object: &RdfObject) -> Vec<&Triple> {
        self.lookup(self.object_index.get(object))
    }

    /// Objects of `(subject, predicate, ?o)`
    pub fn objects(&self, subject: &NamedNode, predicate: &RdfPredicate) -> Vec<&RdfObject> {
        let subject = RdfSubject::NamedNode(subject.clone());
        self.triples_with_subject(&subject)
            .into_iter()
            .filter(|t| &t.predicate == predicate)
            .map(|t| &t.object)
            .collect()
    }

    /// First object of `(subject, predicate, ?o)`
    pub fn object(&self, subject: &NamedNode, predicate: &RdfPredicate) -> Option<&RdfObject> {
        self.objects(subject, predicate).into_iter().next()
    }

    /// Subjects of `(?s, predicate, object)`
    pub fn subjects(&self, predicate: &RdfPredicate, object: &RdfObject) -> Vec<&RdfSubject> {
        self.triples_with_object(object)
            .into_iter()
            .filter(|t| &t.predicate == predicate)
            .map(|t| &t.subject)
            .collect()
    }

    // Private helper methods

    fn lookup(&self, positions: Option<&Vec<usize>>) -> Vec<&Triple> {
        positions
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|&pos| self.triples.get_index(pos))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn update_indices_insert(&mut self, triple: &Triple, pos: usize) {
        self.subject_index
            .entry(triple.subject.clone())
            .or_default()
            .push(pos);

        self.predicate_index
            .entry(triple.predicate.clone())
            .or_default()
            .push(pos);

        self.object_index
            .entry(triple.object.clone())
            .or_default()
            .push(pos);
    }
}
