//! RDF support for the P-LOD API
//!
//! This module implements the triple store the resolver reads from:
//! - RDF triples (subject-predicate-object) over oxrdf terms
//! - an insertion-ordered, indexed in-memory store
//! - Turtle and N-Triples parsing and serialization
//! - namespace prefixes for compact IRI notation
//!
//! # Example
//!
//! ```rust
//! use plod_api::rdf::{RdfStore, Triple, NamedNode, Literal, RdfPredicate};
//!
//! let mut store = RdfStore::new();
//!
//! let subject = NamedNode::new("urn:p-lod:id:pompeii").unwrap();
//! let predicate = RdfPredicate::new("http://www.w3.org/2000/01/rdf-schema#label").unwrap();
//! let object = Literal::new_simple_literal("Pompeii");
//!
//! let triple = Triple::new(subject.clone().into(), predicate, object.into());
//! store.insert(triple).unwrap();
//!
//! let results = store.triples_with_subject(&subject.into());
//! assert_eq!(results.len(), 1);
//! ```

mod namespace;
mod serialization;
mod store;
mod types;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple, XSD_STRING,
};

pub use store::{RdfStore, RdfStoreError, RdfStoreResult};

pub use namespace::{NamespaceManager, PrefixError, PrefixResult, PLOD, RDF, RDFS};

pub use serialization::{
    ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer, SerializeError,
    SerializeResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_module_exports() {
        let store: RdfStore = RdfStore::new();
        assert!(store.is_empty());
        let ns_mgr = NamespaceManager::new();
        assert_eq!(ns_mgr.get_iri("p-lod").unwrap(), PLOD);
    }
}
