//! P-LOD resource resolution
//!
//! The HTTP facade never touches triples directly. For every request it
//! normalizes the identifier, asks the shared [`PlodGraph`] for a fresh
//! [`PlodResource`] and calls exactly one accessor on it:
//!
//! ```rust
//! use plod_api::plod::{normalize_id, PlodGraph};
//!
//! let graph = PlodGraph::from_turtle(r#"
//!     @prefix p-lod: <urn:p-lod:id:> .
//!     p-lod:r1 p-lod:spatially-within p-lod:pompeii .
//! "#).unwrap();
//!
//! let resource = graph.resource(normalize_id("urn:p-lod:id:r1")).unwrap();
//! let ancestors = resource.spatial_ancestors();
//! assert_eq!(ancestors.last().unwrap().urn, "urn:p-lod:id:pompeii");
//! ```

mod geojson;
mod graph;
mod resource;
mod vocab;

use crate::rdf::{ParseError, RdfError, SerializeError, PLOD};
use std::path::PathBuf;
use thiserror::Error;

pub use graph::PlodGraph;
pub use resource::{Entry, ImageEntry, ObjectUsage, PlodResource, PredicateUsage, PropertyRow};
pub use vocab::{terms, Vocabulary};

/// Resolver errors
#[derive(Error, Debug)]
pub enum PlodError {
    /// The local name does not form a valid IRI
    #[error("Invalid P-LOD identifier {id:?}: {source}")]
    InvalidIdentifier {
        id: String,
        #[source]
        source: RdfError,
    },

    /// A data file could not be read or parsed
    #[error("Failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A stored `p-lod:geojson` literal is not JSON
    #[error("Invalid GeoJSON stored for {urn}: {source}")]
    Geometry {
        urn: String,
        #[source]
        source: serde_json::Error,
    },

    /// Vocabulary term rejected
    #[error(transparent)]
    Term(#[from] RdfError),

    /// Turtle output failed
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

pub type PlodResult<T> = Result<T, PlodError>;

/// Strip the `urn:p-lod:id:` prefix, if present, leaving the local name
pub fn normalize_id(id: &str) -> &str {
    id.strip_prefix(PLOD).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("pompeii"), "pompeii");
        assert_eq!(normalize_id("urn:p-lod:id:pompeii"), "pompeii");
        assert_eq!(normalize_id("urn:p-lod:id:"), "");
        // only the leading prefix is removed
        assert_eq!(
            normalize_id("urn:p-lod:id:urn:p-lod:id:pompeii"),
            "urn:p-lod:id:pompeii"
        );
        assert_eq!(normalize_id("x-urn:p-lod:id:pompeii"), "x-urn:p-lod:id:pompeii");
    }

    #[test]
    fn test_prefixed_and_bare_ids_resolve_identically() {
        let graph = PlodGraph::from_turtle(include_str!("../../tests/fixtures/pompeii.ttl")).unwrap();

        let bare = graph.resource(normalize_id("ariadne")).unwrap();
        let urn = graph.resource(normalize_id("urn:p-lod:id:ariadne")).unwrap();

        assert_eq!(bare.urn(), urn.urn());
        assert_eq!(urn.local_name(), "ariadne");
        assert_eq!(
            bare.depicted_where("feature").unwrap(),
            urn.depicted_where("feature").unwrap()
        );
    }
}
