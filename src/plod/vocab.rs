//! P-LOD vocabulary
//!
//! Predicates the resolver walks. Everything except `rdf:type` and the two
//! RDFS terms lives in the `urn:p-lod:id:` namespace.

use crate::rdf::{RdfPredicate, RdfResult, PLOD, RDF, RDFS};

/// Local names of P-LOD predicates
pub mod terms {
    pub const SPATIALLY_WITHIN: &str = "spatially-within";
    pub const IS_PART_OF: &str = "is-part-of";
    pub const BROADER: &str = "broader";
    pub const DEPICTS: &str = "depicts";
    pub const INSTANCE_OF: &str = "instance-of";
    pub const BEST_IMAGE: &str = "best-image";
    pub const GEOJSON: &str = "geojson";
}

/// Parsed predicate terms, built once per graph
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub rdf_type: RdfPredicate,
    pub label: RdfPredicate,
    pub see_also: RdfPredicate,
    pub spatially_within: RdfPredicate,
    pub is_part_of: RdfPredicate,
    pub broader: RdfPredicate,
    pub depicts: RdfPredicate,
    pub instance_of: RdfPredicate,
    pub best_image: RdfPredicate,
    pub geojson: RdfPredicate,
}

impl Vocabulary {
    pub fn new() -> RdfResult<Self> {
        let plod = |local: &str| RdfPredicate::new(&format!("{PLOD}{local}"));

        Ok(Self {
            rdf_type: RdfPredicate::new(&format!("{RDF}type"))?,
            label: RdfPredicate::new(&format!("{RDFS}label"))?,
            see_also: RdfPredicate::new(&format!("{RDFS}seeAlso"))?,
            spatially_within: plod(terms::SPATIALLY_WITHIN)?,
            is_part_of: plod(terms::IS_PART_OF)?,
            broader: plod(terms::BROADER)?,
            depicts: plod(terms::DEPICTS)?,
            instance_of: plod(terms::INSTANCE_OF)?,
            best_image: plod(terms::BEST_IMAGE)?,
            geojson: plod(terms::GEOJSON)?,
        })
    }
}
