//! RDF namespace and prefix management
//!
//! This module handles namespace prefixes for compact IRI notation.

use indexmap::IndexMap;
use thiserror::Error;

/// `rdf:` namespace
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// `rdfs:` namespace
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// `p-lod:` namespace; P-LOD identifiers are URNs under this prefix
pub const PLOD: &str = "urn:p-lod:id:";

/// Prefix errors
#[derive(Error, Debug)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace manager with common prefixes
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings, in registration order
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with the prefixes used by P-LOD data
    pub fn new() -> Self {
        let mut mgr = Self {
            prefixes: IndexMap::new(),
        };

        mgr.add_prefix("rdf", RDF);
        mgr.add_prefix("rdfs", RDFS);
        mgr.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        mgr.add_prefix("owl", "http://www.w3.org/2002/07/owl#");
        mgr.add_prefix("dcterms", "http://purl.org/dc/terms/");
        mgr.add_prefix("p-lod", PLOD);

        mgr
    }

    /// Add a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        let (prefix, local) = compact_iri
            .split_once(':')
            .ok_or_else(|| PrefixError::InvalidIri(compact_iri.to_string()))?;
        let iri = self.get_iri(prefix)?;
        Ok(format!("{}{}", iri, local))
    }

    /// Resolve a user-supplied term to a full IRI.
    ///
    /// P-LOD URNs and absolute IRIs pass through, `prefix:local` with a known
    /// prefix is expanded, and anything else is taken as a P-LOD local name.
    pub fn resolve_term(&self, term: &str) -> String {
        if term.starts_with(PLOD) || term.contains("://") {
            return term.to_string();
        }
        self.expand(term)
            .unwrap_or_else(|_| format!("{}{}", PLOD, term))
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}
