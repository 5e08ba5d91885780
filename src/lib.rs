//! P-LOD Resource API
//!
//! A read-only HTTP API over the P-LOD linked-open-data graph of Pompeii.
//! Identifiers are accepted as bare local names (`pompeii`) or as URNs
//! (`urn:p-lod:id:pompeii`).
//!
//! # Layout
//!
//! - [`rdf`]: RDF terms, an indexed in-memory triple store, Turtle I/O
//! - [`plod`]: the shared graph and the per-request resource accessors
//! - [`http`]: axum routes, content negotiation, CORS
//! - [`config`]: YAML server configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use plod_api::plod::PlodGraph;
//!
//! let graph = PlodGraph::from_turtle(r#"
//!     @prefix p-lod: <urn:p-lod:id:> .
//!     @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!     p-lod:r1 rdfs:label "Regio I" ; p-lod:spatially-within p-lod:pompeii .
//! "#).unwrap();
//!
//! let pompeii = graph.resource("pompeii").unwrap();
//! let children = pompeii.spatial_children("all", "");
//! assert_eq!(children[0].label.as_deref(), Some("Regio I"));
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod http;
pub mod plod;
pub mod rdf;

// Re-export main types for convenience
pub use config::{ConfigError, CorsConfig, ServerConfig};
pub use http::{router, ApiError, HttpServer};
pub use plod::{normalize_id, PlodError, PlodGraph, PlodResource, PlodResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
