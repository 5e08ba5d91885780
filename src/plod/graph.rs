//! Shared, read-only P-LOD graph
//!
//! `PlodGraph` is loaded once at startup and handed to every request behind
//! an `Arc`. It knows how to walk the P-LOD relations; the per-request
//! `PlodResource` composes those walks into the API operations.

use super::resource::{Entry, PlodResource};
use super::vocab::Vocabulary;
use super::{PlodError, PlodResult};
use crate::rdf::{
    NamedNode, NamespaceManager, RdfFormat, RdfObject, RdfParser, RdfPredicate, RdfStore,
    RdfSubject, Triple, PLOD,
};
use indexmap::IndexSet;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Immutable P-LOD graph with the vocabulary needed to traverse it
pub struct PlodGraph {
    store: RdfStore,
    namespaces: NamespaceManager,
    vocab: Vocabulary,
}

impl PlodGraph {
    /// Wrap an already populated store
    pub fn from_store(store: RdfStore) -> PlodResult<Self> {
        Ok(Self {
            store,
            namespaces: NamespaceManager::new(),
            vocab: Vocabulary::new()?,
        })
    }

    /// Build a graph from an in-memory Turtle document
    pub fn from_turtle(input: &str) -> PlodResult<Self> {
        let triples = RdfParser::parse(input, RdfFormat::Turtle).map_err(|source| {
            PlodError::Load {
                path: "<inline>".into(),
                source,
            }
        })?;
        let mut store = RdfStore::new();
        store.extend(triples);
        Self::from_store(store)
    }

    /// Load and merge RDF files; the format is taken from the file extension
    /// and defaults to Turtle.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> PlodResult<Self> {
        let mut store = RdfStore::new();

        for path in paths {
            let path = path.as_ref();
            let format = RdfFormat::from_path(path).unwrap_or(RdfFormat::Turtle);
            let triples = RdfParser::parse_file(path, format).map_err(|source| PlodError::Load {
                path: path.to_path_buf(),
                source,
            })?;
            let parsed = triples.len();
            let added = store.extend(triples);
            info!(
                "Loaded {} triples from {} ({} new)",
                parsed,
                path.display(),
                added
            );
        }

        info!("P-LOD graph ready with {} triples", store.len());
        Self::from_store(store)
    }

    /// Construct the resource handle for a bare local name
    pub fn resource(&self, local_name: &str) -> PlodResult<PlodResource<'_>> {
        PlodResource::new(self, local_name)
    }

    /// Number of triples in the graph
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub(crate) fn store(&self) -> &RdfStore {
        &self.store
    }

    pub(crate) fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Expand a user-supplied class name (`insula`, `p-lod:insula`, full IRI)
    pub(crate) fn resolve_term(&self, term: &str) -> String {
        self.namespaces.resolve_term(term)
    }

    pub(crate) fn node(&self, local_name: &str) -> Result<NamedNode, crate::rdf::RdfError> {
        NamedNode::new(&format!("{PLOD}{local_name}"))
    }

    /// Named-node objects of `(node, predicate, ?o)`
    pub(crate) fn parents(&self, node: &NamedNode, predicate: &RdfPredicate) -> Vec<NamedNode> {
        self.store
            .objects(node, predicate)
            .into_iter()
            .filter_map(RdfObject::as_named_node)
            .cloned()
            .collect()
    }

    /// Named-node subjects of `(?s, predicate, node)`
    pub(crate) fn children(&self, node: &NamedNode, predicate: &RdfPredicate) -> Vec<NamedNode> {
        self.store
            .subjects(predicate, &RdfObject::NamedNode(node.clone()))
            .into_iter()
            .filter_map(RdfSubject::as_named_node)
            .cloned()
            .collect()
    }

    /// Breadth-first closure of `step`, excluding `start`.
    ///
    /// Cycles in the data are cut by the visited set.
    pub(crate) fn transitive<F>(&self, start: &NamedNode, step: F) -> Vec<NamedNode>
    where
        F: Fn(&NamedNode) -> Vec<NamedNode>,
    {
        let mut visited: IndexSet<NamedNode> = IndexSet::new();
        visited.insert(start.clone());

        let mut cursor = 0;
        while cursor < visited.len() {
            let current = visited[cursor].clone();
            for next in step(&current) {
                visited.insert(next);
            }
            cursor += 1;
        }

        visited.into_iter().skip(1).collect()
    }

    /// Spatial parent: `spatially-within`, or `is-part-of` for artworks
    pub(crate) fn spatial_parent(&self, node: &NamedNode) -> Option<NamedNode> {
        let vocab = &self.vocab;
        self.parents(node, &vocab.spatially_within)
            .into_iter()
            .next()
            .or_else(|| self.parents(node, &vocab.is_part_of).into_iter().next())
    }

    /// `[node, parent, ..., root]`
    pub(crate) fn spatial_chain(&self, node: &NamedNode) -> Vec<NamedNode> {
        let mut chain: IndexSet<NamedNode> = IndexSet::new();
        chain.insert(node.clone());

        let mut current = node.clone();
        while let Some(parent) = self.spatial_parent(&current) {
            if !chain.insert(parent.clone()) {
                debug!("Spatial cycle at {}", parent);
                break;
            }
            current = parent;
        }

        chain.into_iter().collect()
    }

    /// Nodes whose spatial parent is `node`; the inverse of [`Self::spatial_parent`]
    pub(crate) fn spatial_children(&self, node: &NamedNode) -> Vec<NamedNode> {
        let vocab = &self.vocab;
        let candidates: IndexSet<NamedNode> = self
            .children(node, &vocab.spatially_within)
            .into_iter()
            .chain(self.children(node, &vocab.is_part_of))
            .collect();

        candidates
            .into_iter()
            .filter(|child| self.spatial_parent(child).as_ref() == Some(node))
            .collect()
    }

    pub(crate) fn spatial_descendants(&self, node: &NamedNode) -> Vec<NamedNode> {
        self.transitive(node, |n| self.spatial_children(n))
    }

    pub(crate) fn rdf_type(&self, node: &NamedNode) -> Option<NamedNode> {
        self.parents(node, &self.vocab.rdf_type).into_iter().next()
    }

    pub(crate) fn has_type(&self, node: &NamedNode, type_iri: &str) -> bool {
        self.parents(node, &self.vocab.rdf_type)
            .iter()
            .any(|t| t.as_str() == type_iri)
    }

    pub(crate) fn label(&self, node: &NamedNode) -> Option<String> {
        self.store
            .object(node, &self.vocab.label)
            .and_then(RdfObject::as_literal)
            .map(|l| l.value().to_string())
    }

    /// Parsed `p-lod:geojson` value of a node
    pub(crate) fn geometry(&self, node: &NamedNode) -> PlodResult<Option<Value>> {
        let Some(literal) = self
            .store
            .object(node, &self.vocab.geojson)
            .and_then(RdfObject::as_literal)
        else {
            return Ok(None);
        };

        serde_json::from_str(literal.value())
            .map(Some)
            .map_err(|source| PlodError::Geometry {
                urn: node.as_str().to_string(),
                source,
            })
    }

    /// Summary entry (`urn`, `type`, `label`) for a node
    pub(crate) fn entry(&self, node: &NamedNode) -> Entry {
        Entry {
            urn: node.as_str().to_string(),
            rdf_type: self.rdf_type(node).map(|t| t.as_str().to_string()),
            label: self.label(node),
            geojson: None,
        }
    }

    pub(crate) fn entries(&self, nodes: &[NamedNode]) -> Vec<Entry> {
        nodes.iter().map(|n| self.entry(n)).collect()
    }

    /// Triples with `node` as subject, in load order
    pub(crate) fn describe(&self, node: &NamedNode) -> Vec<&Triple> {
        self.store
            .triples_with_subject(&RdfSubject::NamedNode(node.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/pompeii.ttl");

    fn graph() -> PlodGraph {
        PlodGraph::from_turtle(FIXTURE).unwrap()
    }

    fn urns(nodes: &[NamedNode]) -> Vec<&str> {
        nodes.iter().map(NamedNode::as_str).collect()
    }

    #[test]
    fn test_fixture_loads() {
        let graph = graph();
        assert!(!graph.is_empty());
        assert!(graph.len() > 40);
    }

    #[test]
    fn test_spatial_chain_follows_part_of() {
        let graph = graph();
        let artwork = graph.node("r1-i8-p17-space-1-f1-artwork-1").unwrap();

        let chain = graph.spatial_chain(&artwork);
        assert_eq!(
            urns(&chain),
            vec![
                "urn:p-lod:id:r1-i8-p17-space-1-f1-artwork-1",
                "urn:p-lod:id:r1-i8-p17-space-1-f1",
                "urn:p-lod:id:r1-i8-p17-space-1",
                "urn:p-lod:id:r1-i8-p17",
                "urn:p-lod:id:r1-i8",
                "urn:p-lod:id:r1",
                "urn:p-lod:id:pompeii",
            ]
        );
    }

    #[test]
    fn test_spatial_walks_agree() {
        let graph = graph();
        let pompeii = graph.node("pompeii").unwrap();

        let descendants = graph.spatial_descendants(&pompeii);
        assert!(urns(&descendants).contains(&"urn:p-lod:id:r1-i8-p17-space-1-f1-artwork-1"));

        for node in &descendants {
            let parent = graph.spatial_parent(node).unwrap();
            assert!(
                graph.spatial_children(&parent).contains(node),
                "{} missing under {}",
                node,
                parent
            );
            assert_eq!(graph.spatial_chain(node).last(), Some(&pompeii));
        }

        let wall = graph.node("r1-i8-p17-space-1-f1").unwrap();
        assert_eq!(
            urns(&graph.spatial_children(&wall)),
            vec!["urn:p-lod:id:r1-i8-p17-space-1-f1-artwork-1"]
        );
    }

    #[test]
    fn test_spatially_within_wins_over_part_of() {
        let mixed = r#"
            @prefix p-lod: <urn:p-lod:id:> .
            p-lod:x p-lod:spatially-within p-lod:a ;
                p-lod:is-part-of p-lod:b .
        "#;
        let graph = PlodGraph::from_turtle(mixed).unwrap();
        let a = graph.node("a").unwrap();
        let b = graph.node("b").unwrap();

        assert_eq!(urns(&graph.spatial_children(&a)), vec!["urn:p-lod:id:x"]);
        assert!(graph.spatial_children(&b).is_empty());
    }

    #[test]
    fn test_transitive_cuts_cycles() {
        let cyclic = r#"
            @prefix p-lod: <urn:p-lod:id:> .
            p-lod:a p-lod:broader p-lod:b .
            p-lod:b p-lod:broader p-lod:a .
        "#;
        let graph = PlodGraph::from_turtle(cyclic).unwrap();
        let a = graph.node("a").unwrap();

        let ancestors = graph.transitive(&a, |n| graph.parents(n, &graph.vocab().broader));
        assert_eq!(urns(&ancestors), vec!["urn:p-lod:id:b"]);
    }

    #[test]
    fn test_entry_fields() {
        let graph = graph();
        let r1 = graph.node("r1").unwrap();

        let entry = graph.entry(&r1);
        assert_eq!(entry.urn, "urn:p-lod:id:r1");
        assert_eq!(entry.rdf_type.as_deref(), Some("urn:p-lod:id:region"));
        assert_eq!(entry.label.as_deref(), Some("Regio I"));

        let space = graph.node("r1-i8-p17-space-1").unwrap();
        assert_eq!(graph.entry(&space).label, None);
    }

    #[test]
    fn test_invalid_geometry_is_an_error() {
        let broken = r#"
            @prefix p-lod: <urn:p-lod:id:> .
            p-lod:x p-lod:geojson "{not json" .
        "#;
        let graph = PlodGraph::from_turtle(broken).unwrap();
        let x = graph.node("x").unwrap();

        assert!(matches!(graph.geometry(&x), Err(PlodError::Geometry { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = PlodGraph::load(&["does/not/exist.ttl"]);
        assert!(matches!(result, Err(PlodError::Load { .. })));
    }
}
