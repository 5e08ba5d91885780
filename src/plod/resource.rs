//! Per-request view of one P-LOD entity
//!
//! A `PlodResource` is built from a bare local name, used for exactly one
//! accessor and dropped. It owns nothing but the entity's IRI.

use super::geojson;
use super::graph::PlodGraph;
use super::{PlodError, PlodResult};
use crate::rdf::{NamedNode, RdfFormat, RdfObject, RdfPredicate, RdfSerializer};
use indexmap::IndexSet;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Summary of a related entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub urn: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rdf_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geojson: Option<Value>,
}

/// An image attached to the resource or to something inside it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageEntry {
    pub urn: String,
    pub feature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One `predicate → object` pair of the property listing.
///
/// Serializes as a single-key map: `{"<predicate>": "<object>"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    pub predicate: String,
    pub object: String,
}

impl Serialize for PropertyRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.predicate, &self.object)?;
        map.end()
    }
}

/// A triple in which the resource is the object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectUsage {
    pub subject: String,
    pub predicate: String,
}

/// A triple in which the resource is the predicate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredicateUsage {
    pub subject: String,
    pub object: String,
}

/// Handle on a single P-LOD entity
pub struct PlodResource<'g> {
    graph: &'g PlodGraph,
    local_name: String,
    node: NamedNode,
}

impl<'g> PlodResource<'g> {
    /// Construct the handle; fails when `urn:p-lod:id:{local_name}` is not an IRI
    pub fn new(graph: &'g PlodGraph, local_name: &str) -> PlodResult<Self> {
        let node = graph
            .node(local_name)
            .map_err(|source| PlodError::InvalidIdentifier {
                id: local_name.to_string(),
                source,
            })?;

        Ok(Self {
            graph,
            local_name: local_name.to_string(),
            node,
        })
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn urn(&self) -> &str {
        self.node.as_str()
    }

    /// Every `(predicate, object)` with this resource as subject
    pub fn properties(&self) -> Vec<PropertyRow> {
        self.graph
            .describe(&self.node)
            .into_iter()
            .map(|t| PropertyRow {
                predicate: t.predicate.as_str().to_string(),
                object: t.object.lexical(),
            })
            .collect()
    }

    /// Turtle description of the resource
    pub fn rdf_describe(&self) -> PlodResult<String> {
        let triples = self.graph.describe(&self.node);
        Ok(RdfSerializer::serialize(triples, RdfFormat::Turtle)?)
    }

    /// Turtle of the resource's `rdfs:seeAlso` links
    pub fn see_also(&self) -> PlodResult<String> {
        let see_also = &self.graph.vocab().see_also;
        let triples = self
            .graph
            .describe(&self.node)
            .into_iter()
            .filter(|t| &t.predicate == see_also);
        Ok(RdfSerializer::serialize(triples, RdfFormat::Turtle)?)
    }

    pub fn conceptual_ancestors(&self) -> Vec<Entry> {
        let broader = &self.graph.vocab().broader;
        let ancestors = self
            .graph
            .transitive(&self.node, |n| self.graph.parents(n, broader));
        self.graph.entries(&ancestors)
    }

    pub fn conceptual_children(&self) -> Vec<Entry> {
        let children = self.graph.children(&self.node, &self.graph.vocab().broader);
        self.graph.entries(&children)
    }

    pub fn conceptual_descendants(&self) -> Vec<Entry> {
        let broader = &self.graph.vocab().broader;
        let descendants = self
            .graph
            .transitive(&self.node, |n| self.graph.children(n, broader));
        self.graph.entries(&descendants)
    }

    /// The resource itself first, then each spatial parent up to the root
    pub fn spatial_ancestors(&self) -> Vec<Entry> {
        self.graph.entries(&self.graph.spatial_chain(&self.node))
    }

    /// Direct spatial children when `rdf_type` is `all` (or empty); otherwise
    /// every spatial descendant of that type. `exclude_rdf_type` drops
    /// entities of the given type.
    pub fn spatial_children(&self, rdf_type: &str, exclude_rdf_type: &str) -> Vec<Entry> {
        let graph = self.graph;
        let candidates = if rdf_type.is_empty() || rdf_type == "all" {
            graph.spatial_children(&self.node)
        } else {
            let wanted = graph.resolve_term(rdf_type);
            graph
                .spatial_descendants(&self.node)
                .into_iter()
                .filter(|n| graph.has_type(n, &wanted))
                .collect()
        };

        let excluded = (!exclude_rdf_type.is_empty()).then(|| graph.resolve_term(exclude_rdf_type));
        let kept: Vec<NamedNode> = candidates
            .into_iter()
            .filter(|n| excluded.as_deref().map_or(true, |x| !graph.has_type(n, x)))
            .collect();

        graph.entries(&kept)
    }

    /// Spatial units at `level_of_detail` holding something that depicts
    /// this resource
    pub fn depicted_where(&self, level_of_detail: &str) -> PlodResult<Vec<Entry>> {
        let graph = self.graph;
        let level = graph.resolve_term(level_of_detail);

        let mut units: IndexSet<NamedNode> = IndexSet::new();
        for depicting in graph.children(&self.node, &graph.vocab().depicts) {
            if let Some(unit) = graph
                .spatial_chain(&depicting)
                .into_iter()
                .find(|n| graph.has_type(n, &level))
            {
                units.insert(unit);
            }
        }

        units
            .iter()
            .map(|unit| {
                let mut entry = graph.entry(unit);
                entry.geojson = graph.geometry(unit)?;
                Ok(entry)
            })
            .collect()
    }

    /// Concepts depicted anywhere inside this spatial unit
    pub fn depicts_concepts(&self) -> Vec<Entry> {
        let graph = self.graph;
        let depicts = &graph.vocab().depicts;

        let concepts: IndexSet<NamedNode> = self
            .spatial_units()
            .iter()
            .flat_map(|n| graph.parents(n, depicts))
            .collect();

        graph.entries(&concepts.into_iter().collect::<Vec<_>>())
    }

    /// Images of the resource, of everything spatially inside it, and of
    /// whatever depicts it
    pub fn gather_images(&self) -> Vec<ImageEntry> {
        let graph = self.graph;
        let vocab = graph.vocab();

        let mut holders = self.spatial_units();
        holders.extend(graph.children(&self.node, &vocab.depicts));

        let mut seen = IndexSet::new();
        let mut images = Vec::new();
        for holder in &holders {
            for image in graph.parents(holder, &vocab.best_image) {
                if seen.insert(image.clone()) {
                    images.push(ImageEntry {
                        urn: image.as_str().to_string(),
                        feature: holder.as_str().to_string(),
                        label: graph.label(&image),
                    });
                }
            }
        }
        images
    }

    pub fn instances_of(&self) -> Vec<Entry> {
        let instances = self
            .graph
            .children(&self.node, &self.graph.vocab().instance_of);
        self.graph.entries(&instances)
    }

    /// Triples where the resource appears as object
    pub fn as_object(&self) -> Vec<ObjectUsage> {
        self.graph
            .store()
            .triples_with_object(&RdfObject::NamedNode(self.node.clone()))
            .into_iter()
            .map(|t| ObjectUsage {
                subject: t.subject.lexical(),
                predicate: t.predicate.as_str().to_string(),
            })
            .collect()
    }

    /// Triples where the resource appears as predicate
    pub fn as_predicate(&self) -> Vec<PredicateUsage> {
        self.graph
            .store()
            .triples_with_predicate(&RdfPredicate::from(self.node.clone()))
            .into_iter()
            .map(|t| PredicateUsage {
                subject: t.subject.lexical(),
                object: t.object.lexical(),
            })
            .collect()
    }

    /// GeoJSON `FeatureCollection` for the resource.
    ///
    /// Uses the resource's own geometry when it has one, otherwise the
    /// features where it is depicted.
    pub fn geojson(&self) -> PlodResult<Value> {
        let graph = self.graph;

        let features = match graph.geometry(&self.node)? {
            Some(stored) => geojson::features(&graph.entry(&self.node), stored),
            None => self
                .depicted_where("feature")?
                .into_iter()
                .flat_map(|mut entry| match entry.geojson.take() {
                    Some(stored) => geojson::features(&entry, stored),
                    None => Vec::new(),
                })
                .collect(),
        };

        Ok(geojson::feature_collection(features))
    }

    /// This unit followed by its spatial descendants, artworks included
    fn spatial_units(&self) -> Vec<NamedNode> {
        let mut units = vec![self.node.clone()];
        units.extend(self.graph.spatial_descendants(&self.node));
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIXTURE: &str = include_str!("../../tests/fixtures/pompeii.ttl");

    fn graph() -> PlodGraph {
        PlodGraph::from_turtle(FIXTURE).unwrap()
    }

    fn urns(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.urn.as_str()).collect()
    }

    #[test]
    fn test_invalid_identifier() {
        let graph = graph();
        let result = graph.resource("not valid");
        assert!(matches!(result, Err(PlodError::InvalidIdentifier { .. })));
    }

    #[test]
    fn test_properties_in_load_order() {
        let graph = graph();
        let r1 = graph.resource("r1").unwrap();

        let rows = r1.properties();
        assert_eq!(rows.len(), 4);
        assert_eq!(
            serde_json::to_value(&rows[0]).unwrap(),
            json!({"http://www.w3.org/1999/02/22-rdf-syntax-ns#type": "urn:p-lod:id:region"})
        );
        assert_eq!(
            serde_json::to_value(&rows[1]).unwrap(),
            json!({"http://www.w3.org/2000/01/rdf-schema#label": "Regio I"})
        );
        assert_eq!(rows[2].predicate, "urn:p-lod:id:spatially-within");
        assert_eq!(rows[2].object, "urn:p-lod:id:pompeii");
    }

    #[test]
    fn test_unknown_resource_is_empty() {
        let graph = graph();
        let nowhere = graph.resource("nowhere").unwrap();

        assert!(nowhere.properties().is_empty());
        assert!(nowhere.spatial_children("all", "").is_empty());
        assert_eq!(urns(&nowhere.spatial_ancestors()), vec!["urn:p-lod:id:nowhere"]);
        assert_eq!(nowhere.geojson().unwrap()["features"], json!([]));
    }

    #[test]
    fn test_conceptual_hierarchy() {
        let graph = graph();

        let ariadne = graph.resource("ariadne").unwrap();
        assert_eq!(
            urns(&ariadne.conceptual_ancestors()),
            vec!["urn:p-lod:id:mythological-figure", "urn:p-lod:id:figure"]
        );

        let myth = graph.resource("mythological-figure").unwrap();
        assert_eq!(
            urns(&myth.conceptual_children()),
            vec!["urn:p-lod:id:ariadne", "urn:p-lod:id:theseus"]
        );

        let figure = graph.resource("figure").unwrap();
        assert_eq!(
            urns(&figure.conceptual_descendants()),
            vec![
                "urn:p-lod:id:mythological-figure",
                "urn:p-lod:id:ariadne",
                "urn:p-lod:id:theseus"
            ]
        );
    }

    #[test]
    fn test_spatial_ancestors_start_with_self_end_at_root() {
        let graph = graph();
        let space = graph.resource("r1-i8-p17-space-1").unwrap();

        let ancestors = space.spatial_ancestors();
        assert_eq!(ancestors.first().unwrap().urn, "urn:p-lod:id:r1-i8-p17-space-1");
        assert_eq!(ancestors.last().unwrap().urn, "urn:p-lod:id:pompeii");
        assert_eq!(ancestors.len(), 5);
    }

    #[test]
    fn test_spatial_children_filters() {
        let graph = graph();
        let pompeii = graph.resource("pompeii").unwrap();

        assert_eq!(
            urns(&pompeii.spatial_children("all", "")),
            vec!["urn:p-lod:id:r1", "urn:p-lod:id:r9"]
        );
        assert_eq!(
            urns(&pompeii.spatial_children("insula", "")),
            vec!["urn:p-lod:id:r1-i8", "urn:p-lod:id:r9-i1"]
        );
        assert_eq!(
            urns(&pompeii.spatial_children("p-lod:feature", "")),
            vec!["urn:p-lod:id:r9-i1-f2", "urn:p-lod:id:r1-i8-p17-space-1-f1"]
        );
        assert!(pompeii.spatial_children("all", "region").is_empty());
    }

    #[test]
    fn test_spatial_children_mirror_ancestors() {
        let graph = graph();
        let artwork_urn = "urn:p-lod:id:r1-i8-p17-space-1-f1-artwork-1";

        let artwork = graph.resource("r1-i8-p17-space-1-f1-artwork-1").unwrap();
        let ancestors = artwork.spatial_ancestors();
        assert_eq!(ancestors[1].urn, "urn:p-lod:id:r1-i8-p17-space-1-f1");

        let wall = graph.resource("r1-i8-p17-space-1-f1").unwrap();
        assert_eq!(urns(&wall.spatial_children("all", "")), vec![artwork_urn]);

        let pompeii = graph.resource("pompeii").unwrap();
        assert_eq!(urns(&pompeii.spatial_children("artwork", "")), vec![artwork_urn]);
    }

    #[test]
    fn test_depicted_where_levels() {
        let graph = graph();
        let ariadne = graph.resource("ariadne").unwrap();

        let features = ariadne.depicted_where("feature").unwrap();
        assert_eq!(
            urns(&features),
            vec!["urn:p-lod:id:r1-i8-p17-space-1-f1", "urn:p-lod:id:r9-i1-f2"]
        );
        assert_eq!(features[0].geojson.as_ref().unwrap()["type"], "Point");

        let regions = ariadne.depicted_where("region").unwrap();
        assert_eq!(urns(&regions), vec!["urn:p-lod:id:r1", "urn:p-lod:id:r9"]);
        assert!(regions[1].geojson.is_none());

        let theseus = graph.resource("theseus").unwrap();
        assert_eq!(
            urns(&theseus.depicted_where("insula").unwrap()),
            vec!["urn:p-lod:id:r1-i8"]
        );
    }

    #[test]
    fn test_depicts_concepts() {
        let graph = graph();

        let r1 = graph.resource("r1").unwrap();
        assert_eq!(
            urns(&r1.depicts_concepts()),
            vec!["urn:p-lod:id:ariadne", "urn:p-lod:id:theseus"]
        );

        let r9 = graph.resource("r9").unwrap();
        assert_eq!(urns(&r9.depicts_concepts()), vec!["urn:p-lod:id:ariadne"]);
    }

    #[test]
    fn test_gather_images() {
        let graph = graph();

        let pompeii = graph.resource("pompeii").unwrap();
        let images = pompeii.gather_images();
        let image_urns: Vec<&str> = images.iter().map(|i| i.urn.as_str()).collect();
        assert_eq!(
            image_urns,
            vec![
                "urn:p-lod:id:img-property-1",
                "urn:p-lod:id:img-wall-1",
                "urn:p-lod:id:img-artwork-1"
            ]
        );
        assert_eq!(images[1].feature, "urn:p-lod:id:r1-i8-p17-space-1-f1");

        let ariadne = graph.resource("ariadne").unwrap();
        let images = ariadne.gather_images();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].label.as_deref(), Some("Ariadne and Theseus, detail"));
    }

    #[test]
    fn test_instances_and_usages() {
        let graph = graph();

        let ariadne = graph.resource("ariadne").unwrap();
        assert_eq!(
            urns(&ariadne.instances_of()),
            vec!["urn:p-lod:id:ariadne-abandoned"]
        );

        let as_object = ariadne.as_object();
        assert!(as_object.contains(&ObjectUsage {
            subject: "urn:p-lod:id:r9-i1-f2".to_string(),
            predicate: "urn:p-lod:id:depicts".to_string(),
        }));
        assert_eq!(as_object.len(), 3);

        let broader = graph.resource("broader").unwrap();
        let rows = broader.as_predicate();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].subject, "urn:p-lod:id:mythological-figure");
        assert_eq!(rows[0].object, "urn:p-lod:id:figure");
    }

    #[test]
    fn test_turtle_descriptions() {
        let graph = graph();
        let pompeii = graph.resource("pompeii").unwrap();

        let turtle = pompeii.rdf_describe().unwrap();
        assert!(turtle.contains("<urn:p-lod:id:pompeii>"));
        assert!(turtle.contains("\"Pompeii\""));

        let see_also = pompeii.see_also().unwrap();
        assert!(see_also.contains("<https://www.wikidata.org/wiki/Q43332>"));
        assert!(see_also.contains("<https://pleiades.stoa.org/places/433032>"));
        assert!(!see_also.contains("Pompeii\""));
    }

    #[test]
    fn test_geojson_own_geometry() {
        let graph = graph();
        let pompeii = graph.resource("pompeii").unwrap();

        let collection = pompeii.geojson().unwrap();
        assert_eq!(collection["type"], "FeatureCollection");
        let feature = &collection["features"][0];
        assert_eq!(feature["id"], "urn:p-lod:id:pompeii");
        assert_eq!(feature["geometry"]["type"], "Polygon");
        assert_eq!(feature["properties"]["title"], "Pompeii");
    }

    #[test]
    fn test_geojson_falls_back_to_depictions() {
        let graph = graph();
        let ariadne = graph.resource("ariadne").unwrap();

        let collection = ariadne.geojson().unwrap();
        let ids: Vec<&str> = collection["features"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["id"].as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["urn:p-lod:id:r1-i8-p17-space-1-f1", "urn:p-lod:id:r9-i1-f2"]
        );
    }
}
