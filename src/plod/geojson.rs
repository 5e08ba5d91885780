//! GeoJSON assembly
//!
//! Stored `p-lod:geojson` literals may hold a bare geometry, a Feature or a
//! FeatureCollection. They are normalized into Features carrying the entity's
//! URN as `id` and its title and type as properties.

use super::resource::Entry;
use serde_json::{json, Map, Value};

/// Features for one entity from its stored GeoJSON value
pub fn features(entry: &Entry, stored: Value) -> Vec<Value> {
    let kind = stored
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_owned);

    match kind.as_deref() {
        Some("FeatureCollection") => match stored {
            Value::Object(mut collection) => match collection.remove("features") {
                Some(Value::Array(items)) => items
                    .into_iter()
                    .map(|item| decorate(entry, item))
                    .collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        },
        Some("Feature") => vec![decorate(entry, stored)],
        Some(_) => vec![decorate(
            entry,
            json!({"type": "Feature", "geometry": stored}),
        )],
        None => Vec::new(),
    }
}

/// Wrap features into a `FeatureCollection`
pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Fill in `id`, `properties.title` and `properties.type` where absent
fn decorate(entry: &Entry, mut feature: Value) -> Value {
    let Some(object) = feature.as_object_mut() else {
        return feature;
    };

    object
        .entry("id")
        .or_insert_with(|| Value::String(entry.urn.clone()));

    let properties = object
        .entry("properties")
        .or_insert_with(|| Value::Object(Map::new()));
    if !properties.is_object() {
        *properties = Value::Object(Map::new());
    }
    if let Some(properties) = properties.as_object_mut() {
        if let Some(label) = &entry.label {
            properties
                .entry("title")
                .or_insert_with(|| Value::String(label.clone()));
        }
        if let Some(rdf_type) = &entry.rdf_type {
            properties
                .entry("type")
                .or_insert_with(|| Value::String(rdf_type.clone()));
        }
    }

    feature
}
