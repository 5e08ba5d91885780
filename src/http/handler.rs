//! HTTP handlers for the P-LOD resource routes
//!
//! Every handler strips the `urn:p-lod:id:` prefix from the path id, builds a
//! fresh resource and calls one accessor on it.

use super::error::ApiError;
use crate::plod::{
    normalize_id, Entry, ImageEntry, ObjectUsage, PlodGraph, PlodResource, PlodResult,
    PredicateUsage, PropertyRow,
};
use crate::rdf::RdfFormat;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Graph shared by all handlers
pub type SharedGraph = Arc<PlodGraph>;

/// Body of `GET /`
pub const USAGE: &str = "Nothing here. Try /id/pompeii .";

const TURTLE_SUFFIX: &str = ".ttl";

/// Characters escaped when echoing an id back into a redirect path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Raw query string pairs.
///
/// Repeated keys are kept; lookups take the last occurrence. Malformed query
/// strings are rejected with the JSON error body.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Last value given for `key`
    pub fn last(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(Self(pairs))
    }
}

/// Normalize the id, construct the resource and run one accessor on it
fn with_resource<T, F>(graph: &PlodGraph, raw_id: &str, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&PlodResource<'_>) -> PlodResult<T>,
{
    let local_name = normalize_id(raw_id);
    debug!("Resolving {}", local_name);
    let resource = graph.resource(local_name)?;
    Ok(op(&resource)?)
}

fn turtle_response(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, RdfFormat::Turtle.media_type())],
        body,
    )
        .into_response()
}

fn wants_turtle(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == RdfFormat::Turtle.media_type())
}

/// `/id/{id}.ttl` for an id as received
pub fn turtle_location(raw_id: &str) -> String {
    format!(
        "/id/{}{}",
        utf8_percent_encode(raw_id, PATH_SEGMENT),
        TURTLE_SUFFIX
    )
}

/// Handler for `GET /`
pub async fn root_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.to_string())],
        USAGE,
    )
}

/// Handler for `GET /id/{id}` and `GET /id/{id}.ttl`
pub async fn id_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
    params: QueryParams,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(raw_id) = p_lod_id.strip_suffix(TURTLE_SUFFIX) {
        let body = with_resource(&graph, raw_id, |r| r.rdf_describe())?;
        return Ok(turtle_response(body));
    }

    if wants_turtle(&headers) {
        return Ok(Redirect::temporary(&turtle_location(&p_lod_id)).into_response());
    }

    if let Some(q) = params.last("q") {
        debug!("Ignoring q={:?} on /id/{}", q, p_lod_id);
    }

    let rows: Vec<PropertyRow> = with_resource(&graph, &p_lod_id, |r| Ok(r.properties()))?;
    Ok(Json(rows).into_response())
}

/// Handler for `GET /see-also/{id}.ttl`
pub async fn see_also_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Response, ApiError> {
    let raw_id = p_lod_id
        .strip_suffix(TURTLE_SUFFIX)
        .ok_or_else(|| ApiError::NotFound(format!("/see-also/{}", p_lod_id)))?;

    let body = with_resource(&graph, raw_id, |r| r.see_also())?;
    Ok(turtle_response(body))
}

pub async fn conceptual_ancestors_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| Ok(r.conceptual_ancestors())).map(Json)
}

pub async fn conceptual_children_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| Ok(r.conceptual_children())).map(Json)
}

pub async fn conceptual_descendants_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| Ok(r.conceptual_descendants())).map(Json)
}

/// First element is the id itself, last is the root of the spatial hierarchy
pub async fn spatial_ancestors_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| Ok(r.spatial_ancestors())).map(Json)
}

pub async fn spatial_children_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
    params: QueryParams,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let rdf_type = params.last("rdf_type").unwrap_or("all");
    let exclude_rdf_type = params.last("exclude_rdf_type").unwrap_or_default();
    with_resource(&graph, &p_lod_id, |r| {
        Ok(r.spatial_children(rdf_type, exclude_rdf_type))
    })
    .map(Json)
}

pub async fn depicted_where_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
    params: QueryParams,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let level_of_detail = params.last("level_of_detail").unwrap_or("feature");
    with_resource(&graph, &p_lod_id, |r| r.depicted_where(level_of_detail)).map(Json)
}

pub async fn depicts_concepts_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| Ok(r.depicts_concepts())).map(Json)
}

pub async fn images_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Vec<ImageEntry>>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| Ok(r.gather_images())).map(Json)
}

pub async fn instances_of_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| Ok(r.instances_of())).map(Json)
}

pub async fn as_object_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Vec<ObjectUsage>>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| Ok(r.as_object())).map(Json)
}

pub async fn as_predicate_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Vec<PredicateUsage>>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| Ok(r.as_predicate())).map(Json)
}

/// GeoJSON is passed through as a JSON document
pub async fn geojson_handler(
    State(graph): State<SharedGraph>,
    Path(p_lod_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    with_resource(&graph, &p_lod_id, |r| r.geojson()).map(Json)
}
