//! HTTP server for the P-LOD resource API

use super::handler::{
    as_object_handler, as_predicate_handler, conceptual_ancestors_handler,
    conceptual_children_handler, conceptual_descendants_handler, depicted_where_handler,
    depicts_concepts_handler, geojson_handler, id_handler, images_handler, instances_of_handler,
    root_handler, see_also_handler, spatial_ancestors_handler, spatial_children_handler,
    SharedGraph,
};
use crate::config::{CorsConfig, ServerConfig};
use axum::{
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Route table: path pattern and the handler serving it
fn routes() -> Vec<(&'static str, MethodRouter<SharedGraph>)> {
    vec![
        ("/id/:p_lod_id", get(id_handler)),
        ("/see-also/:p_lod_id", get(see_also_handler)),
        ("/conceptual-ancestors/:p_lod_id", get(conceptual_ancestors_handler)),
        ("/conceptual-children/:p_lod_id", get(conceptual_children_handler)),
        ("/conceptual-descendants/:p_lod_id", get(conceptual_descendants_handler)),
        ("/spatial-ancestors/:p_lod_id", get(spatial_ancestors_handler)),
        ("/spatial-children/:p_lod_id", get(spatial_children_handler)),
        ("/depicted-where/:p_lod_id", get(depicted_where_handler)),
        ("/depicts-concepts/:p_lod_id", get(depicts_concepts_handler)),
        ("/images/:p_lod_id", get(images_handler)),
        ("/instances-of/:p_lod_id", get(instances_of_handler)),
        ("/as-object/:p_lod_id", get(as_object_handler)),
        ("/as-predicate/:p_lod_id", get(as_predicate_handler)),
        ("/geojson/:p_lod_id", get(geojson_handler)),
    ]
}

/// Underscore spelling of a hyphenated route, e.g. `/depicted_where/:p_lod_id`
fn underscore_alias(path: &str) -> Option<String> {
    let rest = path.strip_prefix('/')?;
    let (head, tail) = rest.split_once('/').unwrap_or((rest, ""));
    if !head.contains('-') {
        return None;
    }
    Some(format!("/{}/{}", head.replace('-', "_"), tail))
}

/// Build the application router
pub fn router(graph: SharedGraph, cors: &CorsConfig) -> Router {
    let mut app = Router::new().route("/", get(root_handler));

    for (path, method_router) in routes() {
        if let Some(alias) = underscore_alias(path) {
            app = app.route(&alias, method_router.clone());
        }
        app = app.route(path, method_router);
    }

    let app = app.layer(TraceLayer::new_for_http());
    let app = if cors.enabled {
        app.layer(CorsLayer::very_permissive())
    } else {
        app
    };

    app.with_state(graph)
}

/// HTTP server serving one loaded graph
pub struct HttpServer {
    graph: SharedGraph,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(graph: SharedGraph, config: ServerConfig) -> Self {
        Self { graph, config }
    }

    /// Bind and serve until Ctrl+C
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(Arc::clone(&self.graph), &self.config.cors);

        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("P-LOD API available at http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            error!("Cannot listen for Ctrl+C, graceful shutdown disabled: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
