//! HTTP facade over the P-LOD resolver
//!
//! Read-only GET routes, permissive CORS and request tracing.

mod error;
mod handler;
mod server;

pub use error::ApiError;
pub use handler::{turtle_location, SharedGraph, USAGE};
pub use server::{router, HttpServer};
