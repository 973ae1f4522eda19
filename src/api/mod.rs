//! REST API module for company postings
//!
//! This module provides the HTTP endpoints over `PostingService`.

pub mod posting_routes;

use std::sync::Arc;

use axum::{response::Json, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::service::PostingService;

pub use posting_routes::create_posting_router;

/// Build the full axum router with all routes and middleware.
pub fn build_router(service: Arc<PostingService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(create_posting_router(service))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
