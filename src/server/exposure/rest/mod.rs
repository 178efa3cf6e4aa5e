//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router` wrapped in
//! request tracing.

use super::super::host::ServerHost;
use crate::server::router::build_applicant_routes;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Applicant routes
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Router {
        let mut app = Self::health_routes().merge(build_applicant_routes(host.app_state()));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "waitlist-rs"
        }))
    }
}
