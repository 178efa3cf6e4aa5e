//! Router builder utilities for applicant routes

use crate::applicants::handlers::{
    AppState, delete_applicant, export_applicants, get_applicant, list_applicants,
    query_applicants, update_stage,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the applicant routes
///
/// - GET /applicants - List with search, filters, sort, selection and paging
/// - POST /applicants/query - Same, narrowed by a filter tree in the body
/// - POST /applicants/stage - Move several applicants to one stage
/// - POST /applicants/export - Download selected applicants as CSV
/// - GET /applicants/{id} - Get one applicant
/// - DELETE /applicants/{id} - Delete one applicant
pub fn build_applicant_routes(state: AppState) -> Router {
    Router::new()
        .route("/applicants", get(list_applicants))
        .route("/applicants/query", post(query_applicants))
        .route("/applicants/stage", post(update_stage))
        .route("/applicants/export", post(export_applicants))
        .route(
            "/applicants/{id}",
            get(get_applicant).delete(delete_applicant),
        )
        .with_state(state)
}
