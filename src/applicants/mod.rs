//! Applicant HTTP surface
//!
//! Handlers for listing, querying, reviewing and exporting applicants.

pub mod handlers;

pub use handlers::{
    AppState, ExportRequest, StageUpdateRequest, delete_applicant, export_applicants,
    get_applicant, list_applicants, query_applicants, update_stage,
};
