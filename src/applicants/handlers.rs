//! HTTP handlers for the applicant list
//!
//! Every read takes a snapshot from the service and derives the view from
//! it: filter tree first, then search, batch and stage filters, sort,
//! selection and pagination.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::config::WaitlistConfig;
use crate::core::error::{ApplicantError, ValidationError, WaitlistError, WaitlistResult};
use crate::core::filter::{FilterGroup, matches_group};
use crate::core::{
    Applicant, ApplicantService, BulkAction, ListQuery, Stage, TreeQuery, export_csv,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ApplicantService>,
    pub config: Arc<WaitlistConfig>,
}

impl AppState {
    pub fn new(service: Arc<dyn ApplicantService>, config: Arc<WaitlistConfig>) -> Self {
        Self { service, config }
    }

    async fn snapshot(&self) -> WaitlistResult<Vec<Applicant>> {
        self.service
            .list()
            .await
            .map_err(WaitlistError::from_service)
    }
}

/// Request body for a bulk stage change
#[derive(Debug, Deserialize, Validate)]
pub struct StageUpdateRequest {
    #[validate(length(min = 1, message = "select at least one applicant"))]
    pub ids: Vec<Uuid>,

    /// Target stage, any known alias
    pub stage: String,
}

/// Request body for a CSV export
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportRequest {
    /// Export only these applicants; defaults to every applicant
    pub ids: Option<Vec<Uuid>>,

    /// Columns to export; defaults to the configured export fields
    pub fields: Option<Vec<String>>,

    /// Restrict the export to applicants matching this tree
    pub filter: Option<FilterGroup>,
}

/// List applicants
///
/// GET /applicants
pub async fn list_applicants(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Response, WaitlistError> {
    let applicants = state.snapshot().await?;
    Ok(render_view(&state.config, &applicants, None, &params))
}

/// List applicants matching a filter tree
///
/// POST /applicants/query
pub async fn query_applicants(
    State(state): State<AppState>,
    Json(query): Json<TreeQuery>,
) -> Result<Response, WaitlistError> {
    let applicants = state.snapshot().await?;
    Ok(render_view(
        &state.config,
        &applicants,
        query.filter.as_ref(),
        &query.params,
    ))
}

fn render_view(
    config: &WaitlistConfig,
    applicants: &[Applicant],
    filter: Option<&FilterGroup>,
    params: &ListQuery,
) -> Response {
    let matched = applicants
        .iter()
        .filter(|a| filter.is_none_or(|group| matches_group(*a, group)));

    let view = params
        .to_list_state()
        .resolve(matched, &config.resolve_options(params));

    tracing::debug!(
        total = view.total,
        page = view.pagination.safe_page,
        "applicant view resolved"
    );

    Json(view).into_response()
}

/// Get a specific applicant
///
/// GET /applicants/{id}
pub async fn get_applicant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Applicant>, WaitlistError> {
    state
        .service
        .get(&id)
        .await
        .map_err(WaitlistError::from_service)?
        .map(Json)
        .ok_or_else(|| ApplicantError::NotFound { id }.into())
}

/// Delete an applicant
///
/// DELETE /applicants/{id}
pub async fn delete_applicant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WaitlistError> {
    state
        .service
        .delete(&id)
        .await
        .map_err(WaitlistError::from_service)?;

    tracing::info!(%id, "applicant deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Move applicants to a stage in one call
///
/// POST /applicants/stage
pub async fn update_stage(
    State(state): State<AppState>,
    Json(payload): Json<StageUpdateRequest>,
) -> Result<Response, WaitlistError> {
    payload.validate()?;

    let stage = Stage::normalize(&payload.stage).ok_or_else(|| ValidationError::UnknownStage {
        value: payload.stage.clone(),
    })?;

    let mut action = BulkAction::new();
    let target = action.request(payload.ids, stage)?;
    tracing::debug!(prompt = %target.prompt(), "bulk stage update requested");

    let outcome = action.confirm(state.service.as_ref()).await?;
    Ok(Json(outcome).into_response())
}

/// Export applicants as CSV
///
/// POST /applicants/export
pub async fn export_applicants(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, WaitlistError> {
    let applicants = state.snapshot().await?;

    let rows: Vec<_> = applicants
        .iter()
        .filter(|a| request.ids.as_ref().is_none_or(|ids| ids.contains(&a.id)))
        .filter(|a| {
            request
                .filter
                .as_ref()
                .is_none_or(|group| matches_group(*a, group))
        })
        .map(Applicant::to_export_row)
        .collect();

    let fields = match &request.fields {
        Some(fields) if !fields.is_empty() => fields.as_slice(),
        _ => state.config.export_fields.as_slice(),
    };

    let csv = export_csv(&rows, fields);
    tracing::info!(rows = rows.len(), columns = fields.len(), "applicants exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"applicants.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
