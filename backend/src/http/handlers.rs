//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::dto::{ExplorerData, ExplorerQuery, HealthResponse, OverviewData, ProvinceList};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::services::{explorer, export::CSV_CONTENT_TYPE, overview};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the data
/// source is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repo()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Landing
// =============================================================================

/// GET /v1/provinces
///
/// Provinces available as explorer scopes.
pub async fn list_provinces(State(state): State<AppState>) -> HandlerResult<ProvinceList> {
    let provinces = db_services::list_provinces(state.repo()).await?;
    Ok(Json(ProvinceList::from(provinces)))
}

/// GET /v1/overview
///
/// Country-wide key metrics.
pub async fn get_overview(State(state): State<AppState>) -> HandlerResult<OverviewData> {
    let data = overview::get_overview(state.repo()).await?;
    Ok(Json(data))
}

// =============================================================================
// Explorer
// =============================================================================

/// GET /v1/explorer
///
/// Filtered parish table with metrics and descriptive statistics. An empty
/// result is reported as `status: "no_data"`, not as an error.
pub async fn get_explorer_data(
    State(state): State<AppState>,
    Query(query): Query<ExplorerQuery>,
) -> HandlerResult<ExplorerData> {
    let criteria = query.criteria()?;
    let scope = query.scope();
    debug!(scope = %scope, ?criteria, "explorer request");

    let data = explorer::load_explorer_data(state.repo(), &scope, criteria).await?;
    Ok(Json(data))
}

/// GET /v1/explorer/export
///
/// CSV download of the same view `GET /v1/explorer` returns.
pub async fn export_explorer_csv(
    State(state): State<AppState>,
    Query(query): Query<ExplorerQuery>,
) -> Result<Response, AppError> {
    let criteria = query.criteria()?;
    let scope = query.scope();

    let dataset = db_services::fetch_parishes(state.repo(), &scope).await?;
    let export = explorer::export_explorer_view(&scope, &criteria, &dataset)?;
    debug!(file = %export.file_name, bytes = export.content.len(), "csv export");

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}
