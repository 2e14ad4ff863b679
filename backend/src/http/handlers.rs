//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint, takes the current record
//! snapshot from the state and delegates to the service layer.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use super::dto::{
    DashboardData, DemographicBucket, ExportQuery, FilterCount, FilterStats, GalleryQuery,
    HealthResponse, InteractionBucket, RefreshResponse, ReportPage, ReportQuery, ReportTable,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{FilterId, ReportFilter};
use crate::services::{dashboard, export, filter_performance, reports};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// A missing or blank key means `all`; an unknown key is a client error.
fn parse_filter(key: Option<&str>) -> Result<ReportFilter, AppError> {
    match key.map(str::trim) {
        None | Some("") => Ok(ReportFilter::All),
        Some(key) => key.parse().map_err(AppError::BadRequest),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the record
/// source is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let source_status = match db_services::health_check(state.source.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        source: state.source.name().to_string(),
        source_status,
    }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /v1/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> HandlerResult<DashboardData> {
    let snapshot = state.snapshot().await?;
    Ok(Json(dashboard::build_dashboard(&snapshot.records)))
}

/// GET /v1/dashboard/demographics
///
/// Bar chart rows: interacted visitors per date by age band and gender.
pub async fn get_demographics(
    State(state): State<AppState>,
) -> HandlerResult<Vec<DemographicBucket>> {
    let snapshot = state.snapshot().await?;
    Ok(Json(dashboard::aggregate_by_date_and_demographic(
        &snapshot.records,
    )))
}

/// GET /v1/dashboard/filters
pub async fn get_filter_popularity(
    State(state): State<AppState>,
) -> HandlerResult<Vec<FilterCount>> {
    let snapshot = state.snapshot().await?;
    Ok(Json(dashboard::aggregate_by_filter(&snapshot.records)))
}

/// GET /v1/dashboard/interactions
pub async fn get_interactions(
    State(state): State<AppState>,
) -> HandlerResult<Vec<InteractionBucket>> {
    let snapshot = state.snapshot().await?;
    Ok(Json(dashboard::aggregate_by_date_interaction(
        &snapshot.records,
    )))
}

// =============================================================================
// Reports
// =============================================================================

/// GET /v1/reports?filter=&page=&page_size=
///
/// One page of the report table with badge counts for every filter control.
pub async fn get_report_page(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> HandlerResult<ReportPage> {
    let filter = parse_filter(query.filter.as_deref())?;
    let page = query.page.unwrap_or(1);
    let page_size = state.reports.resolve_page_size(query.page_size);

    let snapshot = state.snapshot().await?;
    Ok(Json(reports::build_report_page(
        &snapshot.records,
        filter,
        page,
        page_size,
    )))
}

/// GET /v1/reports/export.csv?filter=
///
/// Every matching record as a CSV attachment.
pub async fn export_report_csv(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_filter(query.filter.as_deref())?;
    let snapshot = state.snapshot().await?;

    let csv = export::to_csv(&export::build_table(&snapshot.records, filter));
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::export_file_name(filter, "csv")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// GET /v1/reports/table?filter=
///
/// The export table as JSON, for the browser's PDF renderer.
pub async fn get_report_table(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> HandlerResult<ReportTable> {
    let filter = parse_filter(query.filter.as_deref())?;
    let snapshot = state.snapshot().await?;
    Ok(Json(export::build_table(&snapshot.records, filter)))
}

// =============================================================================
// Filter Performance
// =============================================================================

/// GET /v1/filters?search=
pub async fn list_filters(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> HandlerResult<Vec<FilterStats>> {
    let snapshot = state.snapshot().await?;
    Ok(Json(filter_performance::filter_gallery(
        &snapshot.records,
        query.search.as_deref().unwrap_or(""),
    )))
}

/// GET /v1/filters/{filter_id}
pub async fn get_filter_stats(
    State(state): State<AppState>,
    Path(filter_id): Path<i64>,
) -> HandlerResult<FilterStats> {
    let filter = FilterId::new(filter_id)
        .ok_or_else(|| AppError::NotFound(format!("Filter {} not found", filter_id)))?;
    let snapshot = state.snapshot().await?;
    Ok(Json(filter_performance::filter_stats(&snapshot.records, filter)))
}

// =============================================================================
// Records
// =============================================================================

/// POST /v1/records/refresh
///
/// Drop the cached snapshot and fetch a new one.
pub async fn refresh_records(State(state): State<AppState>) -> HandlerResult<RefreshResponse> {
    state.cache.invalidate();
    let snapshot = state.snapshot().await?;
    Ok(Json(RefreshResponse {
        records: snapshot.len(),
        fingerprint: snapshot.fingerprint.clone(),
        fetched_at: snapshot.fetched_at,
    }))
}
