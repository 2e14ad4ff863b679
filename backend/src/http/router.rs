//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{dashboard, filter_performance, records, reports};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Dashboard charts
        .route(dashboard::GET_DASHBOARD, get(handlers::get_dashboard))
        .route(dashboard::GET_DEMOGRAPHICS, get(handlers::get_demographics))
        .route(dashboard::GET_FILTER_POPULARITY, get(handlers::get_filter_popularity))
        .route(dashboard::GET_INTERACTIONS, get(handlers::get_interactions))
        // Reports
        .route(reports::GET_REPORT_PAGE, get(handlers::get_report_page))
        .route(reports::GET_REPORT_CSV, get(handlers::export_report_csv))
        .route(reports::GET_REPORT_TABLE, get(handlers::get_report_table))
        // Filter performance
        .route(filter_performance::LIST_FILTERS, get(handlers::list_filters))
        .route(filter_performance::GET_FILTER_STATS, get(handlers::get_filter_stats))
        // Snapshot control
        .route(records::POST_REFRESH_RECORDS, post(handlers::refresh_records));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Every endpoint is a GET or an empty POST.
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Arc::new(LocalRepository::new()));
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
