use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::dashboard::{DashboardService, DashboardSnapshot, ViewSection};
use super::source::{InMemoryDataSource, JobDataSource};
use super::views::ViewKind;
use crate::error::AppError;

/// Query string accepted by the read endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RankingParams {
    pub top_n: Option<usize>,
}

/// Inline CSV exports to preview a dashboard without touching the configured source.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub postings_csv: String,
    pub industries_csv: String,
    pub companies_csv: String,
    #[serde(default)]
    pub top_n: Option<usize>,
}

/// Router builder exposing the dashboard and single-view endpoints.
pub fn insights_router<S>(service: Arc<DashboardService<S>>) -> Router
where
    S: JobDataSource + 'static,
{
    Router::new()
        .route("/api/v1/dashboard", get(dashboard_handler::<S>))
        .route("/api/v1/dashboard/preview", post(preview_handler::<S>))
        .route("/api/v1/views/:view", get(view_handler::<S>))
        .with_state(service)
}

pub(crate) async fn dashboard_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Query(params): Query<RankingParams>,
) -> Result<Json<DashboardSnapshot>, AppError>
where
    S: JobDataSource + 'static,
{
    let service = ranked(&service, params.top_n)?;
    Ok(Json(service.snapshot()))
}

pub(crate) async fn view_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Path(view): Path<String>,
    Query(params): Query<RankingParams>,
) -> Result<Json<ViewSection>, AppError>
where
    S: JobDataSource + 'static,
{
    let kind = view.parse::<ViewKind>()?;
    let service = ranked(&service, params.top_n)?;
    let section = service.try_section(kind)?;
    Ok(Json(section))
}

pub(crate) async fn preview_handler<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<DashboardSnapshot>, AppError>
where
    S: JobDataSource + 'static,
{
    let top_n = validate_top_n(request.top_n)?.unwrap_or_else(|| service.top_n());

    let source = InMemoryDataSource::from_csv_readers(
        Cursor::new(request.postings_csv.into_bytes()),
        Cursor::new(request.industries_csv.into_bytes()),
        Cursor::new(request.companies_csv.into_bytes()),
    )
    .map_err(AppError::InvalidPayload)?;

    let preview = DashboardService::new(Arc::new(source), top_n);
    Ok(Json(preview.snapshot()))
}

fn ranked<S>(
    service: &DashboardService<S>,
    top_n: Option<usize>,
) -> Result<DashboardService<S>, AppError>
where
    S: JobDataSource + 'static,
{
    Ok(match validate_top_n(top_n)? {
        Some(top_n) => service.with_top_n(top_n),
        None => service.clone(),
    })
}

fn validate_top_n(top_n: Option<usize>) -> Result<Option<usize>, AppError> {
    match top_n {
        Some(0) => Err(AppError::InvalidRequest(
            "top_n must be a positive integer".to_string(),
        )),
        other => Ok(other),
    }
}
