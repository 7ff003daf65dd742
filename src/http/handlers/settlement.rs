use crate::domain::settlement::{GenerateReportRequest, ReportFilter, SettlementStatus};
use crate::error::ServiceError;
use crate::http::extract::{optional_id, JsonBody, PathId};
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    pub merchant_id: Option<String>,
    pub status: Option<String>,
}

impl ReportParams {
    fn filter(&self) -> Result<ReportFilter, ServiceError> {
        let status = match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(s.parse::<SettlementStatus>()?),
            None => None,
        };
        Ok(ReportFilter {
            merchant_id: optional_id("merchantId", self.merchant_id.as_deref())?,
            status,
        })
    }
}

pub async fn generate_report(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GenerateReportRequest>,
) -> impl IntoResponse {
    match state.settlement_service.generate(req).await {
        Ok(report) => (StatusCode::CREATED, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn process_settlement(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> impl IntoResponse {
    match state.settlement_service.process(id).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> impl IntoResponse {
    let filter = match params.filter() {
        Ok(f) => f,
        Err(e) => return e.into_response(),
    };
    match state.settlement_service.list(filter).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn get_report(State(state): State<AppState>, PathId(id): PathId) -> impl IntoResponse {
    match state.settlement_service.get(id).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}
