use crate::domain::transaction::TransactionQuery;
use crate::error::ServiceError;
use crate::http::extract::{optional_id, PathId};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Raw paging values; bad numbers fall back to defaults instead of failing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub merchant_id: Option<String>,
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let merchant_id = match optional_id("merchantId", params.merchant_id.as_deref()) {
        Ok(v) => v,
        Err(e) => return e.into_response(),
    };
    let (limit, offset) = state
        .config
        .page(params.limit.as_deref(), params.offset.as_deref());

    let query = TransactionQuery {
        merchant_id,
        limit,
        offset,
    };
    match state.payment_service.list(query).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn get_transaction(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> impl IntoResponse {
    match state.payment_service.get(id).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_transaction_by_reference(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> impl IntoResponse {
    match state.payment_service.get_by_reference(reference.trim()).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => e.into_response(),
    }
}
