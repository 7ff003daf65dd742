use crate::domain::kyc::KycReviewRequest;
use crate::domain::merchant::{MerchantPatch, NewMerchant};
use crate::domain::transaction::TransactionQuery;
use crate::error::ServiceError;
use crate::http::extract::{PathId, ValidatedJson};
use crate::http::handlers::transactions::PageParams;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn list_merchants(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_merchants().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn get_merchant(State(state): State<AppState>, PathId(id): PathId) -> impl IntoResponse {
    match state.store.get_merchant(id).await {
        Ok(Some(m)) => (StatusCode::OK, Json(m)).into_response(),
        Ok(None) => ServiceError::not_found("merchant", id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn create_merchant(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewMerchant>,
) -> impl IntoResponse {
    match state.store.create_merchant(req).await {
        Ok(m) => {
            tracing::info!(merchant_id = m.id, "merchant created");
            (StatusCode::CREATED, Json(m)).into_response()
        }
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn update_merchant(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(patch): ValidatedJson<MerchantPatch>,
) -> impl IntoResponse {
    match state.store.update_merchant(id, patch).await {
        Ok(Some(m)) => (StatusCode::OK, Json(m)).into_response(),
        Ok(None) => ServiceError::not_found("merchant", id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

/// Transactions referencing the merchant are left in place.
pub async fn delete_merchant(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> impl IntoResponse {
    match state.store.delete_merchant(id).await {
        Ok(true) => {
            tracing::info!(merchant_id = id, "merchant deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => ServiceError::not_found("merchant", id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn review_kyc(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<KycReviewRequest>,
) -> impl IntoResponse {
    match state.kyc_service.review(id, req).await {
        Ok(m) => (StatusCode::OK, Json(m)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_kyc_reviews(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> impl IntoResponse {
    match state.kyc_service.reviews(id).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_merchant_transactions(
    State(state): State<AppState>,
    PathId(id): PathId,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let (limit, offset) = state
        .config
        .page(params.limit.as_deref(), params.offset.as_deref());
    let query = TransactionQuery {
        merchant_id: Some(id),
        limit,
        offset,
    };
    match state.payment_service.list(query).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}
