use crate::domain::payment_method::{check_fee_percent, NewPaymentMethod, PaymentMethodPatch};
use crate::error::ServiceError;
use crate::http::extract::{PathId, ValidatedJson};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn list_payment_methods(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_payment_methods().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn get_payment_method(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> impl IntoResponse {
    match state.store.get_payment_method(id).await {
        Ok(Some(p)) => (StatusCode::OK, Json(p)).into_response(),
        Ok(None) => ServiceError::not_found("payment method", id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn create_payment_method(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewPaymentMethod>,
) -> impl IntoResponse {
    if let Err(e) = check_fee_percent(req.fee_percent) {
        return e.into_response();
    }
    match state.store.create_payment_method(req).await {
        Ok(p) => {
            tracing::info!(payment_method_id = p.id, name = %p.name, "payment method created");
            (StatusCode::CREATED, Json(p)).into_response()
        }
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn update_payment_method(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(patch): ValidatedJson<PaymentMethodPatch>,
) -> impl IntoResponse {
    if let Err(e) = check_fee_percent(patch.fee_percent) {
        return e.into_response();
    }
    match state.store.update_payment_method(id, patch).await {
        Ok(Some(p)) => (StatusCode::OK, Json(p)).into_response(),
        Ok(None) => ServiceError::not_found("payment method", id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn delete_payment_method(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> impl IntoResponse {
    match state.store.delete_payment_method(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => ServiceError::not_found("payment method", id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}
