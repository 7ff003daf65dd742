use crate::domain::transaction::ProcessPaymentRequest;
use crate::http::extract::JsonBody;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn process_payment(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ProcessPaymentRequest>,
) -> impl IntoResponse {
    match state.payment_service.process(req).await {
        Ok(txn) => (StatusCode::CREATED, Json(txn)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}
