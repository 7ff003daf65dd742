use crate::domain::webhook::{check_events, NewWebhook, TestWebhookRequest, WebhookPatch};
use crate::error::ServiceError;
use crate::http::extract::{optional_id, JsonBody, PathId, ValidatedJson};
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookParams {
    pub merchant_id: Option<String>,
}

pub async fn list_webhooks(
    State(state): State<AppState>,
    Query(params): Query<WebhookParams>,
) -> impl IntoResponse {
    let merchant_id = match optional_id("merchantId", params.merchant_id.as_deref()) {
        Ok(v) => v,
        Err(e) => return e.into_response(),
    };
    match state.store.list_webhooks(merchant_id).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn get_webhook(State(state): State<AppState>, PathId(id): PathId) -> impl IntoResponse {
    match state.store.get_webhook(id).await {
        Ok(Some(w)) => (StatusCode::OK, Json(w)).into_response(),
        Ok(None) => ServiceError::not_found("webhook", id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn create_webhook(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewWebhook>,
) -> impl IntoResponse {
    if let Err(e) = check_events(&req.events) {
        return e.into_response();
    }
    match state.store.get_merchant(req.merchant_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return ServiceError::not_found("merchant", req.merchant_id).into_response(),
        Err(e) => return ServiceError::from(e).into_response(),
    }
    match state.store.create_webhook(req).await {
        Ok(w) => {
            tracing::info!(webhook_id = w.id, merchant_id = w.merchant_id, "webhook created");
            (StatusCode::CREATED, Json(w)).into_response()
        }
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn update_webhook(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(patch): ValidatedJson<WebhookPatch>,
) -> impl IntoResponse {
    if let Some(events) = &patch.events {
        if let Err(e) = check_events(events) {
            return e.into_response();
        }
    }
    match state.store.update_webhook(id, patch).await {
        Ok(Some(w)) => (StatusCode::OK, Json(w)).into_response(),
        Ok(None) => ServiceError::not_found("webhook", id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

pub async fn delete_webhook(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> impl IntoResponse {
    match state.store.delete_webhook(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => ServiceError::not_found("webhook", id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

/// Only logs; nothing is sent to the target URL.
pub async fn test_webhook(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TestWebhookRequest>,
) -> impl IntoResponse {
    match state.store.get_webhook(req.webhook_id).await {
        Ok(Some(hook)) => {
            state.webhook_dispatcher.test(&hook);
            (
                StatusCode::OK,
                Json(serde_json::json!({"message": "Webhook test initiated", "status": "success"})),
            )
                .into_response()
        }
        Ok(None) => ServiceError::not_found("webhook", req.webhook_id).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}
