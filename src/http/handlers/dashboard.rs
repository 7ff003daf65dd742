use crate::error::ServiceError;
use crate::service::dashboard::dashboard_stats;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    match dashboard_stats(state.store.as_ref()).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}
