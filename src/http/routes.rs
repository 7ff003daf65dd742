use crate::http::handlers::{
    dashboard, merchants, payment_methods, payments, settlement, transactions, webhooks,
};
use crate::http::middleware::request_trace::trace_requests;
use crate::AppState;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/dashboard/stats", get(dashboard::stats))
        .route(
            "/merchants",
            get(merchants::list_merchants).post(merchants::create_merchant),
        )
        .route(
            "/merchants/:id",
            get(merchants::get_merchant)
                .put(merchants::update_merchant)
                .delete(merchants::delete_merchant),
        )
        .route("/merchants/:id/kyc", put(merchants::review_kyc))
        .route("/merchants/:id/kyc/reviews", get(merchants::list_kyc_reviews))
        .route(
            "/merchants/:id/transactions",
            get(merchants::list_merchant_transactions),
        )
        .route(
            "/payment-methods",
            get(payment_methods::list_payment_methods)
                .post(payment_methods::create_payment_method),
        )
        .route(
            "/payment-methods/:id",
            get(payment_methods::get_payment_method)
                .put(payment_methods::update_payment_method)
                .delete(payment_methods::delete_payment_method),
        )
        .route("/transactions", get(transactions::list_transactions))
        .route("/transactions/:id", get(transactions::get_transaction))
        .route(
            "/transactions/reference/:reference",
            get(transactions::get_transaction_by_reference),
        )
        .route("/process-payment", post(payments::process_payment))
        .route("/settlement/generate", post(settlement::generate_report))
        .route("/settlement/process/:id", post(settlement::process_settlement))
        .route("/settlement/reports", get(settlement::list_reports))
        .route("/settlement/reports/:id", get(settlement::get_report))
        .route(
            "/webhooks",
            get(webhooks::list_webhooks).post(webhooks::create_webhook),
        )
        .route(
            "/webhooks/:id",
            get(webhooks::get_webhook)
                .put(webhooks::update_webhook)
                .delete(webhooks::delete_webhook),
        )
        .route("/test-webhook", post(webhooks::test_webhook));

    Router::new()
        .route("/health", get(payments::health))
        .nest("/api", api)
        .fallback(not_found)
        .layer(from_fn(trace_requests))
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Not found"})),
    )
}
