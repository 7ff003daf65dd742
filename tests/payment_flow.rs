use paygate_admin::config::WebhookDelivery;
use paygate_admin::domain::merchant::{MerchantPatch, NewMerchant, RiskLevel};
use paygate_admin::domain::payment_method::{
    NewPaymentMethod, PaymentMethodPatch, PaymentMethodType,
};
use paygate_admin::domain::transaction::{NewTransaction, ProcessPaymentRequest, TransactionStatus};
use paygate_admin::domain::webhook::NewWebhook;
use paygate_admin::error::ServiceError;
use paygate_admin::processor::simulated::SimulatedProcessor;
use paygate_admin::processor::PaymentProcessor;
use paygate_admin::repo::memory_store::MemoryStore;
use paygate_admin::repo::store::Storage;
use paygate_admin::service::payment_service::PaymentService;
use paygate_admin::service::webhook_dispatcher::WebhookDispatcher;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(2000);

fn service(store: Arc<dyn Storage>, processor: Arc<dyn PaymentProcessor>) -> PaymentService {
    let webhooks = WebhookDispatcher::new(store.clone(), WebhookDelivery::Log);
    PaymentService::new(store, processor, webhooks, DELAY)
}

async fn fixtures(store: &dyn Storage) -> (u64, u64) {
    let m = store
        .create_merchant(NewMerchant {
            name: "Shop".to_string(),
            email: "shop@example.com".to_string(),
            phone: None,
            business_name: "Shop Ltd".to_string(),
            business_type: None,
            business_registration_number: None,
            tax_number: None,
            bank_account: None,
            webhook_url: None,
            is_active: true,
            risk_level: RiskLevel::Low,
        })
        .await
        .unwrap();
    let p = store
        .create_payment_method(NewPaymentMethod {
            name: "Card".to_string(),
            method_type: PaymentMethodType::Card,
            description: None,
            icon: "credit-card".to_string(),
            is_active: true,
            fee_percent: Some(Decimal::new(25, 1)),
            config: None,
        })
        .await
        .unwrap();
    (m.id, p.id)
}

fn request(merchant_id: u64, payment_method_id: u64, amount: &str) -> ProcessPaymentRequest {
    ProcessPaymentRequest {
        merchant_id,
        payment_method_id,
        amount: amount.to_string(),
        currency: None,
        customer_email: Some("buyer@example.com".to_string()),
        customer_phone: None,
        description: Some("order 42".to_string()),
        metadata: None,
    }
}

#[tokio::test(start_paused = true)]
async fn pending_payment_resolves_after_delay() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, p) = fixtures(store.as_ref()).await;
    let svc = service(store.clone(), Arc::new(SimulatedProcessor::random(0.9)));

    let txn = svc.process(request(m, p, "100.00")).await.unwrap();
    assert_eq!(txn.status, TransactionStatus::Pending);
    assert_eq!(txn.amount.to_string(), "100.00");
    assert_eq!(txn.currency, "USD");
    assert!(txn.transaction_id.starts_with("TXN"));

    tokio::time::sleep(DELAY / 2).await;
    let halfway = store.get_transaction(txn.id).await.unwrap().unwrap();
    assert_eq!(halfway.status, TransactionStatus::Pending);

    tokio::time::sleep(DELAY).await;
    let done = store.get_transaction(txn.id).await.unwrap().unwrap();
    assert!(matches!(
        done.status,
        TransactionStatus::Success | TransactionStatus::Failed
    ));
}

#[tokio::test(start_paused = true)]
async fn fixed_processor_outcome_is_applied() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, p) = fixtures(store.as_ref()).await;
    let svc = service(
        store.clone(),
        Arc::new(SimulatedProcessor::always(TransactionStatus::Failed)),
    );

    let txn = svc.process(request(m, p, "12.5")).await.unwrap();
    tokio::time::sleep(DELAY + Duration::from_millis(10)).await;

    let done = store.get_transaction(txn.id).await.unwrap().unwrap();
    assert_eq!(done.status, TransactionStatus::Failed);
}

#[tokio::test]
async fn fees_follow_payment_method_rate() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, p) = fixtures(store.as_ref()).await;
    let svc = service(
        store.clone(),
        Arc::new(SimulatedProcessor::always(TransactionStatus::Success)),
    );

    let txn = svc.process(request(m, p, "100")).await.unwrap();
    assert_eq!(txn.fees.map(|f| f.to_string()), Some("2.50".to_string()));

    store
        .update_payment_method(
            p,
            PaymentMethodPatch {
                fee_percent: Some(Decimal::ZERO),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let free = svc.process(request(m, p, "100")).await.unwrap();
    assert!(free.fees.is_none());
}

#[tokio::test]
async fn inactive_merchant_creates_nothing() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, p) = fixtures(store.as_ref()).await;
    store
        .update_merchant(
            m,
            MerchantPatch {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let svc = service(
        store.clone(),
        Arc::new(SimulatedProcessor::always(TransactionStatus::Success)),
    );

    let err = svc.process(request(m, p, "10.00")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Inactive { entity: "merchant", .. }));
    assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    assert!(store.all_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn inactive_or_missing_payment_method_creates_nothing() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, p) = fixtures(store.as_ref()).await;
    let svc = service(
        store.clone(),
        Arc::new(SimulatedProcessor::always(TransactionStatus::Success)),
    );

    let err = svc.process(request(m, 999, "10.00")).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "payment method", id: 999 }));

    store
        .update_payment_method(
            p,
            PaymentMethodPatch {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let err = svc.process(request(m, p, "10.00")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Inactive { entity: "payment method", .. }));

    let err = svc.process(request(404, p, "10.00")).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "merchant", id: 404 }));

    assert!(store.all_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_amount_is_a_validation_error() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, p) = fixtures(store.as_ref()).await;
    let svc = service(
        store.clone(),
        Arc::new(SimulatedProcessor::always(TransactionStatus::Success)),
    );

    for amount in ["abc", "-5", "0", "1.234", "1e5"] {
        let err = svc.process(request(m, p, amount)).await.unwrap_err();
        match err {
            ServiceError::Validation { details, .. } => assert_eq!(details[0].field, "amount"),
            other => panic!("{amount}: unexpected {other:?}"),
        }
    }

    let mut bad_email = request(m, p, "1.00");
    bad_email.customer_email = Some("not-an-email".to_string());
    assert!(matches!(
        svc.process(bad_email).await.unwrap_err(),
        ServiceError::Validation { .. }
    ));
    assert!(store.all_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn oversized_amount_is_rejected_before_fees_are_computed() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, p) = fixtures(store.as_ref()).await;
    let svc = service(
        store.clone(),
        Arc::new(SimulatedProcessor::always(TransactionStatus::Success)),
    );

    for amount in ["79228162514264337593543950335", "10000000000000000000000000000"] {
        let err = svc.process(request(m, p, amount)).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        match err {
            ServiceError::Validation { details, .. } => {
                assert_eq!(details[0].field, "amount");
                assert_eq!(details[0].code, "range");
            }
            other => panic!("{amount}: unexpected {other:?}"),
        }
    }
    assert!(store.all_transactions().await.unwrap().is_empty());

    let txn = svc.process(request(m, p, "999999999999999.99")).await.unwrap();
    assert_eq!(txn.amount.to_string(), "999999999999999.99");
    assert_eq!(txn.fees.unwrap().to_string(), "25000000000000.00");
}

#[tokio::test]
async fn transaction_references_are_unique() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, p) = fixtures(store.as_ref()).await;
    let svc = service(
        store.clone(),
        Arc::new(SimulatedProcessor::always(TransactionStatus::Success)),
    );

    let mut refs = HashSet::new();
    for _ in 0..200 {
        let t = svc.process(request(m, p, "1.00")).await.unwrap();
        assert!(refs.insert(t.transaction_id));
    }
}

#[tokio::test]
async fn resolving_a_deleted_transaction_is_a_no_op() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, p) = fixtures(store.as_ref()).await;
    let svc = service(
        store.clone(),
        Arc::new(SimulatedProcessor::always(TransactionStatus::Success)),
    );

    let txn = svc.process(request(m, p, "5.00")).await.unwrap();
    assert!(store.delete_transaction(txn.id).await.unwrap());

    assert!(svc.resolve(txn.id).await.unwrap().is_none());
    assert!(store.get_transaction(txn.id).await.unwrap().is_none());
}

#[tokio::test]
async fn resolution_does_not_overwrite_settled_transaction() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let svc = service(
        store.clone(),
        Arc::new(SimulatedProcessor::always(TransactionStatus::Success)),
    );

    let txn = store
        .create_transaction(NewTransaction {
            transaction_id: "TXN-CANCELLED".to_string(),
            merchant_id: 1,
            payment_method_id: 1,
            amount: Decimal::new(500, 2),
            fees: None,
            currency: "USD".to_string(),
            status: TransactionStatus::Cancelled,
            customer_email: None,
            customer_phone: None,
            description: None,
            metadata: None,
            created_at: None,
        })
        .await
        .unwrap();

    assert!(svc.resolve(txn.id).await.unwrap().is_none());
    assert_eq!(
        store.get_transaction(txn.id).await.unwrap().unwrap().status,
        TransactionStatus::Cancelled
    );
}

#[tokio::test]
async fn resolution_notifies_subscribed_webhooks_only() {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let (m, _) = fixtures(store.as_ref()).await;
    for (events, is_active) in [
        (vec!["payment.success"], true),
        (vec!["payment.failed"], true),
        (vec!["payment.success"], false),
    ] {
        store
            .create_webhook(NewWebhook {
                merchant_id: m,
                url: "https://example.com/hook".to_string(),
                events: events.into_iter().map(String::from).collect(),
                is_active,
            })
            .await
            .unwrap();
    }

    let dispatcher = WebhookDispatcher::new(store.clone(), WebhookDelivery::Log);
    let sent = dispatcher
        .emit(m, "payment.success", serde_json::json!({"event": "payment.success"}))
        .await
        .unwrap();
    assert_eq!(sent, 1);
    assert_eq!(dispatcher.emit(m + 1, "payment.success", serde_json::json!({})).await.unwrap(), 0);
}
