use paygate_admin::domain::kyc::KycReviewRequest;
use paygate_admin::domain::merchant::{KycStatus, NewMerchant, RiskLevel};
use paygate_admin::error::ServiceError;
use paygate_admin::repo::memory_store::MemoryStore;
use paygate_admin::repo::store::Storage;
use paygate_admin::service::kyc_service::KycService;
use std::sync::Arc;

async fn setup() -> (Arc<dyn Storage>, KycService, u64) {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let m = store
        .create_merchant(NewMerchant {
            name: "Reviewed".to_string(),
            email: "kyc@example.com".to_string(),
            phone: Some("0771234567".to_string()),
            business_name: "Reviewed Ltd".to_string(),
            business_type: Some("Retail".to_string()),
            business_registration_number: Some("REG-1".to_string()),
            tax_number: None,
            bank_account: None,
            webhook_url: None,
            is_active: true,
            risk_level: RiskLevel::Medium,
        })
        .await
        .unwrap();
    assert_eq!(m.kyc_status, KycStatus::Pending);
    let svc = KycService::new(store.clone());
    (store, svc, m.id)
}

fn review(status: KycStatus, notes: Option<&str>) -> KycReviewRequest {
    KycReviewRequest {
        kyc_status: status,
        review_notes: notes.map(String::from),
    }
}

#[tokio::test]
async fn verified_review_is_visible_on_merchant() {
    let (store, svc, id) = setup().await;

    let updated = svc
        .review(id, review(KycStatus::Verified, Some("documents checked")))
        .await
        .unwrap();
    assert_eq!(updated.kyc_status, KycStatus::Verified);

    let fetched = store.get_merchant(id).await.unwrap().unwrap();
    assert_eq!(fetched.kyc_status, KycStatus::Verified);
    assert_eq!(fetched.public_key, updated.public_key);
}

#[tokio::test]
async fn reviews_are_logged_with_notes_in_order() {
    let (_store, svc, id) = setup().await;

    svc.review(id, review(KycStatus::Rejected, Some("blurry ID"))).await.unwrap();
    svc.review(id, review(KycStatus::Verified, Some("  resubmitted  "))).await.unwrap();
    svc.review(id, review(KycStatus::Pending, Some("   "))).await.unwrap();

    let log = svc.reviews(id).await.unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0].previous_status, KycStatus::Pending);
    assert_eq!(log[0].new_status, KycStatus::Rejected);
    assert_eq!(log[0].review_notes.as_deref(), Some("blurry ID"));
    assert_eq!(log[1].previous_status, KycStatus::Rejected);
    assert_eq!(log[1].review_notes.as_deref(), Some("resubmitted"));
    assert_eq!(log[2].new_status, KycStatus::Pending);
    assert!(log[2].review_notes.is_none());
    assert!(log[0].reviewed_at <= log[2].reviewed_at);
}

#[tokio::test]
async fn any_status_may_follow_any_other() {
    let (_store, svc, id) = setup().await;
    for status in [
        KycStatus::Verified,
        KycStatus::Pending,
        KycStatus::Rejected,
        KycStatus::Verified,
    ] {
        let m = svc.review(id, review(status, None)).await.unwrap();
        assert_eq!(m.kyc_status, status);
    }
}

#[tokio::test]
async fn unknown_merchant_is_not_found() {
    let (_store, svc, _) = setup().await;
    assert!(matches!(
        svc.review(999, review(KycStatus::Verified, None)).await.unwrap_err(),
        ServiceError::NotFound { entity: "merchant", id: 999 }
    ));
    assert!(matches!(
        svc.reviews(999).await.unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[tokio::test]
async fn oversized_notes_fail_validation() {
    let (store, svc, id) = setup().await;
    let notes = "x".repeat(2001);
    let err = svc
        .review(id, review(KycStatus::Verified, Some(&notes)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation { .. }));
    assert_eq!(
        store.get_merchant(id).await.unwrap().unwrap().kyc_status,
        KycStatus::Pending
    );
}
