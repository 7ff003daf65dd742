use crate::domain::kyc::{KycReview, KycReviewRequest};
use crate::domain::merchant::Merchant;
use crate::error::ServiceError;
use crate::repo::store::Storage;
use std::sync::Arc;
use validator::Validate;

/// Merchant compliance review. Any status may move to any other; every
/// review is appended to the merchant's log with its notes.
#[derive(Clone)]
pub struct KycService {
    pub store: Arc<dyn Storage>,
}

impl KycService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub async fn review(
        &self,
        merchant_id: u64,
        req: KycReviewRequest,
    ) -> Result<Merchant, ServiceError> {
        req.validate()?;

        let notes = req
            .review_notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let (merchant, review) = self
            .store
            .record_kyc_review(merchant_id, req.kyc_status, notes)
            .await?
            .ok_or(ServiceError::not_found("merchant", merchant_id))?;

        tracing::info!(
            merchant_id,
            review_id = review.id,
            from = review.previous_status.as_str(),
            to = review.new_status.as_str(),
            "kyc reviewed"
        );
        Ok(merchant)
    }

    /// Oldest first.
    pub async fn reviews(&self, merchant_id: u64) -> Result<Vec<KycReview>, ServiceError> {
        if self.store.get_merchant(merchant_id).await?.is_none() {
            return Err(ServiceError::not_found("merchant", merchant_id));
        }
        Ok(self.store.list_kyc_reviews(merchant_id).await?)
    }
}
