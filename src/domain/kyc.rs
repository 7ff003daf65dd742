use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::merchant::KycStatus;

/// One entry of the append-only KYC review log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycReview {
    pub id: u64,
    pub merchant_id: u64,
    pub previous_status: KycStatus,
    pub new_status: KycStatus,
    pub review_notes: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KycReviewRequest {
    pub kyc_status: KycStatus,
    #[validate(length(max = 2000))]
    pub review_notes: Option<String>,
}
