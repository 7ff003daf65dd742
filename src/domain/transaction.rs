use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Success,
    Failed,
    Cancelled,
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Processing => "processing",
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub transaction_id: String,
    pub merchant_id: u64,
    pub payment_method_id: u64,
    pub amount: Decimal,
    pub fees: Option<Decimal>,
    pub currency: String,
    pub status: TransactionStatus,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Store input for a transaction record. `created_at` is only set when
/// importing historical records; the store stamps the current time otherwise.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub transaction_id: String,
    pub merchant_id: u64,
    pub payment_method_id: u64,
    pub amount: Decimal,
    pub fees: Option<Decimal>,
    pub currency: String,
    pub status: TransactionStatus,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn from_new(id: u64, input: NewTransaction, now: DateTime<Utc>) -> Self {
        let created_at = input.created_at.unwrap_or(now);
        Self {
            id,
            transaction_id: input.transaction_id,
            merchant_id: input.merchant_id,
            payment_method_id: input.payment_method_id,
            amount: input.amount,
            fees: input.fees,
            currency: input.currency,
            status: input.status,
            customer_email: input.customer_email,
            customer_phone: input.customer_phone,
            description: input.description,
            metadata: input.metadata,
            created_at,
            updated_at: created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionQuery {
    pub merchant_id: Option<u64>,
    pub limit: usize,
    pub offset: usize,
}

/// Transaction as listed by the API, with owner names resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub merchant_name: String,
    pub payment_method_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub merchant_id: u64,
    pub payment_method_id: u64,
    #[validate(length(min = 1, max = 32))]
    pub amount: String,
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(length(min = 3, max = 32))]
    pub customer_phone: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}
