use crate::domain::transaction::TransactionStatus;
use anyhow::Result;
use rust_decimal::Decimal;

pub mod simulated;

#[derive(Debug, Clone)]
pub struct SettlementRequest {
    pub transaction_id: String,
    pub merchant_id: u64,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct ProcessorOutcome {
    pub status: TransactionStatus,
    pub processor_reference: Option<String>,
    pub error_code: Option<String>,
}

/// Stand-in for a payment provider callback: decides the final status of a
/// pending transaction.
#[async_trait::async_trait]
pub trait PaymentProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    async fn settle(&self, request: SettlementRequest) -> Result<ProcessorOutcome>;
}
