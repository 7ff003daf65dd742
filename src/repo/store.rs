use async_trait::async_trait;

use crate::domain::kyc::KycReview;
use crate::domain::merchant::{KycStatus, Merchant, MerchantPatch, NewMerchant};
use crate::domain::payment_method::{NewPaymentMethod, PaymentMethod, PaymentMethodPatch};
use crate::domain::settlement::{
    NewSettlementReport, ReportFilter, SettlementReport, SettlementStatus,
};
use crate::domain::transaction::{NewTransaction, Transaction, TransactionQuery, TransactionStatus};
use crate::domain::webhook::{NewWebhook, Webhook, WebhookPatch};

/// Outcome of a compare-and-set on a report status.
#[derive(Debug, Clone)]
pub enum ReportUpdate {
    Updated(SettlementReport),
    Conflict(SettlementReport),
    Missing,
}

/// Entity storage used by every service.
///
/// Lookups on a missing id return `None` (or `false` for deletes); an `Err`
/// means the backend itself failed. Deletes never cascade.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_merchants(&self) -> anyhow::Result<Vec<Merchant>>;
    async fn get_merchant(&self, id: u64) -> anyhow::Result<Option<Merchant>>;
    async fn create_merchant(&self, input: NewMerchant) -> anyhow::Result<Merchant>;
    async fn update_merchant(
        &self,
        id: u64,
        patch: MerchantPatch,
    ) -> anyhow::Result<Option<Merchant>>;
    async fn delete_merchant(&self, id: u64) -> anyhow::Result<bool>;

    /// Sets the KYC status and appends the review log entry in one step.
    async fn record_kyc_review(
        &self,
        merchant_id: u64,
        status: KycStatus,
        notes: Option<String>,
    ) -> anyhow::Result<Option<(Merchant, KycReview)>>;
    async fn list_kyc_reviews(&self, merchant_id: u64) -> anyhow::Result<Vec<KycReview>>;

    async fn list_payment_methods(&self) -> anyhow::Result<Vec<PaymentMethod>>;
    async fn get_payment_method(&self, id: u64) -> anyhow::Result<Option<PaymentMethod>>;
    async fn create_payment_method(&self, input: NewPaymentMethod) -> anyhow::Result<PaymentMethod>;
    async fn update_payment_method(
        &self,
        id: u64,
        patch: PaymentMethodPatch,
    ) -> anyhow::Result<Option<PaymentMethod>>;
    async fn delete_payment_method(&self, id: u64) -> anyhow::Result<bool>;

    /// Newest first, then paginated.
    async fn list_transactions(&self, query: TransactionQuery) -> anyhow::Result<Vec<Transaction>>;
    async fn all_transactions(&self) -> anyhow::Result<Vec<Transaction>>;
    async fn get_transaction(&self, id: u64) -> anyhow::Result<Option<Transaction>>;
    async fn find_transaction_by_reference(
        &self,
        transaction_id: &str,
    ) -> anyhow::Result<Option<Transaction>>;
    async fn create_transaction(&self, input: NewTransaction) -> anyhow::Result<Transaction>;
    /// Sets `to` only if the transaction is currently in `from`. `None` when
    /// the transaction is missing or has already moved on.
    async fn transition_transaction(
        &self,
        id: u64,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> anyhow::Result<Option<Transaction>>;
    async fn delete_transaction(&self, id: u64) -> anyhow::Result<bool>;

    async fn list_webhooks(&self, merchant_id: Option<u64>) -> anyhow::Result<Vec<Webhook>>;
    async fn get_webhook(&self, id: u64) -> anyhow::Result<Option<Webhook>>;
    async fn create_webhook(&self, input: NewWebhook) -> anyhow::Result<Webhook>;
    async fn update_webhook(&self, id: u64, patch: WebhookPatch) -> anyhow::Result<Option<Webhook>>;
    async fn delete_webhook(&self, id: u64) -> anyhow::Result<bool>;

    async fn create_settlement_report(
        &self,
        input: NewSettlementReport,
    ) -> anyhow::Result<SettlementReport>;
    async fn get_settlement_report(&self, id: u64) -> anyhow::Result<Option<SettlementReport>>;
    /// Newest first.
    async fn list_settlement_reports(
        &self,
        filter: ReportFilter,
    ) -> anyhow::Result<Vec<SettlementReport>>;
    /// Moves the report to `to` only if it is currently in `from`.
    async fn transition_settlement_report(
        &self,
        id: u64,
        from: SettlementStatus,
        to: SettlementStatus,
    ) -> anyhow::Result<ReportUpdate>;
}
