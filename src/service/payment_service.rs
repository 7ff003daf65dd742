use crate::domain::money;
use crate::domain::transaction::{
    NewTransaction, ProcessPaymentRequest, Transaction, TransactionQuery, TransactionStatus,
    TransactionView, UNKNOWN_NAME,
};
use crate::error::ServiceError;
use crate::processor::{PaymentProcessor, SettlementRequest};
use crate::repo::credentials::random_token;
use crate::repo::store::Storage;
use crate::service::webhook_dispatcher::WebhookDispatcher;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

const REFERENCE_SUFFIX_LEN: usize = 4;

#[derive(Clone)]
pub struct PaymentService {
    pub store: Arc<dyn Storage>,
    pub processor: Arc<dyn PaymentProcessor>,
    pub webhooks: WebhookDispatcher,
    pub settlement_delay: Duration,
    reference_seq: Arc<AtomicU64>,
}

impl PaymentService {
    pub fn new(
        store: Arc<dyn Storage>,
        processor: Arc<dyn PaymentProcessor>,
        webhooks: WebhookDispatcher,
        settlement_delay: Duration,
    ) -> Self {
        Self {
            store,
            processor,
            webhooks,
            settlement_delay,
            reference_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Records a pending transaction and schedules its resolution.
    ///
    /// The merchant and payment method must both exist and be active;
    /// otherwise nothing is written.
    pub async fn process(&self, req: ProcessPaymentRequest) -> Result<Transaction, ServiceError> {
        req.validate()?;

        let amount = money::parse_amount("amount", &req.amount)?;
        let currency = money::normalize_currency(req.currency.as_deref())?;

        let merchant = self
            .store
            .get_merchant(req.merchant_id)
            .await?
            .ok_or(ServiceError::not_found("merchant", req.merchant_id))?;
        if !merchant.is_active {
            return Err(ServiceError::Inactive {
                entity: "merchant",
                id: merchant.id,
            });
        }

        let method = self
            .store
            .get_payment_method(req.payment_method_id)
            .await?
            .ok_or(ServiceError::not_found("payment method", req.payment_method_id))?;
        if !method.is_active {
            return Err(ServiceError::Inactive {
                entity: "payment method",
                id: method.id,
            });
        }

        let txn = self
            .store
            .create_transaction(NewTransaction {
                transaction_id: self.next_reference(),
                merchant_id: merchant.id,
                payment_method_id: method.id,
                amount,
                fees: money::fee_for(amount, method.fee_percent)?,
                currency,
                status: TransactionStatus::Pending,
                customer_email: req.customer_email,
                customer_phone: req.customer_phone,
                description: req.description,
                metadata: req.metadata.map(serde_json::Value::Object),
                created_at: None,
            })
            .await?;

        tracing::info!(
            id = txn.id,
            transaction_id = %txn.transaction_id,
            merchant_id = txn.merchant_id,
            payment_method_id = txn.payment_method_id,
            amount = %txn.amount,
            currency = %txn.currency,
            "payment recorded as pending"
        );

        self.schedule_resolution(txn.id);
        Ok(txn)
    }

    /// `TXN` + epoch millis + process-wide sequence + random suffix. The
    /// sequence alone keeps references unique within a process.
    fn next_reference(&self) -> String {
        let seq = self.reference_seq.fetch_add(1, Ordering::SeqCst);
        format!(
            "TXN{}{:04}{}",
            chrono::Utc::now().timestamp_millis(),
            seq,
            random_token(REFERENCE_SUFFIX_LEN).to_uppercase()
        )
    }

    fn schedule_resolution(&self, id: u64) {
        let svc = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(svc.settlement_delay).await;
            if let Err(e) = svc.resolve(id).await {
                tracing::error!(id, error = %e, "payment resolution failed");
            }
        });
    }

    /// Asks the processor for the final status of a pending transaction.
    /// Returns `None` when the transaction was deleted or is no longer pending.
    pub async fn resolve(&self, id: u64) -> anyhow::Result<Option<Transaction>> {
        let Some(txn) = self.store.get_transaction(id).await? else {
            tracing::debug!(id, "transaction gone before resolution");
            return Ok(None);
        };
        if txn.status != TransactionStatus::Pending {
            tracing::debug!(id, status = txn.status.as_str(), "transaction already resolved");
            return Ok(None);
        }

        let outcome = self
            .processor
            .settle(SettlementRequest {
                transaction_id: txn.transaction_id.clone(),
                merchant_id: txn.merchant_id,
                amount: txn.amount,
                currency: txn.currency.clone(),
            })
            .await?;

        let Some(updated) = self
            .store
            .transition_transaction(id, TransactionStatus::Pending, outcome.status)
            .await?
        else {
            return Ok(None);
        };

        tracing::info!(
            id,
            transaction_id = %updated.transaction_id,
            processor = self.processor.name(),
            status = updated.status.as_str(),
            error_code = outcome.error_code.as_deref().unwrap_or(""),
            "payment resolved"
        );

        let event = match updated.status {
            TransactionStatus::Success => Some("payment.success"),
            TransactionStatus::Failed => Some("payment.failed"),
            _ => None,
        };
        if let Some(event) = event {
            let payload = serde_json::json!({
                "event": event,
                "data": {
                    "id": updated.id,
                    "transactionId": updated.transaction_id,
                    "merchantId": updated.merchant_id,
                    "amount": updated.amount,
                    "currency": updated.currency,
                    "status": updated.status,
                    "processorReference": outcome.processor_reference,
                }
            });
            if let Err(e) = self.webhooks.emit(updated.merchant_id, event, payload).await {
                tracing::warn!(id, event, error = %e, "webhook emit failed");
            }
        }

        Ok(Some(updated))
    }

    pub async fn list(&self, query: TransactionQuery) -> anyhow::Result<Vec<TransactionView>> {
        let txns = self.store.list_transactions(query).await?;
        self.views(txns).await
    }

    pub async fn get(&self, id: u64) -> Result<TransactionView, ServiceError> {
        let txn = self
            .store
            .get_transaction(id)
            .await?
            .ok_or(ServiceError::not_found("transaction", id))?;
        let mut views = self.views(vec![txn]).await?;
        views
            .pop()
            .ok_or(ServiceError::not_found("transaction", id))
    }

    /// Lookup by the public `TXN...` reference handed back to callers.
    pub async fn get_by_reference(&self, reference: &str) -> Result<TransactionView, ServiceError> {
        let missing = || ServiceError::UnknownReference {
            reference: reference.to_string(),
        };
        let txn = self
            .store
            .find_transaction_by_reference(reference)
            .await?
            .ok_or_else(missing)?;
        self.views(vec![txn]).await?.pop().ok_or_else(missing)
    }

    /// Attaches merchant and payment method names. Dangling references
    /// resolve to a placeholder.
    pub async fn views(&self, txns: Vec<Transaction>) -> anyhow::Result<Vec<TransactionView>> {
        let mut merchants: HashMap<u64, String> = HashMap::new();
        let mut methods: HashMap<u64, String> = HashMap::new();
        let mut out = Vec::with_capacity(txns.len());

        for txn in txns {
            if !merchants.contains_key(&txn.merchant_id) {
                let name = self
                    .store
                    .get_merchant(txn.merchant_id)
                    .await?
                    .map(|m| m.name)
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string());
                merchants.insert(txn.merchant_id, name);
            }
            if !methods.contains_key(&txn.payment_method_id) {
                let name = self
                    .store
                    .get_payment_method(txn.payment_method_id)
                    .await?
                    .map(|p| p.name)
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string());
                methods.insert(txn.payment_method_id, name);
            }

            out.push(TransactionView {
                merchant_name: merchants
                    .get(&txn.merchant_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                payment_method_name: methods
                    .get(&txn.payment_method_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                transaction: txn,
            });
        }

        Ok(out)
    }
}
