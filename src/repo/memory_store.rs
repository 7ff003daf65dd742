use async_trait::async_trait;
use chrono::Utc;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::kyc::KycReview;
use crate::domain::merchant::{KycStatus, Merchant, MerchantCredentials, MerchantPatch, NewMerchant};
use crate::domain::payment_method::{NewPaymentMethod, PaymentMethod, PaymentMethodPatch};
use crate::domain::settlement::{
    NewSettlementReport, ReportFilter, SettlementReport, SettlementStatus,
};
use crate::domain::transaction::{NewTransaction, Transaction, TransactionQuery, TransactionStatus};
use crate::domain::webhook::{NewWebhook, Webhook, WebhookPatch};
use crate::repo::credentials;
use crate::repo::store::{ReportUpdate, Storage};

/// Per-entity id sequence. Ids start at 1 and are never reused.
#[derive(Debug)]
struct Sequence(AtomicU64);

impl Sequence {
    fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// Process-local store backed by concurrent maps. Nothing survives a restart.
#[derive(Debug)]
pub struct MemoryStore {
    merchants: DashMap<u64, Merchant>,
    payment_methods: DashMap<u64, PaymentMethod>,
    transactions: DashMap<u64, Transaction>,
    webhooks: DashMap<u64, Webhook>,
    reports: DashMap<u64, SettlementReport>,
    kyc_reviews: DashMap<u64, KycReview>,
    issued_keys: DashSet<String>,
    merchant_seq: Sequence,
    payment_method_seq: Sequence,
    transaction_seq: Sequence,
    webhook_seq: Sequence,
    report_seq: Sequence,
    review_seq: Sequence,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            merchants: DashMap::new(),
            payment_methods: DashMap::new(),
            transactions: DashMap::new(),
            webhooks: DashMap::new(),
            reports: DashMap::new(),
            kyc_reviews: DashMap::new(),
            issued_keys: DashSet::new(),
            merchant_seq: Sequence::new(),
            payment_method_seq: Sequence::new(),
            transaction_seq: Sequence::new(),
            webhook_seq: Sequence::new(),
            report_seq: Sequence::new(),
            review_seq: Sequence::new(),
        }
    }

    /// Draws credentials until none of the four keys was issued before.
    fn fresh_credentials(&self) -> MerchantCredentials {
        loop {
            let c = credentials::merchant_credentials();
            let keys = [
                &c.public_key,
                &c.secret_key,
                &c.sandbox_public_key,
                &c.sandbox_secret_key,
            ];
            if keys.iter().any(|k| self.issued_keys.contains(k.as_str())) {
                continue;
            }
            for k in keys {
                self.issued_keys.insert(k.clone());
            }
            return c;
        }
    }
}

fn newest_first(items: &mut [Transaction]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl Storage for MemoryStore {
    async fn list_merchants(&self) -> anyhow::Result<Vec<Merchant>> {
        let mut out: Vec<Merchant> = self.merchants.iter().map(|e| e.value().clone()).collect();
        out.sort_by_key(|m| m.id);
        Ok(out)
    }

    async fn get_merchant(&self, id: u64) -> anyhow::Result<Option<Merchant>> {
        Ok(self.merchants.get(&id).map(|m| m.value().clone()))
    }

    async fn create_merchant(&self, input: NewMerchant) -> anyhow::Result<Merchant> {
        let id = self.merchant_seq.next();
        let merchant = Merchant::from_new(id, input, self.fresh_credentials(), Utc::now());
        self.merchants.insert(id, merchant.clone());
        Ok(merchant)
    }

    async fn update_merchant(
        &self,
        id: u64,
        patch: MerchantPatch,
    ) -> anyhow::Result<Option<Merchant>> {
        Ok(self.merchants.get_mut(&id).map(|mut m| {
            m.apply(patch, Utc::now());
            m.clone()
        }))
    }

    async fn delete_merchant(&self, id: u64) -> anyhow::Result<bool> {
        Ok(self.merchants.remove(&id).is_some())
    }

    async fn record_kyc_review(
        &self,
        merchant_id: u64,
        status: KycStatus,
        notes: Option<String>,
    ) -> anyhow::Result<Option<(Merchant, KycReview)>> {
        let Some(mut merchant) = self.merchants.get_mut(&merchant_id) else {
            return Ok(None);
        };

        let now = Utc::now();
        let review = KycReview {
            id: self.review_seq.next(),
            merchant_id,
            previous_status: merchant.kyc_status,
            new_status: status,
            review_notes: notes,
            reviewed_at: now,
        };
        merchant.kyc_status = status;
        merchant.updated_at = now;
        self.kyc_reviews.insert(review.id, review.clone());

        Ok(Some((merchant.clone(), review)))
    }

    async fn list_kyc_reviews(&self, merchant_id: u64) -> anyhow::Result<Vec<KycReview>> {
        let mut out: Vec<KycReview> = self
            .kyc_reviews
            .iter()
            .filter(|r| r.merchant_id == merchant_id)
            .map(|r| r.value().clone())
            .collect();
        out.sort_by_key(|r| r.id);
        Ok(out)
    }

    async fn list_payment_methods(&self) -> anyhow::Result<Vec<PaymentMethod>> {
        let mut out: Vec<PaymentMethod> = self
            .payment_methods
            .iter()
            .map(|e| e.value().clone())
            .collect();
        out.sort_by_key(|p| p.id);
        Ok(out)
    }

    async fn get_payment_method(&self, id: u64) -> anyhow::Result<Option<PaymentMethod>> {
        Ok(self.payment_methods.get(&id).map(|p| p.value().clone()))
    }

    async fn create_payment_method(
        &self,
        input: NewPaymentMethod,
    ) -> anyhow::Result<PaymentMethod> {
        let id = self.payment_method_seq.next();
        let method = PaymentMethod::from_new(id, input, Utc::now());
        self.payment_methods.insert(id, method.clone());
        Ok(method)
    }

    async fn update_payment_method(
        &self,
        id: u64,
        patch: PaymentMethodPatch,
    ) -> anyhow::Result<Option<PaymentMethod>> {
        Ok(self.payment_methods.get_mut(&id).map(|mut p| {
            p.apply(patch, Utc::now());
            p.clone()
        }))
    }

    async fn delete_payment_method(&self, id: u64) -> anyhow::Result<bool> {
        Ok(self.payment_methods.remove(&id).is_some())
    }

    async fn list_transactions(&self, query: TransactionQuery) -> anyhow::Result<Vec<Transaction>> {
        let mut out: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| query.merchant_id.map_or(true, |m| t.merchant_id == m))
            .map(|t| t.value().clone())
            .collect();
        newest_first(&mut out);
        Ok(out.into_iter().skip(query.offset).take(query.limit).collect())
    }

    async fn all_transactions(&self) -> anyhow::Result<Vec<Transaction>> {
        Ok(self.transactions.iter().map(|t| t.value().clone()).collect())
    }

    async fn get_transaction(&self, id: u64) -> anyhow::Result<Option<Transaction>> {
        Ok(self.transactions.get(&id).map(|t| t.value().clone()))
    }

    async fn find_transaction_by_reference(
        &self,
        transaction_id: &str,
    ) -> anyhow::Result<Option<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .find(|t| t.transaction_id == transaction_id)
            .map(|t| t.value().clone()))
    }

    async fn create_transaction(&self, input: NewTransaction) -> anyhow::Result<Transaction> {
        let id = self.transaction_seq.next();
        let txn = Transaction::from_new(id, input, Utc::now());
        self.transactions.insert(id, txn.clone());
        Ok(txn)
    }

    async fn transition_transaction(
        &self,
        id: u64,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> anyhow::Result<Option<Transaction>> {
        let Some(mut txn) = self.transactions.get_mut(&id) else {
            return Ok(None);
        };
        if txn.status != from {
            return Ok(None);
        }
        txn.status = to;
        txn.updated_at = Utc::now();
        Ok(Some(txn.clone()))
    }

    async fn delete_transaction(&self, id: u64) -> anyhow::Result<bool> {
        Ok(self.transactions.remove(&id).is_some())
    }

    async fn list_webhooks(&self, merchant_id: Option<u64>) -> anyhow::Result<Vec<Webhook>> {
        let mut out: Vec<Webhook> = self
            .webhooks
            .iter()
            .filter(|w| merchant_id.map_or(true, |m| w.merchant_id == m))
            .map(|w| w.value().clone())
            .collect();
        out.sort_by_key(|w| w.id);
        Ok(out)
    }

    async fn get_webhook(&self, id: u64) -> anyhow::Result<Option<Webhook>> {
        Ok(self.webhooks.get(&id).map(|w| w.value().clone()))
    }

    async fn create_webhook(&self, input: NewWebhook) -> anyhow::Result<Webhook> {
        let id = self.webhook_seq.next();
        let webhook = Webhook::from_new(id, input, credentials::webhook_secret(), Utc::now());
        self.webhooks.insert(id, webhook.clone());
        Ok(webhook)
    }

    async fn update_webhook(
        &self,
        id: u64,
        patch: WebhookPatch,
    ) -> anyhow::Result<Option<Webhook>> {
        Ok(self.webhooks.get_mut(&id).map(|mut w| {
            w.apply(patch, Utc::now());
            w.clone()
        }))
    }

    async fn delete_webhook(&self, id: u64) -> anyhow::Result<bool> {
        Ok(self.webhooks.remove(&id).is_some())
    }

    async fn create_settlement_report(
        &self,
        input: NewSettlementReport,
    ) -> anyhow::Result<SettlementReport> {
        let id = self.report_seq.next();
        let report = SettlementReport::from_new(id, input, Utc::now());
        self.reports.insert(id, report.clone());
        Ok(report)
    }

    async fn get_settlement_report(&self, id: u64) -> anyhow::Result<Option<SettlementReport>> {
        Ok(self.reports.get(&id).map(|r| r.value().clone()))
    }

    async fn list_settlement_reports(
        &self,
        filter: ReportFilter,
    ) -> anyhow::Result<Vec<SettlementReport>> {
        let mut out: Vec<SettlementReport> = self
            .reports
            .iter()
            .filter(|r| filter.merchant_id.map_or(true, |m| r.merchant_id == Some(m)))
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .map(|r| r.value().clone())
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn transition_settlement_report(
        &self,
        id: u64,
        from: SettlementStatus,
        to: SettlementStatus,
    ) -> anyhow::Result<ReportUpdate> {
        let Some(mut report) = self.reports.get_mut(&id) else {
            return Ok(ReportUpdate::Missing);
        };
        if report.status != from || !from.can_transition_to(to) {
            return Ok(ReportUpdate::Conflict(report.clone()));
        }

        report.status = to;
        if to == SettlementStatus::Processed {
            report.processed_at = Some(Utc::now());
        }
        Ok(ReportUpdate::Updated(report.clone()))
    }
}
