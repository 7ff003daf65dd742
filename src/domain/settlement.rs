use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::money;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Pending,
    Processed,
    Failed,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::Processed => "processed",
            SettlementStatus::Failed => "failed",
        }
    }

    /// `pending` is the only non-terminal state.
    pub fn can_transition_to(&self, next: SettlementStatus) -> bool {
        matches!(
            (self, next),
            (SettlementStatus::Pending, SettlementStatus::Processed)
                | (SettlementStatus::Pending, SettlementStatus::Failed)
        )
    }
}

impl std::str::FromStr for SettlementStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(SettlementStatus::Pending),
            "processed" => Ok(SettlementStatus::Processed),
            "failed" => Ok(SettlementStatus::Failed),
            other => Err(ServiceError::invalid_field(
                "status",
                "unknown_status",
                format!("'{}' is not a settlement status", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    pub id: u64,
    pub merchant_id: Option<u64>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub report_date: NaiveDate,
    pub total_transactions: u64,
    pub total_amount: Decimal,
    pub total_fees: Decimal,
    pub net_amount: Decimal,
    pub status: SettlementStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewSettlementReport {
    pub scope: ReportScope,
    pub totals: SettlementTotals,
}

impl SettlementReport {
    pub fn from_new(id: u64, input: NewSettlementReport, now: DateTime<Utc>) -> Self {
        Self {
            id,
            merchant_id: input.scope.merchant_id,
            period_start: input.scope.period_start,
            period_end: input.scope.period_end,
            report_date: input.scope.period_end,
            total_transactions: input.totals.total_transactions,
            total_amount: input.totals.total_amount,
            total_fees: input.totals.total_fees,
            net_amount: input.totals.net_amount,
            status: SettlementStatus::Pending,
            created_at: now,
            processed_at: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub merchant_id: Option<u64>,
    pub date_from: String,
    pub date_to: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub merchant_id: Option<u64>,
    pub status: Option<SettlementStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportScope {
    pub merchant_id: Option<u64>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl ReportScope {
    pub fn new(
        merchant_id: Option<u64>,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Self, ServiceError> {
        if period_start > period_end {
            return Err(ServiceError::invalid_field(
                "dateFrom",
                "range",
                "dateFrom must not be after dateTo",
            ));
        }
        Ok(Self {
            merchant_id,
            period_start,
            period_end,
        })
    }

    pub fn includes(&self, txn: &Transaction) -> bool {
        if txn.status != TransactionStatus::Success {
            return false;
        }
        if self.merchant_id.is_some_and(|m| m != txn.merchant_id) {
            return false;
        }
        let day = txn.created_at.date_naive();
        day >= self.period_start && day <= self.period_end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementTotals {
    pub total_transactions: u64,
    pub total_amount: Decimal,
    pub total_fees: Decimal,
    pub net_amount: Decimal,
}

/// Sum the successful in-scope transactions. Missing fees count as zero.
pub fn summarize<'a, I>(transactions: I, scope: &ReportScope) -> anyhow::Result<SettlementTotals>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut count: u64 = 0;
    let mut amount = money::zero();
    let mut fees = money::zero();

    for txn in transactions.into_iter().filter(|t| scope.includes(t)) {
        count += 1;
        amount = amount
            .checked_add(txn.amount)
            .ok_or_else(|| anyhow::anyhow!("amount overflow at transaction {}", txn.id))?;
        fees = fees
            .checked_add(txn.fees.unwrap_or(Decimal::ZERO))
            .ok_or_else(|| anyhow::anyhow!("fee overflow at transaction {}", txn.id))?;
    }

    let net = amount
        .checked_sub(fees)
        .ok_or_else(|| anyhow::anyhow!("net amount overflow"))?;

    Ok(SettlementTotals {
        total_transactions: count,
        total_amount: money::to_money(amount),
        total_fees: money::to_money(fees),
        net_amount: money::to_money(net),
    })
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its UTC calendar day).
pub fn parse_report_date(field: &str, raw: &str) -> Result<NaiveDate, ServiceError> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    Err(ServiceError::invalid_field(
        field,
        "format",
        format!("'{}' is not an ISO date", s),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_reports_move() {
        assert!(SettlementStatus::Pending.can_transition_to(SettlementStatus::Processed));
        assert!(SettlementStatus::Pending.can_transition_to(SettlementStatus::Failed));
        assert!(!SettlementStatus::Processed.can_transition_to(SettlementStatus::Processed));
        assert!(!SettlementStatus::Failed.can_transition_to(SettlementStatus::Processed));
        assert!(!SettlementStatus::Processed.can_transition_to(SettlementStatus::Pending));
    }

    #[test]
    fn report_dates_accept_plain_and_timestamp_forms() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_report_date("dateFrom", "2024-03-09").unwrap(), d);
        assert_eq!(parse_report_date("dateFrom", "2024-03-09T22:10:00Z").unwrap(), d);
        assert_eq!(parse_report_date("dateFrom", "2024-03-10T01:00:00+02:00").unwrap(), d);
        assert!(parse_report_date("dateFrom", "09/03/2024").is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(ReportScope::new(None, a, b).is_err());
        assert!(ReportScope::new(None, b, a).is_ok());
        assert!(ReportScope::new(None, a, a).is_ok());
    }
}
