use crate::domain::settlement::{
    parse_report_date, summarize, GenerateReportRequest, NewSettlementReport, ReportFilter,
    ReportScope, SettlementReport, SettlementStatus,
};
use crate::error::ServiceError;
use crate::repo::store::{ReportUpdate, Storage};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const GENERATION: &str = "settlement report generation";

#[derive(Clone)]
pub struct SettlementService {
    pub store: Arc<dyn Storage>,
    pub report_timeout: Duration,
}

impl SettlementService {
    pub fn new(store: Arc<dyn Storage>, report_timeout: Duration) -> Self {
        Self { store, report_timeout }
    }

    /// Aggregates successful transactions in `[dateFrom, dateTo]` into a new
    /// pending report. An empty match still produces a report.
    pub async fn generate(
        &self,
        req: GenerateReportRequest,
    ) -> Result<SettlementReport, ServiceError> {
        let from = parse_report_date("dateFrom", &req.date_from)?;
        let to = parse_report_date("dateTo", &req.date_to)?;
        let scope = ReportScope::new(req.merchant_id, from, to)?;

        let txns = self.store.all_transactions().await?;
        let scanned = txns.len();

        let job = tokio::task::spawn_blocking(move || summarize(&txns, &scope));
        let totals = match within(self.report_timeout, GENERATION, job).await? {
            Err(join) => {
                return Err(ServiceError::Internal(anyhow::anyhow!(
                    "settlement aggregation task failed: {}",
                    join
                )))
            }
            Ok(Err(e)) => {
                tracing::error!(
                    merchant_id = ?req.merchant_id,
                    date_from = %from,
                    date_to = %to,
                    error = %e,
                    "settlement aggregation failed"
                );
                return Err(ServiceError::Internal(e));
            }
            Ok(Ok(totals)) => totals,
        };

        let report = self
            .store
            .create_settlement_report(NewSettlementReport { scope, totals })
            .await?;

        tracing::info!(
            report_id = report.id,
            merchant_id = ?report.merchant_id,
            period_start = %report.period_start,
            period_end = %report.period_end,
            scanned,
            included = report.total_transactions,
            "settlement report generated"
        );
        Ok(report)
    }

    /// `pending -> processed`. Any other starting state is rejected.
    pub async fn process(&self, id: u64) -> Result<SettlementReport, ServiceError> {
        let to = SettlementStatus::Processed;
        match self
            .store
            .transition_settlement_report(id, SettlementStatus::Pending, to)
            .await?
        {
            ReportUpdate::Updated(report) => {
                tracing::info!(
                    report_id = id,
                    net_amount = %report.net_amount,
                    "settlement processed"
                );
                Ok(report)
            }
            ReportUpdate::Conflict(report) => Err(ServiceError::InvalidTransition {
                entity: "settlement report",
                id,
                from: report.status.as_str().to_string(),
                to: to.as_str().to_string(),
            }),
            ReportUpdate::Missing => Err(ServiceError::not_found("settlement report", id)),
        }
    }

    pub async fn get(&self, id: u64) -> Result<SettlementReport, ServiceError> {
        self.store
            .get_settlement_report(id)
            .await?
            .ok_or(ServiceError::not_found("settlement report", id))
    }

    pub async fn list(&self, filter: ReportFilter) -> anyhow::Result<Vec<SettlementReport>> {
        self.store.list_settlement_reports(filter).await
    }
}

/// Bounds `work` by `limit`, mapping expiry to [`ServiceError::Timeout`].
async fn within<F: Future>(
    limit: Duration,
    operation: &'static str,
    work: F,
) -> Result<F::Output, ServiceError> {
    tokio::time::timeout(limit, work).await.map_err(|_| {
        tracing::warn!(
            operation,
            timeout_ms = limit.as_millis() as u64,
            "operation timed out"
        );
        ServiceError::Timeout { operation }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test(start_paused = true)]
    async fn stalled_generation_times_out_as_504() {
        let err = within(
            Duration::from_millis(250),
            GENERATION,
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Timeout { operation: GENERATION }));
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.to_string(), "settlement report generation timed out");
    }

    #[tokio::test(start_paused = true)]
    async fn finished_work_passes_through() {
        let out = within(Duration::from_millis(250), GENERATION, async { 7 })
            .await
            .unwrap();
        assert_eq!(out, 7);
    }
}
