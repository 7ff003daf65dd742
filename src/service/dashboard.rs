use crate::domain::dashboard::DashboardStats;
use crate::domain::money;
use crate::domain::transaction::TransactionStatus;
use crate::repo::store::Storage;
use rust_decimal::{Decimal, RoundingStrategy};

pub async fn dashboard_stats(store: &dyn Storage) -> anyhow::Result<DashboardStats> {
    let txns = store.all_transactions().await?;
    let merchants = store.list_merchants().await?;

    let mut volume = money::zero();
    for t in &txns {
        volume = volume
            .checked_add(t.amount)
            .ok_or_else(|| anyhow::anyhow!("volume overflow at transaction {}", t.id))?;
    }
    let successes = txns
        .iter()
        .filter(|t| t.status == TransactionStatus::Success)
        .count() as u64;

    Ok(DashboardStats {
        total_transactions: txns.len() as u64,
        total_volume: money::to_money(volume),
        success_rate: success_rate(successes, txns.len() as u64),
        active_merchants: merchants.iter().filter(|m| m.is_active).count() as u64,
    })
}

/// Percentage with one decimal place, e.g. `"66.7%"`.
pub fn success_rate(successes: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    let mut pct = (Decimal::from(successes) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    pct.rescale(1);
    format!("{}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_formats_one_decimal() {
        assert_eq!(success_rate(0, 0), "0.0%");
        assert_eq!(success_rate(2, 3), "66.7%");
        assert_eq!(success_rate(1, 2), "50.0%");
        assert_eq!(success_rate(4, 4), "100.0%");
    }
}
