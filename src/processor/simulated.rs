use crate::domain::transaction::TransactionStatus;
use crate::processor::{PaymentProcessor, ProcessorOutcome, SettlementRequest};
use anyhow::Result;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulatedBehavior {
    Random { success_rate: f64 },
    AlwaysSuccess,
    AlwaysFailure,
}

pub struct SimulatedProcessor {
    pub behavior: SimulatedBehavior,
}

impl SimulatedProcessor {
    pub fn random(success_rate: f64) -> Self {
        Self {
            behavior: SimulatedBehavior::Random {
                success_rate: success_rate.clamp(0.0, 1.0),
            },
        }
    }

    pub fn always(status: TransactionStatus) -> Self {
        let behavior = if status == TransactionStatus::Success {
            SimulatedBehavior::AlwaysSuccess
        } else {
            SimulatedBehavior::AlwaysFailure
        };
        Self { behavior }
    }

    fn succeeds(&self) -> bool {
        match self.behavior {
            SimulatedBehavior::AlwaysSuccess => true,
            SimulatedBehavior::AlwaysFailure => false,
            SimulatedBehavior::Random { success_rate } => rand::thread_rng().gen_bool(success_rate),
        }
    }
}

#[async_trait::async_trait]
impl PaymentProcessor for SimulatedProcessor {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn settle(&self, request: SettlementRequest) -> Result<ProcessorOutcome> {
        let outcome = if self.succeeds() {
            ProcessorOutcome {
                status: TransactionStatus::Success,
                processor_reference: Some(format!("sim_{}", request.transaction_id)),
                error_code: None,
            }
        } else {
            ProcessorOutcome {
                status: TransactionStatus::Failed,
                processor_reference: None,
                error_code: Some("SIMULATED_DECLINE".to_string()),
            }
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn request() -> SettlementRequest {
        SettlementRequest {
            transaction_id: "TXN1".to_string(),
            merchant_id: 1,
            amount: Decimal::new(1000, 2),
            currency: "USD".to_string(),
        }
    }

    #[tokio::test]
    async fn fixed_behaviours_are_deterministic() {
        let ok = SimulatedProcessor::always(TransactionStatus::Success);
        let bad = SimulatedProcessor::always(TransactionStatus::Failed);
        assert_eq!(ok.settle(request()).await.unwrap().status, TransactionStatus::Success);
        let out = bad.settle(request()).await.unwrap();
        assert_eq!(out.status, TransactionStatus::Failed);
        assert_eq!(out.error_code.as_deref(), Some("SIMULATED_DECLINE"));
    }

    #[tokio::test]
    async fn random_extremes_behave_like_fixed() {
        let never = SimulatedProcessor::random(0.0);
        let always = SimulatedProcessor::random(1.0);
        for _ in 0..20 {
            assert_eq!(never.settle(request()).await.unwrap().status, TransactionStatus::Failed);
            assert_eq!(always.settle(request()).await.unwrap().status, TransactionStatus::Success);
        }
    }

    #[test]
    fn success_rate_is_clamped() {
        let p = SimulatedProcessor::random(3.0);
        assert_eq!(p.behavior, SimulatedBehavior::Random { success_rate: 1.0 });
    }
}
