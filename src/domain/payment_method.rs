use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    Card,
    MobileMoney,
    DigitalWallet,
    BankTransfer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub description: Option<String>,
    pub icon: String,
    pub is_active: bool,
    pub fee_percent: Decimal,
    pub config: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_icon() -> String {
    "credit-card".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentMethod {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub description: Option<String>,
    #[serde(default = "default_icon")]
    #[validate(length(min = 1, max = 64))]
    pub icon: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub fee_percent: Option<Decimal>,
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodPatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub method_type: Option<PaymentMethodType>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub icon: Option<String>,
    pub is_active: Option<bool>,
    pub fee_percent: Option<Decimal>,
    pub config: Option<serde_json::Value>,
}

impl PaymentMethod {
    pub fn from_new(id: u64, input: NewPaymentMethod, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            method_type: input.method_type,
            description: input.description,
            icon: input.icon,
            is_active: input.is_active,
            fee_percent: input.fee_percent.unwrap_or(Decimal::ZERO),
            config: input.config,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: PaymentMethodPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.method_type {
            self.method_type = v;
        }
        if let Some(v) = patch.description {
            self.description = Some(v);
        }
        if let Some(v) = patch.icon {
            self.icon = v;
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
        if let Some(v) = patch.fee_percent {
            self.fee_percent = v;
        }
        if let Some(v) = patch.config {
            self.config = Some(v);
        }
        self.updated_at = now;
    }
}

/// Fee rates are percentages in `[0, 100]`.
pub fn check_fee_percent(fee_percent: Option<Decimal>) -> Result<(), crate::error::ServiceError> {
    match fee_percent {
        Some(p) if p < Decimal::ZERO || p > Decimal::ONE_HUNDRED => Err(
            crate::error::ServiceError::invalid_field(
                "feePercent",
                "range",
                "feePercent must be between 0 and 100",
            ),
        ),
        _ => Ok(()),
    }
}
