use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// Live and sandbox key pairs, generated by the store on merchant creation.
#[derive(Debug, Clone)]
pub struct MerchantCredentials {
    pub public_key: String,
    pub secret_key: String,
    pub sandbox_public_key: String,
    pub sandbox_secret_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business_name: String,
    pub business_type: Option<String>,
    pub business_registration_number: Option<String>,
    pub tax_number: Option<String>,
    pub bank_account: Option<String>,
    pub webhook_url: Option<String>,
    pub is_active: bool,
    pub kyc_status: KycStatus,
    pub risk_level: RiskLevel,
    pub public_key: String,
    pub secret_key: String,
    pub sandbox_public_key: String,
    pub sandbox_secret_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMerchant {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 32))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub business_name: String,
    pub business_type: Option<String>,
    pub business_registration_number: Option<String>,
    pub tax_number: Option<String>,
    pub bank_account: Option<String>,
    #[validate(url)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub risk_level: RiskLevel,
}

/// Partial update. Credentials and KYC status are not reachable from here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MerchantPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 32))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub business_registration_number: Option<String>,
    pub tax_number: Option<String>,
    pub bank_account: Option<String>,
    #[validate(url)]
    pub webhook_url: Option<String>,
    pub is_active: Option<bool>,
    pub risk_level: Option<RiskLevel>,
}

impl Merchant {
    pub fn from_new(
        id: u64,
        input: NewMerchant,
        credentials: MerchantCredentials,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            business_name: input.business_name,
            business_type: input.business_type,
            business_registration_number: input.business_registration_number,
            tax_number: input.tax_number,
            bank_account: input.bank_account,
            webhook_url: input.webhook_url,
            is_active: input.is_active,
            kyc_status: KycStatus::Pending,
            risk_level: input.risk_level,
            public_key: credentials.public_key,
            secret_key: credentials.secret_key,
            sandbox_public_key: credentials.sandbox_public_key,
            sandbox_secret_key: credentials.sandbox_secret_key,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: MerchantPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.phone {
            self.phone = Some(v);
        }
        if let Some(v) = patch.business_name {
            self.business_name = v;
        }
        if let Some(v) = patch.business_type {
            self.business_type = Some(v);
        }
        if let Some(v) = patch.business_registration_number {
            self.business_registration_number = Some(v);
        }
        if let Some(v) = patch.tax_number {
            self.tax_number = Some(v);
        }
        if let Some(v) = patch.bank_account {
            self.bank_account = Some(v);
        }
        if let Some(v) = patch.webhook_url {
            self.webhook_url = Some(v);
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
        if let Some(v) = patch.risk_level {
            self.risk_level = v;
        }
        self.updated_at = now;
    }
}
