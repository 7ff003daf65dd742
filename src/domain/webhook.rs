use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ServiceError;

pub const WEBHOOK_EVENTS: &[&str] = &[
    "payment.success",
    "payment.failed",
    "payment.pending",
    "merchant.created",
    "merchant.updated",
    "transaction.created",
    "transaction.updated",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: u64,
    pub merchant_id: u64,
    pub url: String,
    pub events: Vec<String>,
    pub is_active: bool,
    pub secret: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewWebhook {
    pub merchant_id: u64,
    #[validate(url)]
    pub url: String,
    #[validate(length(min = 1))]
    pub events: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPatch {
    #[validate(url)]
    pub url: Option<String>,
    #[validate(length(min = 1))]
    pub events: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestWebhookRequest {
    pub webhook_id: u64,
}

impl Webhook {
    pub fn from_new(id: u64, input: NewWebhook, secret: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            merchant_id: input.merchant_id,
            url: input.url,
            events: input.events,
            is_active: input.is_active,
            secret,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: WebhookPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.url {
            self.url = v;
        }
        if let Some(v) = patch.events {
            self.events = v;
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
        self.updated_at = now;
    }

    pub fn subscribes_to(&self, event: &str) -> bool {
        self.is_active && self.events.iter().any(|e| e == event)
    }
}

pub fn check_events(events: &[String]) -> Result<(), ServiceError> {
    let unknown: Vec<&str> = events
        .iter()
        .map(String::as_str)
        .filter(|e| !WEBHOOK_EVENTS.contains(e))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    Err(ServiceError::invalid_field(
        "events",
        "unknown_event",
        format!("unknown webhook events: {}", unknown.join(", ")),
    ))
}
