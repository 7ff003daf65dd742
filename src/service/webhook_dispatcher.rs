use crate::config::WebhookDelivery;
use crate::domain::webhook::Webhook;
use crate::repo::store::Storage;
use anyhow::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct WebhookDispatcher {
    pub store: Arc<dyn Storage>,
    pub delivery: WebhookDelivery,
    pub client: reqwest::Client,
}

impl WebhookDispatcher {
    pub fn new(store: Arc<dyn Storage>, delivery: WebhookDelivery) -> Self {
        Self {
            store,
            delivery,
            client: reqwest::Client::new(),
        }
    }

    /// Notifies the merchant's active webhooks subscribed to `event_type`.
    /// Returns how many webhooks were targeted. Delivery failures are logged
    /// and otherwise ignored.
    pub async fn emit(
        &self,
        merchant_id: u64,
        event_type: &str,
        payload: serde_json::Value,
    ) -> Result<usize> {
        let hooks: Vec<Webhook> = self
            .store
            .list_webhooks(Some(merchant_id))
            .await?
            .into_iter()
            .filter(|h| h.subscribes_to(event_type))
            .collect();

        for hook in &hooks {
            match self.delivery {
                WebhookDelivery::Log => {
                    tracing::info!(
                        webhook_id = hook.id,
                        merchant_id,
                        event = event_type,
                        "webhook event"
                    );
                }
                WebhookDelivery::Http => {
                    let result = self
                        .client
                        .post(&hook.url)
                        .header("Content-Type", "application/json")
                        .header("X-Event-Type", event_type)
                        .header("X-Webhook-Secret", &hook.secret)
                        .json(&payload)
                        .send()
                        .await;
                    match result {
                        Ok(resp) => tracing::debug!(
                            webhook_id = hook.id,
                            event = event_type,
                            status = resp.status().as_u16(),
                            "webhook delivered"
                        ),
                        Err(e) => tracing::warn!(
                            webhook_id = hook.id,
                            event = event_type,
                            error = %e,
                            "webhook delivery failed"
                        ),
                    }
                }
            }
        }

        Ok(hooks.len())
    }

    /// Test hook for the dashboard. Never performs network delivery.
    pub fn test(&self, hook: &Webhook) {
        tracing::info!(
            webhook_id = hook.id,
            merchant_id = hook.merchant_id,
            url = %hook.url,
            events = ?hook.events,
            "webhook test initiated"
        );
    }
}
