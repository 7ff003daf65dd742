use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookDelivery {
    Log,
    Http,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub settlement_delay: Duration,
    pub simulated_success_rate: f64,
    pub report_timeout: Duration,
    pub default_page_limit: usize,
    pub max_page_limit: usize,
    pub webhook_delivery: WebhookDelivery,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            settlement_delay: Duration::from_millis(2000),
            simulated_success_rate: 0.9,
            report_timeout: Duration::from_millis(5000),
            default_page_limit: 50,
            max_page_limit: 500,
            webhook_delivery: WebhookDelivery::Log,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            settlement_delay: env_parse::<u64>("SETTLEMENT_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.settlement_delay),
            simulated_success_rate: env_parse::<f64>("SIMULATED_SUCCESS_RATE")
                .filter(|r| r.is_finite() && (0.0..=1.0).contains(r))
                .unwrap_or(defaults.simulated_success_rate),
            report_timeout: env_parse::<u64>("REPORT_TIMEOUT_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.report_timeout),
            default_page_limit: env_parse::<usize>("DEFAULT_PAGE_LIMIT")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.default_page_limit),
            max_page_limit: env_parse::<usize>("MAX_PAGE_LIMIT")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_page_limit),
            webhook_delivery: match std::env::var("WEBHOOK_DELIVERY").as_deref() {
                Ok("http") => WebhookDelivery::Http,
                _ => WebhookDelivery::Log,
            },
            seed_demo_data: env_parse::<bool>("SEED_DEMO_DATA").unwrap_or(defaults.seed_demo_data),
        }
    }

    /// Resolves `limit`/`offset` query values; unparsable or non-positive
    /// limits fall back to the default, large ones are clamped.
    pub fn page(&self, limit: Option<&str>, offset: Option<&str>) -> (usize, usize) {
        let limit = limit
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(self.default_page_limit)
            .min(self.max_page_limit);
        let offset = offset
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(0);
        (limit, offset)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.page(None, None), (50, 0));
        assert_eq!(cfg.page(Some("abc"), Some("x")), (50, 0));
        assert_eq!(cfg.page(Some("0"), Some("5")), (50, 5));
        assert_eq!(cfg.page(Some("10000"), None), (500, 0));
        assert_eq!(cfg.page(Some("20"), Some("40")), (20, 40));
    }
}
