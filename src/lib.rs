pub mod config;
pub mod domain {
    pub mod dashboard;
    pub mod kyc;
    pub mod merchant;
    pub mod money;
    pub mod payment_method;
    pub mod settlement;
    pub mod transaction;
    pub mod webhook;
}
pub mod error;
pub mod http {
    pub mod extract;
    pub mod handlers {
        pub mod dashboard;
        pub mod merchants;
        pub mod payment_methods;
        pub mod payments;
        pub mod settlement;
        pub mod transactions;
        pub mod webhooks;
    }
    pub mod middleware {
        pub mod request_trace;
    }
    pub mod routes;
}
pub mod processor;
pub mod repo {
    pub mod credentials;
    pub mod memory_store;
    pub mod seed;
    pub mod store;
}
pub mod service {
    pub mod dashboard;
    pub mod kyc_service;
    pub mod payment_service;
    pub mod settlement_service;
    pub mod webhook_dispatcher;
}

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::AppConfig>,
    pub store: Arc<dyn repo::store::Storage>,
    pub payment_service: service::payment_service::PaymentService,
    pub settlement_service: service::settlement_service::SettlementService,
    pub kyc_service: service::kyc_service::KycService,
    pub webhook_dispatcher: service::webhook_dispatcher::WebhookDispatcher,
}

impl AppState {
    pub fn new(
        config: config::AppConfig,
        store: Arc<dyn repo::store::Storage>,
        processor: Arc<dyn processor::PaymentProcessor>,
    ) -> Self {
        let webhook_dispatcher = service::webhook_dispatcher::WebhookDispatcher::new(
            store.clone(),
            config.webhook_delivery,
        );
        let payment_service = service::payment_service::PaymentService::new(
            store.clone(),
            processor,
            webhook_dispatcher.clone(),
            config.settlement_delay,
        );
        let settlement_service = service::settlement_service::SettlementService::new(
            store.clone(),
            config.report_timeout,
        );
        let kyc_service = service::kyc_service::KycService::new(store.clone());

        Self {
            config: Arc::new(config),
            store,
            payment_service,
            settlement_service,
            kyc_service,
            webhook_dispatcher,
        }
    }
}
