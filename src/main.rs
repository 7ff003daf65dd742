use paygate_admin::config::AppConfig;
use paygate_admin::http::routes::build_router;
use paygate_admin::processor::simulated::SimulatedProcessor;
use paygate_admin::repo::memory_store::MemoryStore;
use paygate_admin::repo::seed::seed_demo_data;
use paygate_admin::repo::store::Storage;
use paygate_admin::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    if cfg.seed_demo_data {
        seed_demo_data(store.as_ref()).await?;
    }

    let processor = Arc::new(SimulatedProcessor::random(cfg.simulated_success_rate));
    tracing::info!(
        success_rate = cfg.simulated_success_rate,
        settlement_delay_ms = cfg.settlement_delay.as_millis() as u64,
        webhook_delivery = ?cfg.webhook_delivery,
        "payment processor ready"
    );

    let bind_addr = cfg.bind_addr.clone();
    let app = build_router(AppState::new(cfg, store, processor));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
