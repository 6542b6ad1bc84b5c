use std::future::Future;
use std::sync::Arc;

use common_rxnav::RxNavClient;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::engine::DrugSafetyEngine;
use crate::hazards::HazardTable;
use crate::router;

pub async fn serve<F>(config: Config, listener: TcpListener, shutdown: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let hazards = match &config.hazard_table_path {
        Some(path) => HazardTable::from_path(path),
        None => HazardTable::builtin(),
    };
    let hazards = match hazards {
        Ok(table) => Arc::new(table),
        Err(e) => {
            tracing::error!(
                "Failed to load hazard table from {:?}: {}",
                config.hazard_table_path,
                e
            );
            return;
        }
    };
    tracing::info!(entries = hazards.len(), "loaded hazard table");

    let rxnav = match RxNavClient::new(&config.rxnav_base_url, config.rxnav_timeout_ms.0) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(
                "Failed to create RxNav client for {}: {}",
                config.rxnav_base_url,
                e
            );
            return;
        }
    };

    let engine = DrugSafetyEngine::new(hazards, Arc::new(rxnav))
        .with_resolution_concurrency(config.resolution_concurrency);

    let app = router::router(engine, &config);

    match listener.local_addr() {
        Ok(addr) => tracing::info!("listening on {:?}", addr),
        Err(e) => tracing::warn!("listening on an unknown address: {}", e),
    }

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!("server exited with an error: {}", e);
    }
}
