use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::endpoint;
use crate::engine::DrugSafetyEngine;
use crate::metrics::setup_metrics_routes;

#[derive(Clone)]
pub struct State {
    pub engine: DrugSafetyEngine,
    pub max_drugs_per_request: usize,
}

async fn index() -> &'static str {
    "drug-safety"
}

pub fn router(engine: DrugSafetyEngine, config: &Config) -> Router {
    let state = State {
        engine,
        max_drugs_per_request: config.max_drugs_per_request,
    };

    let router = Router::new()
        .route("/", get(index))
        .route("/_readiness", get(index))
        .route("/_liveness", get(index)) // No background loops, axum answering is enough
        .route("/check", post(endpoint::check))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Installing a global recorder when used as a library (during tests etc)
    // does not work well.
    if config.export_prometheus {
        setup_metrics_routes(router)
    } else {
        router
    }
}
