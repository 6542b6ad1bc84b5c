pub mod api;
pub mod config;
pub mod endpoint;
pub mod engine;
pub mod hazards;
pub mod metrics;
pub mod metrics_consts;
pub mod router;
pub mod server;
