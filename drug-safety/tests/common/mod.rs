use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use drug_safety::config::Config;
use drug_safety::server::serve;

pub use drug_safety::config::DEFAULT_TEST_CONFIG;

pub struct ServerHandle {
    pub addr: SocketAddr,
    shutdown: Arc<Notify>,
}

impl ServerHandle {
    pub async fn for_config(config: Config) -> ServerHandle {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let notify = Arc::new(Notify::new());
        let shutdown = notify.clone();

        tokio::spawn(async move {
            serve(config, listener, async move { notify.notified().await }).await
        });
        ServerHandle { addr, shutdown }
    }

    pub async fn send_check_request<T: Into<reqwest::Body>>(&self, body: T) -> reqwest::Response {
        let client = reqwest::Client::new();
        client
            .post(format!("http://{:?}/check", self.addr))
            .body(body)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .expect("failed to send request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("http://{:?}{}", self.addr, path))
            .send()
            .await
            .expect("failed to send request")
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.shutdown.notify_one()
    }
}

/// Test config pointing RxNav calls at a mock server.
pub fn config_for_rxnav(rxnav_base_url: String) -> Config {
    let mut config = DEFAULT_TEST_CONFIG.clone();
    config.rxnav_base_url = rxnav_base_url;
    config
}

/// Writes a hazard table to a fresh temp file and returns its path.
pub fn write_hazard_table(json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hazard-table-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, json).expect("failed to write hazard table");
    path
}
