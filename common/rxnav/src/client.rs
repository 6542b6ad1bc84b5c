use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::types::{InteractionListResponse, RxcuiResponse};
use crate::{DrugVocabulary, InteractionPair, RxNavError};

pub const DEFAULT_BASE_URL: &str = "https://rxnav.nlm.nih.gov/REST";

/// HTTP client for the RxNav REST API. Cheap to clone, the underlying connection pool
/// is shared.
#[derive(Clone)]
pub struct RxNavClient {
    client: reqwest::Client,
    base_url: String,
}

impl RxNavClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RxNavError> {
        // Validate early so a typo in the configuration fails at startup, not per request.
        Url::parse(base_url)?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent("drug-safety rxnav client")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// `GET {base}/rxcui.json?name={name}`
    pub fn rxcui_request(&self, name: &str) -> Result<reqwest::Request, RxNavError> {
        Ok(self
            .client
            .get(format!("{}/rxcui.json", self.base_url))
            .query(&[("name", name)])
            .build()?)
    }

    /// `GET {base}/interaction/list.json?rxcuis={a}+{b}+...`
    pub fn interaction_request(&self, rxcuis: &[String]) -> Result<reqwest::Request, RxNavError> {
        Ok(self
            .client
            .get(format!("{}/interaction/list.json", self.base_url))
            .query(&[("rxcuis", rxcuis.join(" "))])
            .build()?)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T, RxNavError> {
        debug!(url = %request.url(), "calling rxnav");

        let response = self.client.execute(request).await?.error_for_status()?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| RxNavError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl DrugVocabulary for RxNavClient {
    async fn find_rxcuis(&self, name: &str) -> Result<Vec<String>, RxNavError> {
        let request = self.rxcui_request(name)?;
        let response: RxcuiResponse = self.fetch(request).await?;

        Ok(response.into_rxcuis())
    }

    async fn interactions(&self, rxcuis: &[String]) -> Result<Vec<InteractionPair>, RxNavError> {
        let request = self.interaction_request(rxcuis)?;
        let response: InteractionListResponse = self.fetch(request).await?;

        response.into_pairs()
    }
}
