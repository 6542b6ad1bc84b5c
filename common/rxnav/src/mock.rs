use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{DrugVocabulary, InteractionPair, RxNavError};

/// In-memory [`DrugVocabulary`] with canned answers, for tests.
///
/// Names without a canned answer resolve to no RxCUI. Every call is recorded so tests
/// can assert what would have been sent to RxNav.
#[derive(Clone, Default)]
pub struct MockVocabulary {
    rxcuis: HashMap<String, Vec<String>>,
    failing_names: HashSet<String>,
    interactions: Vec<InteractionPair>,
    failing_interactions: bool,
    lookups: Arc<Mutex<Vec<String>>>,
    interaction_requests: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockVocabulary {
    pub fn new() -> MockVocabulary {
        MockVocabulary::default()
    }

    pub fn with_rxcui(self, name: &str, rxcui: &str) -> Self {
        self.with_rxcuis(name, &[rxcui])
    }

    pub fn with_rxcuis(mut self, name: &str, rxcuis: &[&str]) -> Self {
        self.rxcuis.insert(
            name.to_string(),
            rxcuis.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn with_failing_lookup(mut self, name: &str) -> Self {
        self.failing_names.insert(name.to_string());
        self
    }

    pub fn with_interactions(mut self, pairs: Vec<InteractionPair>) -> Self {
        self.interactions = pairs;
        self
    }

    pub fn with_failing_interactions(mut self) -> Self {
        self.failing_interactions = true;
        self
    }

    /// Names passed to `find_rxcuis`, in call order.
    pub async fn lookups(&self) -> Vec<String> {
        self.lookups.lock().await.clone()
    }

    /// RxCUI sets passed to `interactions`, in call order.
    pub async fn interaction_requests(&self) -> Vec<Vec<String>> {
        self.interaction_requests.lock().await.clone()
    }
}

#[async_trait]
impl DrugVocabulary for MockVocabulary {
    async fn find_rxcuis(&self, name: &str) -> Result<Vec<String>, RxNavError> {
        self.lookups.lock().await.push(name.to_string());

        if self.failing_names.contains(name) {
            return Err(RxNavError::Malformed(format!("mock lookup failure for {name}")));
        }

        Ok(self.rxcuis.get(name).cloned().unwrap_or_default())
    }

    async fn interactions(&self, rxcuis: &[String]) -> Result<Vec<InteractionPair>, RxNavError> {
        self.interaction_requests.lock().await.push(rxcuis.to_vec());

        if self.failing_interactions {
            return Err(RxNavError::Malformed("mock interaction failure".to_string()));
        }

        Ok(self.interactions.clone())
    }
}
