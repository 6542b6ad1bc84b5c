//! Client for the NLM RxNav REST API.
//!
//! Two lookups are exposed behind the [`DrugVocabulary`] trait: resolving a free-text
//! drug name to RxNorm concept identifiers (RxCUIs), and listing the pairwise
//! interactions reported for a set of RxCUIs. Callers hold the trait object so the
//! real client can be swapped for [`MockVocabulary`] in tests.

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::{RxNavClient, DEFAULT_BASE_URL};
pub use error::RxNavError;
pub use mock::MockVocabulary;
pub use types::InteractionPair;

#[async_trait]
pub trait DrugVocabulary {
    /// Candidate RxCUIs for a drug name, in the order the service returned them.
    /// An unknown name is `Ok` with an empty list.
    async fn find_rxcuis(&self, name: &str) -> Result<Vec<String>, RxNavError>;

    /// Interactions reported between any of the given RxCUIs, flattened into pairs.
    async fn interactions(&self, rxcuis: &[String]) -> Result<Vec<InteractionPair>, RxNavError>;
}
