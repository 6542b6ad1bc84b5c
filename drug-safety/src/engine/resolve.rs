use common_rxnav::{DrugVocabulary, RxNavError};
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::warn;

use crate::metrics_consts::RESOLUTION_FAILURES_COUNTER;

#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("drug name is empty")]
    EmptyName,
    #[error("no RxCUI found")]
    NotFound,
    #[error(transparent)]
    Lookup(#[from] RxNavError),
}

impl ResolutionError {
    pub fn reason(&self) -> &'static str {
        match self {
            ResolutionError::EmptyName => "empty_name",
            ResolutionError::NotFound => "not_found",
            ResolutionError::Lookup(e) => e.reason(),
        }
    }
}

/// The outcome of resolving one input drug to an RxCUI.
#[derive(Debug)]
pub struct ResolvedIdentifier {
    pub index: usize,
    pub name: String,
    pub rxcui: Result<String, ResolutionError>,
}

/// Resolves a single name, taking the first candidate RxNav returns.
pub async fn resolve_rxcui(
    vocabulary: &(dyn DrugVocabulary + Send + Sync),
    name: &str,
) -> Result<String, ResolutionError> {
    if name.is_empty() {
        return Err(ResolutionError::EmptyName);
    }

    vocabulary
        .find_rxcuis(name)
        .await?
        .into_iter()
        .next()
        .ok_or(ResolutionError::NotFound)
}

/// Resolves every drug, running up to `concurrency` lookups at once. The output keeps
/// the order of `drugs` whatever order the lookups complete in, and a failed lookup only
/// affects its own drug.
pub async fn resolve_all(
    vocabulary: &(dyn DrugVocabulary + Send + Sync),
    drugs: Vec<(usize, String)>,
    concurrency: usize,
) -> Vec<ResolvedIdentifier> {
    stream::iter(drugs)
        .map(|(index, name)| async move {
            let rxcui = resolve_rxcui(vocabulary, &name).await;

            if let Err(e) = &rxcui {
                warn!(drug = %name, reason = e.reason(), "could not resolve drug: {}", e);
                metrics::counter!(RESOLUTION_FAILURES_COUNTER, "reason" => e.reason())
                    .increment(1);
            }

            ResolvedIdentifier { index, name, rxcui }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}
