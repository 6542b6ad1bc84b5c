//! The drug check pipeline.
//!
//! A request flows through four steps:
//! 1. [`classify`]: drugs listed in the hazard table get a final "dangerous" entry.
//! 2. [`resolve`]: the remaining drugs are mapped to RxCUIs; failures get a final
//!    "unknown" entry.
//! 3. [`interactions`]: one batched lookup for all resolved RxCUIs, attributed back to
//!    the drugs by name.
//! 4. [`report`]: one entry per resolved drug, from its attributed interactions and the
//!    patient's age.
//!
//! Every input drug yields exactly one entry. Entries are ordered hazardous first,
//! then unresolved, then resolved, each group in input order.

use std::sync::Arc;

use common_rxnav::DrugVocabulary;
use tracing::instrument;

use crate::hazards::HazardTable;

pub mod classify;
pub mod interactions;
pub mod report;
pub mod resolve;

use classify::{classify, Classification};
use interactions::{attribute, distinct_rxcuis, lookup_interactions};
use report::ReportEntry;
use resolve::{resolve_all, ResolvedIdentifier};

pub const DEFAULT_RESOLUTION_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Hazardous,
    Unresolved,
    Resolved,
}

/// Drug names are compared, looked up and reported in this form.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Clone)]
pub struct DrugSafetyEngine {
    hazards: Arc<HazardTable>,
    vocabulary: Arc<dyn DrugVocabulary + Send + Sync>,
    resolution_concurrency: usize,
}

impl DrugSafetyEngine {
    pub fn new(
        hazards: Arc<HazardTable>,
        vocabulary: Arc<dyn DrugVocabulary + Send + Sync>,
    ) -> Self {
        Self {
            hazards,
            vocabulary,
            resolution_concurrency: DEFAULT_RESOLUTION_CONCURRENCY,
        }
    }

    pub fn with_resolution_concurrency(mut self, concurrency: usize) -> Self {
        self.resolution_concurrency = concurrency.max(1);
        self
    }

    /// Builds the safety report for `drugs` taken by a patient of the given age.
    /// External failures degrade single entries, they never fail the whole check.
    #[instrument(skip_all, fields(drugs = drugs.len(), age = age))]
    pub async fn check(&self, drugs: &[String], age: i64) -> Vec<ReportEntry> {
        let drugs: Vec<String> = drugs.iter().map(|drug| normalize_name(drug)).collect();

        let Classification {
            flagged,
            unclassified,
        } = classify(&self.hazards, &drugs);

        let mut entries: Vec<(Phase, usize, ReportEntry)> = flagged
            .into_iter()
            .map(|(index, entry)| (Phase::Hazardous, index, entry))
            .collect();

        let resolutions = resolve_all(
            self.vocabulary.as_ref(),
            unclassified,
            self.resolution_concurrency,
        )
        .await;

        let mut resolved: Vec<(usize, String, String)> = Vec::with_capacity(resolutions.len());
        for ResolvedIdentifier { index, name, rxcui } in resolutions {
            match rxcui {
                Ok(rxcui) => resolved.push((index, name, rxcui)),
                Err(_) => entries.push((Phase::Unresolved, index, ReportEntry::unresolved(name))),
            }
        }

        let rxcuis = distinct_rxcuis(resolved.iter().map(|(_, _, rxcui)| rxcui.as_str()));
        let pairs = lookup_interactions(self.vocabulary.as_ref(), &rxcuis).await;
        let attributed = attribute(&pairs, resolved.iter().map(|(_, name, _)| name.as_str()));

        for (index, name, _) in resolved {
            let lines = attributed.get(&name).cloned().unwrap_or_default();
            entries.push((Phase::Resolved, index, ReportEntry::assessed(name, lines, age)));
        }

        merge(entries)
    }
}

/// Orders entries by phase, then by input index.
fn merge(mut entries: Vec<(Phase, usize, ReportEntry)>) -> Vec<ReportEntry> {
    entries.sort_by_key(|(phase, index, _)| (*phase, *index));
    entries.into_iter().map(|(_, _, entry)| entry).collect()
}
