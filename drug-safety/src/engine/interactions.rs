use std::collections::HashMap;
use std::time::Instant;

use common_rxnav::{DrugVocabulary, InteractionPair};
use tracing::{debug, warn};

use crate::metrics_consts::{INTERACTION_LOOKUP_FAILURES_COUNTER, INTERACTION_LOOKUP_TIME};

/// Renders a pair the way it appears in the report.
pub fn format_pair(pair: &InteractionPair) -> String {
    format!(
        "{} ↔ {}: {}",
        pair.source_name, pair.target_name, pair.description
    )
}

/// True when either side of the pair names the drug, ignoring case.
pub fn mentions(pair: &InteractionPair, drug: &str) -> bool {
    let drug = drug.to_lowercase();
    pair.source_name.to_lowercase() == drug || pair.target_name.to_lowercase() == drug
}

/// RxCUIs in first-seen order with repeats removed.
pub fn distinct_rxcuis<'a>(rxcuis: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for rxcui in rxcuis {
        if !distinct.iter().any(|seen| seen == rxcui) {
            distinct.push(rxcui.to_string());
        }
    }
    distinct
}

/// Asks RxNav for the interactions between the resolved drugs in one batched call.
///
/// Nothing is sent with fewer than two RxCUIs. A failed call yields no interactions
/// rather than failing the request.
pub async fn lookup_interactions(
    vocabulary: &(dyn DrugVocabulary + Send + Sync),
    rxcuis: &[String],
) -> Vec<InteractionPair> {
    if rxcuis.len() < 2 {
        debug!(rxcuis = rxcuis.len(), "skipping interaction lookup");
        return Vec::new();
    }

    let start = Instant::now();
    let result = vocabulary.interactions(rxcuis).await;
    metrics::histogram!(INTERACTION_LOOKUP_TIME).record(start.elapsed().as_millis() as f64);

    match result {
        Ok(pairs) => pairs,
        Err(e) => {
            warn!(rxcuis = ?rxcuis, reason = e.reason(), "interaction lookup failed: {}", e);
            metrics::counter!(INTERACTION_LOOKUP_FAILURES_COUNTER, "reason" => e.reason())
                .increment(1);
            Vec::new()
        }
    }
}

/// Maps each drug to the formatted pairs that mention it, in the order the pairs were
/// reported. A pair naming two of the drugs is attributed to both; drugs without any
/// pair map to an empty list.
pub fn attribute<'a>(
    pairs: &[InteractionPair],
    drugs: impl IntoIterator<Item = &'a str>,
) -> HashMap<String, Vec<String>> {
    drugs
        .into_iter()
        .map(|drug| {
            let lines = pairs
                .iter()
                .filter(|pair| mentions(pair, drug))
                .map(format_pair)
                .collect();
            (drug.to_string(), lines)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use common_rxnav::MockVocabulary;

    use super::*;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn pair_is_formatted_with_arrow() {
        let pair = InteractionPair::new("Ibuprofen", "Naproxen", "GI bleeding.");
        assert_eq!(format_pair(&pair), "Ibuprofen ↔ Naproxen: GI bleeding.");
    }

    #[test]
    fn repeated_rxcuis_are_dropped() {
        assert_eq!(
            distinct_rxcuis(["5640", "7258", "5640"]),
            vec!["5640", "7258"]
        );
    }

    #[tokio::test]
    async fn single_rxcui_skips_the_call() {
        let vocabulary = MockVocabulary::new()
            .with_interactions(vec![InteractionPair::new("a", "b", "never returned")]);

        let pairs = lookup_interactions(&vocabulary, &ids(&["5640"])).await;

        assert!(pairs.is_empty());
        assert!(vocabulary.interaction_requests().await.is_empty());
    }

    #[tokio::test]
    async fn all_rxcuis_go_in_one_call() {
        let vocabulary = MockVocabulary::new();

        lookup_interactions(&vocabulary, &ids(&["5640", "7258", "11289"])).await;

        assert_eq!(
            vocabulary.interaction_requests().await,
            vec![ids(&["5640", "7258", "11289"])]
        );
    }

    #[tokio::test]
    async fn failed_lookup_yields_no_interactions() {
        let vocabulary = MockVocabulary::new().with_failing_interactions();

        let pairs = lookup_interactions(&vocabulary, &ids(&["5640", "7258"])).await;

        assert!(pairs.is_empty());
    }

    #[test]
    fn pairs_are_attributed_to_both_sides_ignoring_case() {
        let pairs = vec![
            InteractionPair::new("Ibuprofen", "Naproxen", "GI bleeding."),
            InteractionPair::new("Naproxen", "Warfarin", "Bleeding risk."),
            InteractionPair::new("Lithium", "Enalapril", "Not in this batch."),
        ];

        let attributed = attribute(&pairs, ["ibuprofen", "naproxen", "metformin"]);

        assert_eq!(
            attributed["ibuprofen"],
            vec!["Ibuprofen ↔ Naproxen: GI bleeding."]
        );
        assert_eq!(
            attributed["naproxen"],
            vec![
                "Ibuprofen ↔ Naproxen: GI bleeding.",
                "Naproxen ↔ Warfarin: Bleeding risk."
            ]
        );
        assert!(attributed["metformin"].is_empty());
    }

    #[test]
    fn partial_name_does_not_match() {
        let pair = InteractionPair::new("aspirin", "warfarin", "Bleeding.");
        assert!(!mentions(&pair, "aspir"));
        assert!(mentions(&pair, "WARFARIN"));
    }
}
