use serde::Deserialize;

use crate::RxNavError;

pub const NO_DESCRIPTION: &str = "No description available.";

/// One reported interaction between two drug concepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionPair {
    pub source_name: String,
    pub target_name: String,
    pub description: String,
}

impl InteractionPair {
    pub fn new(
        source_name: impl Into<String>,
        target_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            target_name: target_name.into(),
            description: description.into(),
        }
    }
}

/// Body of `GET /rxcui.json?name=...`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RxcuiResponse {
    #[serde(default)]
    pub id_group: Option<IdGroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdGroup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rxnorm_id: Option<Vec<String>>,
}

impl RxcuiResponse {
    pub fn into_rxcuis(self) -> Vec<String> {
        self.id_group
            .and_then(|group| group.rxnorm_id)
            .unwrap_or_default()
    }
}

/// Body of `GET /interaction/list.json?rxcuis=...`.
///
/// The payload nests groups (one per source database) of interaction types, and each
/// type holds the two concepts it relates plus the individual interaction pairs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionListResponse {
    #[serde(default)]
    pub full_interaction_type_group: Option<Vec<InteractionTypeGroup>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionTypeGroup {
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub full_interaction_type: Option<Vec<FullInteractionType>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullInteractionType {
    #[serde(default)]
    pub min_concept: Option<Vec<MinConcept>>,
    #[serde(default)]
    pub interaction_pair: Option<Vec<WireInteractionPair>>,
}

#[derive(Debug, Deserialize)]
pub struct MinConcept {
    #[serde(default)]
    pub rxcui: Option<String>,
    pub name: String,
    #[serde(default)]
    pub tty: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireInteractionPair {
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl InteractionListResponse {
    /// Flattens groups → types → pairs, in payload order. Source and target names are
    /// taken from the first two concepts of the enclosing type; a type that carries
    /// pairs but fewer than two concepts makes the whole payload malformed.
    pub fn into_pairs(self) -> Result<Vec<InteractionPair>, RxNavError> {
        let mut pairs = Vec::new();

        for group in self.full_interaction_type_group.unwrap_or_default() {
            for interaction_type in group.full_interaction_type.unwrap_or_default() {
                let wire_pairs = interaction_type.interaction_pair.unwrap_or_default();
                if wire_pairs.is_empty() {
                    continue;
                }

                let concepts = interaction_type.min_concept.unwrap_or_default();
                let (source, target) = match concepts.as_slice() {
                    [source, target, ..] => (&source.name, &target.name),
                    _ => {
                        return Err(RxNavError::Malformed(format!(
                            "interaction type carries {} concepts, expected at least two",
                            concepts.len()
                        )))
                    }
                };

                for pair in wire_pairs {
                    pairs.push(InteractionPair::new(
                        source,
                        target,
                        pair.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                    ));
                }
            }
        }

        Ok(pairs)
    }
}
