use serde::{Serialize, Serializer};

use crate::hazards::HazardRecord;

/// Patients at or below this age get a pediatric check instead of a low risk label.
pub const PEDIATRIC_AGE_THRESHOLD: i64 = 12;

/// Suggested when no interaction was found for a drug.
pub const SAFE_DEFAULT_ALTERNATIVES: [&str; 3] = ["paracetamol", "ibuprofen", "acetaminophen"];

pub const REASON_INTERACTIONS_FOUND: &str = "Interactions found";
pub const REASON_SAFE_FOR_AGE: &str = "Safe drug for age";
pub const REASON_UNRESOLVED: &str = "Could not identify drug in RxNorm";

/// The `interactions` field of a report entry: either the attributed interaction lines
/// or a fixed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interactions {
    Found(Vec<String>),
    None,
    Prohibited,
    Unknown,
}

impl Serialize for Interactions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Interactions::Found(lines) => lines.serialize(serializer),
            Interactions::None => serializer.serialize_str("None"),
            Interactions::Prohibited => serializer.serialize_str("Prohibited / Dangerous"),
            Interactions::Unknown => serializer.serialize_str("Unknown (RxCUI not found)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeRisk {
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Needs pediatric check")]
    NeedsPediatricCheck,
    #[serde(rename = "Severe Risk")]
    Severe,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl AgeRisk {
    pub fn for_age(age: i64) -> AgeRisk {
        if age > PEDIATRIC_AGE_THRESHOLD {
            AgeRisk::Low
        } else {
            AgeRisk::NeedsPediatricCheck
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrganRisk {
    #[serde(rename = "None")]
    None,
    #[serde(rename = "High toxicity")]
    HighToxicity,
    #[serde(rename = "Unknown")]
    Unknown,
}

/// One line of the safety report, one per input drug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub drug: String,
    pub interactions: Interactions,
    pub age_risk: AgeRisk,
    #[serde(rename = "organ_risks")]
    pub organ_risk: OrganRisk,
    pub reason: String,
    pub alternatives: Vec<String>,
}

impl ReportEntry {
    /// Entry for a drug listed in the hazard table. Age and interactions are not considered.
    pub fn hazardous(drug: String, record: &HazardRecord) -> Self {
        Self {
            drug,
            interactions: Interactions::Prohibited,
            age_risk: AgeRisk::Severe,
            organ_risk: OrganRisk::HighToxicity,
            reason: record.reason.clone(),
            alternatives: record.alternatives.clone(),
        }
    }

    /// Entry for a drug RxNav could not identify.
    pub fn unresolved(drug: String) -> Self {
        Self {
            drug,
            interactions: Interactions::Unknown,
            age_risk: AgeRisk::Unknown,
            organ_risk: OrganRisk::Unknown,
            reason: REASON_UNRESOLVED.to_string(),
            alternatives: Vec::new(),
        }
    }

    /// Entry for a resolved drug, given the interaction lines attributed to it.
    pub fn assessed(drug: String, interactions: Vec<String>, age: i64) -> Self {
        let (interactions, reason, alternatives) = if interactions.is_empty() {
            (
                Interactions::None,
                REASON_SAFE_FOR_AGE,
                SAFE_DEFAULT_ALTERNATIVES
                    .iter()
                    .map(|alt| alt.to_string())
                    .collect(),
            )
        } else {
            (
                Interactions::Found(interactions),
                REASON_INTERACTIONS_FOUND,
                Vec::new(),
            )
        };

        Self {
            drug,
            interactions,
            age_risk: AgeRisk::for_age(age),
            organ_risk: OrganRisk::None,
            reason: reason.to_string(),
            alternatives,
        }
    }
}
