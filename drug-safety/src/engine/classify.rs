use tracing::debug;

use crate::hazards::HazardTable;
use crate::metrics_consts::HAZARD_HITS_COUNTER;

use super::report::ReportEntry;

/// Input drugs split by whether the hazard table lists them. Each side keeps the
/// input index of its drugs.
#[derive(Debug, Default)]
pub struct Classification {
    pub flagged: Vec<(usize, ReportEntry)>,
    pub unclassified: Vec<(usize, String)>,
}

pub fn classify(hazards: &HazardTable, drugs: &[String]) -> Classification {
    let mut classification = Classification::default();

    for (index, drug) in drugs.iter().enumerate() {
        match hazards.lookup(drug) {
            Some(record) => {
                debug!(drug = %drug, "drug is listed in the hazard table");
                metrics::counter!(HAZARD_HITS_COUNTER).increment(1);
                classification
                    .flagged
                    .push((index, ReportEntry::hazardous(drug.clone(), record)));
            }
            None => classification.unclassified.push((index, drug.clone())),
        }
    }

    classification
}
