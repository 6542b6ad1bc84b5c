pub const CHECK_REQUESTS_COUNTER: &str = "drug_check_requests_total";
pub const CHECKED_DRUGS_COUNTER: &str = "drug_check_drugs_total";
pub const HAZARD_HITS_COUNTER: &str = "drug_check_hazard_hits_total";
pub const RESOLUTION_FAILURES_COUNTER: &str = "drug_check_resolution_failures_total";
pub const INTERACTION_LOOKUP_FAILURES_COUNTER: &str = "drug_check_interaction_lookup_failures_total";

// Milliseconds spent in the batched RxNav interaction call
pub const INTERACTION_LOOKUP_TIME: &str = "drug_check_interaction_lookup_time";
