//! The hazard table: drugs that are reported as dangerous without any further lookup.
//!
//! The table is loaded once at startup, either from `HAZARD_TABLE_PATH` or from the
//! bundled default, and shared read-only between requests.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_TABLE: &str = include_str!("../assets/hazard_table.json");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HazardRecord {
    pub reason: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

#[derive(Error, Debug)]
pub enum HazardTableError {
    #[error("failed to read hazard table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse hazard table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Lowercase drug name → hazard record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HazardTable {
    records: HashMap<String, HazardRecord>,
}

impl HazardTable {
    pub fn new<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, HazardRecord)>,
        S: AsRef<str>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(name, record)| (name.as_ref().trim().to_lowercase(), record))
                .collect(),
        }
    }

    pub fn builtin() -> Result<Self, HazardTableError> {
        Self::from_json_str(BUILTIN_TABLE)
    }

    pub fn from_json_str(json: &str) -> Result<Self, HazardTableError> {
        let records: HashMap<String, HazardRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HazardTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Exact match after lowercasing, no fuzzy matching.
    pub fn lookup(&self, name: &str) -> Option<&HazardRecord> {
        self.records.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_table_loads() {
        let table = HazardTable::builtin().unwrap();
        assert_eq!(table.len(), 17);

        let aspirin = table.lookup("aspirin").unwrap();
        assert!(aspirin.reason.contains("Reye"));
        assert_eq!(aspirin.alternatives, vec!["acetaminophen", "ibuprofen"]);

        assert!(table.lookup("lsd").unwrap().alternatives.is_empty());
    }

    #[test]
    fn lookup_ignores_case() {
        let table = HazardTable::builtin().unwrap();
        assert!(table.lookup("HeRoIn").is_some());
        assert!(table.lookup("Fentanyl").is_some());
        assert!(table.lookup("heroin ").is_none());
        assert!(table.lookup("hero").is_none());
    }

    #[test]
    fn keys_are_normalized_at_load() {
        let table = HazardTable::from_json_str(
            r#"{" Kratom ": {"reason": "Unregulated opioid-like effects."}}"#,
        )
        .unwrap();

        let record = table.lookup("kratom").unwrap();
        assert_eq!(record.reason, "Unregulated opioid-like effects.");
        assert!(record.alternatives.is_empty());
    }

    #[test]
    fn malformed_table_is_an_error() {
        assert!(matches!(
            HazardTable::from_json_str(r#"{"cocaine": "bad"}"#),
            Err(HazardTableError::Parse(_))
        ));
    }

    #[test]
    fn table_loads_from_path() {
        let path = std::env::temp_dir().join(format!("hazards-{}.json", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"heroin": {"reason": "Illicit opioid.", "alternatives": ["tramadol"]}}"#)
            .unwrap();

        let table = HazardTable::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("heroin").unwrap().alternatives, vec!["tramadol"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            HazardTable::from_path("/definitely/not/here.json"),
            Err(HazardTableError::Io(_))
        ));
    }
}
