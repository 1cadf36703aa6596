use crate::error::{Error, Result};
use crate::types::JuzNumber;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Filename of the manifest inside the output directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Record of a generated archival page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub date: NaiveDate,
    pub word_count: usize,
}

/// Which juz pages exist in the output directory, keyed by juz number.
///
/// Serialized as a JSON object with string keys (`{"7": {...}}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<JuzNumber, ManifestEntry>,
}

impl Manifest {
    /// Load the manifest from `dir`, or an empty one if none exists yet
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::InvalidData(format!("Corrupt {}: {}", MANIFEST_FILE, e)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Insert or replace the entry for `juz`
    pub fn record(&mut self, juz: JuzNumber, entry: ManifestEntry) {
        self.entries.insert(juz, entry);
    }

    pub fn get(&self, juz: JuzNumber) -> Option<&ManifestEntry> {
        self.entries.get(&juz)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (JuzNumber, &ManifestEntry)> {
        self.entries.iter().map(|(juz, entry)| (*juz, entry))
    }
}
