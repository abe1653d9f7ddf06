//! Reference pose store.

use formcheck_core::{Error, Result};
use parking_lot::RwLock;
use std::path::Path;

use crate::record::{PoseQuery, ReferencePoseRecord};

/// Keyed lookup of reference pose records
///
/// When several records match, implementations return the first one.
pub trait ReferenceStore: Send + Sync {
    fn find(&self, query: &PoseQuery) -> Option<ReferencePoseRecord>;
}

/// Records held in memory, in insertion order
#[derive(Debug, Default)]
pub struct InMemoryReferenceStore {
    records: RwLock<Vec<ReferencePoseRecord>>,
}

impl InMemoryReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = ReferencePoseRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Load a JSON array of records
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read reference catalog {}: {}", path.display(), e))
        })?;
        let records: Vec<ReferencePoseRecord> = serde_json::from_str(&content)?;

        tracing::info!(
            "Loaded {} reference pose records from {}",
            records.len(),
            path.display()
        );

        Ok(Self::from_records(records))
    }

    /// Register a record; it is found after every record inserted before it
    pub fn insert(&self, record: ReferencePoseRecord) {
        if !record.has_known_category() {
            tracing::warn!("Reference pose {} uses an unlisted category", record);
        }
        let mut records = self.records.write();
        records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl ReferenceStore for InMemoryReferenceStore {
    fn find(&self, query: &PoseQuery) -> Option<ReferencePoseRecord> {
        let records = self.records.read();
        records.iter().find(|record| record.matches(query)).cloned()
    }
}
