//! Dataset provenance: where each table came from and when it was loaded.
//! Served by the API so the explorer can show "data as of".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetEntry {
    /// URL or file path the document was read from.
    pub source: String,
    /// RFC 3339 timestamp of the load.
    pub loaded_at: String,
    pub records: usize,
}

impl DataSetEntry {
    pub fn now(source: impl Into<String>, records: usize) -> Self {
        DataSetEntry {
            source: source.into(),
            loaded_at: chrono::Utc::now().to_rfc3339(),
            records,
        }
    }
}

/// Dataset name -> provenance.
pub type Registry = BTreeMap<String, DataSetEntry>;
