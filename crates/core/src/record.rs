//! Stored query events and the image location they reference.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// A `(bucket, key)` pair identifying a blob in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    pub bucket: String,
    pub key: String,
}

impl ImageRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// One historical query for an actor. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub name: String,
    pub query_timestamp: Timestamp,
    pub image_ref: ImageRef,
}

/// Everything the lookup needs from the datastore for one name: the newest
/// record and how many records matched in total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameHistory {
    pub search_count: i64,
    pub latest: StoredRecord,
}

impl NameHistory {
    /// Build from records already sorted newest first.
    ///
    /// Returns `None` for an empty list. Only the first record is kept.
    pub fn from_newest_first(records: Vec<StoredRecord>) -> Option<Self> {
        let search_count = records.len() as i64;
        records.into_iter().next().map(|latest| Self {
            search_count,
            latest,
        })
    }
}
