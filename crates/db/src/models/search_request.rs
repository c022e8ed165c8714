//! Models for the `requests` table.

use actorstats_core::record::{ImageRef, StoredRecord};
use actorstats_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `requests` table.
#[derive(Debug, Clone, FromRow)]
pub struct SearchRequest {
    pub id: DbId,
    pub name: String,
    pub query_timestamp: Timestamp,
    pub image_bucket: String,
    pub image_key: String,
    pub created_at: Timestamp,
}

impl SearchRequest {
    /// Drop the storage-only columns and keep the domain record.
    pub fn into_record(self) -> StoredRecord {
        StoredRecord {
            name: self.name,
            query_timestamp: self.query_timestamp,
            image_ref: ImageRef {
                bucket: self.image_bucket,
                key: self.image_key,
            },
        }
    }
}

/// DTO for recording a new search request.
#[derive(Debug, Clone)]
pub struct CreateSearchRequest {
    pub name: String,
    pub query_timestamp: Timestamp,
    pub image_bucket: String,
    pub image_key: String,
}

impl From<&StoredRecord> for CreateSearchRequest {
    fn from(record: &StoredRecord) -> Self {
        Self {
            name: record.name.clone(),
            query_timestamp: record.query_timestamp,
            image_bucket: record.image_ref.bucket.clone(),
            image_key: record.image_ref.key.clone(),
        }
    }
}
