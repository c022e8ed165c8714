//! Actor image lookup.
//!
//! Given an actor name, reads the query history for that name, fetches the
//! image referenced by the most recent record, and returns it base64-encoded
//! together with the total number of matching records.
//!
//! Every failure on the way (no record, datastore error, object-store error,
//! empty blob) ends in a [`LookupMiss`]. Callers that only care about the
//! external contract treat all variants the same; the variant is kept so the
//! cause can be logged.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::record::{ImageRef, NameHistory};

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Read access to the stored query history.
#[async_trait]
pub trait RequestHistory: Send + Sync {
    /// Most recent record for `name` (exact match) plus the total match count.
    ///
    /// Returns `Ok(None)` when nothing matches.
    async fn most_recent_by_name(&self, name: &str) -> Result<Option<NameHistory>, CoreError>;
}

/// Read access to object storage.
#[async_trait]
pub trait BlobFetcher: Send + Sync {
    async fn get(&self, image: &ImageRef) -> Result<Vec<u8>, CoreError>;
}

impl std::fmt::Debug for dyn BlobFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BlobFetcher")
    }
}

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// Inbound lookup body: `{ "name": "<actor name>" }`.
///
/// `name` is absent when the field is missing or `null`. Numbers and
/// booleans are accepted and kept as their JSON text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupRequest {
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(s) => s,
        Scalar::Signed(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    }))
}

/// A single base64-encoded image: `{ "data": "<base64>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBase64 {
    pub data: String,
}

impl ImageBase64 {
    /// Standard-alphabet, padded encoding of `bytes`.
    pub fn encode(bytes: &[u8]) -> Self {
        Self {
            data: STANDARD.encode(bytes),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, CoreError> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| CoreError::Validation(format!("invalid base64 image data: {e}")))
    }
}

/// Successful lookup payload.
///
/// `search_count` is the number of stored records for the name, not the
/// number of images (which is always one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    #[serde(rename = "searchCount")]
    pub search_count: i64,
    #[serde(rename = "imageBase64")]
    pub images: Vec<ImageBase64>,
}

/// Why a lookup produced no result.
#[derive(Debug, thiserror::Error)]
pub enum LookupMiss {
    #[error("no stored record")]
    NoRecord,

    #[error("history query failed: {0}")]
    History(#[source] CoreError),

    #[error("failed to fetch image {image}: {source}")]
    Blob {
        image: ImageRef,
        #[source]
        source: CoreError,
    },

    #[error("image {image} is empty")]
    EmptyBlob { image: ImageRef },
}

impl LookupMiss {
    /// Short machine-readable label for logs.
    pub fn reason(&self) -> &'static str {
        match self {
            LookupMiss::NoRecord => "no_record",
            LookupMiss::History(_) => "history_error",
            LookupMiss::Blob { .. } => "blob_error",
            LookupMiss::EmptyBlob { .. } => "empty_blob",
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Wires a [`RequestHistory`] and a [`BlobFetcher`] into the lookup flow.
///
/// Cheap to clone; both collaborators are shared.
#[derive(Clone)]
pub struct ImageLookup {
    history: Arc<dyn RequestHistory>,
    blobs: Arc<dyn BlobFetcher>,
}

impl ImageLookup {
    pub fn new(history: Arc<dyn RequestHistory>, blobs: Arc<dyn BlobFetcher>) -> Self {
        Self { history, blobs }
    }

    /// Look up the newest image stored for `name`.
    pub async fn lookup(&self, name: &str) -> Result<LookupResult, LookupMiss> {
        let history = self
            .history
            .most_recent_by_name(name)
            .await
            .map_err(LookupMiss::History)?
            .ok_or(LookupMiss::NoRecord)?;

        let image = history.latest.image_ref;
        let bytes = match self.blobs.get(&image).await {
            Ok(bytes) => bytes,
            Err(source) => return Err(LookupMiss::Blob { image, source }),
        };
        if bytes.is_empty() {
            return Err(LookupMiss::EmptyBlob { image });
        }

        tracing::debug!(
            actor = %name,
            search_count = history.search_count,
            image = %image,
            size = bytes.len(),
            "Image lookup hit",
        );

        Ok(LookupResult {
            search_count: history.search_count,
            images: vec![ImageBase64::encode(&bytes)],
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
