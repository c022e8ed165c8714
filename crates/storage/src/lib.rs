//! Object-store backends for image blobs.
//!
//! Every backend implements [`BlobFetcher`] so the lookup can be wired to S3
//! in production, a local directory in development, or memory in tests.

use std::sync::Arc;

use actorstats_core::lookup::BlobFetcher;

pub mod config;
pub mod error;
pub mod local;
pub mod memory;
pub mod s3;

pub use config::{S3Config, StorageBackendKind, StorageConfig};
pub use error::StorageError;
pub use local::LocalBlobStore;
pub use memory::InMemoryBlobStore;
pub use s3::S3BlobStore;

/// Construct the backend described by `config`.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn BlobFetcher>, StorageError> {
    match config {
        StorageConfig::S3(s3) => {
            tracing::info!(region = %s3.region, endpoint = ?s3.endpoint_url, "Using S3 object store");
            Ok(Arc::new(S3BlobStore::new(s3).await))
        }
        StorageConfig::Local { root } => {
            if !root.is_dir() {
                return Err(StorageError::Configuration(format!(
                    "local storage root '{}' is not a directory",
                    root.display()
                )));
            }
            tracing::info!(root = %root.display(), "Using local object store");
            Ok(Arc::new(LocalBlobStore::new(root.clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use actorstats_core::record::ImageRef;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn connect_local_reads_from_root() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("faces")).unwrap();
        std::fs::write(dir.path().join("faces/a.jpg"), b"jpg").unwrap();

        let fetcher = connect(&StorageConfig::Local {
            root: dir.path().to_path_buf(),
        })
        .await
        .unwrap();

        let bytes = fetcher.get(&ImageRef::new("faces", "a.jpg")).await.unwrap();
        assert_eq!(bytes, b"jpg");
    }

    #[tokio::test]
    async fn connect_local_rejects_missing_root() {
        let dir = tempdir().unwrap();
        let result = connect(&StorageConfig::Local {
            root: dir.path().join("does-not-exist"),
        })
        .await;

        assert_matches!(result, Err(StorageError::Configuration(_)));
    }
}
