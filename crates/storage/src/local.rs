//! Filesystem-backed object store for development.

use std::path::{Component, Path, PathBuf};

use actorstats_core::error::CoreError;
use actorstats_core::lookup::BlobFetcher;
use actorstats_core::record::ImageRef;
use async_trait::async_trait;

use crate::error::StorageError;

/// Serves objects from `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `image` to a path under the root.
    ///
    /// Bucket and key must be relative paths made only of normal components.
    pub fn object_path(&self, image: &ImageRef) -> Result<PathBuf, StorageError> {
        check_relative(&image.bucket)?;
        check_relative(&image.key)?;
        Ok(self.root.join(&image.bucket).join(&image.key))
    }

    pub async fn read(&self, image: &ImageRef) -> Result<Vec<u8>, StorageError> {
        let path = self.object_path(image)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(image.to_string()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

fn check_relative(part: &str) -> Result<(), StorageError> {
    let path = Path::new(part);
    let ok = !part.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)));
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidPath(part.to_string()))
    }
}

#[async_trait]
impl BlobFetcher for LocalBlobStore {
    async fn get(&self, image: &ImageRef) -> Result<Vec<u8>, CoreError> {
        Ok(self.read(image).await?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    use super::*;

    fn put_file(root: &Path, relative: &str, bytes: &[u8]) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[tokio::test]
    async fn reads_nested_key_under_bucket() {
        let dir = tempdir().unwrap();
        put_file(dir.path(), "faces/2024/tom.jpg", b"\xff\xd8\xff\xe0jpeg");
        let store = LocalBlobStore::new(dir.path());

        let bytes = store.read(&ImageRef::new("faces", "2024/tom.jpg")).await.unwrap();
        assert_eq!(bytes, b"\xff\xd8\xff\xe0jpeg");
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        let err = store.read(&ImageRef::new("faces", "nope.jpg")).await.unwrap_err();
        assert_matches!(err, StorageError::NotFound(key) if key == "faces/nope.jpg");
    }

    #[tokio::test]
    async fn rejects_paths_escaping_root() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        for image in [
            ImageRef::new("faces", "../secret"),
            ImageRef::new("..", "secret"),
            ImageRef::new("faces", "/etc/passwd"),
            ImageRef::new("", "a.jpg"),
            ImageRef::new("faces", ""),
        ] {
            assert_matches!(store.read(&image).await, Err(StorageError::InvalidPath(_)));
        }
    }

    #[tokio::test]
    async fn empty_file_is_returned_as_empty() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        let image = ImageRef::new("faces", "empty.jpg");
        put_file(dir.path(), "faces/empty.jpg", b"");

        assert!(store.get(&image).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blob_fetcher_maps_missing_to_core_not_found() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        let err = store.get(&ImageRef::new("faces", "nope.jpg")).await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { .. });
    }
}
