use std::collections::HashMap;

use actorstats_core::error::CoreError;
use actorstats_core::lookup::BlobFetcher;
use actorstats_core::record::ImageRef;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;

/// In-process object store. Used by tests and local demos.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<ImageRef, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for setting up fixtures.
    #[must_use]
    pub fn with_object(mut self, image: ImageRef, bytes: impl Into<Vec<u8>>) -> Self {
        self.objects.get_mut().insert(image, bytes.into());
        self
    }

    pub async fn put(&self, image: ImageRef, bytes: impl Into<Vec<u8>>) {
        self.objects.write().await.insert(image, bytes.into());
    }

    async fn read(&self, image: &ImageRef) -> Result<Vec<u8>, StorageError> {
        self.objects
            .read()
            .await
            .get(image)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(image.to_string()))
    }
}

#[async_trait]
impl BlobFetcher for InMemoryBlobStore {
    async fn get(&self, image: &ImageRef) -> Result<Vec<u8>, CoreError> {
        Ok(self.read(image).await?)
    }
}
