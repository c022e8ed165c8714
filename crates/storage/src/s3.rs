//! Amazon S3 (and S3-compatible) object store.

use actorstats_core::error::CoreError;
use actorstats_core::lookup::BlobFetcher;
use actorstats_core::record::ImageRef;
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::{debug, warn};

use crate::config::S3Config;
use crate::error::StorageError;

/// Build an AWS SDK configuration from the standard credential chain.
///
/// When an endpoint override is configured the client switches to
/// path-style addressing, which MinIO and LocalStack require.
pub async fn build_client(config: &S3Config) -> aws_sdk_s3::Client {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom S3 endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}

/// Reads images from S3 buckets.
#[derive(Clone)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3BlobStore")
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3BlobStore {
    pub async fn new(config: &S3Config) -> Self {
        Self {
            client: build_client(config).await,
        }
    }

    /// Use a pre-built client.
    pub fn with_client(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Download the whole object at `image`.
    pub async fn get_object(&self, image: &ImageRef) -> Result<Vec<u8>, StorageError> {
        debug!(bucket = %image.bucket, key = %image.key, "downloading object from S3");

        let output = self
            .client
            .get_object()
            .bucket(&image.bucket)
            .key(&image.key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    return StorageError::NotFound(image.to_string());
                }
                let msg = DisplayErrorContext(&e).to_string();
                warn!(bucket = %image.bucket, key = %image.key, error = %msg, "S3 get_object failed");
                StorageError::Service(msg)
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Service(format!("failed to read S3 body: {e}")))?
            .into_bytes();

        debug!(bucket = %image.bucket, key = %image.key, size = bytes.len(), "S3 object downloaded");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl BlobFetcher for S3BlobStore {
    async fn get(&self, image: &ImageRef) -> Result<Vec<u8>, CoreError> {
        Ok(self.get_object(image).await?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_mocks::{mock, mock_client};

    use super::*;

    fn image() -> ImageRef {
        ImageRef::new("faces", "tom/portrait.jpg")
    }

    #[tokio::test]
    async fn get_object_collects_body() {
        let rule = mock!(aws_sdk_s3::Client::get_object)
            .match_requests(|req| {
                req.bucket() == Some("faces") && req.key() == Some("tom/portrait.jpg")
            })
            .then_output(|| {
                GetObjectOutput::builder()
                    .body(ByteStream::from_static(b"\x89PNG image bytes"))
                    .build()
            });
        let store = S3BlobStore::with_client(mock_client!(aws_sdk_s3, [&rule]));

        let bytes = store.get(&image()).await.unwrap();

        assert_eq!(bytes, b"\x89PNG image bytes");
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let rule = mock!(aws_sdk_s3::Client::get_object)
            .then_error(|| GetObjectError::NoSuchKey(NoSuchKey::builder().build()));
        let store = S3BlobStore::with_client(mock_client!(aws_sdk_s3, [&rule]));

        let result = store.get_object(&image()).await;

        assert_matches!(result, Err(StorageError::NotFound(key)) if key == "faces/tom/portrait.jpg");
    }

    #[tokio::test]
    async fn service_failure_is_service_error() {
        let rule = mock!(aws_sdk_s3::Client::get_object).then_error(|| {
            GetObjectError::generic(
                ErrorMetadata::builder()
                    .code("AccessDenied")
                    .message("Access Denied")
                    .build(),
            )
        });
        let store = S3BlobStore::with_client(mock_client!(aws_sdk_s3, [&rule]));

        let result = store.get_object(&image()).await;

        assert_matches!(result, Err(StorageError::Service(msg)) if msg.contains("AccessDenied"));
    }

    #[tokio::test]
    async fn service_failure_reaches_lookup_as_internal() {
        let rule = mock!(aws_sdk_s3::Client::get_object).then_error(|| {
            GetObjectError::generic(ErrorMetadata::builder().code("InvalidObjectState").build())
        });
        let store = S3BlobStore::with_client(mock_client!(aws_sdk_s3, [&rule]));

        assert_matches!(store.get(&image()).await, Err(CoreError::Internal(_)));
    }
}
