//! Object-store backend selection.

use std::path::PathBuf;

use crate::error::StorageError;

/// Default AWS region when `AWS_REGION` is unset.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default root directory for the `local` backend.
pub const DEFAULT_LOCAL_ROOT: &str = "./storage";

/// Backend kind, parsed from `STORAGE_BACKEND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    S3,
    Local,
}

impl StorageBackendKind {
    pub fn from_name(name: &str) -> Result<Self, StorageError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(Self::S3),
            "local" => Ok(Self::Local),
            other => Err(StorageError::Configuration(format!(
                "Unknown storage backend '{other}'. Must be one of: s3, local"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::Local => "local",
        }
    }
}

/// Settings for the S3 backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,
    /// Endpoint override for S3-compatible stores (MinIO, LocalStack).
    /// Path-style addressing is enabled whenever this is set.
    pub endpoint_url: Option<String>,
}

impl S3Config {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
        }
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

impl Default for S3Config {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

/// Which object store to read images from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    S3(S3Config),
    /// Objects live at `<root>/<bucket>/<key>`.
    Local { root: PathBuf },
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var              | Default       |
    /// |----------------------|---------------|
    /// | `STORAGE_BACKEND`    | `s3`          |
    /// | `AWS_REGION`         | `us-east-1`   |
    /// | `S3_ENDPOINT_URL`    | unset         |
    /// | `LOCAL_STORAGE_ROOT` | `./storage`   |
    pub fn from_env() -> Result<Self, StorageError> {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "s3".into());
        let kind = StorageBackendKind::from_name(&backend)?;

        Ok(match kind {
            StorageBackendKind::S3 => {
                let region = std::env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.into());
                let mut config = S3Config::new(region);
                if let Some(endpoint) = non_empty_env("S3_ENDPOINT_URL") {
                    config = config.with_endpoint_url(endpoint);
                }
                StorageConfig::S3(config)
            }
            StorageBackendKind::Local => StorageConfig::Local {
                root: non_empty_env("LOCAL_STORAGE_ROOT")
                    .unwrap_or_else(|| DEFAULT_LOCAL_ROOT.into())
                    .into(),
            },
        })
    }

    pub fn kind(&self) -> StorageBackendKind {
        match self {
            StorageConfig::S3(_) => StorageBackendKind::S3,
            StorageConfig::Local { .. } => StorageBackendKind::Local,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
