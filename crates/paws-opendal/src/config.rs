//! Storage configuration types.

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Public base URL used by the in-memory backend when none is configured.
pub const DEFAULT_MEMORY_PUBLIC_BASE_URL: &str = "http://localhost/media";

/// Which storage service backs the operator.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Amazon S3 or an S3-compatible service.
    #[default]
    #[display("s3")]
    S3,
    /// Process-local memory, for tests and local development.
    #[display("memory")]
    Memory,
}

/// Object storage configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct StorageConfig {
    /// Storage backend
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-backend", env = "STORAGE_BACKEND", value_enum, default_value_t = BackendType::S3)
    )]
    pub storage_backend: BackendType,

    /// Bucket name (required for s3)
    #[cfg_attr(feature = "config", arg(long = "storage-bucket", env = "STORAGE_BUCKET"))]
    pub storage_bucket: Option<String>,

    /// Bucket region (required for s3)
    #[cfg_attr(feature = "config", arg(long = "storage-region", env = "STORAGE_REGION"))]
    pub storage_region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[cfg_attr(feature = "config", arg(long = "storage-endpoint", env = "STORAGE_ENDPOINT"))]
    pub storage_endpoint: Option<String>,

    /// Access key id (required for s3)
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-access-key-id", env = "STORAGE_ACCESS_KEY_ID")
    )]
    pub storage_access_key_id: Option<String>,

    /// Secret access key (required for s3)
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-secret-access-key", env = "STORAGE_SECRET_ACCESS_KEY")
    )]
    pub storage_secret_access_key: Option<String>,

    /// Base URL under which stored objects are publicly reachable (required for s3)
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-public-base-url", env = "STORAGE_PUBLIC_BASE_URL")
    )]
    pub storage_public_base_url: Option<String>,
}

impl StorageConfig {
    /// Creates a configuration for an S3 bucket.
    pub fn s3(
        bucket: impl Into<String>,
        region: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            storage_backend: BackendType::S3,
            storage_bucket: Some(bucket.into()),
            storage_region: Some(region.into()),
            storage_endpoint: None,
            storage_access_key_id: None,
            storage_secret_access_key: None,
            storage_public_base_url: Some(public_base_url.into()),
        }
    }

    /// Creates a configuration for the in-memory backend.
    pub fn memory() -> Self {
        Self {
            storage_backend: BackendType::Memory,
            storage_bucket: None,
            storage_region: None,
            storage_endpoint: None,
            storage_access_key_id: None,
            storage_secret_access_key: None,
            storage_public_base_url: None,
        }
    }

    /// Sets the endpoint for S3-compatible services.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.storage_endpoint = Some(endpoint.into());
        self
    }

    /// Sets the access credentials.
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.storage_access_key_id = Some(access_key_id.into());
        self.storage_secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Returns the public base URL without a trailing slash.
    pub fn public_base_url(&self) -> &str {
        self.storage_public_base_url
            .as_deref()
            .unwrap_or(DEFAULT_MEMORY_PUBLIC_BASE_URL)
            .trim_end_matches('/')
    }

    /// Validates the configuration.
    ///
    /// The S3 backend needs every connection option; the error names the
    /// first missing one by its environment variable.
    pub fn validate(&self) -> StorageResult<()> {
        if let Some(base_url) = self.storage_public_base_url.as_deref()
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            return Err(StorageError::config(
                "STORAGE_PUBLIC_BASE_URL must be an http(s) URL",
            ));
        }

        match self.storage_backend {
            BackendType::Memory => Ok(()),
            BackendType::S3 => {
                let required = [
                    ("STORAGE_BUCKET", &self.storage_bucket),
                    ("STORAGE_REGION", &self.storage_region),
                    ("STORAGE_ACCESS_KEY_ID", &self.storage_access_key_id),
                    ("STORAGE_SECRET_ACCESS_KEY", &self.storage_secret_access_key),
                    ("STORAGE_PUBLIC_BASE_URL", &self.storage_public_base_url),
                ];

                for (name, value) in required {
                    if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                        return Err(StorageError::config(format!(
                            "{name} is required when STORAGE_BACKEND=s3"
                        )));
                    }
                }

                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("storage_backend", &self.storage_backend)
            .field("storage_bucket", &self.storage_bucket)
            .field("storage_region", &self.storage_region)
            .field("storage_endpoint", &self.storage_endpoint)
            .field(
                "storage_access_key_id",
                &self.storage_access_key_id.as_ref().map(|_| "***"),
            )
            .field(
                "storage_secret_access_key",
                &self.storage_secret_access_key.as_ref().map(|_| "***"),
            )
            .field("storage_public_base_url", &self.storage_public_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_s3() -> StorageConfig {
        StorageConfig::s3("paws-media", "eu-central-1", "https://cdn.paws.dev/")
            .with_credentials("AKIAPAWSMEDIA", "s3cr3t-value")
    }

    #[test]
    fn memory_config_is_valid() {
        assert!(StorageConfig::memory().validate().is_ok());
        assert_eq!(
            StorageConfig::memory().public_base_url(),
            DEFAULT_MEMORY_PUBLIC_BASE_URL
        );
    }

    #[test]
    fn complete_s3_config_is_valid() {
        let config = complete_s3();
        assert!(config.validate().is_ok());
        assert_eq!(config.public_base_url(), "https://cdn.paws.dev");
    }

    #[test]
    fn missing_s3_option_is_named() {
        let mut config = complete_s3();
        config.storage_secret_access_key = None;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("STORAGE_SECRET_ACCESS_KEY"));

        let mut config = complete_s3();
        config.storage_bucket = Some("  ".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("STORAGE_BUCKET"));
    }

    #[test]
    fn public_base_url_must_be_http() {
        let mut config = complete_s3();
        config.storage_public_base_url = Some("ftp://files".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_credentials() {
        let debug = format!("{:?}", complete_s3());
        assert!(!debug.contains("s3cr3t-value"));
        assert!(!debug.contains("AKIAPAWSMEDIA"));
        assert!(debug.contains("\"***\""));
        assert!(debug.contains("paws-media"));
    }
}
