//! Storage backend implementation.

use std::time::Duration;

use bytes::Bytes;
use opendal::{Operator, services};

use crate::TRACING_TARGET;
use crate::config::{BackendType, StorageConfig};
use crate::error::{StorageError, StorageResult};

/// Object storage backed by an OpenDAL operator.
///
/// Cloning is cheap and shares the underlying operator.
#[derive(Clone)]
pub struct StorageBackend {
    operator: Operator,
    config: StorageConfig,
}

/// A presigned request the client performs itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUpload {
    /// HTTP method to use, normally `PUT`.
    pub method: String,
    /// Signed URL.
    pub url: String,
    /// Headers the client must send along.
    pub headers: Vec<(String, String)>,
}

impl StorageBackend {
    /// Validates the configuration and creates the backend.
    ///
    /// Fails fast on incomplete configuration, so a misconfigured deployment
    /// never starts serving uploads.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        config.validate()?;
        let operator = Self::create_operator(&config)?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = %config.storage_backend,
            bucket = ?config.storage_bucket,
            "Storage backend initialized"
        );

        Ok(Self { operator, config })
    }

    /// Creates an in-memory backend.
    pub fn memory() -> StorageResult<Self> {
        Self::new(StorageConfig::memory())
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the backend type.
    pub fn backend_type(&self) -> BackendType {
        self.config.storage_backend
    }

    /// Returns the public URL of an object.
    pub fn public_url(&self, file_key: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url(),
            file_key.trim_start_matches('/')
        )
    }

    /// Reads an object.
    pub async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        tracing::debug!(target: TRACING_TARGET, path = %path, "Reading object");
        let data = self.operator.read(path).await?.to_vec();
        Ok(data)
    }

    /// Writes an object, replacing any existing one.
    ///
    /// The content type is only forwarded to services that store it.
    pub async fn write(
        &self,
        path: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            size = data.len(),
            "Writing object"
        );

        let supports_content_type = self
            .operator
            .info()
            .full_capability()
            .write_with_content_type;

        match content_type.filter(|_| supports_content_type) {
            Some(content_type) => {
                self.operator
                    .write_with(path, data)
                    .content_type(content_type)
                    .await?;
            }
            None => {
                self.operator.write(path, data).await?;
            }
        }

        Ok(())
    }

    /// Deletes an object. Deleting a missing object succeeds.
    pub async fn delete(&self, path: &str) -> StorageResult<()> {
        tracing::debug!(target: TRACING_TARGET, path = %path, "Deleting object");

        match self.operator.delete(path).await.map_err(StorageError::from) {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Checks whether an object exists.
    pub async fn exists(&self, path: &str) -> StorageResult<bool> {
        Ok(self.operator.exists(path).await?)
    }

    /// Returns the size of an object in bytes.
    pub async fn size(&self, path: &str) -> StorageResult<u64> {
        let meta = self.operator.stat(path).await?;
        Ok(meta.content_length())
    }

    /// Presigns a direct upload.
    ///
    /// Returns `None` when the backend cannot presign, as with the
    /// in-memory service.
    pub async fn presign_write(
        &self,
        path: &str,
        expires_in: Duration,
    ) -> StorageResult<Option<PresignedUpload>> {
        if !self.operator.info().full_capability().presign_write {
            return Ok(None);
        }

        let request = self.operator.presign_write(path, expires_in).await?;
        let headers = request
            .header()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_owned(), value.to_owned()))
            })
            .collect();

        Ok(Some(PresignedUpload {
            method: request.method().as_str().to_owned(),
            url: request.uri().to_string(),
            headers,
        }))
    }

    fn create_operator(config: &StorageConfig) -> StorageResult<Operator> {
        match config.storage_backend {
            BackendType::Memory => Operator::new(services::Memory::default())
                .map(|op| op.finish())
                .map_err(|e| StorageError::init(e.to_string())),

            #[cfg(feature = "s3")]
            BackendType::S3 => {
                let mut builder = services::S3::default();

                if let Some(ref bucket) = config.storage_bucket {
                    builder = builder.bucket(bucket);
                }

                if let Some(ref region) = config.storage_region {
                    builder = builder.region(region);
                }

                if let Some(ref endpoint) = config.storage_endpoint {
                    builder = builder.endpoint(endpoint);
                }

                if let Some(ref access_key_id) = config.storage_access_key_id {
                    builder = builder.access_key_id(access_key_id);
                }

                if let Some(ref secret_access_key) = config.storage_secret_access_key {
                    builder = builder.secret_access_key(secret_access_key);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(not(feature = "s3"))]
            BackendType::S3 => Err(StorageError::config(
                "STORAGE_BACKEND=s3 requires the `s3` feature",
            )),
        }
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBackend")
            .field("backend_type", &self.config.storage_backend)
            .field("bucket", &self.config.storage_bucket)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_read_delete_cycle() -> StorageResult<()> {
        let storage = StorageBackend::memory()?;
        let key = "uploads/user/cat.png";

        storage
            .write(key, Bytes::from_static(b"meow"), Some("image/png"))
            .await?;
        assert!(storage.exists(key).await?);
        assert_eq!(storage.read(key).await?, b"meow");
        assert_eq!(storage.size(key).await?, 4);

        storage.delete(key).await?;
        assert!(!storage.exists(key).await?);
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_object_succeeds() -> StorageResult<()> {
        let storage = StorageBackend::memory()?;
        storage.delete("uploads/never-written").await?;
        Ok(())
    }

    #[tokio::test]
    async fn memory_backend_cannot_presign() -> StorageResult<()> {
        let storage = StorageBackend::memory()?;
        let presigned = storage
            .presign_write("uploads/x.png", Duration::from_secs(60))
            .await?;
        assert!(presigned.is_none());
        Ok(())
    }

    #[cfg(feature = "s3")]
    #[test]
    fn public_url_joins_base_and_key() {
        let config = StorageConfig::s3("bucket", "us-east-1", "https://cdn.paws.dev/media/")
            .with_credentials("id", "secret");
        let storage = StorageBackend::new(config).expect("valid config");

        assert_eq!(
            storage.public_url("/uploads/a.png"),
            "https://cdn.paws.dev/media/uploads/a.png"
        );
    }

    #[test]
    fn incomplete_s3_config_fails_fast() {
        let config = StorageConfig::s3("bucket", "us-east-1", "https://cdn.paws.dev");
        let err = StorageBackend::new(config).unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }
}
