#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod backend;
mod config;
mod error;

pub use backend::{PresignedUpload, StorageBackend};
pub use config::{BackendType, DEFAULT_MEMORY_PUBLIC_BASE_URL, StorageConfig};
pub use error::{StorageError, StorageResult};

/// Tracing target for storage operations.
pub const TRACING_TARGET: &str = "paws_opendal";
