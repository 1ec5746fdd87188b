#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod authz;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod prelude;
pub mod service;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};

/// Tracing target for session token verification.
pub const TRACING_TARGET_AUTHENTICATION: &str = "paws_server::extract::auth";

/// Tracing target for request payload validation.
pub const TRACING_TARGET_VALIDATION: &str = "paws_server::extract::validation";

/// Tracing target for service state initialization.
pub const TRACING_TARGET_SERVICE: &str = "paws_server::service";
