//! [`Error`], [`ErrorKind`] and [`Result`].

mod http_error;
mod pg_account;
mod pg_content;
mod pg_error;
mod storage_error;

pub use http_error::{Error, ErrorKind, Result};
