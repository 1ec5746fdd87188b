//! Prelude module for paws-server.
//!
//! Re-exports the types most applications need to assemble and serve the
//! API with a single `use` statement.
//!
//! ```rust
//! use paws_server::prelude::*;
//! ```

pub use crate::handler::routes;
pub use crate::middleware::{CorsConfig, RouterExt};
pub use crate::service::{ServiceConfig, ServiceState};
