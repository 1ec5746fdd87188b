//! Identity resolution and resource authorization.
//!
//! Every state-changing handler loads the resource, builds its
//! [`OwnerFacts`] and calls [`enforce`] before touching the database.
//! The rules are pure functions and never perform I/O.

mod identity;
mod ownership;
mod rules;

pub use identity::{Actor, Identity, resolve_identity};
pub use ownership::{OwnerFacts, ResourceKind, Sensitivity};
pub use rules::{Action, Decision, authorize, enforce};

/// Tracing target for authorization decisions.
const TRACING_TARGET: &str = "paws_server::authz";
