//! Offset-based pagination for list queries.

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum number of items per page.
pub const MAX_LIMIT: i64 = 100;

/// Offset-based pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance with the limit clamped to `1..=MAX_LIMIT`.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }

    /// Creates pagination from an optional client-supplied limit.
    pub fn from_limit(limit: Option<i64>) -> Self {
        Self::new(limit.unwrap_or(DEFAULT_LIMIT), 0)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(Pagination::new(0, 0).limit, 1);
        assert_eq!(Pagination::new(500, 0).limit, MAX_LIMIT);
        assert_eq!(Pagination::new(10, -5).offset, 0);
    }

    #[test]
    fn missing_limit_uses_default() {
        assert_eq!(Pagination::from_limit(None), Pagination::default());
        assert_eq!(Pagination::from_limit(Some(7)).limit, 7);
    }
}
