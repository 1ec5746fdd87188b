//! Pagination request types.

use paws_postgres::types::{MAX_LIMIT, Pagination as QueryPagination};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pagination parameters read from the query string.
///
/// Lists are plain arrays, so only a limit and an offset are accepted.
#[must_use]
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct Pagination {
    /// Maximum number of records to return (1-100, defaults to 50).
    #[validate(range(min = 1, max = MAX_LIMIT))]
    pub limit: Option<i64>,

    /// Number of records to skip.
    #[validate(range(min = 0, max = 100_000))]
    pub offset: Option<i64>,
}

impl Pagination {
    /// Returns a [`Pagination`] with the given limit.
    #[inline]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl From<Pagination> for QueryPagination {
    fn from(pagination: Pagination) -> Self {
        let base = QueryPagination::from_limit(pagination.limit);
        QueryPagination::new(base.limit, pagination.offset.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use paws_postgres::types::DEFAULT_LIMIT;

    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let pagination = QueryPagination::from(Pagination::default());
        assert_eq!(pagination.limit, DEFAULT_LIMIT);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn limit_is_validated() {
        assert!(Pagination::default().with_limit(100).validate().is_ok());
        assert!(Pagination::default().with_limit(101).validate().is_err());
        assert!(Pagination::default().with_limit(0).validate().is_err());
    }
}
