//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page a client may request.
pub const MAX_LIMIT: i64 = 500;

/// Query parameters for discussion and work item listings
/// (`?status=&include_deleted=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Exact match on the stored status label.
    pub status: Option<String>,
    #[serde(default)]
    pub include_deleted: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    /// Limit clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Status filter with surrounding whitespace removed; blank means none.
    pub fn status(&self) -> Option<String> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Query parameters for child listings that hide soft-deleted rows by
/// default (`?include_deleted=`).
#[derive(Debug, Default, Deserialize)]
pub struct IncludeDeletedParams {
    #[serde(default)]
    pub include_deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        let params = |limit| ListParams {
            limit,
            ..Default::default()
        };
        assert_eq!(params(None).limit(), DEFAULT_LIMIT);
        assert_eq!(params(Some(0)).limit(), 1);
        assert_eq!(params(Some(10_000)).limit(), MAX_LIMIT);
        assert_eq!(params(Some(25)).limit(), 25);
    }

    #[test]
    fn negative_offset_becomes_zero() {
        let params = ListParams {
            offset: Some(-5),
            ..Default::default()
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn blank_status_is_no_filter() {
        let params = ListParams {
            status: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(params.status(), None);
    }
}
