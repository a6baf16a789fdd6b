//! The list envelope returned by paginated endpoints.

use serde::Deserialize;

/// One page of a list endpoint: `{"list": [...], "total_count": N}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    /// Items on this page, in server order
    pub list: Vec<T>,
    /// Total number of items across all pages
    pub total_count: u64,
}
