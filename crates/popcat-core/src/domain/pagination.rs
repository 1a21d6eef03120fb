//! Offset/limit paging.

use serde::{Deserialize, Serialize};

/// Page size used when the caller asks for zero or a negative size.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// A resolved page window.
///
/// Built only through [`PageRequest::compute`], so `page >= 1` and
/// `limit >= 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: i64,
    offset: i64,
    limit: i64,
}

impl PageRequest {
    /// Turn a 1-based `(page, size)` pair into an offset/limit window.
    ///
    /// `page <= 0` is read as the first page and `size <= 0` as
    /// [`DEFAULT_PAGE_SIZE`]. Never fails.
    pub fn compute(page: i64, size: i64) -> Self {
        let page = if page <= 0 { 1 } else { page };
        let limit = if size <= 0 { DEFAULT_PAGE_SIZE } else { size };

        Self {
            page,
            offset: (page - 1).saturating_mul(limit),
            limit,
        }
    }

    pub const fn page(&self) -> i64 {
        self.page
    }

    pub const fn offset(&self) -> i64 {
        self.offset
    }

    pub const fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::compute(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results in the shape the boundary hands back to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePage<T> {
    pub page: i64,
    pub size: i64,
    pub total_count: u64,
    pub rows: Vec<T>,
}

impl<T> TemplatePage<T> {
    pub fn new(request: PageRequest, total_count: u64, rows: Vec<T>) -> Self {
        Self {
            page: request.page(),
            size: request.limit(),
            total_count,
            rows,
        }
    }
}
