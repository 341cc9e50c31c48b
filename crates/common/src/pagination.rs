//! Pagination utilities shared by services and HTTP handlers
//!
//! `Pagination` normalizes 1-based page input; `Paginated` is the response envelope.

use serde::Serialize;

/// Upper bound on items per page.
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Clamp to sane defaults and convert to `u64` as `(page_index, per_page)`.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of results with totals.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pages: u64,
    pub total_data: u64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total_data: u64, pages: u64) -> Self {
        Self { data, pages, total_data }
    }
}
