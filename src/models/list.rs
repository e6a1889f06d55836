//! Paged results from list-style endpoints

use serde::Serialize;

/// A page of results from a list-style endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    /// Items in provider order
    pub items: Vec<T>,

    /// Total matches across all pages
    pub total_count: u64,

    /// Page this result represents (1-based)
    pub page_no: u32,

    /// Page size used for the request
    pub num_of_rows: u32,
}

impl<T> ListResult<T> {
    /// An empty page, keeping the request's paging
    pub fn empty(page_no: u32, num_of_rows: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page_no,
            num_of_rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether more pages exist after this one
    pub fn has_more(&self) -> bool {
        u64::from(self.page_no) * u64::from(self.num_of_rows) < self.total_count
    }
}
