use crate::config::Config;
use serde::{Deserialize, Serialize};

/// Cursor over a paginated result set. Derived per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: usize,
    /// Total number of results, not the number of pages.
    pub page_count: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// Page arithmetic for a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self { Self { page_size: page_size.max(1) } }

    pub fn from_config(config: &Config) -> Self { Self::new(config.search.items_per_page) }

    pub fn page_size(&self) -> usize { self.page_size }

    pub fn set_page_size(&mut self, page_size: usize) { self.page_size = page_size.max(1); }

    /// Pages start at 1; anything lower is treated as the first page.
    pub fn normalize_page(page: i64) -> usize { page.max(1) as usize }

    /// Half-open `[lower, upper)` window of `page` into the ordered results.
    pub fn bounds(&self, page: usize) -> (usize, usize) {
        let page = page.max(1);
        ((page - 1).saturating_mul(self.page_size), page.saturating_mul(self.page_size))
    }

    pub fn number_of_pages(&self, total: usize) -> usize { total.div_ceil(self.page_size).max(1) }

    pub fn previous(&self, current: usize) -> usize { current.saturating_sub(1).max(1) }

    pub fn next(&self, current: usize, total: usize) -> usize {
        let last = self.number_of_pages(total);
        current.saturating_add(1).min(last).max(1)
    }

    pub fn pagination(&self, current: usize, total: usize) -> Pagination {
        let current = current.max(1);
        Pagination {
            current_page: current,
            page_count: total,
            has_previous_page: current > 1,
            has_next_page: current < self.number_of_pages(total),
        }
    }
}
