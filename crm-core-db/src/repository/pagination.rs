use serde::{Deserialize, Serialize};

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: usize = 200;

/// Largest offset PostgreSQL accepts (`OFFSET` is a bigint).
pub const MAX_OFFSET: usize = i64::MAX as usize;

/// Offset-based pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items to return
    pub limit: usize,
    /// Number of items to skip
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Page request for a 1-based page number. Page 0 is treated as page 1.
    ///
    /// The page size is clamped to `1..=MAX_PAGE_SIZE` before the offset is
    /// computed. `None` when the offset would exceed [`MAX_OFFSET`].
    pub fn for_page(page_size: usize, page_number: usize) -> Option<Self> {
        let limit = page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = (page_number.max(1) - 1).checked_mul(limit)?;
        (offset <= MAX_OFFSET).then_some(Self { limit, offset })
    }

    /// Limit forced into `1..=MAX_PAGE_SIZE`, offset into `0..=MAX_OFFSET`
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.min(MAX_OFFSET),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

/// One page of results plus the metadata needed to fetch the next one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }

    /// Current page number (1-based)
    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.total.div_ceil(self.limit)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
