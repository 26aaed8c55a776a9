//! Offset/limit pagination.

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 3;

/// An offset/limit window over an ordered listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    /// Number of items to skip.
    pub offset: i64,
    /// Maximum number of items to return.
    pub limit: i64,
}

impl Page {
    /// Create a page window. Negative offsets clamp to 0; the limit is
    /// clamped to at least 1.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: offset.max(0),
            limit: limit.max(1),
        }
    }

    /// Window for a 1-indexed page number of `limit` items.
    pub fn number(page: i64, limit: i64) -> Self {
        let limit = limit.max(1);
        Self::new((page - 1).max(0) * limit, limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}

/// One page of an ordered listing, with the total count for restart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paginated<T> {
    /// The items in this window.
    pub items: Vec<T>,
    /// Offset this window started at.
    pub offset: i64,
    /// Limit used for this window.
    pub limit: i64,
    /// Total number of items across all pages.
    pub total: i64,
}

impl<T> Paginated<T> {
    /// Whether another window follows this one.
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamps() {
        let page = Page::new(-5, 0);
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 1);
    }

    #[test]
    fn test_page_number_is_one_indexed() {
        assert_eq!(Page::number(1, 3), Page::new(0, 3));
        assert_eq!(Page::number(2, 3), Page::new(3, 3));
        // Page 0 and negative pages clamp to the first window.
        assert_eq!(Page::number(0, 3), Page::new(0, 3));
        assert_eq!(Page::number(-1, 3), Page::new(0, 3));
    }

    #[test]
    fn test_has_more() {
        let page = Paginated {
            items: vec![1, 2, 3],
            offset: 0,
            limit: 3,
            total: 5,
        };
        assert!(page.has_more());

        let last = Paginated {
            items: vec![4, 5],
            offset: 3,
            limit: 3,
            total: 5,
        };
        assert!(!last.has_more());
    }
}
