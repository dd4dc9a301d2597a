//! Pagination wrapper for listing queries.

use serde::Serialize;

/// One page of a paginated result set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Build a page from items plus the total row count.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total_items: i64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            // Negative counts cannot come from COUNT(*), clamp anyway
            let total = u64::try_from(total_items).unwrap_or(0);
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };
        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    /// Whether pages beyond this one exist.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 1, 12, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_more());
    }

    #[test]
    fn test_last_page_has_no_more() {
        let page = Page::new(vec![1], 3, 12, 25);
        assert!(!page.has_more());
    }

    #[test]
    fn test_empty_result() {
        let page: Page<i32> = Page::new(vec![], 1, 12, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_more());
    }

    #[test]
    fn test_exact_multiple_does_not_round_up() {
        let page: Page<i32> = Page::new(vec![], 2, 12, 24);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_more());
    }

    #[test]
    fn test_negative_total_clamps_to_zero_pages() {
        let page: Page<i32> = Page::new(vec![], 1, 12, -5);
        assert_eq!(page.total_pages, 0);
    }
}
