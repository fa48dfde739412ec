//! Offset pagination shared by every list endpoint.

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page and page size requested by a caller, not yet checked against a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Resolves the request against the number of matching rows.
    pub fn window(self, total: i64) -> PageWindow {
        PageWindow::new(self.page, self.page_size, total)
    }
}

/// A requested page clamped to the bounds implied by a total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageWindow {
    /// `page_size` below one is treated as one so the window is always defined.
    pub fn new(requested_page: i64, page_size: i64, total: i64) -> Self {
        let page_size = page_size.max(1);
        let total = total.max(0);
        // Ceiling division that cannot overflow for any positive page size.
        let total_pages = total / page_size + i64::from(total % page_size != 0);

        let page = requested_page.clamp(1, total_pages.max(1));

        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self {
            items,
            total: window.total,
            page: window.page,
            page_size: window.page_size,
            total_pages: window.total_pages,
            has_next: window.has_next(),
            has_previous: window.has_previous(),
        }
    }

    /// Converts every item while keeping the page metadata intact.
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_no_pages() {
        let window = PageWindow::new(5, 10, 0);
        assert_eq!(window.total_pages, 0);
        assert_eq!(window.page, 1);
        assert!(!window.has_next());
        assert!(!window.has_previous());
    }

    #[test]
    fn empty_result_with_default_page_starts_at_zero_offset() {
        let window = PageWindow::new(1, 10, 0);
        assert_eq!(window.page, 1);
        assert_eq!(window.offset(), 0);
        assert!(!window.has_next());
        assert!(!window.has_previous());
    }

    #[test]
    fn twenty_five_items_in_pages_of_ten() {
        let first = PageWindow::new(1, 10, 25);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.offset(), 0);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = PageWindow::new(3, 10, 25);
        assert_eq!(last.offset(), 20);
        assert!(!last.has_next());
        assert!(last.has_previous());

        let beyond = PageWindow::new(99, 10, 25);
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.offset(), 20);
    }

    #[test]
    fn non_positive_page_clamps_to_first() {
        assert_eq!(PageWindow::new(0, 10, 25).page, 1);
        assert_eq!(PageWindow::new(-4, 10, 25).page, 1);
    }

    #[test]
    fn clamped_page_stays_in_bounds() {
        for total in 0..60 {
            for page_size in 1..12 {
                for requested in -3..12 {
                    let window = PageWindow::new(requested, page_size, total);
                    assert_eq!(window.total_pages, (total + page_size - 1) / page_size);
                    assert!(window.page >= 1);
                    assert!(window.page <= window.total_pages.max(1));
                    assert_eq!(window.has_next(), window.page < window.total_pages);
                    assert_eq!(window.has_previous(), window.page > 1);
                }
            }
        }
    }

    #[test]
    fn huge_page_size_does_not_overflow() {
        let window = PageWindow::new(1, i64::MAX, 2);
        assert_eq!(window.total_pages, 1);
        assert_eq!(window.page, 1);
        assert_eq!(window.offset(), 0);
        assert!(!window.has_next());

        let beyond = PageWindow::new(i64::MAX, i64::MAX, i64::MAX);
        assert_eq!(beyond.total_pages, 1);
        assert_eq!(beyond.page, 1);
        assert_eq!(beyond.offset(), 0);
    }

    #[test]
    fn paginated_map_keeps_metadata() {
        let page = Paginated::new(vec![1, 2, 3], PageWindow::new(2, 3, 7));
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1", "2", "3"]);
        assert_eq!(mapped.page, 2);
        assert_eq!(mapped.total, 7);
        assert_eq!(mapped.total_pages, 3);
        assert!(mapped.has_next);
        assert!(mapped.has_previous);
    }
}
