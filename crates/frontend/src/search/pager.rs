//! Page windows over a [`ResultCache`].
//!
//! Pages are 1-based. Every page index is clamped to `[1, last_page]`, and a
//! cache without rows has exactly one, empty, page.

use super::result_cache::ResultCache;
use contracts::search::Record;
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_size: usize,
    current_page: usize,
    total_rows: usize,
}

impl PaginationState {
    pub fn new(page_size: usize, total_rows: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_rows,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn last_page(&self) -> usize {
        last_page(self.total_rows, self.page_size)
    }

    /// Move to `page`, clamped. Returns the page actually selected.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.last_page());
        self.current_page
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::of(self.current_page, self.page_size, self.total_rows)
    }
}

/// Shown entries of one page, 1-based and inclusive. All zero when there are
/// no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start_entry: usize,
    pub end_entry: usize,
    pub total_rows: usize,
}

impl PageWindow {
    fn of(page: usize, page_size: usize, total_rows: usize) -> Self {
        if total_rows == 0 {
            return Self {
                start_entry: 0,
                end_entry: 0,
                total_rows,
            };
        }
        let page = page.clamp(1, last_page(total_rows, page_size));
        Self {
            start_entry: (page - 1) * page_size + 1,
            end_entry: (page * page_size).min(total_rows),
            total_rows,
        }
    }

    /// Zero-based half-open row range, as the export endpoint expects it.
    pub fn row_range(&self) -> Range<usize> {
        self.start_entry.saturating_sub(1)..self.end_entry
    }
}

fn last_page(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone, Copy)]
pub struct Pager<'a> {
    cache: &'a ResultCache,
    page_size: usize,
}

impl<'a> Pager<'a> {
    pub fn new(cache: &'a ResultCache, page_size: usize) -> Self {
        Self {
            cache,
            page_size: page_size.max(1),
        }
    }

    pub fn total_rows(&self) -> usize {
        self.cache.len()
    }

    pub fn last_page(&self) -> usize {
        last_page(self.total_rows(), self.page_size)
    }

    pub fn row_range(&self, page: usize) -> Range<usize> {
        self.describe(page).row_range()
    }

    pub fn page(&self, page: usize) -> &'a [Record] {
        self.cache.slice(self.row_range(page))
    }

    pub fn has_next(&self, current: usize) -> bool {
        current.saturating_mul(self.page_size) < self.total_rows()
    }

    pub fn has_previous(&self, current: usize) -> bool {
        current > 1
    }

    pub fn describe(&self, current: usize) -> PageWindow {
        PageWindow::of(current, self.page_size, self.total_rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cache_of(n: usize) -> ResultCache {
        let rows = (0..n)
            .map(|i| match json!({ "i": i }) {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            })
            .collect();
        ResultCache::new(vec!["i".to_string()], rows)
    }

    #[test]
    fn test_describe_bounds() {
        for total in 0..40 {
            let cache = cache_of(total);
            for size in 1..12 {
                let pager = Pager::new(&cache, size);
                for current in 1..=pager.last_page() {
                    let w = pager.describe(current);
                    assert_eq!(w.total_rows, total);
                    if total == 0 {
                        assert_eq!((w.start_entry, w.end_entry), (0, 0));
                        continue;
                    }
                    assert!(1 <= w.start_entry, "{total}/{size}/{current}");
                    assert!(w.start_entry <= w.end_entry);
                    assert!(w.end_entry <= total);
                    assert_eq!(w.end_entry - w.start_entry + 1, pager.page(current).len());
                }
            }
        }
    }

    #[test]
    fn test_page_is_idempotent() {
        let cache = cache_of(37);
        let pager = Pager::new(&cache, 10);
        for n in 0..8 {
            assert_eq!(pager.page(n), pager.page(n));
            assert_eq!(pager.describe(n), pager.describe(n));
        }
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let cache = cache_of(25);
        let pager = Pager::new(&cache, 10);
        assert_eq!(pager.last_page(), 3);
        assert_eq!(pager.page(0), pager.page(1));
        assert_eq!(pager.page(99), pager.page(3));
        assert_eq!(pager.page(3).len(), 5);
    }

    #[test]
    fn test_250_rows_by_100() {
        let cache = cache_of(250);
        let pager = Pager::new(&cache, 100);
        let w = pager.describe(3);
        assert_eq!((w.start_entry, w.end_entry, w.total_rows), (201, 250, 250));
        assert!(!pager.has_next(3));
        assert!(pager.has_previous(3));
        assert!(pager.has_next(2));
        assert_eq!(pager.row_range(3), 200..250);
        assert_eq!(pager.page(3)[0]["i"], 200);
    }

    #[test]
    fn test_empty_cache_has_single_page() {
        let cache = cache_of(0);
        let pager = Pager::new(&cache, 100);
        assert_eq!(pager.last_page(), 1);
        assert!(!pager.has_next(1));
        assert!(!pager.has_previous(1));
        assert_eq!(pager.row_range(1), 0..0);
        assert!(pager.page(1).is_empty());
    }

    #[test]
    fn test_state_clamps_navigation() {
        let mut state = PaginationState::new(100, 250);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.go_to(7), 3);
        assert_eq!(state.window().row_range(), 200..250);
        assert_eq!(state.go_to(0), 1);

        let mut empty = PaginationState::new(100, 0);
        assert_eq!(empty.go_to(2), 1);
        assert_eq!(empty.window().row_range(), 0..0);
    }
}
