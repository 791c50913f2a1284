//! Fixed-size pages over the administrator's dialog list.

/// Dialogs per inbox page.
pub const PAGE_SIZE: usize = 10;

/// One page of a slice. `number` is 1-based and always within `[1, max(total_pages, 1)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: i64,
    pub total_pages: i64,
}

impl<T> Page<'_, T> {
    /// Navigation controls are only shown when there is somewhere to go.
    pub fn has_navigation(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// `ceil(len / page_size)`; zero items give zero pages. A zero page size is treated as 1.
pub fn total_pages(len: usize, page_size: usize) -> i64 {
    len.div_ceil(page_size.max(1)) as i64
}

/// Clamps a requested 1-based page index into `[1, total_pages]`. With no pages the result is 1.
pub fn clamp_page(requested: i64, total_pages: i64) -> i64 {
    requested.clamp(1, total_pages.max(1))
}

/// Returns the requested page of `items`, clamped to the nearest existing page.
pub fn paginate<T>(items: &[T], requested: i64, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = total_pages(items.len(), page_size);
    let number = clamp_page(requested, total);

    let start = ((number - 1) as usize * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        number,
        total_pages: total,
    }
}
