//! # Pagination
//!
//! 1-indexed page slicing over an already filtered list.
//!
//! ```text
//! page = 3, page_size = 10, len = 25
//!
//!   [0 ........ 9][10 ....... 19][20 ... 24]
//!      page 1         page 2       page 3   → start 20, end 25
//! ```
//!
//! Pagination sits on the render path, so bad page requests are clamped
//! (`page < 1` → 1, `page_size < 1` → 1) instead of failing. A page past
//! the end is simply empty.

use serde::Serialize;

/// One slice of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Index of the first item, clamped to the list length.
    pub start_index: usize,
    /// One past the last item, clamped to the list length.
    pub end_index: usize,
}

/// Clamps a page request to something valid.
#[inline]
pub fn normalize(page: i64, page_size: i64) -> (usize, usize) {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let page_size = usize::try_from(page_size.max(1)).unwrap_or(usize::MAX);
    (page, page_size)
}

/// Returns page `page` of `items`.
///
/// ```rust
/// use medistock_core::pagination::paginate;
///
/// let items: Vec<u32> = (1..=25).collect();
/// let page = paginate(&items, 3, 10);
/// assert_eq!(page.items, &[21, 22, 23, 24, 25]);
/// assert_eq!((page.start_index, page.end_index), (20, 25));
///
/// // Out-of-range requests are clamped, never a panic
/// assert_eq!(paginate(&items, 0, 0).items, &[1]);
/// ```
pub fn paginate<T>(items: &[T], page: i64, page_size: i64) -> Page<'_, T> {
    let (page, page_size) = normalize(page, page_size);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        start_index: start,
        end_index: end,
    }
}

/// Number of pages needed to show `len` items; at least 1 so an empty
/// result still renders "page 1 of 1".
pub fn total_pages(len: usize, page_size: i64) -> usize {
    let (_, page_size) = normalize(1, page_size);
    len.div_ceil(page_size).max(1)
}
