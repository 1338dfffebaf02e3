//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
}

impl PageRequest {
    /// The default page size for review and workplace listings.
    pub const DEFAULT_SIZE: usize = 15;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 500;

    /// Creates a new page request.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }

    /// Returns true if this request targets the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.page == 0
    }

    /// Returns the offset for database queries, saturating at `usize::MAX`.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results.
///
/// Serialized as `{ count, next, previous, page, size, results }`, where
/// `next`/`previous` are page numbers or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The total number of items across all pages.
    pub count: u64,
    /// The next page number, if any.
    pub next: Option<usize>,
    /// The previous page number, if any.
    pub previous: Option<usize>,
    /// The current page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
    /// The items on this page.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(results: Vec<T>, request: PageRequest, count: u64) -> Self {
        let seen = u64::try_from(request.offset().saturating_add(results.len()))
            .unwrap_or(u64::MAX);
        Self {
            count,
            next: (seen < count).then(|| request.page.saturating_add(1)),
            previous: request.page.checked_sub(1),
            page: request.page,
            size: request.size,
            results,
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            page: self.page,
            size: self.size,
            results: self.results.into_iter().map(f).collect(),
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns the total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.count.div_ceil(self.size as u64)
    }

    /// Returns true if there is a next page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns true if there is a previous page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request() {
        let req = PageRequest::new(2, 10);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
        assert!(!req.is_first());
    }

    #[test]
    fn test_page_request_clamps_size() {
        assert_eq!(PageRequest::new(0, 10_000).size, PageRequest::MAX_SIZE);
        assert_eq!(PageRequest::new(0, 0).size, 1);
    }

    #[test]
    fn test_huge_page_number_saturates() {
        let req = PageRequest::new(usize::MAX / 2, 15);
        assert_eq!(req.offset(), usize::MAX);

        let page: Page<u8> = Page::new(Vec::new(), req, 40);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, Some(usize::MAX / 2 - 1));

        let last: Page<u8> = Page::empty(PageRequest::new(usize::MAX, 1));
        assert_eq!(last.next, None);
    }

    #[test]
    fn test_page_request_first() {
        let req = PageRequest::first();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 15);
        assert!(req.is_first());
    }

    #[test]
    fn test_first_page_links() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], PageRequest::new(0, 3), 7);
        assert_eq!(page.next, Some(1));
        assert_eq!(page.previous, None);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_last_page_links() {
        let page: Page<i32> = Page::new(vec![7], PageRequest::new(2, 3), 7);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, Some(1));
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(0, 10), 3);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.results, vec![2, 4, 6]);
        assert_eq!(mapped.count, 3);
    }

    #[test]
    fn test_page_empty() {
        let page: Page<i32> = Page::empty(PageRequest::first());
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_serialized_shape() {
        let page = Page::new(vec!["a"], PageRequest::new(0, 1), 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["next"], 1);
        assert!(json["previous"].is_null());
        assert_eq!(json["results"][0], "a");
    }
}
