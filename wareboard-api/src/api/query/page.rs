//! Page type for paginated list results.

/// A page of list results with pagination information.
#[derive(Debug, Clone)]
pub struct Page<T> {
    items: Vec<T>,
    /// 1-based page index this page was requested as.
    page: usize,
    /// Requested page size.
    page_size: usize,
    /// Total record count across all pages, if the backend reports it.
    total_count: Option<usize>,
}

impl<T> Page<T> {
    /// Creates a new page of items.
    pub fn new(items: Vec<T>, page: usize, page_size: usize) -> Self {
        Self {
            items,
            page,
            page_size,
            total_count: None,
        }
    }

    /// Sets the total record count.
    pub fn with_total_count(mut self, count: usize) -> Self {
        self.total_count = Some(count);
        self
    }

    /// Returns a reference to the items in this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the 1-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the requested page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the total record count, if reported.
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are more pages available.
    ///
    /// With a known total: `page < ceil(total / page_size)` and the page is
    /// non-empty. Without one, a full page is assumed to have a successor.
    pub fn has_more(&self) -> bool {
        if self.items.is_empty() || self.page_size == 0 {
            return false;
        }
        match self.total_count {
            Some(total) => self.page < total.div_ceil(self.page_size),
            None => self.items.len() == self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more_with_total() {
        // 25 records at page size 10 span 3 pages.
        let page1 = Page::new(vec![0; 10], 1, 10).with_total_count(25);
        let page3 = Page::new(vec![0; 5], 3, 10).with_total_count(25);
        assert!(page1.has_more());
        assert!(!page3.has_more());
    }

    #[test]
    fn test_has_more_without_total() {
        let full = Page::new(vec![0; 10], 1, 10);
        let short = Page::new(vec![0; 4], 2, 10);
        assert!(full.has_more());
        assert!(!short.has_more());
    }

    #[test]
    fn test_empty_page_never_has_more() {
        let empty = Page::<i32>::new(Vec::new(), 1, 10).with_total_count(25);
        assert!(!empty.has_more());
    }
}
