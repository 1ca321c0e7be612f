//! Page accumulation.
//!
//! Successive pages of one query are concatenated into a single growing
//! list. Page 1 (or a filter change) replaces the list; page N+1 appends.
//! Each request carries a monotonically increasing sequence number and a
//! stale response, one whose sequence predates a newer request, is dropped
//! instead of being spliced into the wrong list.

use wareboard_api::Page;

/// A ticket identifying one in-flight page request.
///
/// Returned by [`PagedAccumulator::begin_request`] and handed back with the
/// response so the accumulator can reject results that were superseded while
/// in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    page: u32,
}

impl RequestTicket {
    /// The page number this request asked for.
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Accumulates fetched pages into one in-memory list.
#[derive(Debug, Clone)]
pub struct PagedAccumulator<T> {
    items: Vec<T>,
    page: u32,
    page_size: u32,
    total_count: Option<u64>,
    has_next_page: bool,
    initially_loaded: bool,
    is_fetching: bool,
    request_seq: u64,
    error: Option<String>,
}

impl<T> PagedAccumulator<T> {
    /// Creates an empty accumulator.
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            page_size,
            total_count: None,
            has_next_page: true,
            initially_loaded: false,
            is_fetching: false,
            request_seq: 0,
            error: None,
        }
    }

    /// All accumulated items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of accumulated items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highest page applied so far (0 before any page lands).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Configured page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Server-reported total, when any response carried one.
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Whether a further page exists.
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// `false` until the first page of the first query lands.
    ///
    /// Distinguishes the skeleton state (nothing ever loaded) from a
    /// background refresh where stale rows stay on screen.
    pub fn initially_loaded(&self) -> bool {
        self.initially_loaded
    }

    /// Whether a request is in flight.
    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    /// Message from the most recent failed request, cleared by the next
    /// successful page.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The page number the next fetch should ask for.
    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    /// Registers a new in-flight request for the given page.
    ///
    /// Any response ticketed before this call becomes stale and will be
    /// dropped by [`apply_page`](Self::apply_page).
    pub fn begin_request(&mut self, page: u32) -> RequestTicket {
        self.request_seq += 1;
        self.is_fetching = true;
        RequestTicket {
            seq: self.request_seq,
            page,
        }
    }

    /// Applies a fetched page. Returns `false` when the response was stale
    /// and ignored.
    ///
    /// Page 1 replaces the accumulated list; any later page appends.
    /// `has_next_page` is recomputed from the response: with a total count,
    /// more pages exist while `page < ceil(total / page_size)`; without one,
    /// a full page implies more may follow and a short or empty page ends
    /// the stream.
    pub fn apply_page(&mut self, ticket: RequestTicket, page: Page<T>) -> bool {
        if ticket.seq < self.request_seq {
            return false;
        }
        self.is_fetching = false;
        self.error = None;
        self.initially_loaded = true;

        self.total_count = page.total_count().map(|n| n as u64).or(self.total_count);
        self.page = ticket.page;
        self.has_next_page = page.has_more();

        if ticket.page <= 1 {
            self.items = page.into_items();
        } else {
            self.items.extend(page.into_items());
        }
        true
    }

    /// Records a failed request. Returns `false` when the failure was stale.
    ///
    /// `has_next_page` is left untouched so the next scroll near the bottom
    /// simply retries; there is no backoff.
    pub fn apply_error(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        if ticket.seq < self.request_seq {
            return false;
        }
        self.is_fetching = false;
        self.error = Some(message.into());
        true
    }

    /// Resets paging for a new filter or sort.
    ///
    /// The accumulated items stay visible until page 1 of the new query
    /// lands and replaces them, so the screen never flashes empty between
    /// queries. In-flight responses for the old query become stale.
    pub fn reset_query(&mut self) {
        self.page = 0;
        self.total_count = None;
        self.has_next_page = true;
        self.error = None;
        self.request_seq += 1;
        self.is_fetching = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(items: Vec<i32>, page: usize, total: usize) -> Page<i32> {
        Page::new(items, page, 10).with_total_count(total)
    }

    #[test]
    fn test_page_one_replaces_after_accumulation() {
        let mut pager = PagedAccumulator::new(10);
        for n in 1..=3u32 {
            let ticket = pager.begin_request(n);
            let items: Vec<i32> = (0..10).map(|i| (n as i32 - 1) * 10 + i).collect();
            assert!(pager.apply_page(ticket, page_of(items, n as usize, 35)));
        }
        assert_eq!(pager.len(), 30);

        let ticket = pager.begin_request(1);
        assert!(pager.apply_page(ticket, page_of(vec![99; 10], 1, 35)));
        assert_eq!(pager.len(), 10);
        assert_eq!(pager.items(), &[99; 10]);
    }

    #[test]
    fn test_next_page_appends() {
        let mut pager = PagedAccumulator::new(10);
        let ticket = pager.begin_request(1);
        pager.apply_page(ticket, page_of(vec![1; 10], 1, 25));
        let ticket = pager.begin_request(2);
        pager.apply_page(ticket, page_of(vec![2; 10], 2, 25));
        assert_eq!(pager.len(), 20);
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_has_next_page_tracks_total() {
        // 25 records at page size 10 span 3 pages.
        let mut pager = PagedAccumulator::new(10);
        let ticket = pager.begin_request(1);
        pager.apply_page(ticket, page_of(vec![0; 10], 1, 25));
        assert!(pager.has_next_page());

        let ticket = pager.begin_request(2);
        pager.apply_page(ticket, page_of(vec![0; 10], 2, 25));
        assert!(pager.has_next_page());

        let ticket = pager.begin_request(3);
        pager.apply_page(ticket, page_of(vec![0; 5], 3, 25));
        assert!(!pager.has_next_page());
        assert_eq!(pager.len(), 25);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut pager = PagedAccumulator::new(10);
        let ticket = pager.begin_request(1);
        pager.apply_page(ticket, page_of(vec![1; 10], 1, 40));

        // A page 2 fetch goes out, then the filter changes and a new page 1
        // fetch supersedes it.
        let stale = pager.begin_request(2);
        pager.reset_query();
        let fresh = pager.begin_request(1);

        assert!(!pager.apply_page(stale, page_of(vec![2; 10], 2, 40)));
        assert_eq!(pager.items(), &[1; 10]);

        assert!(pager.apply_page(fresh, page_of(vec![3; 10], 1, 40)));
        assert_eq!(pager.items(), &[3; 10]);
    }

    #[test]
    fn test_error_keeps_has_next_for_retry() {
        let mut pager = PagedAccumulator::new(10);
        let ticket = pager.begin_request(1);
        pager.apply_page(ticket, page_of(vec![1; 10], 1, 25));

        let ticket = pager.begin_request(2);
        assert!(pager.apply_error(ticket, "boom"));
        assert!(pager.has_next_page());
        assert!(!pager.is_fetching());
        assert_eq!(pager.error(), Some("boom"));

        // The retry succeeds and clears the error.
        let ticket = pager.begin_request(2);
        pager.apply_page(ticket, page_of(vec![2; 10], 2, 25));
        assert_eq!(pager.error(), None);
        assert_eq!(pager.len(), 20);
    }

    #[test]
    fn test_reset_query_keeps_items_until_replacement() {
        let mut pager = PagedAccumulator::new(10);
        let ticket = pager.begin_request(1);
        pager.apply_page(ticket, page_of(vec![1; 10], 1, 10));
        assert!(pager.initially_loaded());

        pager.reset_query();
        // Old rows stay visible; no skeleton flash.
        assert_eq!(pager.len(), 10);
        assert!(pager.initially_loaded());
        assert_eq!(pager.next_page(), 1);
    }

    #[test]
    fn test_initially_loaded_flips_on_first_page() {
        let mut pager = PagedAccumulator::<i32>::new(10);
        assert!(!pager.initially_loaded());
        let ticket = pager.begin_request(1);
        pager.apply_page(ticket, Page::new(Vec::new(), 1, 10).with_total_count(0));
        assert!(pager.initially_loaded());
        assert!(!pager.has_next_page());
    }
}
