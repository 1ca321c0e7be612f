//! Infinite-scroll fetch decision.

/// Remaining rows below the viewport at which the next page is requested.
pub const FETCH_THRESHOLD_ROWS: u16 = 5;

/// Decides whether scrolling warrants fetching the next page.
///
/// Fires when the remaining scroll distance to the bottom is within
/// [`FETCH_THRESHOLD_ROWS`], a next page exists, and no fetch is already in
/// flight. A failed fetch leaves `has_next_page` true, so the next scroll
/// event retries naturally.
pub fn should_fetch_next(
    scroll_offset: u16,
    viewport_height: u16,
    content_height: u16,
    has_next_page: bool,
    is_fetching: bool,
) -> bool {
    if !has_next_page || is_fetching {
        return false;
    }
    let visible_bottom = scroll_offset.saturating_add(viewport_height);
    let remaining = content_height.saturating_sub(visible_bottom);
    remaining <= FETCH_THRESHOLD_ROWS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetches_near_bottom() {
        // 100 rows, viewport of 20, scrolled to 76: 4 rows remain.
        assert!(should_fetch_next(76, 20, 100, true, false));
    }

    #[test]
    fn test_no_fetch_far_from_bottom() {
        assert!(!should_fetch_next(0, 20, 100, true, false));
    }

    #[test]
    fn test_no_fetch_without_next_page() {
        assert!(!should_fetch_next(80, 20, 100, false, false));
    }

    #[test]
    fn test_no_fetch_while_in_flight() {
        assert!(!should_fetch_next(80, 20, 100, true, true));
    }

    #[test]
    fn test_short_content_fetches_immediately() {
        // Content does not even fill the viewport yet.
        assert!(should_fetch_next(0, 20, 5, true, false));
    }
}
