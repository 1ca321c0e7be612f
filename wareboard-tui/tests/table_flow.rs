//! Integration tests for the table widget driven the way the pages drive
//! it: paged data arriving out of the accumulator, long-press selection,
//! and the infinite-scroll decision.

use std::time::{Duration, Instant};

use wareboard_api::Page;
use wareboard_tui::data::{PagedAccumulator, should_fetch_next};
use wareboard_tui::table::{Column, LONG_PRESS_THRESHOLD, Table, TableAction};

#[derive(Debug, Clone)]
struct Item {
    id: String,
    name: String,
}

impl wareboard_tui::table::TableRow for Item {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, _key: &str) -> String {
        self.name.clone()
    }
}

fn items(range: std::ops::Range<usize>) -> Vec<Item> {
    range
        .map(|n| Item {
            id: format!("id-{n}"),
            name: format!("item {n}"),
        })
        .collect()
}

fn columns() -> Vec<Column> {
    vec![Column::new("name", "Name", 20).sortable()]
}

#[test]
fn test_selection_survives_loading_more_pages() {
    let table = Table::new(columns());
    let mut pager = PagedAccumulator::new(10);

    let ticket = pager.begin_request(1);
    pager.apply_page(ticket, Page::new(items(0..10), 1, 10).with_total_count(25));
    table.set_rows(pager.items().to_vec());

    // Long press on a row from page 1.
    let start = Instant::now();
    table.press_start("id-3", start);
    let action = table.poll_press(start + LONG_PRESS_THRESHOLD);
    assert_eq!(action, TableAction::EnterSelection("id-3".to_string()));

    // Page 2 arrives; the selection made on page 1 stays.
    let ticket = pager.begin_request(2);
    let page = Page::new(items(10..20), 2, 10).with_total_count(25);
    let new_items = page.items().to_vec();
    pager.apply_page(ticket, page);
    table.append_rows(new_items);

    assert_eq!(table.len(), 20);
    assert!(table.selection_mode());
    assert_eq!(table.selected_ids(), vec!["id-3".to_string()]);
}

#[test]
fn test_sort_change_replaces_rows_and_clears_selection() {
    let table = Table::new(columns());
    table.set_rows(items(0..10));
    table.enter_selection_mode("id-1");

    assert_eq!(table.toggle_sort(0), Some((0, true)));

    // The page re-queries with the new ordering and replaces the rows.
    table.set_rows(items(0..10));
    assert_eq!(table.selected_ids(), Vec::<String>::new());
}

#[test]
fn test_scroll_to_bottom_requests_next_page() {
    let table = Table::new(columns());
    let mut pager = PagedAccumulator::new(10);

    let ticket = pager.begin_request(1);
    pager.apply_page(ticket, Page::new(items(0..10), 1, 10).with_total_count(25));
    table.set_rows(pager.items().to_vec());
    table.set_viewport(40, 6);

    // 10 rows, 5 visible: the 5 below the fold sit exactly at the threshold.
    assert!(should_fetch_next(
        table.scroll_offset_y(),
        table.data_viewport_height(),
        table.content_height(),
        pager.has_next_page(),
        pager.is_fetching(),
    ));

    // A fetch already in flight blocks a second one.
    let _ticket = pager.begin_request(2);
    assert!(!should_fetch_next(
        table.scroll_offset_y(),
        table.data_viewport_height(),
        table.content_height(),
        pager.has_next_page(),
        pager.is_fetching(),
    ));
}

#[test]
fn test_release_after_long_press_does_not_activate() {
    let table = Table::new(columns());
    table.set_rows(items(0..3));

    let start = Instant::now();
    table.press_start("id-0", start);
    table.poll_press(start + LONG_PRESS_THRESHOLD);

    // The mouse-up that ends the long press is suppressed.
    let action = table.press_end(start + LONG_PRESS_THRESHOLD + Duration::from_millis(50));
    assert_eq!(action, TableAction::None);
    assert!(table.selection_mode());
}
