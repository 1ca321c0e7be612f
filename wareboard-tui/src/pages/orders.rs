//! Orders page: filterable, sortable order list with infinite scroll and
//! bulk selection.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use wareboard_api::model::{ColumnSetting, Order};
use wareboard_api::{ListQuery, OrderBy, Page};

use crate::data::{PagedAccumulator, RequestTicket, should_fetch_next};
use crate::table::{Column, PinSide, Table, TableRow};

use super::filter::OrderFilter;

impl TableRow for Order {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "order_number" => self.order_number.clone(),
            "customer_name" => self.customer_name.clone(),
            "status" => self.status.label().to_string(),
            "item_count" => self.item_count.to_string(),
            "total" => format!("{:.2}", self.total),
            "created_at" => self.created_at.format("%Y-%m-%d %H:%M").to_string(),
            _ => String::new(),
        }
    }
}

/// State behind the Orders screen.
pub struct OrdersPage {
    table: Table<Order>,
    pager: PagedAccumulator<Order>,
    filter: OrderFilter,
    order_by: Option<OrderBy>,
}

impl OrdersPage {
    pub fn new(page_size: u32) -> Self {
        Self {
            table: Table::new(Self::default_columns()),
            pager: PagedAccumulator::new(page_size),
            filter: OrderFilter::default(),
            order_by: None,
        }
    }

    /// Built-in column layout, used until server column settings load.
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column::new("order_number", "Order #", 12)
                .sortable()
                .pinned(PinSide::Left),
            Column::new("customer_name", "Customer", 24).sortable(),
            Column::new("status", "Status", 12),
            Column::new("item_count", "Items", 7),
            Column::new("total", "Total", 12).sortable(),
            Column::new("created_at", "Created", 18)
                .sortable()
                .pinned(PinSide::Right),
        ]
    }

    pub fn table(&self) -> &Table<Order> {
        &self.table
    }

    pub fn pager(&self) -> &PagedAccumulator<Order> {
        &self.pager
    }

    pub fn filter(&self) -> &OrderFilter {
        &self.filter
    }

    /// Replaces the column layout with server-stored settings.
    pub fn apply_column_settings(&mut self, settings: Vec<ColumnSetting>) {
        if settings.is_empty() {
            return;
        }
        let columns = settings.into_iter().map(Column::from).collect();
        self.table.set_columns(columns);
    }

    /// Builds the list query for the given page.
    pub fn query_for(&self, page: u32) -> ListQuery {
        let mut query = ListQuery::new()
            .page(page as usize)
            .page_size(self.pager.page_size() as usize);
        if let Some(filter) = self.filter.to_filter() {
            query = query.filter(filter);
        }
        if let Some(order_by) = &self.order_by {
            query = query.order_by(order_by.clone());
        }
        query
    }

    /// Registers an in-flight request and returns the ticket and query to
    /// run.
    pub fn begin_fetch(&mut self, page: u32) -> (RequestTicket, ListQuery) {
        let query = self.query_for(page);
        (self.pager.begin_request(page), query)
    }

    /// Applies a fetched page to the accumulator and the table.
    ///
    /// Page 1 replaces the table rows (clearing any selection); later pages
    /// append, leaving cursor and selection intact. Stale responses are
    /// dropped.
    pub fn apply_page(&mut self, ticket: RequestTicket, page: Page<Order>) {
        let appending = ticket.page() > 1;
        let new_items = page.items().to_vec();
        if !self.pager.apply_page(ticket, page) {
            return;
        }
        if appending {
            self.table.append_rows(new_items);
        } else {
            self.table.set_rows(self.pager.items().to_vec());
        }
    }

    /// Records a failed request.
    pub fn apply_error(&mut self, ticket: RequestTicket, message: impl Into<String>) {
        self.pager.apply_error(ticket, message);
    }

    /// Applies a new filter. Returns `true` when it changed, meaning the
    /// caller should fetch page 1 again.
    ///
    /// The previous rows stay on screen until the new page 1 arrives.
    pub fn set_filter(&mut self, filter: OrderFilter) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.pager.reset_query();
        true
    }

    /// Resets paging so the next fetch reloads from page 1 with the same
    /// filter and sort.
    pub fn refresh(&mut self) {
        self.pager.reset_query();
    }

    /// Toggles sorting on a column. Returns `true` when the sort changed,
    /// meaning the caller should fetch page 1 again.
    pub fn toggle_sort(&mut self, column_index: usize) -> bool {
        let Some((index, ascending)) = self.table.toggle_sort(column_index) else {
            return false;
        };
        let columns = self.table.columns();
        let Some(column) = columns.get(index) else {
            return false;
        };
        self.order_by = Some(if ascending {
            OrderBy::asc(&column.key)
        } else {
            OrderBy::desc(&column.key)
        });
        self.pager.reset_query();
        true
    }

    /// Whether the current scroll position warrants fetching the next page.
    pub fn wants_next_page(&self) -> bool {
        should_fetch_next(
            self.table.scroll_offset_y(),
            self.table.data_viewport_height(),
            self.table.content_height(),
            self.pager.has_next_page(),
            self.pager.is_fetching(),
        )
    }

    /// Renders the page: table plus a one-line footer.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if area.height < 2 {
            return;
        }
        let table_area = Rect {
            height: area.height - 1,
            ..area
        };
        let loading = !self.pager.initially_loaded();
        crate::table::render_table(frame, &self.table, table_area, loading);

        let footer_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(self.footer_line()).style(Style::new().fg(Color::DarkGray)),
            footer_area,
        );
    }

    fn footer_line(&self) -> String {
        if let Some(error) = self.pager.error() {
            return error.to_string();
        }
        let mut line = match self.pager.total_count() {
            Some(total) => format!("{} of {} orders", self.pager.len(), total),
            None => format!("{} orders", self.pager.len()),
        };
        if self.table.selection_mode() {
            line.push_str(&format!("  |  {} selected", self.table.selected_count()));
        }
        if self.pager.is_fetching() && self.pager.initially_loaded() {
            line.push_str("  |  loading...");
        }
        line
    }
}
