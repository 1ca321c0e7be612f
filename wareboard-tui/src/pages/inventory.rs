//! Inventory page: stock positions per SKU and location.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use wareboard_api::model::InventoryItem;
use wareboard_api::{Filter, ListQuery, Page};

use crate::data::{PagedAccumulator, RequestTicket, should_fetch_next};
use crate::table::{Column, PinSide, Table, TableRow};

impl TableRow for InventoryItem {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "sku" => self.sku.clone(),
            "description" => self.description.clone(),
            "location_code" => self.location_code.clone(),
            "on_hand" => self.on_hand.to_string(),
            "reserved" => self.reserved.to_string(),
            "available" => self.available().to_string(),
            "updated_at" => self.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            _ => String::new(),
        }
    }
}

/// State behind the Inventory screen.
pub struct InventoryPage {
    table: Table<InventoryItem>,
    pager: PagedAccumulator<InventoryItem>,
    warehouse_id: Option<String>,
    search: Option<String>,
}

impl InventoryPage {
    pub fn new(page_size: u32) -> Self {
        Self {
            table: Table::new(Self::default_columns()),
            pager: PagedAccumulator::new(page_size),
            warehouse_id: None,
            search: None,
        }
    }

    fn default_columns() -> Vec<Column> {
        vec![
            Column::new("sku", "SKU", 14).sortable().pinned(PinSide::Left),
            Column::new("description", "Description", 30),
            Column::new("location_code", "Location", 10),
            Column::new("on_hand", "On hand", 9).sortable(),
            Column::new("reserved", "Reserved", 9),
            Column::new("available", "Available", 9),
            Column::new("updated_at", "Updated", 18).sortable(),
        ]
    }

    pub fn table(&self) -> &Table<InventoryItem> {
        &self.table
    }

    pub fn pager(&self) -> &PagedAccumulator<InventoryItem> {
        &self.pager
    }

    /// Currently selected warehouse filter.
    pub fn warehouse_id(&self) -> Option<&str> {
        self.warehouse_id.as_deref()
    }

    /// Restricts the list to one warehouse. `None` lists all.
    pub fn set_warehouse(&mut self, warehouse_id: Option<String>) -> bool {
        if warehouse_id == self.warehouse_id {
            return false;
        }
        self.warehouse_id = warehouse_id;
        self.pager.reset_query();
        true
    }

    /// Sets the SKU substring search.
    pub fn set_search(&mut self, search: Option<String>) -> bool {
        if search == self.search {
            return false;
        }
        self.search = search;
        self.pager.reset_query();
        true
    }

    fn query_for(&self, page: u32) -> ListQuery {
        let mut query = ListQuery::new()
            .page(page as usize)
            .page_size(self.pager.page_size() as usize);
        let mut conditions = Vec::new();
        if let Some(warehouse_id) = &self.warehouse_id {
            conditions.push(Filter::eq("warehouse_id", warehouse_id.clone()));
        }
        if let Some(search) = &self.search {
            conditions.push(Filter::contains("sku", search.clone()));
        }
        if !conditions.is_empty() {
            query = query.filter(Filter::and(conditions));
        }
        query
    }

    pub fn begin_fetch(&mut self, page: u32) -> (RequestTicket, ListQuery) {
        let query = self.query_for(page);
        (self.pager.begin_request(page), query)
    }

    pub fn apply_page(&mut self, ticket: RequestTicket, page: Page<InventoryItem>) {
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

    pub fn apply_error(&mut self, ticket: RequestTicket, message: impl Into<String>) {
        self.pager.apply_error(ticket, message);
    }

    pub fn wants_next_page(&self) -> bool {
        should_fetch_next(
            self.table.scroll_offset_y(),
            self.table.data_viewport_height(),
            self.table.content_height(),
            self.pager.has_next_page(),
            self.pager.is_fetching(),
        )
    }

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

        let footer = if let Some(error) = self.pager.error() {
            error.to_string()
        } else {
            match self.pager.total_count() {
                Some(total) => format!("{} of {} positions", self.pager.len(), total),
                None => format!("{} positions", self.pager.len()),
            }
        };
        let footer_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(footer).style(Style::new().fg(Color::DarkGray)),
            footer_area,
        );
    }
}
