//! Tasks page: warehouse floor work with bulk completion.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use wareboard_api::model::{TaskStatus, WarehouseTask};
use wareboard_api::{Filter, ListQuery, Page};

use crate::data::{PagedAccumulator, RequestTicket, should_fetch_next};
use crate::table::{Column, PinSide, Table, TableRow};

use super::MAX_BULK_SELECTION;

impl TableRow for WarehouseTask {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "task_type" => self.task_type.label().to_string(),
            "status" => self.status.label().to_string(),
            "assignee" => self.assignee.clone().unwrap_or_default(),
            "order_id" => self.order_id.clone().unwrap_or_default(),
            "location_code" => self.location_code.clone(),
            "due_at" => self
                .due_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// State behind the Tasks screen.
pub struct TasksPage {
    table: Table<WarehouseTask>,
    pager: PagedAccumulator<WarehouseTask>,
    status: Option<TaskStatus>,
}

impl TasksPage {
    pub fn new(page_size: u32) -> Self {
        Self {
            table: Table::new(Self::default_columns()),
            pager: PagedAccumulator::new(page_size),
            status: Some(TaskStatus::Open),
        }
    }

    fn default_columns() -> Vec<Column> {
        vec![
            Column::new("task_type", "Type", 9).pinned(PinSide::Left),
            Column::new("status", "Status", 12),
            Column::new("location_code", "Location", 10),
            Column::new("assignee", "Assignee", 16),
            Column::new("order_id", "Order", 12),
            Column::new("due_at", "Due", 18).sortable(),
        ]
    }

    pub fn table(&self) -> &Table<WarehouseTask> {
        &self.table
    }

    pub fn pager(&self) -> &PagedAccumulator<WarehouseTask> {
        &self.pager
    }

    /// Cycles the status filter: Open, In progress, Done, all.
    pub fn cycle_status_filter(&mut self) -> bool {
        self.status = match self.status {
            Some(TaskStatus::Open) => Some(TaskStatus::InProgress),
            Some(TaskStatus::InProgress) => Some(TaskStatus::Done),
            Some(TaskStatus::Done) => None,
            None => Some(TaskStatus::Open),
        };
        self.pager.reset_query();
        true
    }

    fn query_for(&self, page: u32) -> ListQuery {
        let mut query = ListQuery::new()
            .page(page as usize)
            .page_size(self.pager.page_size() as usize);
        if let Some(status) = self.status {
            query = query.filter(Filter::eq("status", status.as_str()));
        }
        query
    }

    pub fn begin_fetch(&mut self, page: u32) -> (RequestTicket, ListQuery) {
        let query = self.query_for(page);
        (self.pager.begin_request(page), query)
    }

    pub fn apply_page(&mut self, ticket: RequestTicket, page: Page<WarehouseTask>) {
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

    /// Ids for a bulk completion, capped at [`MAX_BULK_SELECTION`].
    ///
    /// Returns an error message instead of silently truncating when the
    /// selection exceeds the cap.
    pub fn selection_for_completion(&self) -> Result<Vec<String>, String> {
        let ids = self.table.selected_ids();
        if ids.is_empty() {
            return Err("nothing selected".to_string());
        }
        if ids.len() > MAX_BULK_SELECTION {
            return Err(format!(
                "cannot complete more than {MAX_BULK_SELECTION} tasks at once ({} selected)",
                ids.len()
            ));
        }
        Ok(ids)
    }

    /// After a successful bulk completion: exit selection mode and reload
    /// from page 1 so completed tasks drop out of a filtered list.
    pub fn after_completion(&mut self) {
        self.table.exit_selection_mode();
        self.pager.reset_query();
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

        let mut footer = if let Some(error) = self.pager.error() {
            error.to_string()
        } else {
            let status = match self.status {
                Some(status) => status.label(),
                None => "All",
            };
            format!("{} tasks  |  filter: {status}", self.pager.len())
        };
        if self.table.selection_mode() {
            footer.push_str(&format!(
                "  |  {} selected (c to complete)",
                self.table.selected_count()
            ));
        }
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
