//! Application event loop and screen wiring.
//!
//! The loop multiplexes three sources with `tokio::select!`: terminal input,
//! a tick for the long-press timer, and a message channel carrying results
//! of spawned fetches. Fetch tasks never touch app state directly; they send
//! a message holding the request ticket, and the page decides whether the
//! response is still current.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use log::{debug, error, info};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc;

use wareboard_api::lookups::CachedLookups;
use wareboard_api::model::{
    AuditEntry, ColumnSetting, InventoryItem, Order, OrderDetail, OrderStatus, TaskStatus,
    Warehouse, WarehouseTask,
};
use wareboard_api::{ListQuery, Page, WarehouseClient};

use crate::data::RequestTicket;
use crate::pages::{
    InventoryPage, OrderDetailPage, OrderFilter, OrdersPage, Route, TasksPage,
};
use crate::presets::{ORDER_FILTER_PREFIX, PresetStore};
use crate::table::TableAction;

/// Interval driving the long-press timer poll.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Height of the tab bar at the top of the screen.
const TAB_BAR_HEIGHT: u16 = 1;

/// Results delivered back to the event loop by spawned tasks.
enum Msg {
    Orders(RequestTicket, Result<Page<Order>, String>),
    Inventory(RequestTicket, Result<Page<InventoryItem>, String>),
    Tasks(RequestTicket, Result<Page<WarehouseTask>, String>),
    Detail(String, Result<OrderDetail, String>),
    Audit(String, Result<Vec<AuditEntry>, String>),
    OrderColumns(Vec<ColumnSetting>),
    Warehouses(Vec<Warehouse>),
    TasksCompleted(Result<usize, String>),
    FilterPresetLoaded(Option<OrderFilter>),
}

/// Top-level application state.
pub struct App {
    client: WarehouseClient,
    lookups: CachedLookups,
    presets: Option<PresetStore>,
    route: Route,
    orders: OrdersPage,
    inventory: InventoryPage,
    tasks: TasksPage,
    detail: Option<OrderDetailPage>,
    warehouses: Vec<Warehouse>,
    status_line: Option<String>,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    should_quit: bool,
}

impl App {
    pub fn new(
        client: WarehouseClient,
        lookups: CachedLookups,
        presets: Option<PresetStore>,
        page_size: u32,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            lookups,
            presets,
            route: Route::Orders,
            orders: OrdersPage::new(page_size),
            inventory: InventoryPage::new(page_size),
            tasks: TasksPage::new(page_size),
            detail: None,
            warehouses: Vec::new(),
            status_line: None,
            tx,
            rx,
            should_quit: false,
        }
    }

    /// Runs the application until the user quits.
    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.fetch_orders(1);
        self.fetch_column_settings();
        self.fetch_warehouses();

        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK_INTERVAL);

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                event = events.next() => {
                    match event {
                        Some(Ok(Event::Key(key))) => self.on_key(key),
                        Some(Ok(Event::Mouse(mouse))) => self.on_mouse(mouse),
                        Some(Err(e)) => {
                            error!("terminal event error: {e}");
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                _ = tick.tick() => self.on_tick(),
                msg = self.rx.recv() => {
                    if let Some(msg) = msg {
                        self.on_msg(msg);
                    }
                }
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.height <= TAB_BAR_HEIGHT {
            return;
        }

        self.draw_tab_bar(frame, Rect { height: TAB_BAR_HEIGHT, ..area });

        let page_area = Rect {
            x: area.x,
            y: area.y + TAB_BAR_HEIGHT,
            width: area.width,
            height: area.height - TAB_BAR_HEIGHT,
        };

        match &self.route {
            Route::Orders => self.orders.render(frame, page_area),
            Route::Inventory => self.inventory.render(frame, page_area),
            Route::Tasks => self.tasks.render(frame, page_area),
            Route::OrderDetail(_) => {
                if let Some(detail) = &self.detail {
                    detail.render(frame, page_area);
                }
            }
        }

        if let Some(status) = &self.status_line {
            let status_area = Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(status.as_str()).style(Style::new().fg(Color::Yellow)),
                status_area,
            );
        }
    }

    fn draw_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for route in [Route::Orders, Route::Inventory, Route::Tasks] {
            let active = std::mem::discriminant(&route) == std::mem::discriminant(&self.route)
                || (matches!(self.route, Route::OrderDetail(_)) && route == Route::Orders);
            let style = if active {
                Style::new().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", route.title()), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    fn on_key(&mut self, key: KeyEvent) {
        self.status_line = None;

        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Tab {
            self.next_route();
            return;
        }

        match &self.route {
            Route::Orders => self.on_orders_key(key),
            Route::Inventory => self.on_inventory_key(key),
            Route::Tasks => self.on_tasks_key(key),
            Route::OrderDetail(_) => {
                if key.code == KeyCode::Esc {
                    self.route = Route::Orders;
                    self.detail = None;
                }
            }
        }
    }

    fn on_orders_key(&mut self, key: KeyEvent) {
        let table = self.orders.table().clone();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                table.cursor_down();
                self.maybe_fetch_more();
            }
            KeyCode::Char('k') | KeyCode::Up => table.cursor_up(),
            KeyCode::Enter => {
                if let Some(id) = table.cursor_id() {
                    self.open_order(id);
                }
            }
            KeyCode::Char(' ') => {
                if table.selection_mode() {
                    table.toggle_select_at_cursor();
                } else if let Some(id) = table.cursor_id() {
                    table.enter_selection_mode(id);
                }
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                table.select_all();
            }
            KeyCode::Esc => table.exit_selection_mode(),
            KeyCode::Char('s') => {
                let mut filter = self.orders.filter().clone();
                filter.status = next_status_filter(filter.status);
                if self.orders.set_filter(filter) {
                    self.fetch_orders(1);
                }
            }
            KeyCode::Char('p') => self.save_filter_preset(),
            KeyCode::Char('P') => self.load_filter_preset(),
            KeyCode::Char('r') => {
                self.orders.refresh();
                self.fetch_orders(1);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if self.orders.toggle_sort(index) {
                    self.fetch_orders(1);
                }
            }
            _ => {}
        }
    }

    fn on_inventory_key(&mut self, key: KeyEvent) {
        let table = self.inventory.table().clone();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                table.cursor_down();
                self.maybe_fetch_more();
            }
            KeyCode::Char('k') | KeyCode::Up => table.cursor_up(),
            KeyCode::Char('w') => {
                let next = next_warehouse(&self.warehouses, self.inventory.warehouse_id());
                if self.inventory.set_warehouse(next) {
                    self.fetch_inventory(1);
                }
            }
            KeyCode::Char('r') => {
                self.inventory.set_search(None);
                self.fetch_inventory(1);
            }
            _ => {}
        }
    }

    fn on_tasks_key(&mut self, key: KeyEvent) {
        let table = self.tasks.table().clone();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                table.cursor_down();
                self.maybe_fetch_more();
            }
            KeyCode::Char('k') | KeyCode::Up => table.cursor_up(),
            KeyCode::Char(' ') => {
                if table.selection_mode() {
                    table.toggle_select_at_cursor();
                } else if let Some(id) = table.cursor_id() {
                    table.enter_selection_mode(id);
                }
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                table.select_all();
            }
            KeyCode::Esc => table.exit_selection_mode(),
            KeyCode::Char('f') => {
                if self.tasks.cycle_status_filter() {
                    self.fetch_tasks(1);
                }
            }
            KeyCode::Char('c') => self.complete_selected_tasks(),
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        // Table rows start below the tab bar; y within the table widget is
        // mouse row minus that offset, with 0 being the header.
        let table_y = mouse.row.saturating_sub(TAB_BAR_HEIGHT);
        let now = Instant::now();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match &self.route {
                Route::Orders => {
                    let table = self.orders.table();
                    if let Some(index) = table.index_from_viewport_y(table_y)
                        && let Some(row) = table.row(index)
                    {
                        table.press_start(row.id, now);
                    }
                }
                Route::Tasks => {
                    let table = self.tasks.table();
                    if let Some(index) = table.index_from_viewport_y(table_y)
                        && let Some(row) = table.row(index)
                    {
                        table.press_start(row.id, now);
                    }
                }
                _ => {}
            },
            MouseEventKind::Up(MouseButton::Left) => {
                let action = match &self.route {
                    Route::Orders => self.orders.table().press_end(now),
                    Route::Tasks => self.tasks.table().press_end(now),
                    _ => TableAction::None,
                };
                self.handle_table_action(action);
            }
            MouseEventKind::ScrollDown => {
                self.active_scroll(3);
                self.maybe_fetch_more();
            }
            MouseEventKind::ScrollUp => self.active_scroll(-3),
            _ => {}
        }
    }

    fn on_tick(&mut self) {
        let now = Instant::now();
        let action = match &self.route {
            Route::Orders => self.orders.table().poll_press(now),
            Route::Tasks => self.tasks.table().poll_press(now),
            _ => TableAction::None,
        };
        self.handle_table_action(action);
    }

    fn handle_table_action(&mut self, action: TableAction) {
        match action {
            TableAction::None => {}
            TableAction::Activate(id) => {
                if self.route == Route::Orders {
                    self.open_order(id);
                }
            }
            TableAction::Toggle(id) => debug!("toggled selection for {id}"),
            TableAction::EnterSelection(id) => {
                debug!("entered selection mode via long press on {id}");
                bell();
            }
        }
    }

    fn active_scroll(&mut self, delta: i16) {
        match &self.route {
            Route::Orders => self.orders.table().scroll_y_by(delta),
            Route::Inventory => self.inventory.table().scroll_y_by(delta),
            Route::Tasks => self.tasks.table().scroll_y_by(delta),
            Route::OrderDetail(_) => {}
        }
    }

    fn next_route(&mut self) {
        self.route = match self.route {
            Route::Orders => Route::Inventory,
            Route::Inventory => Route::Tasks,
            Route::Tasks | Route::OrderDetail(_) => Route::Orders,
        };
        self.detail = None;
        self.ensure_loaded();
    }

    /// Kick off the first fetch for a page the user just switched to.
    fn ensure_loaded(&mut self) {
        match self.route {
            Route::Orders if !self.orders.pager().initially_loaded() => self.fetch_orders(1),
            Route::Inventory if !self.inventory.pager().initially_loaded() => {
                self.fetch_inventory(1);
            }
            Route::Tasks if !self.tasks.pager().initially_loaded() => self.fetch_tasks(1),
            _ => {}
        }
    }

    // -------------------------------------------------------------------------
    // Fetches
    // -------------------------------------------------------------------------

    fn maybe_fetch_more(&mut self) {
        match self.route {
            Route::Orders if self.orders.wants_next_page() => {
                let page = self.orders.pager().next_page();
                self.fetch_orders(page);
            }
            Route::Inventory if self.inventory.wants_next_page() => {
                let page = self.inventory.pager().next_page();
                self.fetch_inventory(page);
            }
            Route::Tasks if self.tasks.wants_next_page() => {
                let page = self.tasks.pager().next_page();
                self.fetch_tasks(page);
            }
            _ => {}
        }
    }

    fn fetch_orders(&mut self, page: u32) {
        let (ticket, query) = self.orders.begin_fetch(page);
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.list_orders(&query).await.map_err(|e| {
                error!("orders fetch failed: {e}");
                e.user_message().to_string()
            });
            let _ = tx.send(Msg::Orders(ticket, result));
        });
    }

    fn fetch_inventory(&mut self, page: u32) {
        let (ticket, query) = self.inventory.begin_fetch(page);
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.list_inventory(&query).await.map_err(|e| {
                error!("inventory fetch failed: {e}");
                e.user_message().to_string()
            });
            let _ = tx.send(Msg::Inventory(ticket, result));
        });
    }

    fn fetch_tasks(&mut self, page: u32) {
        let (ticket, query) = self.tasks.begin_fetch(page);
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.list_tasks(&query).await.map_err(|e| {
                error!("tasks fetch failed: {e}");
                e.user_message().to_string()
            });
            let _ = tx.send(Msg::Tasks(ticket, result));
        });
    }

    fn open_order(&mut self, id: String) {
        self.route = Route::OrderDetail(id.clone());
        self.detail = Some(OrderDetailPage::new(id.clone()));

        let client = self.client.clone();
        let tx = self.tx.clone();
        let detail_id = id.clone();
        tokio::spawn(async move {
            let result = client.order_detail(&detail_id).await.map_err(|e| {
                error!("order detail fetch failed: {e}");
                e.user_message().to_string()
            });
            let _ = tx.send(Msg::Detail(detail_id, result));
        });

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client
                .list_audit(&id, &ListQuery::new())
                .await
                .map(Page::into_items)
                .map_err(|e| {
                    error!("audit fetch failed: {e}");
                    e.user_message().to_string()
                });
            let _ = tx.send(Msg::Audit(id, result));
        });
    }

    fn fetch_column_settings(&self) {
        let lookups = self.lookups.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match lookups.column_settings("orders").await {
                Ok(response) => {
                    let _ = tx.send(Msg::OrderColumns(response.into_inner()));
                }
                Err(e) => error!("column settings fetch failed: {e}"),
            }
        });
    }

    fn fetch_warehouses(&self) {
        let lookups = self.lookups.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match lookups.warehouses().await {
                Ok(response) => {
                    let _ = tx.send(Msg::Warehouses(response.into_inner()));
                }
                Err(e) => error!("warehouse lookup failed: {e}"),
            }
        });
    }

    fn complete_selected_tasks(&mut self) {
        let ids = match self.tasks.selection_for_completion() {
            Ok(ids) => ids,
            Err(message) => {
                self.status_line = Some(message);
                return;
            }
        };

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client
                .update_task_status(&ids, TaskStatus::Done)
                .await
                .map_err(|e| {
                    error!("task completion failed: {e}");
                    e.user_message().to_string()
                });
            let _ = tx.send(Msg::TasksCompleted(result));
        });
    }

    fn save_filter_preset(&mut self) {
        let Some(presets) = self.presets.clone() else {
            self.status_line = Some("preset storage unavailable".to_string());
            return;
        };
        let filter = self.orders.filter().clone();
        if let Err(e) = filter.validate() {
            self.status_line = Some(e.to_string());
            return;
        }
        self.status_line = Some("filter preset saved".to_string());
        tokio::spawn(async move {
            if let Err(e) = presets.set(ORDER_FILTER_PREFIX, "default", &filter).await {
                error!("failed to save filter preset: {e}");
            }
        });
    }

    fn load_filter_preset(&mut self) {
        let Some(presets) = self.presets.clone() else {
            self.status_line = Some("preset storage unavailable".to_string());
            return;
        };
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match presets.get::<OrderFilter>(ORDER_FILTER_PREFIX, "default").await {
                Ok(filter) => {
                    let _ = tx.send(Msg::FilterPresetLoaded(filter));
                }
                Err(e) => error!("failed to load filter preset: {e}"),
            }
        });
    }

    // -------------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------------

    fn on_msg(&mut self, msg: Msg) {
        match msg {
            Msg::Orders(ticket, Ok(page)) => {
                self.orders.apply_page(ticket, page);
                self.maybe_fetch_more();
            }
            Msg::Orders(ticket, Err(message)) => self.orders.apply_error(ticket, message),
            Msg::Inventory(ticket, Ok(page)) => {
                self.inventory.apply_page(ticket, page);
                self.maybe_fetch_more();
            }
            Msg::Inventory(ticket, Err(message)) => self.inventory.apply_error(ticket, message),
            Msg::Tasks(ticket, Ok(page)) => {
                self.tasks.apply_page(ticket, page);
                self.maybe_fetch_more();
            }
            Msg::Tasks(ticket, Err(message)) => self.tasks.apply_error(ticket, message),
            Msg::Detail(id, result) => {
                if let Some(detail) = &mut self.detail
                    && detail.order_id() == id
                {
                    match result {
                        Ok(order) => detail.set_detail(order),
                        Err(message) => detail.set_error(message),
                    }
                }
            }
            Msg::Audit(id, result) => {
                if let Some(detail) = &mut self.detail
                    && detail.order_id() == id
                {
                    match result {
                        Ok(entries) => detail.set_audit(entries),
                        // The trail is supplementary; the page stays usable.
                        Err(message) => error!("audit trail unavailable for {id}: {message}"),
                    }
                }
            }
            Msg::OrderColumns(settings) => self.orders.apply_column_settings(settings),
            Msg::Warehouses(warehouses) => {
                info!("loaded {} warehouses", warehouses.len());
                self.warehouses = warehouses;
            }
            Msg::TasksCompleted(Ok(count)) => {
                self.status_line = Some(format!("{count} tasks completed"));
                self.tasks.after_completion();
                self.fetch_tasks(1);
            }
            Msg::TasksCompleted(Err(message)) => self.status_line = Some(message),
            Msg::FilterPresetLoaded(Some(filter)) => {
                if self.orders.set_filter(filter) {
                    self.fetch_orders(1);
                }
                self.status_line = Some("filter preset loaded".to_string());
            }
            Msg::FilterPresetLoaded(None) => {
                self.status_line = Some("no saved filter preset".to_string());
            }
        }
    }
}

/// Cycles the order status filter through all statuses and back to none.
fn next_status_filter(current: Option<OrderStatus>) -> Option<OrderStatus> {
    let all = OrderStatus::all();
    match current {
        None => all.first().copied(),
        Some(status) => {
            let pos = all.iter().position(|s| *s == status);
            pos.and_then(|p| all.get(p + 1)).copied()
        }
    }
}

/// Picks the next warehouse in the lookup list, wrapping to "all".
fn next_warehouse(warehouses: &[Warehouse], current: Option<&str>) -> Option<String> {
    if warehouses.is_empty() {
        return None;
    }
    match current {
        None => warehouses.first().map(|w| w.id.clone()),
        Some(id) => {
            let pos = warehouses.iter().position(|w| w.id == id);
            pos.and_then(|p| warehouses.get(p + 1)).map(|w| w.id.clone())
        }
    }
}

/// Terminal bell, the closest analogue to a haptic pulse.
fn bell() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
