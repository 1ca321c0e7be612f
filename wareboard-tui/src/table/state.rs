//! Table widget state.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::item::{Column, TableRow};
use super::longpress::{LongPress, PressEnd};
use super::selection::Selection;
use super::sticky::{StickyLayout, compute_sticky_layout};

/// Row height in terminal cells.
const ROW_HEIGHT: u16 = 1;

/// What the app should do after a press interaction resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Nothing to do.
    None,
    /// Open the row (normal click outside selection mode).
    Activate(String),
    /// The row's selection was toggled (click inside selection mode).
    Toggle(String),
    /// A long press fired; selection mode is now active, seeded with this
    /// row. The caller may emit a feedback pulse.
    EnterSelection(String),
}

/// Internal state for the Table widget.
#[derive(Debug)]
pub(super) struct TableInner<T: TableRow> {
    /// Column definitions.
    pub columns: Vec<Column>,
    /// The rows in the table.
    pub rows: Vec<T>,
    /// Selection state (by row id).
    pub selection: Selection,
    /// Whether bulk-selection mode is active.
    pub selection_mode: bool,
    /// Long-press detector driving selection-mode entry.
    pub long_press: LongPress,
    /// Pinned-column placements, recomputed when columns or selection mode
    /// change.
    pub sticky: StickyLayout,
    /// Current cursor position (focused row).
    pub cursor: Option<usize>,
    /// Vertical scroll offset in rows.
    pub scroll_offset_y: u16,
    /// Horizontal scroll offset in terminal columns.
    pub scroll_offset_x: u16,
    /// Viewport height (including header row).
    pub viewport_height: u16,
    /// Viewport width (available for columns).
    pub viewport_width: u16,
    /// Current sort state (column index, ascending).
    pub sort: Option<(usize, bool)>,
}

impl<T: TableRow> TableInner<T> {
    fn new(columns: Vec<Column>) -> Self {
        let sticky = compute_sticky_layout(&columns, false);
        Self {
            columns,
            rows: Vec::new(),
            selection: Selection::new(),
            selection_mode: false,
            long_press: LongPress::new(),
            sticky,
            cursor: None,
            scroll_offset_y: 0,
            scroll_offset_x: 0,
            viewport_height: 0,
            viewport_width: 0,
            sort: None,
        }
    }

    fn total_width(&self) -> u16 {
        self.columns.iter().map(|c| c.width).sum()
    }

    fn all_ids(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.id()).collect()
    }

    fn recompute_sticky(&mut self) {
        self.sticky = compute_sticky_layout(&self.columns, self.selection_mode);
    }
}

/// A scrolling data table with sortable headers, pinned columns, and
/// long-press bulk selection.
///
/// State lives behind an `Arc<RwLock<..>>` so event handlers and the
/// renderer share one instance; a dirty flag tells the draw loop when a
/// repaint is needed. Sorting is app-controlled: the table only records the
/// requested column and direction, the app re-fetches and calls
/// [`Table::set_rows`].
#[derive(Debug)]
pub struct Table<T: TableRow> {
    pub(super) inner: Arc<RwLock<TableInner<T>>>,
    pub(super) dirty: Arc<AtomicBool>,
}

impl<T: TableRow> Table<T> {
    /// Create a new table with column definitions.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TableInner::new(columns))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a table with initial rows.
    pub fn with_rows(columns: Vec<Column>, rows: Vec<T>) -> Self {
        let table = Self::new(columns);
        table.set_rows(rows);
        table.clear_dirty();
        table
    }

    // -------------------------------------------------------------------------
    // Column access
    // -------------------------------------------------------------------------

    /// Get the column definitions.
    pub fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    /// Set the column definitions.
    pub fn set_columns(&self, columns: Vec<Column>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.columns = columns;
            guard.scroll_offset_x = 0;
            guard.sort = None;
            guard.recompute_sticky();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get total content width (sum of all column widths).
    pub fn total_width(&self) -> u16 {
        self.inner.read().map(|g| g.total_width()).unwrap_or(0)
    }

    /// Get the pinned-column layout.
    pub fn sticky_layout(&self) -> StickyLayout {
        self.inner
            .read()
            .map(|g| g.sticky.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Row access
    // -------------------------------------------------------------------------

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by index.
    pub fn row(&self, index: usize) -> Option<T> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.rows.get(index).cloned())
    }

    /// Get all rows.
    pub fn rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    /// Replace all rows.
    ///
    /// Selection is cleared because ids from the previous data set no longer
    /// correspond to what is on screen; the cursor is clamped into range.
    pub fn set_rows(&self, rows: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
            if let Some(cursor) = guard.cursor
                && cursor >= guard.rows.len()
            {
                guard.cursor = guard.rows.len().checked_sub(1);
            }
            guard.selection.clear();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Extend the row list in place, preserving selection and cursor.
    ///
    /// Used when a further page of the same query arrives.
    pub fn append_rows(&self, rows: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows.extend(rows);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    /// Get the current cursor position.
    pub fn cursor(&self) -> Option<usize> {
        self.inner.read().ok().and_then(|g| g.cursor)
    }

    /// Get the row at the cursor position.
    pub fn cursor_row(&self) -> Option<T> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.cursor.and_then(|c| g.rows.get(c).cloned()))
    }

    /// Get the id of the row at the cursor position.
    pub fn cursor_id(&self) -> Option<String> {
        self.cursor_row().map(|row| row.id())
    }

    /// Move cursor up one row.
    pub fn cursor_up(&self) {
        if let Ok(mut guard) = self.inner.write() {
            match guard.cursor {
                Some(cursor) if cursor > 0 => guard.cursor = Some(cursor - 1),
                None if !guard.rows.is_empty() => guard.cursor = Some(0),
                _ => return,
            }
            Self::scroll_cursor_into_view(&mut guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Move cursor down one row.
    pub fn cursor_down(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let max_index = guard.rows.len().saturating_sub(1);
            match guard.cursor {
                Some(cursor) if cursor < max_index => guard.cursor = Some(cursor + 1),
                None if !guard.rows.is_empty() => guard.cursor = Some(0),
                _ => return,
            }
            Self::scroll_cursor_into_view(&mut guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn scroll_cursor_into_view(guard: &mut TableInner<T>) {
        let Some(cursor) = guard.cursor else { return };
        let row_top = cursor as u16 * ROW_HEIGHT;
        let row_bottom = row_top + ROW_HEIGHT;
        let data_viewport = guard.viewport_height.saturating_sub(1);
        if data_viewport == 0 {
            return;
        }
        if row_top < guard.scroll_offset_y {
            guard.scroll_offset_y = row_top;
        } else if row_bottom > guard.scroll_offset_y + data_viewport {
            guard.scroll_offset_y = row_bottom.saturating_sub(data_viewport);
        }
    }

    // -------------------------------------------------------------------------
    // Selection mode and long press
    // -------------------------------------------------------------------------

    /// Whether bulk-selection mode is active.
    pub fn selection_mode(&self) -> bool {
        self.inner.read().map(|g| g.selection_mode).unwrap_or(false)
    }

    /// Enter selection mode, seeding the selection with one row.
    pub fn enter_selection_mode(&self, seed_id: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection_mode = true;
            guard.selection.insert(seed_id);
            guard.recompute_sticky();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Exit selection mode. Clears the set and the mode flag unconditionally.
    pub fn exit_selection_mode(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection_mode = false;
            guard.selection.clear();
            guard.long_press.cancel();
            guard.recompute_sticky();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Begin a press on a row (mouse down).
    pub fn press_start(&self, row_id: impl Into<String>, now: Instant) {
        if let Ok(mut guard) = self.inner.write() {
            guard.long_press.press_start(row_id, now);
        }
    }

    /// Advance the long-press timer. Call from the app tick loop.
    ///
    /// When the threshold elapses this enters selection mode seeded with the
    /// pressed row and returns [`TableAction::EnterSelection`] exactly once.
    pub fn poll_press(&self, now: Instant) -> TableAction {
        if let Ok(mut guard) = self.inner.write()
            && let Some(row_id) = guard.long_press.poll(now)
        {
            guard.selection_mode = true;
            guard.selection.insert(row_id.clone());
            guard.recompute_sticky();
            self.dirty.store(true, Ordering::SeqCst);
            return TableAction::EnterSelection(row_id);
        }
        TableAction::None
    }

    /// End a press on a row (mouse up).
    ///
    /// A short press is a click: it toggles the row in selection mode and
    /// activates it otherwise. Releases right after a long-press fire are
    /// suppressed so entering selection mode never also navigates.
    pub fn press_end(&self, now: Instant) -> TableAction {
        if let Ok(mut guard) = self.inner.write() {
            match guard.long_press.press_end(now) {
                PressEnd::Click(row_id) => {
                    if guard.selection_mode {
                        guard.selection.toggle(&row_id);
                        self.dirty.store(true, Ordering::SeqCst);
                        return TableAction::Toggle(row_id);
                    }
                    return TableAction::Activate(row_id);
                }
                PressEnd::Suppressed | PressEnd::None => {}
            }
        }
        TableAction::None
    }

    /// Disarm an in-flight press, e.g. when the pointer leaves the row.
    pub fn press_cancel(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.long_press.cancel();
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Get all selected ids.
    pub fn selected_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.selection.selected())
            .unwrap_or_default()
    }

    /// Get all selected rows.
    pub fn selected_rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| {
                g.rows
                    .iter()
                    .filter(|row| g.selection.is_selected(&row.id()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.inner.read().map(|g| g.selection.len()).unwrap_or(0)
    }

    /// Check if a row is selected by id.
    pub fn is_selected(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(id))
            .unwrap_or(false)
    }

    /// Toggle selection of a row by id. No-op outside selection mode.
    pub fn toggle_select(&self, id: &str) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.selection_mode
        {
            let selected = guard.selection.toggle(id);
            self.dirty.store(true, Ordering::SeqCst);
            return selected;
        }
        false
    }

    /// Toggle selection of the row at the cursor.
    pub fn toggle_select_at_cursor(&self) -> bool {
        match self.cursor_id() {
            Some(id) => self.toggle_select(&id),
            None => false,
        }
    }

    /// Select all loaded rows. No-op outside selection mode.
    pub fn select_all(&self) -> usize {
        if let Ok(mut guard) = self.inner.write()
            && guard.selection_mode
            && !guard.rows.is_empty()
        {
            let all_ids = guard.all_ids();
            let added = guard.selection.select_all(&all_ids);
            self.dirty.store(true, Ordering::SeqCst);
            return added;
        }
        0
    }

    /// Check whether every loaded row is selected.
    pub fn is_all_selected(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_all_selected(&g.all_ids()))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get current sort state (column index, ascending).
    pub fn sort(&self) -> Option<(usize, bool)> {
        self.inner.read().ok().and_then(|g| g.sort)
    }

    /// Toggle sort for a column.
    ///
    /// A new column sorts ascending; the same column flips direction.
    /// Non-sortable columns are ignored. Only the sort state is recorded;
    /// the app re-fetches ordered data and calls `set_rows()`.
    pub fn toggle_sort(&self, column_index: usize) -> Option<(usize, bool)> {
        if let Ok(mut guard) = self.inner.write()
            && column_index < guard.columns.len()
            && guard.columns[column_index].sortable
        {
            let new_sort = match guard.sort {
                Some((idx, asc)) if idx == column_index => (column_index, !asc),
                _ => (column_index, true),
            };
            guard.sort = Some(new_sort);
            self.dirty.store(true, Ordering::SeqCst);
            return Some(new_sort);
        }
        None
    }

    // -------------------------------------------------------------------------
    // Scrolling and viewport
    // -------------------------------------------------------------------------

    /// Get the vertical scroll offset (in rows).
    pub fn scroll_offset_y(&self) -> u16 {
        self.inner.read().map(|g| g.scroll_offset_y).unwrap_or(0)
    }

    /// Scroll vertically by N rows (can be negative).
    pub fn scroll_y_by(&self, delta: i16) {
        if let Ok(mut guard) = self.inner.write() {
            let max_offset = Self::max_scroll_offset_y_inner(&guard);
            let new_y =
                (guard.scroll_offset_y as i32 + delta as i32).clamp(0, max_offset as i32) as u16;
            if new_y != guard.scroll_offset_y {
                guard.scroll_offset_y = new_y;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Get the horizontal scroll offset (in terminal columns).
    pub fn scroll_offset_x(&self) -> u16 {
        self.inner.read().map(|g| g.scroll_offset_x).unwrap_or(0)
    }

    /// Scroll horizontally by N columns (can be negative).
    pub fn scroll_x_by(&self, delta: i16) {
        if let Ok(mut guard) = self.inner.write() {
            let max_offset = guard.total_width().saturating_sub(guard.viewport_width);
            let new_x =
                (guard.scroll_offset_x as i32 + delta as i32).clamp(0, max_offset as i32) as u16;
            if new_x != guard.scroll_offset_x {
                guard.scroll_offset_x = new_x;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Total content height in rows (excluding header).
    pub fn content_height(&self) -> u16 {
        self.len() as u16 * ROW_HEIGHT
    }

    /// Viewport height available for data rows (excluding header).
    pub fn data_viewport_height(&self) -> u16 {
        self.inner
            .read()
            .map(|g| g.viewport_height.saturating_sub(1))
            .unwrap_or(0)
    }

    /// Set the viewport size (called by renderer).
    pub fn set_viewport(&self, width: u16, height: u16) {
        if let Ok(mut guard) = self.inner.write() {
            guard.viewport_width = width;
            guard.viewport_height = height;
            let max_y = Self::max_scroll_offset_y_inner(&guard);
            if guard.scroll_offset_y > max_y {
                guard.scroll_offset_y = max_y;
            }
            let max_x = guard.total_width().saturating_sub(width);
            if guard.scroll_offset_x > max_x {
                guard.scroll_offset_x = max_x;
            }
        }
    }

    fn max_scroll_offset_y_inner(guard: &TableInner<T>) -> u16 {
        let total_height = guard.rows.len() as u16 * ROW_HEIGHT;
        let data_viewport = guard.viewport_height.saturating_sub(1);
        total_height.saturating_sub(data_viewport)
    }

    /// Get the visible row range for the current scroll position.
    pub fn visible_row_range(&self) -> Range<usize> {
        self.inner
            .read()
            .map(|g| {
                if g.rows.is_empty() || g.viewport_height <= 1 {
                    return 0..0;
                }
                let data_viewport = g.viewport_height.saturating_sub(1);
                let start = (g.scroll_offset_y / ROW_HEIGHT) as usize;
                let end = (start + data_viewport as usize + 1).min(g.rows.len());
                start..end
            })
            .unwrap_or(0..0)
    }

    /// Map a viewport y coordinate to a row index. `y == 0` is the header.
    pub fn index_from_viewport_y(&self, y: u16) -> Option<usize> {
        if y == 0 {
            return None;
        }
        let index = (self.scroll_offset_y() + y - 1) as usize;
        (index < self.len()).then_some(index)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table has changed since the last draw.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T: TableRow> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: TableRow> Default for Table<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use super::super::item::PinSide;
    use super::super::longpress::LONG_PRESS_THRESHOLD;

    #[derive(Debug, Clone)]
    struct Row(&'static str);

    impl TableRow for Row {
        fn id(&self) -> String {
            self.0.to_string()
        }

        fn cell(&self, _key: &str) -> String {
            self.0.to_string()
        }
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name", 10).sortable(),
            Column::new("extra", "Extra", 10),
        ]
    }

    fn rows() -> Vec<Row> {
        vec![Row("a"), Row("b"), Row("c")]
    }

    #[test]
    fn test_long_press_enters_selection_mode_with_seed() {
        let table = Table::with_rows(columns(), rows());
        let start = Instant::now();

        table.press_start("b", start);
        assert_eq!(table.poll_press(start + Duration::from_millis(100)), TableAction::None);
        assert!(!table.selection_mode());

        let action = table.poll_press(start + LONG_PRESS_THRESHOLD);
        assert_eq!(action, TableAction::EnterSelection("b".to_string()));
        assert!(table.selection_mode());
        assert_eq!(table.selected_ids(), vec!["b".to_string()]);
    }

    #[test]
    fn test_short_press_never_activates_selection_mode() {
        let table = Table::with_rows(columns(), rows());
        let start = Instant::now();

        table.press_start("a", start);
        let action = table.press_end(start + Duration::from_millis(100));
        assert_eq!(action, TableAction::Activate("a".to_string()));
        assert!(!table.selection_mode());

        // Timer no longer fires after release.
        assert_eq!(table.poll_press(start + Duration::from_secs(5)), TableAction::None);
    }

    #[test]
    fn test_click_in_selection_mode_toggles() {
        let table = Table::with_rows(columns(), rows());
        table.enter_selection_mode("a");
        let start = Instant::now();

        table.press_start("b", start);
        let action = table.press_end(start + Duration::from_millis(50));
        assert_eq!(action, TableAction::Toggle("b".to_string()));
        assert_eq!(table.selected_count(), 2);
    }

    #[test]
    fn test_exit_selection_mode_clears_unconditionally() {
        let table = Table::with_rows(columns(), rows());
        table.enter_selection_mode("a");
        table.toggle_select("b");
        assert_eq!(table.selected_count(), 2);

        table.exit_selection_mode();
        assert!(!table.selection_mode());
        assert_eq!(table.selected_count(), 0);
    }

    #[test]
    fn test_toggle_ignored_outside_selection_mode() {
        let table = Table::with_rows(columns(), rows());
        assert!(!table.toggle_select("a"));
        assert_eq!(table.selected_count(), 0);
    }

    #[test]
    fn test_set_rows_clears_selection_and_clamps_cursor() {
        let table = Table::with_rows(columns(), rows());
        table.enter_selection_mode("c");
        table.cursor_down();
        table.cursor_down();
        table.cursor_down();
        assert_eq!(table.cursor(), Some(2));

        table.set_rows(vec![Row("x")]);
        assert_eq!(table.selected_count(), 0);
        assert_eq!(table.cursor(), Some(0));
    }

    #[test]
    fn test_append_rows_preserves_selection() {
        let table = Table::with_rows(columns(), rows());
        table.enter_selection_mode("a");
        table.append_rows(vec![Row("d")]);
        assert_eq!(table.selected_ids(), vec!["a".to_string()]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_toggle_sort_respects_sortable_flag() {
        let table = Table::with_rows(columns(), rows());
        assert_eq!(table.toggle_sort(1), None);
        assert_eq!(table.toggle_sort(0), Some((0, true)));
        assert_eq!(table.toggle_sort(0), Some((0, false)));
    }

    #[test]
    fn test_select_all() {
        let table = Table::with_rows(columns(), rows());
        table.enter_selection_mode("a");
        assert_eq!(table.select_all(), 2);
        assert!(table.is_all_selected());
    }

    #[test]
    fn test_sticky_layout_tracks_selection_mode() {
        let cols = vec![
            Column::new("name", "Name", 10).pinned(PinSide::Left),
            Column::new("extra", "Extra", 10),
        ];
        let table = Table::with_rows(cols, rows());
        assert_eq!(table.sticky_layout().checkbox_width, 0);

        table.enter_selection_mode("a");
        assert_eq!(
            table.sticky_layout().checkbox_width,
            super::super::sticky::CHECKBOX_COLUMN_WIDTH
        );

        table.exit_selection_mode();
        assert_eq!(table.sticky_layout().checkbox_width, 0);
    }
}
