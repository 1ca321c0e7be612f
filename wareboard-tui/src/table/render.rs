//! Table widget rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use super::item::{Column, PinSide, TableRow};
use super::state::Table;
use super::sticky::StickyLayout;

/// Number of placeholder rows drawn while the first page loads.
const SKELETON_ROWS: u16 = 8;

const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);
const CURSOR_STYLE: Style = Style::new().bg(Color::Blue).fg(Color::White);
const SELECTED_STYLE: Style = Style::new().fg(Color::Yellow);
const SKELETON_STYLE: Style = Style::new().fg(Color::DarkGray);
const EMPTY_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::ITALIC);

/// Render a table into the given area.
///
/// While `loading` is set and no rows are present yet, skeleton rows are
/// drawn instead of the empty-state message; once any data exists the rows
/// render normally regardless of in-flight fetches.
pub fn render_table<T: TableRow>(frame: &mut Frame, table: &Table<T>, area: Rect, loading: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    table.set_viewport(area.width, area.height);

    let columns = table.columns();
    let sticky = table.sticky_layout();
    let scroll_x = table.scroll_offset_x();
    let selection_mode = table.selection_mode();

    let header_area = Rect { height: 1, ..area };
    render_line(
        frame,
        table,
        &columns,
        &sticky,
        header_area,
        scroll_x,
        selection_mode,
        None,
    );

    let data_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };

    if table.is_empty() {
        if loading {
            render_skeleton(frame, &columns, data_area);
        } else {
            let msg = Paragraph::new("No records found").style(EMPTY_STYLE);
            let msg_area = Rect {
                y: data_area.y + data_area.height / 3,
                height: 1,
                ..data_area
            };
            frame.render_widget(msg, msg_area);
        }
        return;
    }

    let scroll_y = table.scroll_offset_y();
    for row_index in table.visible_row_range() {
        let rel_y = row_index as u16 - scroll_y;
        if rel_y >= data_area.height {
            break;
        }
        let row_area = Rect {
            x: data_area.x,
            y: data_area.y + rel_y,
            width: data_area.width,
            height: 1,
        };
        render_line(
            frame,
            table,
            &columns,
            &sticky,
            row_area,
            scroll_x,
            selection_mode,
            Some(row_index),
        );
    }

    table.clear_dirty();
}

/// Render one line of the table: the header when `row_index` is `None`,
/// otherwise the data row at that index.
///
/// The line is painted in three passes. The scrolling body goes first,
/// shifted left by the horizontal offset and clipped to the gap between the
/// frozen regions. Pinned columns and the checkbox column paint after it at
/// fixed offsets, covering whatever scrolled underneath.
#[allow(clippy::too_many_arguments)]
fn render_line<T: TableRow>(
    frame: &mut Frame,
    table: &Table<T>,
    columns: &[Column],
    sticky: &StickyLayout,
    area: Rect,
    scroll_x: u16,
    selection_mode: bool,
    row_index: Option<usize>,
) {
    let row = row_index.and_then(|i| table.row(i));
    let base_style = match row_index {
        None => HEADER_STYLE,
        Some(i) => row_style(table, &row, i),
    };

    frame.render_widget(
        Paragraph::new(" ".repeat(area.width as usize)).style(base_style),
        area,
    );

    let left_width = sticky.left_width(columns);
    let right_width = sticky.right_width(columns);
    let body_start = left_width;
    let body_end = area.width.saturating_sub(right_width);

    // Scrolling body: every unpinned column, offset by scroll_x.
    let mut col_x = 0u16;
    for (index, column) in columns.iter().enumerate() {
        if column.pin.is_some() {
            continue;
        }
        let cell_start = col_x.saturating_sub(scroll_x);
        col_x += column.width;
        if col_x <= scroll_x {
            continue;
        }
        let draw_x = body_start + cell_start;
        if draw_x >= body_end {
            break;
        }
        let clipped = column.width.min(body_end - draw_x);
        draw_cell(
            frame,
            area,
            draw_x,
            clipped,
            cell_text(table, column, index, row_index, &row),
            base_style,
        );
    }

    // Checkbox column, leftmost in selection mode.
    if selection_mode && sticky.checkbox_width > 0 {
        let text = match (row_index, &row) {
            (None, _) => String::from("  "),
            (Some(_), Some(r)) => {
                if table.is_selected(&r.id()) {
                    String::from("[x]")
                } else {
                    String::from("[ ]")
                }
            }
            _ => String::new(),
        };
        draw_cell(frame, area, 0, sticky.checkbox_width, text, base_style);
    }

    // Frozen columns paint over the body at their fixed offsets.
    for &(index, placement) in &sticky.left {
        let column = &columns[index];
        let mut text = cell_text(table, column, index, row_index, &row);
        if placement.divider {
            text = format!("│{text}");
        }
        draw_cell(frame, area, placement.offset, column.width, text, base_style);
    }
    for &(index, placement) in &sticky.right {
        let column = &columns[index];
        let mut text = cell_text(table, column, index, row_index, &row);
        if placement.divider {
            text = format!("│{text}");
        }
        let draw_x = area
            .width
            .saturating_sub(placement.offset + column.width);
        draw_cell(frame, area, draw_x, column.width, text, base_style);
    }
}

fn row_style<T: TableRow>(table: &Table<T>, row: &Option<T>, index: usize) -> Style {
    if table.cursor() == Some(index) {
        return CURSOR_STYLE;
    }
    if let Some(row) = row
        && table.is_selected(&row.id())
    {
        return SELECTED_STYLE;
    }
    Style::default()
}

fn cell_text<T: TableRow>(
    table: &Table<T>,
    column: &Column,
    index: usize,
    row_index: Option<usize>,
    row: &Option<T>,
) -> String {
    match (row_index, row) {
        (None, _) => {
            let mut header = column.header.clone();
            if let Some((sort_col, ascending)) = table.sort()
                && sort_col == index
            {
                header.push(' ');
                header.push(if ascending { '▲' } else { '▼' });
            }
            header
        }
        (Some(_), Some(row)) => row.cell(&column.key),
        _ => String::new(),
    }
}

fn draw_cell(frame: &mut Frame, line: Rect, x: u16, width: u16, text: String, style: Style) {
    if width == 0 || x >= line.width {
        return;
    }
    let width = width.min(line.width - x);
    let truncated: String = text.chars().take(width as usize).collect();
    let cell_area = Rect {
        x: line.x + x,
        y: line.y,
        width,
        height: 1,
    };
    frame.render_widget(Paragraph::new(Span::styled(truncated, style)), cell_area);
}

/// Placeholder rows shown during the initial fetch.
fn render_skeleton(frame: &mut Frame, columns: &[Column], area: Rect) {
    let rows = SKELETON_ROWS.min(area.height);
    for i in 0..rows {
        let mut x = 0u16;
        for column in columns {
            if x >= area.width {
                break;
            }
            let bar_width = column.width.saturating_sub(1).min(area.width - x);
            if bar_width > 0 {
                let bar = "░".repeat(bar_width as usize);
                let cell_area = Rect {
                    x: area.x + x,
                    y: area.y + i,
                    width: bar_width,
                    height: 1,
                };
                frame.render_widget(
                    Paragraph::new(Span::styled(bar, SKELETON_STYLE)),
                    cell_area,
                );
            }
            x += column.width;
        }
    }
}
