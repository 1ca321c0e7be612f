//! Order detail page: one order's header fields, its lines, and its
//! audit trail.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use wareboard_api::model::{AuditEntry, OrderDetail};

/// State behind the Order detail screen.
pub struct OrderDetailPage {
    order_id: String,
    detail: Option<OrderDetail>,
    audit: Vec<AuditEntry>,
    error: Option<String>,
    loading: bool,
}

impl OrderDetailPage {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            detail: None,
            audit: Vec::new(),
            error: None,
            loading: true,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn set_detail(&mut self, detail: OrderDetail) {
        self.detail = Some(detail);
        self.error = None;
        self.loading = false;
    }

    pub fn set_audit(&mut self, entries: Vec<AuditEntry>) {
        self.audit = entries;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        if self.loading {
            lines.push(Line::styled(
                "Loading order...",
                Style::new().fg(Color::DarkGray),
            ));
        } else if let Some(error) = &self.error {
            lines.push(Line::styled(error.clone(), Style::new().fg(Color::Red)));
        } else if let Some(detail) = &self.detail {
            let order = &detail.order;
            lines.push(Line::styled(
                format!("Order {}", order.order_number),
                Style::new().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::raw(format!("Customer:  {}", order.customer_name)));
            lines.push(Line::raw(format!("Status:    {}", order.status)));
            lines.push(Line::raw(format!("Total:     {:.2}", order.total)));
            lines.push(Line::raw(format!(
                "Created:   {}",
                order.created_at.format("%Y-%m-%d %H:%M")
            )));
            if let Some(address) = &detail.shipping_address {
                lines.push(Line::raw(format!("Ship to:   {address}")));
            }
            if let Some(notes) = &detail.notes {
                lines.push(Line::raw(format!("Notes:     {notes}")));
            }
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("Lines ({})", detail.lines.len()),
                Style::new().add_modifier(Modifier::BOLD),
            ));
            for line in &detail.lines {
                lines.push(Line::raw(format!(
                    "  {:<14} {:>4} x {:>10.2} = {:>10.2}  {}",
                    line.sku, line.quantity, line.unit_price, line.line_total, line.description
                )));
            }

            if !self.audit.is_empty() {
                lines.push(Line::raw(""));
                lines.push(Line::styled(
                    "History",
                    Style::new().add_modifier(Modifier::BOLD),
                ));
                for entry in &self.audit {
                    let detail_text = entry.detail.as_deref().unwrap_or("");
                    lines.push(Line::raw(format!(
                        "  {}  {:<16} {:<12} {}",
                        entry.at.format("%Y-%m-%d %H:%M"),
                        entry.action,
                        entry.actor,
                        detail_text
                    )));
                }
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Esc to go back",
            Style::new().fg(Color::DarkGray),
        ));

        frame.render_widget(Paragraph::new(lines), area);
    }
}
