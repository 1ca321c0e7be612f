//! Column and row definitions for the Table widget.

use wareboard_api::model::{ColumnSetting, Record};

/// Which edge a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinSide {
    Left,
    Right,
}

/// Definition of a single table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Field key this column renders. Resolves via dot-path on dynamic rows.
    pub key: String,
    /// Header text.
    pub header: String,
    /// Width in terminal cells.
    pub width: u16,
    /// Whether header interaction toggles sorting on this column.
    pub sortable: bool,
    /// Pin this column to an edge so it stays visible under horizontal
    /// scroll.
    pub pin: Option<PinSide>,
}

impl Column {
    /// Creates a new column.
    pub fn new(key: impl Into<String>, header: impl Into<String>, width: u16) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width,
            sortable: false,
            pin: None,
        }
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Pins the column to an edge.
    pub fn pinned(mut self, side: PinSide) -> Self {
        self.pin = Some(side);
        self
    }
}

impl From<ColumnSetting> for Column {
    fn from(setting: ColumnSetting) -> Self {
        let pin = match setting.pin.as_deref() {
            Some("left") => Some(PinSide::Left),
            Some("right") => Some(PinSide::Right),
            _ => None,
        };
        Self {
            key: setting.key,
            header: setting.header,
            width: setting.width.max(1),
            sortable: setting.sortable,
            pin,
        }
    }
}

/// A row that can be displayed in a [`Table`](super::Table).
///
/// Identity is the stable `id`, never the row's position: selection keyed by
/// id survives re-sorting, and is cleared only when the row set is replaced
/// wholesale.
pub trait TableRow: Clone + Send + 'static {
    /// Stable identifier for this row.
    fn id(&self) -> String;

    /// Renders the cell value for a column key.
    fn cell(&self, key: &str) -> String;
}

/// Loosely-shaped rows render through their dot-path fields, so tables
/// driven entirely by server-stored column settings need no struct per view.
impl TableRow for Record {
    fn id(&self) -> String {
        Record::id(self).unwrap_or_default()
    }

    fn cell(&self, key: &str) -> String {
        self.display(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_setting_conversion() {
        let setting = ColumnSetting {
            key: "customer.name".to_string(),
            header: "Customer".to_string(),
            width: 24,
            sortable: true,
            pin: Some("left".to_string()),
        };
        let column = Column::from(setting);
        assert_eq!(column.key, "customer.name");
        assert!(column.sortable);
        assert_eq!(column.pin, Some(PinSide::Left));
    }

    #[test]
    fn test_zero_width_setting_is_clamped() {
        let setting = ColumnSetting {
            key: "x".to_string(),
            header: "X".to_string(),
            width: 0,
            sortable: false,
            pin: Some("top".to_string()),
        };
        let column = Column::from(setting);
        assert_eq!(column.width, 1);
        assert_eq!(column.pin, None);
    }

    #[test]
    fn test_record_rows_render_dot_paths() {
        let record: Record =
            serde_json::from_str(r#"{"id": 7, "customer": {"name": "Acme"}}"#).unwrap();
        assert_eq!(TableRow::id(&record), "7");
        assert_eq!(record.cell("customer.name"), "Acme");
        assert_eq!(record.cell("customer.missing"), "");
    }
}
