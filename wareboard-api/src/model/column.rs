//! Server-stored column settings.

use serde::Deserialize;
use serde::Serialize;

/// Column configuration for a table view, stored server-side per view name.
///
/// `key` resolves against row fields, dot-paths included
/// (`"customer.name"`), via [`Record::get_path`](super::Record::get_path)
/// for dynamic rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSetting {
    pub key: String,
    pub header: String,
    pub width: u16,
    #[serde(default)]
    pub sortable: bool,
    /// "left" or "right" to pin the column, absent otherwise.
    #[serde(default)]
    pub pin: Option<String>,
}
