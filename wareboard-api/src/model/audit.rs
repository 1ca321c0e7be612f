//! Audit log models

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// One audit trail entry for an order or inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub entity_id: String,
    /// What happened ("status_changed", "line_added", ...).
    pub action: String,
    pub actor: String,
    pub at: DateTime<Utc>,
    #[serde(default)]
    pub detail: Option<String>,
}
